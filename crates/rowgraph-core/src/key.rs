use serde::{Deserialize, Serialize};
use std::fmt;

///
/// Key
///
/// Identity of one hydrated instance. Composite ids keep their parts in id
/// property order.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(untagged)]
#[remain::sorted]
pub enum Key {
    Composite(Vec<Self>),
    Int(i64),
    Text(String),
    Uint(u64),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Composite(parts) => {
                f.write_str("(")?;
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{part}")?;
                }
                f.write_str(")")
            }
            Self::Int(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
            Self::Uint(v) => write!(f, "{v}"),
        }
    }
}

impl From<i64> for Key {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u64> for Key {
    fn from(v: u64) -> Self {
        i64::try_from(v).map_or(Self::Uint(v), Self::Int)
    }
}

impl From<&str> for Key {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Key {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composite_display_lists_parts() {
        let key = Key::Composite(vec![Key::from("r1"), Key::from("A")]);

        assert_eq!(key.to_string(), "(r1, A)");
        assert_eq!(Key::from(7_i64).to_string(), "7");
    }

    #[test]
    fn unsigned_keys_narrow_when_they_fit() {
        assert_eq!(Key::from(7_u64), Key::from(7_i64));
        assert_eq!(Key::from(u64::MAX), Key::Uint(u64::MAX));
    }
}
