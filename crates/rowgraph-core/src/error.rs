use crate::key::Key;
use rowgraph_schema::types::Type;
use thiserror::Error as ThisError;

///
/// HydrationError
///
/// Raised when the rows or the graph cannot produce the requested
/// instances. The row source is at fault; nothing is retried.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum HydrationError {
    #[error("type '{ty}' is not mapped as an entity")]
    EntityNotMapped { ty: Type },

    #[error("entity '{entity}' has no id and cannot be hydrated")]
    MissingId { entity: Type },

    #[error("required association '{association}' of '{entity}' ({id}) has no matching row")]
    MissingJoin {
        entity: Type,
        association: String,
        id: Key,
    },
}
