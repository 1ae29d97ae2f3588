//! Raw declarations handed over by a schema supplier.
//!
//! These mirror what a source-level mapping (attributes, struct tags, config
//! files) states about each entity, before any resolution happens.

use crate::types::{AssociationKind, EnumEncoding, Type};
use serde::{Deserialize, Serialize};

///
/// SchemaDeclarations
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct SchemaDeclarations {
    pub entities: Vec<EntityDeclaration>,
    pub embeddables: Vec<EmbeddableTypeDeclaration>,
    pub converters: Vec<ConverterDeclaration>,
}

impl SchemaDeclarations {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn entity(mut self, entity: EntityDeclaration) -> Self {
        self.entities.push(entity);
        self
    }

    #[must_use]
    pub fn embeddable_type(mut self, embeddable: EmbeddableTypeDeclaration) -> Self {
        self.embeddables.push(embeddable);
        self
    }

    #[must_use]
    pub fn converter(mut self, converter: ConverterDeclaration) -> Self {
        self.converters.push(converter);
        self
    }

    #[must_use]
    pub fn find_embeddable(&self, ty: &Type) -> Option<&EmbeddableTypeDeclaration> {
        self.embeddables.iter().find(|decl| &decl.ty == ty)
    }

    #[must_use]
    pub fn find_converter(&self, ty: &Type) -> Option<&ConverterDeclaration> {
        self.converters.iter().find(|decl| &decl.ty == ty)
    }
}

///
/// EntityDeclaration
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct EntityDeclaration {
    pub ty: Type,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<IdDeclaration>,

    #[serde(default)]
    pub properties: Vec<PropertyDeclaration>,

    #[serde(default)]
    pub associations: Vec<AssociationDeclaration>,

    #[serde(default)]
    pub embedded: Vec<EmbeddedDeclaration>,
}

impl EntityDeclaration {
    #[must_use]
    pub fn new(ty: impl AsRef<str>) -> Self {
        Self {
            ty: Type::parse(ty.as_ref()),
            table: None,
            id: None,
            properties: Vec::new(),
            associations: Vec::new(),
            embedded: Vec::new(),
        }
    }

    #[must_use]
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    #[must_use]
    pub fn id(mut self, id: IdDeclaration) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn property(mut self, property: PropertyDeclaration) -> Self {
        self.properties.push(property);
        self
    }

    #[must_use]
    pub fn association(mut self, association: AssociationDeclaration) -> Self {
        self.associations.push(association);
        self
    }

    #[must_use]
    pub fn embedded(mut self, embedded: EmbeddedDeclaration) -> Self {
        self.embedded.push(embedded);
        self
    }
}

///
/// IdDeclaration
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IdDeclaration {
    Single {
        property: PropertyDeclaration,

        #[serde(default)]
        generated: bool,
    },

    /// Composite key made of the fields of an embeddable type.
    Embedded {
        name: String,
        embeddable: Type,

        #[serde(default)]
        nullable: bool,

        #[serde(default)]
        generated: bool,

        #[serde(default)]
        overrides: Vec<AttributeOverride>,
    },
}

impl IdDeclaration {
    #[must_use]
    pub const fn single(property: PropertyDeclaration) -> Self {
        Self::Single {
            property,
            generated: false,
        }
    }

    #[must_use]
    pub fn embedded(name: impl Into<String>, embeddable: impl AsRef<str>) -> Self {
        Self::Embedded {
            name: name.into(),
            embeddable: Type::parse(embeddable.as_ref()),
            nullable: false,
            generated: false,
            overrides: Vec::new(),
        }
    }

    /// Mark the id as database-generated.
    #[must_use]
    pub fn generated(self) -> Self {
        match self {
            Self::Single { property, .. } => Self::Single {
                property,
                generated: true,
            },
            Self::Embedded {
                name,
                embeddable,
                nullable,
                overrides,
                ..
            } => Self::Embedded {
                name,
                embeddable,
                nullable,
                generated: true,
                overrides,
            },
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Single { property, .. } => &property.name,
            Self::Embedded { name, .. } => name,
        }
    }
}

///
/// PropertyDeclaration
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PropertyDeclaration {
    pub name: String,
    pub ty: Type,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,

    #[serde(default)]
    pub nullable: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub converter: Option<Type>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enumerated: Option<EnumEncoding>,
}

impl PropertyDeclaration {
    #[must_use]
    pub fn new(name: impl Into<String>, ty: impl AsRef<str>) -> Self {
        Self {
            name: name.into(),
            ty: Type::parse(ty.as_ref()),
            column: None,
            nullable: false,
            converter: None,
            enumerated: None,
        }
    }

    #[must_use]
    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    #[must_use]
    pub fn converter(mut self, converter: impl AsRef<str>) -> Self {
        self.converter = Some(Type::parse(converter.as_ref()));
        self
    }

    #[must_use]
    pub const fn enumerated(mut self, encoding: EnumEncoding) -> Self {
        self.enumerated = Some(encoding);
        self
    }

    /// Column override or the field name itself.
    #[must_use]
    pub fn column_name(&self) -> &str {
        self.column.as_deref().unwrap_or(&self.name)
    }
}

///
/// AssociationDeclaration
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct AssociationDeclaration {
    pub name: String,
    pub kind: AssociationKind,
    pub target: Type,

    #[serde(default)]
    pub join_columns: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_table: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapped_by: Option<String>,

    #[serde(default)]
    pub nullable: bool,
}

impl AssociationDeclaration {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: AssociationKind, target: impl AsRef<str>) -> Self {
        Self {
            name: name.into(),
            kind,
            target: Type::parse(target.as_ref()),
            join_columns: Vec::new(),
            join_table: None,
            mapped_by: None,
            nullable: false,
        }
    }

    #[must_use]
    pub fn many_to_one(name: impl Into<String>, target: impl AsRef<str>) -> Self {
        Self::new(name, AssociationKind::ManyToOne, target)
    }

    #[must_use]
    pub fn one_to_many(name: impl Into<String>, target: impl AsRef<str>) -> Self {
        Self::new(name, AssociationKind::OneToMany, target)
    }

    #[must_use]
    pub fn one_to_one(name: impl Into<String>, target: impl AsRef<str>) -> Self {
        Self::new(name, AssociationKind::OneToOne, target)
    }

    #[must_use]
    pub fn many_to_many(name: impl Into<String>, target: impl AsRef<str>) -> Self {
        Self::new(name, AssociationKind::ManyToMany, target)
    }

    #[must_use]
    pub fn join_column(mut self, column: impl Into<String>) -> Self {
        self.join_columns.push(column.into());
        self
    }

    #[must_use]
    pub fn join_table(mut self, table: impl Into<String>) -> Self {
        self.join_table = Some(table.into());
        self
    }

    #[must_use]
    pub fn mapped_by(mut self, property: impl Into<String>) -> Self {
        self.mapped_by = Some(property.into());
        self
    }

    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }
}

///
/// EmbeddedDeclaration
///
/// Value-object property flattened into its owner's columns.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct EmbeddedDeclaration {
    pub property: String,
    pub embeddable: Type,

    #[serde(default)]
    pub nullable: bool,

    #[serde(default)]
    pub overrides: Vec<AttributeOverride>,
}

impl EmbeddedDeclaration {
    #[must_use]
    pub fn new(property: impl Into<String>, embeddable: impl AsRef<str>) -> Self {
        Self {
            property: property.into(),
            embeddable: Type::parse(embeddable.as_ref()),
            nullable: false,
            overrides: Vec::new(),
        }
    }

    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    #[must_use]
    pub fn with_override(mut self, name: impl Into<String>, column: impl Into<String>) -> Self {
        self.overrides.push(AttributeOverride::new(name, column));
        self
    }
}

///
/// AttributeOverride
/// renames the column of one embeddable field
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct AttributeOverride {
    pub name: String,
    pub column: String,
}

impl AttributeOverride {
    #[must_use]
    pub fn new(name: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column: column.into(),
        }
    }
}

///
/// EmbeddableTypeDeclaration
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct EmbeddableTypeDeclaration {
    pub ty: Type,
    pub fields: Vec<PropertyDeclaration>,
}

impl EmbeddableTypeDeclaration {
    #[must_use]
    pub fn new(ty: impl AsRef<str>, fields: Vec<PropertyDeclaration>) -> Self {
        Self {
            ty: Type::parse(ty.as_ref()),
            fields,
        }
    }
}

///
/// ConverterDeclaration
///
/// Bidirectional value/column conversion. `database_column` is the
/// column-facing type; a converter without one cannot be resolved.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ConverterDeclaration {
    pub ty: Type,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_column: Option<Type>,

    #[serde(default)]
    pub is_object: bool,
}

impl ConverterDeclaration {
    #[must_use]
    pub fn new(ty: impl AsRef<str>, database_column: impl AsRef<str>) -> Self {
        Self {
            ty: Type::parse(ty.as_ref()),
            database_column: Some(Type::parse(database_column.as_ref())),
            is_object: false,
        }
    }
}
