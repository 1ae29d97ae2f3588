use crate::{
    node::{AssociationDefinition, EmbeddableDefinition, IdDefinition, PropertyDefinition},
    types::{AssociationKind, Type},
};
use serde::{Deserialize, Serialize};

///
/// EntityDefinition
///
/// One mapped entity. Built as a skeleton (type and table) and enriched by
/// each declaration processor through the consuming `with_*` helpers.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct EntityDefinition {
    pub ty: Type,
    pub table: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<IdDefinition>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<PropertyDefinition>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub associations: Vec<AssociationDefinition>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embeddables: Vec<EmbeddableDefinition>,
}

impl EntityDefinition {
    #[must_use]
    pub fn new(ty: Type, table: impl Into<String>) -> Self {
        Self {
            ty,
            table: table.into(),
            id: None,
            properties: Vec::new(),
            associations: Vec::new(),
            embeddables: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.ty.name
    }

    //
    // functional updates
    //

    #[must_use]
    pub fn with_id(self, id: IdDefinition) -> Self {
        Self {
            id: Some(id),
            ..self
        }
    }

    #[must_use]
    pub fn with_property(mut self, property: PropertyDefinition) -> Self {
        self.properties.push(property);
        self
    }

    #[must_use]
    pub fn with_association(mut self, association: AssociationDefinition) -> Self {
        self.associations.push(association);
        self
    }

    #[must_use]
    pub fn with_embeddable(mut self, embeddable: EmbeddableDefinition) -> Self {
        self.embeddables.push(embeddable);
        self
    }

    /// Swap the association of the same name, keeping its position.
    #[must_use]
    pub fn replace_association(mut self, association: AssociationDefinition) -> Self {
        match self
            .associations
            .iter_mut()
            .find(|assoc| assoc.name == association.name)
        {
            Some(slot) => *slot = association,
            None => self.associations.push(association),
        }

        self
    }

    //
    // lookups
    //

    #[must_use]
    pub fn association(&self, name: &str) -> Option<&AssociationDefinition> {
        self.associations.iter().find(|assoc| assoc.name == name)
    }

    /// Associations of the given kinds, in declaration order.
    pub fn associations_of<'a>(
        &'a self,
        kinds: &'a [AssociationKind],
    ) -> impl Iterator<Item = &'a AssociationDefinition> + 'a {
        self.associations
            .iter()
            .filter(move |assoc| kinds.contains(&assoc.kind))
    }

    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropertyDefinition> {
        self.properties.iter().find(|prop| prop.name == name)
    }

    #[must_use]
    pub fn property_names(&self) -> Vec<&str> {
        self.properties.iter().map(|prop| prop.name.as_str()).collect()
    }

    /// Id column names, empty while the id is unresolved.
    #[must_use]
    pub fn id_columns(&self) -> Vec<&str> {
        self.id
            .as_ref()
            .map(IdDefinition::column_names)
            .unwrap_or_default()
    }

    /// First id column, the single key column of a simple id.
    #[must_use]
    pub fn id_column(&self) -> Option<&str> {
        self.id
            .as_ref()
            .and_then(|id| id.properties.first())
            .map(|prop| prop.column_name.as_str())
    }

    /// Whether an insert needs more than the generated id.
    #[must_use]
    pub fn has_assignable_properties(&self) -> bool {
        let id_assignable = self.id.as_ref().is_some_and(|id| !id.generated_value);

        id_assignable
            || !self.properties.is_empty()
            || !self.embeddables.is_empty()
            || self.associations.iter().any(|assoc| assoc.mapped)
    }

    /// Association sharing the id column, if any.
    #[must_use]
    pub fn shared_association(&self) -> Option<&AssociationDefinition> {
        let name = self.id.as_ref()?.shared_assoc.as_deref()?;

        self.association(name)
    }

    #[must_use]
    pub fn is_self_referencing(&self) -> bool {
        self.associations
            .iter()
            .any(AssociationDefinition::is_self_referential)
    }
}
