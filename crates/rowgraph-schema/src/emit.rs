//! Consumers of finished entity graphs.
//!
//! Source generators, DDL writers and ORM binders sit behind
//! [`SchemaEmitter`]; [`TableLayoutEmitter`] is the builtin one and derives
//! the physical table layout implied by a graph.

use crate::{
    error::SchemaError,
    node::{
        AssociationDefinition, EntityDefinition, EntityGraphs, IdDefinition, PropertyDefinition,
    },
    types::{AssociationKind, Type},
};
use serde::Serialize;
use std::collections::BTreeMap;

///
/// SchemaEmitter
///

pub trait SchemaEmitter {
    type Output;
    type Error;

    fn emit(&mut self, graphs: &EntityGraphs) -> Result<Self::Output, Self::Error>;
}

///
/// TableLayout
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct TableLayout {
    pub name: String,
    pub columns: Vec<ColumnLayout>,
}

impl TableLayout {
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ColumnLayout> {
        self.columns.iter().find(|col| col.name == name)
    }

    fn push(&mut self, column: ColumnLayout) {
        if self.column(&column.name).is_none() {
            self.columns.push(column);
        }
    }
}

///
/// ColumnLayout
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ColumnLayout {
    pub name: String,
    pub ty: Type,
    pub nullable: bool,
    pub primary_key: bool,
}

///
/// TableLayoutEmitter
///
/// One table per entity (id, plain, embedded and foreign-key columns) plus
/// one table per owning many-to-many join table. Converted columns use the
/// converter's database type.
///

#[derive(Debug, Default)]
pub struct TableLayoutEmitter;

impl SchemaEmitter for TableLayoutEmitter {
    type Output = BTreeMap<String, TableLayout>;
    type Error = SchemaError;

    fn emit(&mut self, graphs: &EntityGraphs) -> Result<Self::Output, Self::Error> {
        let mut tables = BTreeMap::new();

        for entity in graphs.entities() {
            let table = entity_table(graphs, entity)?;
            tables.insert(table.name.clone(), table);

            for assoc in entity.associations_of(&[AssociationKind::ManyToMany]) {
                if assoc.mapped
                    && let Some(table) = join_table(graphs, assoc)?
                {
                    tables.insert(table.name.clone(), table);
                }
            }
        }

        tracing::debug!(tables = tables.len(), "emitted table layouts");

        Ok(tables)
    }
}

fn entity_table(graphs: &EntityGraphs, entity: &EntityDefinition) -> Result<TableLayout, SchemaError> {
    let mut table = TableLayout {
        name: entity.table.clone(),
        columns: Vec::new(),
    };

    let id_props = entity.id.iter().flat_map(|id| id.properties.iter());
    for prop in id_props {
        table.push(ColumnLayout {
            name: prop.column_name.clone(),
            ty: column_type(prop),
            nullable: false,
            primary_key: true,
        });
    }

    let embedded = entity
        .embeddables
        .iter()
        .flat_map(|emb| emb.properties.iter().map(move |prop| (prop, emb.nullable)));
    let plain = entity.properties.iter().map(|prop| (prop, false));
    for (prop, owner_nullable) in plain.chain(embedded) {
        table.push(ColumnLayout {
            name: prop.column_name.clone(),
            ty: column_type(prop),
            nullable: prop.nullable || owner_nullable,
            primary_key: false,
        });
    }

    // foreign keys of single-valued associations, synthesized ones included
    for assoc in &entity.associations {
        if !assoc.kind.is_single_valued() || assoc.join_columns.is_empty() {
            continue;
        }
        let target_id = graphs.entity_id(&assoc.target).map_err(|_| target_not_found(assoc))?;

        for (column, prop) in assoc.join_columns.iter().zip(&target_id.properties) {
            table.push(ColumnLayout {
                name: column.clone(),
                ty: column_type(prop),
                nullable: assoc.nullable,
                primary_key: false,
            });
        }
    }

    Ok(table)
}

fn join_table(
    graphs: &EntityGraphs,
    assoc: &AssociationDefinition,
) -> Result<Option<TableLayout>, SchemaError> {
    let (Some(name), [source_fk, target_fk]) = (&assoc.join_table, assoc.join_columns.as_slice())
    else {
        return Ok(None);
    };

    let source_id = graphs.entity_id(&assoc.source)?;
    let target_id = graphs.entity_id(&assoc.target).map_err(|_| target_not_found(assoc))?;

    let key_column = |name: &str, id: &IdDefinition| ColumnLayout {
        name: name.to_string(),
        ty: id
            .properties
            .first()
            .map_or_else(|| id.ty.clone(), column_type),
        nullable: false,
        primary_key: true,
    };

    Ok(Some(TableLayout {
        name: name.clone(),
        columns: vec![key_column(source_fk, source_id), key_column(target_fk, target_id)],
    }))
}

fn column_type(prop: &PropertyDefinition) -> Type {
    prop.converter
        .as_ref()
        .map_or_else(|| prop.ty.clone(), |conv| conv.target_type.clone())
}

fn target_not_found(assoc: &AssociationDefinition) -> SchemaError {
    SchemaError::AssociationTargetNotFound {
        entity: assoc.source.clone(),
        association: assoc.name.clone(),
        target: assoc.target.clone(),
    }
}
