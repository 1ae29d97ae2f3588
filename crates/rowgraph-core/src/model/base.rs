use crate::{key::Key, row::Row, value::Value};
use rowgraph_schema::{
    node::{EntityDefinition, IdDefinition, PropertyDefinition},
    types::Type,
};
use std::collections::BTreeMap;

///
/// BaseRecord
///
/// Non-association fields of one instance, read from the first row that
/// carries its id.
///

#[derive(Clone, Debug, PartialEq)]
pub struct BaseRecord {
    pub ty: Type,
    pub id: Key,
    pub fields: BTreeMap<String, Value>,
}

impl BaseRecord {
    /// Materialize id, plain and embedded fields of `entity` from `row`.
    #[must_use]
    pub fn read(entity: &EntityDefinition, row: &Row, id: Key) -> Self {
        let table = entity.table.as_str();
        let mut fields = BTreeMap::new();

        if let Some(id_def) = &entity.id {
            fields.insert(id_def.name.clone(), read_id(table, id_def, row));
        }

        for prop in &entity.properties {
            fields.insert(prop.name.clone(), read_column(table, prop, row));
        }

        for emb in &entity.embeddables {
            let values = read_group(table, &emb.properties, row);
            let value = if emb.nullable && values.values().all(Value::is_null) {
                Value::Null
            } else {
                Value::Embedded(values)
            };
            fields.insert(emb.property_name.clone(), value);
        }

        Self {
            ty: entity.ty.clone(),
            id,
            fields,
        }
    }
}

fn read_id(table: &str, id: &IdDefinition, row: &Row) -> Value {
    match id.properties.as_slice() {
        [prop] if !id.embedded => read_column(table, prop, row),
        props => Value::Embedded(read_group(table, props, row)),
    }
}

fn read_group(table: &str, props: &[PropertyDefinition], row: &Row) -> BTreeMap<String, Value> {
    props
        .iter()
        .map(|prop| (prop.name.clone(), read_column(table, prop, row)))
        .collect()
}

fn read_column(table: &str, prop: &PropertyDefinition, row: &Row) -> Value {
    row.get(table, &prop.column_name)
        .cloned()
        .unwrap_or(Value::Null)
}
