use crate::{
    error::HydrationError,
    hydrate::policy::{MergePolicy, Resolved},
    model::{BaseRecord, Entity, Slot},
};
use rowgraph_schema::node::EntityDefinition;
use std::collections::BTreeMap;

///
/// CopiedReferences
///
/// Every root becomes a new owned `Entity` with its associations copied in.
/// A required single-valued association without a match is an error.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct CopiedReferences;

impl MergePolicy for CopiedReferences {
    type Handle = Entity;

    fn create(&mut self, base: BaseRecord) -> Entity {
        Entity {
            ty: base.ty,
            id: base.id,
            fields: base.fields,
            slots: BTreeMap::new(),
        }
    }

    fn back_reference(&mut self, mut child: Entity, slot: &str, parent: &Entity) -> Entity {
        child
            .slots
            .insert(slot.to_string(), Slot::One(Some(parent.clone())));

        child
    }

    fn finish(
        &mut self,
        entity: &EntityDefinition,
        base: Entity,
        resolved: Resolved<Entity>,
    ) -> Result<Entity, HydrationError> {
        let mut out = base;

        for single in resolved.singles {
            if single.target.is_none() && !single.nullable {
                return Err(HydrationError::MissingJoin {
                    entity: entity.ty.clone(),
                    association: single.association,
                    id: out.id,
                });
            }
            out.slots
                .insert(single.association, Slot::One(single.target));
        }

        for list in resolved.lists {
            out.slots.insert(list.association, Slot::Many(list.targets));
        }

        Ok(out)
    }
}
