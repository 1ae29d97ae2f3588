use crate::{node::EntityGraphs, types::Type};
use std::collections::BTreeSet;

/// Every entity reachable from `start` through association targets.
///
/// Depth-first preorder, `start` first, each type exactly once; cycles and
/// self references terminate on the visited set. Targets that are not
/// mapped are skipped, and an unmapped `start` yields nothing.
#[must_use]
pub fn reachable(graphs: &EntityGraphs, start: &Type) -> Vec<Type> {
    let mut visited = BTreeSet::new();
    let mut order = Vec::new();
    let mut stack = vec![start];

    while let Some(ty) = stack.pop() {
        let Some(entity) = graphs.entity(ty) else {
            continue;
        };
        if !visited.insert(ty) {
            continue;
        }
        order.push(ty.clone());

        // reversed so the first association is visited first
        for assoc in entity.associations.iter().rev() {
            if !visited.contains(&assoc.target) {
                stack.push(&assoc.target);
            }
        }
    }

    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{build::build_entity_graphs, test_fixtures};

    #[test]
    fn cycle_is_visited_once_in_preorder() {
        let graphs = build_entity_graphs(&test_fixtures::library()).expect("library builds");

        let order = reachable(&graphs, &Type::parse("library.Author"));

        assert_eq!(
            order,
            vec![
                Type::parse("library.Author"),
                Type::parse("library.Book"),
                Type::parse("library.Publisher"),
            ]
        );
    }

    #[test]
    fn self_reference_terminates() {
        let graphs = build_entity_graphs(&test_fixtures::category()).expect("category builds");

        let order = reachable(&graphs, &Type::parse("shop.Category"));

        assert_eq!(order, vec![Type::parse("shop.Category")]);
    }

    #[test]
    fn unmapped_start_is_empty() {
        let graphs = build_entity_graphs(&test_fixtures::shop()).expect("shop builds");

        assert!(reachable(&graphs, &Type::parse("shop.Missing")).is_empty());
    }
}
