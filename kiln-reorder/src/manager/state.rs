//! Collection state and order planning
//!
//! Planning is pure: given the current items it yields the next order (or
//! why there is none). The manager applies a plan under its state lock.

use std::collections::HashSet;

use crate::criterion::SortCriterion;
use crate::error::InvalidRequest;
use crate::item::Sortable;

pub(super) struct CollectionState<T: Sortable> {
    pub(super) items: Vec<T>,
    /// Last committed order; `None` right after (re)initialization
    pub(super) checkpoint: Option<Vec<T>>,
    pub(super) syncing: bool,
    /// Bumped on replace and on reset-while-syncing; an in-flight commit from
    /// an older generation must not touch the collection
    pub(super) generation: u64,
    pub(super) drag: Option<DragState<T>>,
}

pub(super) struct DragState<T: Sortable> {
    pub(super) id: T::Id,
    pub(super) origin: usize,
    pub(super) snapshot: Vec<T>,
}

impl<T: Sortable> CollectionState<T> {
    pub(super) fn new(items: Vec<T>) -> Self {
        Self {
            items: dedup_by_id(items),
            checkpoint: None,
            syncing: false,
            generation: 0,
            drag: None,
        }
    }

    pub(super) fn reinitialize(&mut self, items: Vec<T>) {
        self.items = dedup_by_id(items);
        self.checkpoint = None;
        self.syncing = false;
        self.drag = None;
        self.generation += 1;
    }
}

/// Outcome of planning a request against the current order
pub(super) enum Plan<T> {
    Apply(Vec<T>),
    Unchanged,
    Invalid(InvalidRequest),
}

pub(super) fn index_of<T: Sortable>(items: &[T], id: &T::Id) -> Option<usize> {
    items.iter().position(|item| item.id() == id)
}

/// Remove at `from`, reinsert at `to`; items in between shift by one
pub(super) fn plan_move<T: Sortable>(items: &[T], from: usize, to: usize) -> Plan<T> {
    let len = items.len();
    if from >= len {
        return Plan::Invalid(InvalidRequest::IndexOutOfRange { index: from, len });
    }
    if to >= len {
        return Plan::Invalid(InvalidRequest::IndexOutOfRange { index: to, len });
    }
    if from == to {
        return Plan::Unchanged;
    }

    let mut next = items.to_vec();
    let moved = next.remove(from);
    next.insert(to, moved);
    Plan::Apply(next)
}

pub(super) fn plan_move_item<T: Sortable>(items: &[T], id: &T::Id, to: usize) -> Plan<T> {
    match index_of(items, id) {
        Some(from) => plan_move(items, from, to),
        None => Plan::Invalid(InvalidRequest::UnknownItem(format!("{:?}", id))),
    }
}

/// Move by a signed step; stepping past either end is a no-op
pub(super) fn plan_step<T: Sortable>(items: &[T], id: &T::Id, forward: bool) -> Plan<T> {
    let Some(from) = index_of(items, id) else {
        return Plan::Invalid(InvalidRequest::UnknownItem(format!("{:?}", id)));
    };
    let to = if forward {
        if from + 1 >= items.len() {
            return Plan::Unchanged;
        }
        from + 1
    } else {
        if from == 0 {
            return Plan::Unchanged;
        }
        from - 1
    };
    plan_move(items, from, to)
}

pub(super) fn plan_sort<T: Sortable>(items: &[T], criterion: SortCriterion) -> Plan<T> {
    let mut next = items.to_vec();
    criterion.sort(&mut next);
    if same_identity_order(items, &next) {
        Plan::Unchanged
    } else {
        Plan::Apply(next)
    }
}

pub(super) fn same_identity_order<T: Sortable>(a: &[T], b: &[T]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.id() == y.id())
}

/// `next` holds exactly the ids of `current`, each once
pub(super) fn is_permutation<T: Sortable>(current: &[T], next: &[T]) -> bool {
    if current.len() != next.len() {
        return false;
    }
    let known: HashSet<&T::Id> = current.iter().map(Sortable::id).collect();
    let mut seen = HashSet::with_capacity(next.len());
    next.iter()
        .all(|item| known.contains(item.id()) && seen.insert(item.id()))
}

fn dedup_by_id<T: Sortable>(items: Vec<T>) -> Vec<T> {
    let mut seen = HashSet::with_capacity(items.len());
    let total = items.len();
    let unique: Vec<T> = items
        .into_iter()
        .filter(|item| seen.insert(item.id().clone()))
        .collect();
    if unique.len() != total {
        tracing::warn!(
            dropped = total - unique.len(),
            "Duplicate ids in supplied collection, keeping first occurrence"
        );
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Tile(char);

    impl Sortable for Tile {
        type Id = char;

        fn id(&self) -> &char {
            &self.0
        }
    }

    fn tiles(s: &str) -> Vec<Tile> {
        s.chars().map(Tile).collect()
    }

    fn applied(plan: Plan<Tile>) -> String {
        match plan {
            Plan::Apply(next) => next.iter().map(|t| t.0).collect(),
            Plan::Unchanged => panic!("expected Apply, got Unchanged"),
            Plan::Invalid(reason) => panic!("expected Apply, got Invalid({reason})"),
        }
    }

    #[test]
    fn test_plan_move_shifts_intermediate_items() {
        assert_eq!(applied(plan_move(&tiles("ABCD"), 0, 2)), "BCAD");
        assert_eq!(applied(plan_move(&tiles("ABCD"), 3, 0)), "DABC");
        assert_eq!(applied(plan_move(&tiles("ABCD"), 1, 3)), "ACDB");
    }

    #[test]
    fn test_plan_move_rejects_out_of_range() {
        assert!(matches!(
            plan_move(&tiles("ABC"), 3, 0),
            Plan::Invalid(InvalidRequest::IndexOutOfRange { index: 3, len: 3 })
        ));
        assert!(matches!(
            plan_move(&tiles("ABC"), 0, 5),
            Plan::Invalid(InvalidRequest::IndexOutOfRange { index: 5, len: 3 })
        ));
        assert!(matches!(plan_move(&tiles(""), 0, 0), Plan::Invalid(_)));
    }

    #[test]
    fn test_plan_move_same_index_is_unchanged() {
        assert!(matches!(plan_move(&tiles("ABC"), 1, 1), Plan::Unchanged));
    }

    #[test]
    fn test_plan_step_at_boundaries() {
        let items = tiles("ABC");
        assert!(matches!(plan_step(&items, &'C', true), Plan::Unchanged));
        assert!(matches!(plan_step(&items, &'A', false), Plan::Unchanged));
        assert_eq!(applied(plan_step(&items, &'A', true)), "BAC");
        assert_eq!(applied(plan_step(&items, &'C', false)), "ACB");
        assert!(matches!(
            plan_step(&items, &'Z', true),
            Plan::Invalid(InvalidRequest::UnknownItem(_))
        ));
    }

    #[test]
    fn test_is_permutation() {
        assert!(is_permutation(&tiles("ABC"), &tiles("CAB")));
        assert!(!is_permutation(&tiles("ABC"), &tiles("AB")));
        assert!(!is_permutation(&tiles("ABC"), &tiles("AAB")));
        assert!(!is_permutation(&tiles("ABC"), &tiles("ABD")));
    }

    #[test]
    fn test_new_state_drops_duplicate_ids() {
        let state = CollectionState::new(tiles("ABAC"));
        assert_eq!(state.items, tiles("ABC"));
        assert!(state.checkpoint.is_none());
        assert!(!state.syncing);
    }
}
