use std::mem;
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::model::ItemCollection;
use crate::parts::{contains_consumable_id, is_blank};

static DISAMBIGUATION_SUFFIX: OnceLock<Regex> = OnceLock::new();

fn disambiguation_suffix() -> &'static Regex {
    DISAMBIGUATION_SUFFIX
        .get_or_init(|| Regex::new(r"\([0-9]+\)").expect("valid disambiguation suffix regex"))
}

/// True when the id carries the `(n)` suffix the game appends to duplicate
/// parts.
pub fn has_disambiguation_suffix(id: &str) -> bool {
    disambiguation_suffix().is_match(id)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectionRepair {
    pub fixed: usize,
    pub deleted: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepairReport {
    /// Fixed parts, in the order the collections were passed.
    pub fixed_per_collection: Vec<usize>,
    /// Consumables deleted across every collection.
    pub deleted: usize,
}

impl RepairReport {
    pub fn total_fixed(&self) -> usize {
        self.fixed_per_collection.iter().sum()
    }

    pub fn changed_anything(&self) -> bool {
        self.deleted > 0 || self.total_fixed() > 0
    }
}

/// Repairs a single collection.
///
/// Consumables are collected first and removed once the scan is over. Parts
/// with an `(n)` suffix get their `normal_id` back as id. A suffixed part
/// with a blank `normal_id` cannot be recovered and is left alone.
pub fn repair_collection<C>(collection: &mut C) -> CollectionRepair
where
    C: ItemCollection + ?Sized,
{
    let mut outcome = CollectionRepair::default();
    let mut marked = Vec::new();

    for (position, item) in collection.items_mut().into_iter().enumerate() {
        if contains_consumable_id(&item.id) {
            marked.push(position);
            continue;
        }

        if has_disambiguation_suffix(&item.id) && !is_blank(&item.normal_id) {
            debug!(from = %item.id, to = %item.normal_id, "restoring part id");
            item.id = mem::take(&mut item.normal_id);
            outcome.fixed += 1;
        }
    }

    if !marked.is_empty() {
        collection.remove_items(&marked);
        outcome.deleted = marked.len();
    }

    outcome
}

/// Repairs every collection in turn.
pub fn repair(collections: &mut [&mut dyn ItemCollection]) -> RepairReport {
    let mut report = RepairReport::default();

    for collection in collections.iter_mut() {
        let outcome = repair_collection(&mut **collection);
        report.fixed_per_collection.push(outcome.fixed);
        report.deleted += outcome.deleted;
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BaseItem, Group, Item, Uid, Warehouse};

    #[test]
    fn suffix_pattern_needs_digits_in_parentheses() {
        assert!(has_disambiguation_suffix("piston(2)"));
        assert!(has_disambiguation_suffix("piston(12)_v2"));
        assert!(!has_disambiguation_suffix("piston()"));
        assert!(!has_disambiguation_suffix("piston(a)"));
        assert!(!has_disambiguation_suffix("piston_2"));
    }

    #[test]
    fn suffixed_ids_are_restored() {
        let mut items = vec![
            Item::new("partX(2)", Uid(1)).with_normal_id("partX"),
            Item::new("partY(2)", Uid(2)),
            Item::new("partZ", Uid(3)).with_normal_id("partZ"),
        ];

        let outcome = repair_collection(&mut items);

        assert_eq!(outcome, CollectionRepair { fixed: 1, deleted: 0 });
        assert_eq!(items[0], Item::new("partX", Uid(1)));
        assert_eq!(items[1], Item::new("partY(2)", Uid(2)));
        assert_eq!(items[2], Item::new("partZ", Uid(3)).with_normal_id("partZ"));
    }

    #[test]
    fn consumables_are_deleted_without_restoring() {
        let mut items = vec![
            Item::new("bagnet_1(3)", Uid(1)).with_normal_id("bagnet_1"),
            Item::new("korek_spustowy_1", Uid(2)),
            Item::new("piston", Uid(3)),
        ];

        let outcome = repair_collection(&mut items);

        assert_eq!(outcome, CollectionRepair { fixed: 0, deleted: 2 });
        assert_eq!(items, vec![Item::new("piston", Uid(3))]);
    }

    #[test]
    fn shared_uid_does_not_delete_the_neighbour() {
        let mut items = vec![Item::new("bagnet_1", Uid(1)), Item::new("piston", Uid(1))];

        let outcome = repair_collection(&mut items);

        assert_eq!(outcome, CollectionRepair { fixed: 0, deleted: 1 });
        assert_eq!(items, vec![Item::new("piston", Uid(1))]);
    }

    #[test]
    fn shared_uid_in_warehouse_keeps_the_part() {
        let mut warehouse = Warehouse::new(vec![
            BaseItem::Item(Item::new("rod", Uid(5))),
            BaseItem::Other {
                id: "rim_1".to_string(),
                uid: Uid(5),
            },
            BaseItem::Item(Item::new("korekOleju_1(2)", Uid(5))),
        ]);

        let outcome = repair_collection(&mut warehouse);

        assert_eq!(outcome.deleted, 1);
        assert_eq!(warehouse.items.len(), 2);
        assert_eq!(warehouse.items[0], BaseItem::Item(Item::new("rod", Uid(5))));
    }

    #[test]
    fn warehouses_only_touch_loose_parts() {
        let grouped = Group::new(
            "engine_v6",
            Uid(10),
            vec![Item::new("piston(1)", Uid(11)).with_normal_id("piston")],
        );
        let mut warehouse = Warehouse::new(vec![
            BaseItem::Item(Item::new("rod(4)", Uid(1)).with_normal_id("rod")),
            BaseItem::Group(grouped.clone()),
            BaseItem::Item(Item::new("korekOleju_1", Uid(2))),
        ]);

        let outcome = repair_collection(&mut warehouse);

        assert_eq!(outcome, CollectionRepair { fixed: 1, deleted: 1 });
        assert_eq!(
            warehouse.items,
            vec![
                BaseItem::Item(Item::new("rod", Uid(1))),
                BaseItem::Group(grouped),
            ]
        );
    }

    #[test]
    fn report_counts_each_collection() {
        let mut inventory = vec![
            Item::new("a(1)", Uid(1)).with_normal_id("a"),
            Item::new("bagnet_1", Uid(2)),
        ];
        let mut first = Warehouse::new(vec![BaseItem::Item(
            Item::new("b(1)", Uid(3)).with_normal_id("b"),
        )]);
        let mut second = Warehouse::new(vec![
            BaseItem::Item(Item::new("c(1)", Uid(4)).with_normal_id("c")),
            BaseItem::Item(Item::new("d(9)", Uid(5)).with_normal_id("d")),
            BaseItem::Item(Item::new("korekOleju_1(2)", Uid(6))),
        ]);

        let report = repair(&mut [
            &mut inventory as &mut dyn ItemCollection,
            &mut first,
            &mut second,
        ]);

        assert_eq!(report.fixed_per_collection, vec![1, 1, 2]);
        assert_eq!(report.deleted, 2);
        assert_eq!(report.total_fixed(), 4);
        assert!(report.changed_anything());
    }

    #[test]
    fn second_run_finds_nothing() {
        let mut inventory = vec![
            Item::new("a(1)", Uid(1)).with_normal_id("a"),
            Item::new("b(1)", Uid(2)),
            Item::new("korek_spustowy_1", Uid(3)),
        ];

        let first = repair(&mut [&mut inventory as &mut dyn ItemCollection]);
        let second = repair(&mut [&mut inventory as &mut dyn ItemCollection]);

        assert!(first.changed_anything());
        assert_eq!(second.fixed_per_collection, vec![0]);
        assert_eq!(second.deleted, 0);
    }

    #[test]
    fn empty_collections_report_zero() {
        let mut inventory: Vec<Item> = Vec::new();
        let mut warehouse = Warehouse::default();

        let report = repair(&mut [&mut inventory as &mut dyn ItemCollection, &mut warehouse]);

        assert_eq!(report.fixed_per_collection, vec![0, 0]);
        assert_eq!(report.deleted, 0);
        assert!(!report.changed_anything());
    }
}
