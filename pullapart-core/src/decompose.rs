use std::mem;

use tracing::{debug, warn};

use crate::classify::{SpecialGroup, SpecialGroupClassifier};
use crate::model::{Group, Item, Uid};
use crate::parts::{is_blank, is_consumable_id};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecomposeReport {
    /// Groups removed from the source list.
    pub groups_decomposed: usize,
    /// Parts appended to the destination.
    pub items_transferred: usize,
    /// Consumables left behind with their engine.
    pub items_dropped: usize,
}

/// Moves the parts of every group into `destination` and removes the emptied
/// groups.
///
/// The loop runs once per group present on entry and always works on the
/// current head of `groups`. A group is only removed once every one of its
/// parts has been either transferred or dropped. Its parts are taken out
/// before the count is checked, so a group failing the check is left in place
/// with no parts.
pub fn decompose<C>(
    groups: &mut Vec<Group>,
    destination: &mut Vec<Item>,
    classifier: &C,
) -> DecomposeReport
where
    C: SpecialGroupClassifier + ?Sized,
{
    let mut report = DecomposeReport::default();

    let group_count = groups.len();
    if group_count == 0 {
        return report;
    }

    for _ in 0..group_count {
        let Some(group) = groups.first_mut() else {
            break;
        };

        let is_engine = classifier.classify(&group.id) == SpecialGroup::Engine;
        let uid = group.uid;
        let group_items = mem::take(&mut group.items);
        let mut pending = group_items.len();

        debug!(group = %group.id, uid = uid.0, items = pending, is_engine, "pulling apart group");

        for mut item in group_items {
            if is_engine && !is_blank(&item.normal_id) {
                if is_consumable_id(&item.normal_id) {
                    debug!(part = %item.normal_id, "dropping consumable engine part");
                    report.items_dropped += 1;
                    pending -= 1;
                    continue;
                }
                item.id = mem::take(&mut item.normal_id);
            }

            destination.push(item);
            report.items_transferred += 1;
            pending -= 1;
        }

        if pending == 0 {
            remove_group(groups, uid);
        } else {
            warn!(uid = uid.0, pending, "part count mismatch, leaving emptied group in place");
        }
    }

    report.groups_decomposed = group_count - groups.len();
    report
}

fn remove_group(groups: &mut Vec<Group>, uid: Uid) {
    if let Some(index) = groups.iter().position(|group| group.uid == uid) {
        groups.remove(index);
    }
}
