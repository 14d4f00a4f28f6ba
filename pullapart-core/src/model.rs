use serde::{Deserialize, Serialize};

/// Unique handle the game assigns to every inventory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Uid(pub u64);

/// A single part.
///
/// `normal_id` is only populated by the game for parts sitting inside an
/// engine group. It carries the canonical id while `id` holds the grouped
/// form, e.g. `piston(1)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    #[serde(default)]
    pub normal_id: String,
    pub uid: Uid,
}

impl Item {
    pub fn new(id: impl Into<String>, uid: Uid) -> Self {
        Self {
            id: id.into(),
            normal_id: String::new(),
            uid,
        }
    }

    pub fn with_normal_id(mut self, normal_id: impl Into<String>) -> Self {
        self.normal_id = normal_id.into();
        self
    }
}

/// Several parts merged into one inventory entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub uid: Uid,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Group {
    pub fn new(id: impl Into<String>, uid: Uid, items: Vec<Item>) -> Self {
        Self {
            id: id.into(),
            uid,
            items,
        }
    }
}

/// Entry of a warehouse listing. Warehouses mix loose parts, groups and
/// other stock (tyres, rims, ...) in a single list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BaseItem {
    Item(Item),
    Group(Group),
    Other { id: String, uid: Uid },
}

impl BaseItem {
    pub fn as_item_mut(&mut self) -> Option<&mut Item> {
        match self {
            BaseItem::Item(item) => Some(item),
            _ => None,
        }
    }
}

/// The player inventory: loose parts plus groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Inventory {
    pub items: Vec<Item>,
    pub groups: Vec<Group>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Warehouse {
    pub items: Vec<BaseItem>,
}

impl Warehouse {
    pub fn new(items: Vec<BaseItem>) -> Self {
        Self { items }
    }
}

/// A flat list of parts that can be scanned and pruned.
pub trait ItemCollection {
    /// Every loose part in the collection. Groups and other stock are skipped.
    fn items_mut(&mut self) -> Vec<&mut Item>;

    /// Removes the loose parts at the given positions, counted in the order
    /// `items_mut` yields them. Positions must be ascending.
    fn remove_items(&mut self, positions: &[usize]);
}

impl ItemCollection for Vec<Item> {
    fn items_mut(&mut self) -> Vec<&mut Item> {
        self.iter_mut().collect()
    }

    fn remove_items(&mut self, positions: &[usize]) {
        let mut position = 0;
        self.retain(|_| {
            let keep = positions.binary_search(&position).is_err();
            position += 1;
            keep
        });
    }
}

impl ItemCollection for Warehouse {
    fn items_mut(&mut self) -> Vec<&mut Item> {
        self.items
            .iter_mut()
            .filter_map(BaseItem::as_item_mut)
            .collect()
    }

    fn remove_items(&mut self, positions: &[usize]) {
        let mut position = 0;
        self.items.retain(|entry| match entry {
            BaseItem::Item(_) => {
                let keep = positions.binary_search(&position).is_err();
                position += 1;
                keep
            }
            _ => true,
        });
    }
}
