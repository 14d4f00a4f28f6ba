use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Category the game attaches to a group's item property.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecialGroup {
    #[default]
    None,
    /// Parts inside an engine have their id rewritten while grouped.
    Engine,
    /// Any category this tool does not act on.
    #[serde(other)]
    Other,
}

/// Resolves the special group of a group id.
pub trait SpecialGroupClassifier {
    fn classify(&self, group_id: &str) -> SpecialGroup;
}

impl<F> SpecialGroupClassifier for F
where
    F: Fn(&str) -> SpecialGroup,
{
    fn classify(&self, group_id: &str) -> SpecialGroup {
        self(group_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemProperty {
    pub special_group: SpecialGroup,
}

/// Item properties keyed by group id, as exported with a game snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemProperties(BTreeMap<String, ItemProperty>);

impl ItemProperties {
    pub fn insert(&mut self, group_id: impl Into<String>, special_group: SpecialGroup) {
        self.0
            .insert(group_id.into(), ItemProperty { special_group });
    }

    pub fn get(&self, group_id: &str) -> Option<&ItemProperty> {
        self.0.get(group_id)
    }
}

impl SpecialGroupClassifier for ItemProperties {
    fn classify(&self, group_id: &str) -> SpecialGroup {
        self.get(group_id)
            .map(|property| property.special_group)
            .unwrap_or_default()
    }
}
