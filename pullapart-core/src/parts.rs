/// Oil fill plug, oil dipstick and oil drain plug. The game hands these out
/// with every engine, so pulling an engine apart must not duplicate them.
pub const CONSUMABLE_PART_IDS: [&str; 3] = ["korekOleju_1", "bagnet_1", "korek_spustowy_1"];

/// Exact match against the consumable ids.
pub fn is_consumable_id(id: &str) -> bool {
    CONSUMABLE_PART_IDS.contains(&id)
}

/// Substring match, so `bagnet_1(3)` counts as well.
pub fn contains_consumable_id(id: &str) -> bool {
    CONSUMABLE_PART_IDS
        .iter()
        .any(|consumable| id.contains(consumable))
}

/// Empty or whitespace only.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
