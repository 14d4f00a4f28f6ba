//! Pull apart every group in the player inventory, and repair part ids that
//! an older release left in their disambiguated `name(n)` form.

use thiserror::Error;

mod classify;
mod config;
mod decompose;
mod handler;
mod host;
mod keys;
mod model;
mod parts;
mod repair;
mod scene;
mod snapshot;

pub use classify::{ItemProperties, ItemProperty, SpecialGroup, SpecialGroupClassifier};
pub use config::{default_config_path, ConfigFile, PullApartConfig};
pub use decompose::{decompose, DecomposeReport};
pub use handler::{
    repair_session, KeyPressOutcome, PullApart, PullApartOutcome, RepairSummary,
    VISIBLE_WAREHOUSES,
};
pub use host::{GameHost, HostSession, Notifier, Popup, PopupLog, POPUP_TITLE};
pub use keys::KeyCode;
pub use model::{BaseItem, Group, Inventory, Item, ItemCollection, Uid, Warehouse};
pub use parts::{contains_consumable_id, is_blank, is_consumable_id, CONSUMABLE_PART_IDS};
pub use repair::{has_disambiguation_suffix, repair, repair_collection, CollectionRepair, RepairReport};
pub use scene::Scene;
pub use snapshot::GameSnapshot;

#[derive(Debug, Error)]
pub enum PullApartError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("unknown key '{0}'")]
    UnknownKey(String),
}

pub type Result<T> = std::result::Result<T, PullApartError>;
