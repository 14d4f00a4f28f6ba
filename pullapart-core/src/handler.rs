//! Key press handling: the optional one-time repair followed by pulling apart
//! every group in the player inventory.

use tracing::{debug, info};

use crate::config::{ConfigFile, PullApartConfig};
use crate::decompose::{decompose, DecomposeReport};
use crate::host::{GameHost, HostSession, Notifier, POPUP_TITLE};
use crate::keys::KeyCode;
use crate::model::ItemCollection;
use crate::repair::repair;
use crate::scene::Scene;
use crate::Result;

/// The game only shows the player this many warehouses; later ones are still
/// repaired but not reported one by one.
pub const VISIBLE_WAREHOUSES: usize = 6;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepairSummary {
    pub inventory_fixed: usize,
    /// One entry per unlocked warehouse.
    pub warehouse_fixed: Vec<usize>,
    pub deleted: usize,
}

impl RepairSummary {
    pub fn warehouse_total(&self) -> usize {
        self.warehouse_fixed.iter().sum()
    }

    pub fn changed_anything(&self) -> bool {
        self.inventory_fixed > 0 || self.warehouse_total() > 0 || self.deleted > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PullApartOutcome {
    /// A menu was open, nothing was touched.
    WindowsOpen,
    /// The inventory has not been loaded.
    NoInventory,
    Decomposed(DecomposeReport),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyPressOutcome {
    /// Not the configured key.
    Ignored,
    /// The player is typing into a text field.
    InputFocused,
    Handled {
        repair: Option<RepairSummary>,
        pull_apart: PullApartOutcome,
    },
}

/// Repairs the inventory and every warehouse of a session.
pub fn repair_session(session: &mut HostSession<'_>) -> RepairSummary {
    let mut collections: Vec<&mut dyn ItemCollection> = Vec::new();

    let has_inventory = session.inventory.is_some();
    if let Some(inventory) = session.inventory.as_deref_mut() {
        collections.push(&mut inventory.items);
    }
    for warehouse in session.warehouses.iter_mut() {
        collections.push(warehouse);
    }

    let report = repair(&mut collections);

    let mut fixed = report.fixed_per_collection.into_iter();
    let inventory_fixed = if has_inventory {
        fixed.next().unwrap_or(0)
    } else {
        0
    };
    let summary = RepairSummary {
        inventory_fixed,
        warehouse_fixed: fixed.collect(),
        deleted: report.deleted,
    };

    for (index, count) in summary
        .warehouse_fixed
        .iter()
        .enumerate()
        .take(VISIBLE_WAREHOUSES)
    {
        info!("Warehouse {} Items Fixed: {}", index + 1, count);
    }
    info!(
        "Fixed Items: Inventory: {} Warehouse: {} Deleted: {}",
        summary.inventory_fixed,
        summary.warehouse_total(),
        summary.deleted
    );

    summary
}

/// Reacts to scene loads and key presses the way the in-game plugin does.
pub struct PullApart {
    config: ConfigFile,
    scene: Scene,
}

impl PullApart {
    pub fn new(config: ConfigFile) -> Self {
        info!(path = %config.path().display(), key = %config.config().pull_apart_groups, "settings loaded");
        Self {
            config,
            scene: Scene::default(),
        }
    }

    pub fn config(&self) -> &PullApartConfig {
        self.config.config()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn on_scene_initialized(&mut self, name: &str) {
        self.scene = Scene::from_name(name);
        debug!(scene = ?self.scene, "scene initialised");
    }

    pub fn on_key_down<H, N>(
        &mut self,
        key: KeyCode,
        host: &mut H,
        notifier: &mut N,
    ) -> Result<KeyPressOutcome>
    where
        H: GameHost + ?Sized,
        N: Notifier + ?Sized,
    {
        if key != self.config.config().pull_apart_groups {
            return Ok(KeyPressOutcome::Ignored);
        }

        let mut session = host.session();
        if session.input_focused {
            return Ok(KeyPressOutcome::InputFocused);
        }

        let repair = if self.scene.is_garage() && self.config.config().fix_broken_parts {
            Some(self.fix_broken_parts(&mut session, notifier)?)
        } else {
            None
        };

        let pull_apart = pull_apart_all_groups(&mut session, notifier);

        Ok(KeyPressOutcome::Handled { repair, pull_apart })
    }

    fn fix_broken_parts<N>(
        &mut self,
        session: &mut HostSession<'_>,
        notifier: &mut N,
    ) -> Result<RepairSummary>
    where
        N: Notifier + ?Sized,
    {
        let summary = repair_session(session);

        if summary.changed_anything() {
            notifier.show_popup(POPUP_TITLE, "All Items have been fixed.");
            notifier.show_popup(POPUP_TITLE, "Setting FixBrokenParts to false.");
            self.config
                .reset_fix_broken_parts(env!("CARGO_PKG_VERSION"))?;
        }

        Ok(summary)
    }
}

fn pull_apart_all_groups<N>(session: &mut HostSession<'_>, notifier: &mut N) -> PullApartOutcome
where
    N: Notifier + ?Sized,
{
    if session.active_windows > 0 {
        notifier.show_popup(POPUP_TITLE, "Please close any open windows first.");
        return PullApartOutcome::WindowsOpen;
    }

    let Some(inventory) = session.inventory.as_deref_mut() else {
        return PullApartOutcome::NoInventory;
    };

    let group_count = inventory.groups.len();
    let report = decompose(&mut inventory.groups, &mut inventory.items, session.classifier);

    if inventory.groups.is_empty() {
        notifier.show_popup(POPUP_TITLE, &format!("{group_count} Groups Pulled Apart."));
    }

    PullApartOutcome::Decomposed(report)
}
