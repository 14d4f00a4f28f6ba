use crate::classify::SpecialGroupClassifier;
use crate::model::{Inventory, Warehouse};

pub const POPUP_TITLE: &str = "Pull Apart";

/// Everything a key press needs from the game, borrowed at once.
pub struct HostSession<'a> {
    /// `None` until the player inventory has been loaded.
    pub inventory: Option<&'a mut Inventory>,
    /// Every unlocked warehouse, in the order the game lists them.
    pub warehouses: &'a mut [Warehouse],
    pub classifier: &'a dyn SpecialGroupClassifier,
    pub active_windows: usize,
    pub input_focused: bool,
}

pub trait GameHost {
    fn session(&mut self) -> HostSession<'_>;
}

pub trait Notifier {
    fn show_popup(&mut self, title: &str, message: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Popup {
    pub title: String,
    pub message: String,
}

/// Keeps popups in the order they were raised.
#[derive(Debug, Clone, Default)]
pub struct PopupLog {
    popups: Vec<Popup>,
}

impl PopupLog {
    pub fn popups(&self) -> &[Popup] {
        &self.popups
    }

    pub fn messages(&self) -> Vec<&str> {
        self.popups
            .iter()
            .map(|popup| popup.message.as_str())
            .collect()
    }
}

impl Notifier for PopupLog {
    fn show_popup(&mut self, title: &str, message: &str) {
        self.popups.push(Popup {
            title: title.to_string(),
            message: message.to_string(),
        });
    }
}
