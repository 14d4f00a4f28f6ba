use std::fs::{self, File};
use std::io::{BufReader, Read, Write};
use std::path::Path;

use flate2::{read::GzDecoder, write::GzEncoder, Compression};
use serde::{Deserialize, Serialize};

use crate::classify::ItemProperties;
use crate::host::{GameHost, HostSession};
use crate::model::{Inventory, Warehouse};
use crate::Result;

/// State exported from a running game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSnapshot {
    pub scene: String,
    pub active_windows: usize,
    pub input_focused: bool,
    pub inventory: Option<Inventory>,
    pub warehouses: Vec<Warehouse>,
    pub item_properties: ItemProperties,
}

fn is_gzip(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or(false)
}

impl GameSnapshot {
    /// Reads a JSON snapshot. Files ending in `.gz` are gunzipped first.
    pub fn load(path: &Path) -> Result<Self> {
        let file = BufReader::new(File::open(path)?);
        let mut reader: Box<dyn Read> = if is_gzip(path) {
            Box::new(GzDecoder::new(file))
        } else {
            Box::new(file)
        };
        let mut data = String::new();
        reader.read_to_string(&mut data)?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        if is_gzip(path) {
            let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(json.as_bytes())?;
            fs::write(path, encoder.finish()?)?;
        } else {
            fs::write(path, json)?;
        }
        Ok(())
    }
}

impl GameHost for GameSnapshot {
    fn session(&mut self) -> HostSession<'_> {
        HostSession {
            inventory: self.inventory.as_mut(),
            warehouses: &mut self.warehouses,
            classifier: &self.item_properties,
            active_windows: self.active_windows,
            input_focused: self.input_focused,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{SpecialGroup, SpecialGroupClassifier};
    use crate::model::{BaseItem, Group, Item, Uid};

    fn sample() -> GameSnapshot {
        let mut item_properties = ItemProperties::default();
        item_properties.insert("engine_v6", SpecialGroup::Engine);
        GameSnapshot {
            scene: "garage".to_string(),
            inventory: Some(Inventory {
                items: vec![Item::new("spark", Uid(1))],
                groups: vec![Group::new(
                    "engine_v6",
                    Uid(2),
                    vec![Item::new("piston(1)", Uid(3)).with_normal_id("piston")],
                )],
            }),
            warehouses: vec![Warehouse::new(vec![BaseItem::Item(Item::new("rod", Uid(4)))])],
            item_properties,
            ..GameSnapshot::default()
        }
    }

    #[test]
    fn plain_and_gzip_files_load_back() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = sample();

        for name in ["save.json", "save.json.gz"] {
            let path = dir.path().join(name);
            snapshot.save(&path).unwrap();
            assert_eq!(GameSnapshot::load(&path).unwrap(), snapshot, "{name}");
        }

        let compressed = fs::read(dir.path().join("save.json.gz")).unwrap();
        assert_eq!(&compressed[..2], &[0x1f, 0x8b]);
    }

    #[test]
    fn missing_sections_default() {
        let snapshot: GameSnapshot = serde_json::from_str(r#"{"scene": "Barn"}"#).unwrap();
        assert!(snapshot.inventory.is_none());
        assert!(snapshot.warehouses.is_empty());
        assert_eq!(snapshot.active_windows, 0);
    }

    #[test]
    fn session_classifies_from_item_properties() {
        let mut snapshot = sample();
        let session = snapshot.session();

        assert_eq!(session.classifier.classify("engine_v6"), SpecialGroup::Engine);
        assert_eq!(session.classifier.classify("unknown"), SpecialGroup::None);
        assert_eq!(session.warehouses.len(), 1);
        assert!(session.inventory.is_some());
    }
}
