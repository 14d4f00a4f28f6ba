/// The scene the game last finished loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scene {
    Garage,
    Other(String),
}

impl Scene {
    /// Seasonal garages are treated as the regular garage.
    pub fn from_name(name: &str) -> Self {
        let name = name.to_lowercase();
        match name.as_str() {
            "garage" | "christmas" | "easter" | "halloween" => Scene::Garage,
            _ => Scene::Other(name),
        }
    }

    pub fn is_garage(&self) -> bool {
        matches!(self, Scene::Garage)
    }
}

impl Default for Scene {
    fn default() -> Self {
        Scene::Other(String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::Scene;

    #[test]
    fn seasonal_scenes_are_garages() {
        for name in ["garage", "Christmas", "EASTER", "Halloween"] {
            assert!(Scene::from_name(name).is_garage(), "{name}");
        }
    }

    #[test]
    fn other_scenes_are_lowercased() {
        assert_eq!(Scene::from_name("Barn"), Scene::Other("barn".to_string()));
        assert!(!Scene::default().is_garage());
    }
}
