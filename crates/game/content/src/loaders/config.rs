//! Engine tuning loader.

use std::path::Path;

use hiker_core::GameConfig;

use crate::ContentLoadError;
use crate::loaders::{LoadResult, document_name, read_file};

/// Loader for engine tuning from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a [`GameConfig`] from a TOML file. Omitted tables and keys keep
    /// their defaults.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(path, &content)
    }

    pub(crate) fn parse(path: &Path, content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig =
            toml::from_str(content).map_err(|error| ContentLoadError::Parse {
                document: document_name(path),
                field: None,
                message: error.to_string(),
            })?;

        validate(path, &config)?;
        Ok(config)
    }
}

fn validate(path: &Path, config: &GameConfig) -> LoadResult<()> {
    let invalid = |field: &str, reason: &str| ContentLoadError::Invalid {
        document: document_name(path),
        record: "config".to_owned(),
        field: field.to_owned(),
        reason: reason.to_owned(),
    };

    let damping = config.events.damping;
    if !(0.0..=1.0).contains(&damping) {
        return Err(invalid("events.damping", "must be within 0.0..=1.0"));
    }
    if config.events.bands.edge_max > config.events.bands.mid_max {
        return Err(invalid(
            "events.bands.edge_max",
            "must not exceed events.bands.mid_max",
        ));
    }
    if let Some((band, category, _)) = config
        .events
        .category_weights
        .cells()
        .find(|(_, _, value)| !value.is_finite() || *value < 0.0)
    {
        return Err(invalid(
            &format!("events.category_weights.{band}.{category}"),
            "must be finite and non-negative",
        ));
    }
    if config
        .hunger
        .cap_multipliers
        .iter()
        .any(|value| !value.is_finite() || *value < 0.0)
    {
        return Err(invalid(
            "hunger.cap_multipliers",
            "entries must be finite and non-negative",
        ));
    }
    if !config.hunger.base_stamina_cap.is_finite() || config.hunger.base_stamina_cap < 0.0 {
        return Err(invalid(
            "hunger.base_stamina_cap",
            "must be finite and non-negative",
        ));
    }
    if config
        .stability
        .multipliers
        .iter()
        .any(|value| !value.is_finite() || *value < 0.0)
    {
        return Err(invalid(
            "stability.multipliers",
            "entries must be finite and non-negative",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_keeps_defaults() {
        let config = ConfigLoader::parse(Path::new("config.toml"), "").unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn partial_tables_override_defaults() {
        let toml = r#"
            [events]
            damping = 0.25
            forage_safety_net = 5

            [events.category_weights.deep]
            hazard = 2.0
        "#;
        let config = ConfigLoader::parse(Path::new("config.toml"), toml).unwrap();
        assert_eq!(config.events.damping, 0.25);
        assert_eq!(config.events.forage_safety_net, 5);
        assert_eq!(config.events.history_capacity, 3);
        assert_eq!(config.events.category_weights.deep.hazard, 2.0);
        assert_eq!(config.events.category_weights.deep.forage, 0.5);
    }

    #[test]
    fn partial_band_keeps_its_own_defaults() {
        let toml = "[events.category_weights.edge]\nforage = 0.25\n";
        let weights = ConfigLoader::parse(Path::new("config.toml"), toml)
            .unwrap()
            .events
            .category_weights;
        let defaults = GameConfig::default().events.category_weights;

        assert_eq!(weights.edge.forage, 0.25);
        assert_eq!(weights.edge.flavor, 1.3);
        assert_eq!(weights.edge.hazard, 0.5);
        assert_eq!(weights.mid, defaults.mid);
        assert_eq!(weights.deep, defaults.deep);
    }

    #[test]
    fn negative_or_nan_category_weight_is_rejected() {
        for (toml, field) in [
            (
                "[events.category_weights.edge]\nforage = -1.0\n",
                "events.category_weights.edge.forage",
            ),
            (
                "[events.category_weights.deep]\nhazard = nan\n",
                "events.category_weights.deep.hazard",
            ),
        ] {
            let err = ConfigLoader::parse(Path::new("config.toml"), toml).unwrap_err();
            assert_eq!(err.field(), Some(field), "{toml}");
        }
    }

    #[test]
    fn out_of_range_damping_is_rejected() {
        let err = ConfigLoader::parse(Path::new("config.toml"), "[events]\ndamping = 1.5\n")
            .unwrap_err();
        assert_eq!(err.field(), Some("events.damping"));
    }
}
