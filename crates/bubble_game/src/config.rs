//! Game configuration file.
//!
//! A config names a tuning profile and optionally overrides individual
//! tracker/simulation fields. Loading starts from the profile preset,
//! overlays the override objects key by key, then validates the result.
//!
//! ```json
//! { "version": "0.1", "profile": "tuned", "seed": 42,
//!   "tracker": { "handedness": "left" },
//!   "simulation": { "round_secs": 90 } }
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

use bubble_core::{TrackerConfig, TuningProfile};

use crate::simulation::SimulationConfig;

pub const CONFIG_VERSION: &str = "0.1";
pub const DEFAULT_SEED: u64 = 42;

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub profile: TuningProfile,
    pub seed: u64,
    pub tracker: TrackerConfig,
    pub simulation: SimulationConfig,
}

impl GameConfig {
    pub fn for_profile(profile: TuningProfile, seed: u64) -> Self {
        Self {
            profile,
            seed,
            tracker: TrackerConfig::for_profile(profile),
            simulation: SimulationConfig::for_profile(profile),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::for_profile(TuningProfile::default(), DEFAULT_SEED)
    }
}

#[derive(Debug, Deserialize)]
struct GameConfigJson {
    version: String,
    #[serde(default)]
    profile: TuningProfile,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    tracker: Map<String, Value>,
    #[serde(default)]
    simulation: Map<String, Value>,
}

pub fn load_config_from_path(path: &Path) -> Result<GameConfig, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    parse_config(&raw)
        .map_err(|e| format!("Failed to load config {}: {e}", path.display()))
}

pub fn parse_config(raw: &str) -> Result<GameConfig, String> {
    let json: GameConfigJson =
        serde_json::from_str(raw).map_err(|e| format!("Failed to parse config JSON: {e}"))?;
    if json.version != CONFIG_VERSION {
        return Err(format!(
            "Config validation failed: unsupported version '{}'",
            json.version
        ));
    }

    let preset = GameConfig::for_profile(json.profile, json.seed.unwrap_or(DEFAULT_SEED));
    let config = GameConfig {
        tracker: overlay(&preset.tracker, json.tracker, "tracker")?,
        simulation: overlay(&preset.simulation, json.simulation, "simulation")?,
        ..preset
    };
    validate_config(&config)?;
    Ok(config)
}

/// Apply `overrides` on top of `preset`, rejecting keys the preset lacks.
fn overlay<T>(preset: &T, overrides: Map<String, Value>, section: &str) -> Result<T, String>
where
    T: Serialize + DeserializeOwned,
{
    let mut merged = match serde_json::to_value(preset) {
        Ok(Value::Object(map)) => map,
        Ok(_) => return Err(format!("Config section '{section}' is not an object")),
        Err(e) => return Err(format!("Failed to serialize {section} preset: {e}")),
    };
    for (key, value) in overrides {
        if !merged.contains_key(&key) {
            return Err(format!(
                "Config validation failed: unknown {section} field '{key}'"
            ));
        }
        merged.insert(key, value);
    }
    serde_json::from_value(Value::Object(merged))
        .map_err(|e| format!("Failed to parse {section} overrides: {e}"))
}

pub fn validate_config(config: &GameConfig) -> Result<(), String> {
    validate_tracker(&config.tracker)?;
    validate_simulation(&config.simulation)
}

fn validate_tracker(t: &TrackerConfig) -> Result<(), String> {
    let unit = |name: &str, v: f32| {
        if (0.0..=1.0).contains(&v) {
            Ok(())
        } else {
            Err(format!(
                "Config validation failed: tracker.{name} must be within [0, 1] (got {v})"
            ))
        }
    };
    unit("visibility_threshold", t.visibility_threshold)?;
    unit("min_smoothing", t.min_smoothing)?;
    unit("max_smoothing", t.max_smoothing)?;
    unit("high_confidence", t.high_confidence)?;
    unit("low_confidence", t.low_confidence)?;
    unit("velocity_retain", t.velocity_retain)?;

    if t.min_smoothing > t.max_smoothing {
        return Err(
            "Config validation failed: tracker.min_smoothing exceeds max_smoothing".to_string(),
        );
    }
    if !(t.slow_movement >= 0.0 && t.fast_movement >= t.slow_movement) {
        return Err(
            "Config validation failed: tracker movement thresholds must satisfy 0 <= slow <= fast"
                .to_string(),
        );
    }
    if !(t.gap_smoothing_step >= 0.0) {
        return Err("Config validation failed: tracker.gap_smoothing_step must be >= 0".to_string());
    }
    if !(t.prediction_window > 0.0 && t.extended_gap_window >= t.prediction_window) {
        return Err(
            "Config validation failed: tracker gap windows must satisfy 0 < prediction <= extended"
                .to_string(),
        );
    }
    if t.status_interval == 0 {
        return Err("Config validation failed: tracker.status_interval must be >= 1".to_string());
    }
    Ok(())
}

fn validate_simulation(s: &SimulationConfig) -> Result<(), String> {
    if s.round_secs == 0 {
        return Err("Config validation failed: simulation.round_secs must be > 0".to_string());
    }
    if !(s.pop_radius > 0.0) {
        return Err("Config validation failed: simulation.pop_radius must be > 0".to_string());
    }
    if s.max_bubbles == 0 {
        return Err("Config validation failed: simulation.max_bubbles must be >= 1".to_string());
    }
    if !(s.min_size > 0.0 && s.max_size >= s.min_size) {
        return Err(
            "Config validation failed: simulation sizes must satisfy 0 < min_size <= max_size"
                .to_string(),
        );
    }
    if !(s.size_to_radius > 0.0 && s.points_scale > 0.0) {
        return Err(
            "Config validation failed: simulation.size_to_radius and points_scale must be > 0"
                .to_string(),
        );
    }
    if !(s.base_speed >= 0.0 && s.speed_per_level >= 0.0 && s.max_speed >= s.base_speed) {
        return Err(
            "Config validation failed: simulation speeds must satisfy 0 <= base_speed <= max_speed"
                .to_string(),
        );
    }
    if !(s.min_spawn_interval > 0.0
        && s.base_spawn_interval >= s.min_spawn_interval
        && s.spawn_interval_step >= 0.0)
    {
        return Err(
            "Config validation failed: simulation spawn intervals must satisfy 0 < min <= base"
                .to_string(),
        );
    }
    if !(s.frame_interval > 0.0) {
        return Err("Config validation failed: simulation.frame_interval must be > 0".to_string());
    }
    if !(s.boundary_margin >= 0.0) {
        return Err("Config validation failed: simulation.boundary_margin must be >= 0".to_string());
    }
    if !(s.opacity_step > 0.0 && s.scale_step > 0.0) {
        return Err(
            "Config validation failed: simulation opacity/scale steps must be > 0".to_string(),
        );
    }
    if s.points_per_level == 0 {
        return Err(
            "Config validation failed: simulation.points_per_level must be >= 1".to_string(),
        );
    }
    if s.trail_length < 2 {
        return Err("Config validation failed: simulation.trail_length must be >= 2".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bubble_core::Handedness;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file_path(name_hint: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "bubble_config_test_{}_{}_{}.json",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    #[test]
    fn presets_pass_validation() {
        for &profile in TuningProfile::ALL {
            validate_config(&GameConfig::for_profile(profile, 1)).expect("preset should validate");
        }
    }

    #[test]
    fn minimal_config_uses_profile_preset() {
        let config = parse_config(r#"{ "version": "0.1", "profile": "classic" }"#)
            .expect("config should parse");
        assert_eq!(config, GameConfig::for_profile(TuningProfile::Classic, DEFAULT_SEED));
    }

    #[test]
    fn overrides_apply_on_top_of_preset() {
        let config = parse_config(
            r#"{
              "version": "0.1",
              "seed": 9,
              "tracker": { "handedness": "left", "status_interval": 5 },
              "simulation": { "round_secs": 90, "max_bubbles": 12 }
            }"#,
        )
        .expect("config should parse");

        let preset = GameConfig::for_profile(TuningProfile::Tuned, 9);
        assert_eq!(config.seed, 9);
        assert_eq!(config.tracker.handedness, Handedness::Left);
        assert_eq!(config.tracker.status_interval, 5);
        assert_eq!(config.tracker.min_smoothing, preset.tracker.min_smoothing);
        assert_eq!(config.simulation.round_secs, 90);
        assert_eq!(config.simulation.max_bubbles, 12);
        assert_eq!(config.simulation.pop_radius, preset.simulation.pop_radius);
    }

    #[test]
    fn unknown_override_key_is_rejected() {
        let err = parse_config(r#"{ "version": "0.1", "simulation": { "lives": 3 } }"#)
            .expect_err("unknown key should fail");
        assert!(err.contains("unknown simulation field 'lives'"));
    }

    #[test]
    fn bad_version_is_rejected() {
        let err = parse_config(r#"{ "version": "2.0" }"#).expect_err("bad version should fail");
        assert!(err.contains("unsupported version"));
    }

    #[test]
    fn inverted_smoothing_bounds_are_rejected() {
        let err = parse_config(
            r#"{ "version": "0.1", "tracker": { "min_smoothing": 0.9, "max_smoothing": 0.2 } }"#,
        )
        .expect_err("inverted bounds should fail");
        assert!(err.contains("min_smoothing exceeds max_smoothing"));
    }

    #[test]
    fn wrong_override_type_is_rejected() {
        let err = parse_config(r#"{ "version": "0.1", "simulation": { "round_secs": "long" } }"#)
            .expect_err("wrong type should fail");
        assert!(err.contains("Failed to parse simulation overrides"));
    }

    #[test]
    fn load_config_from_file() {
        let path = temp_file_path("valid");
        fs::write(&path, r#"{ "version": "0.1", "profile": "classic", "seed": 5 }"#)
            .expect("write temp file");

        let config = load_config_from_path(&path).expect("config should load");
        assert_eq!(config.profile, TuningProfile::Classic);
        assert_eq!(config.seed, 5);
        assert!(!config.simulation.swipe_detection);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn missing_file_reports_path() {
        let path = temp_file_path("missing");
        let err = load_config_from_path(&path).expect_err("missing file should fail");
        assert!(err.contains("Failed to read"));
    }
}
