//! Simulation configuration (RON)
//!
//! Все tuning параметры в одном месте. Отсутствующие поля берутся из Default,
//! поэтому RON файл может переопределять только то, что нужно.

use std::path::Path;

use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ai::AIConfig;
use crate::combat::WeaponConfig;
use crate::components::MovementStats;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub seed: u64,
    /// Частота FixedUpdate
    pub tick_hz: f64,

    pub enemy: AIConfig,
    pub enemy_movement: MovementStats,
    pub enemy_weapon: WeaponConfig,
    pub enemy_health: u32,

    pub player_movement: MovementStats,
    pub player_weapon: WeaponConfig,
    pub player_health: u32,
    pub look_sensitivity: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            tick_hz: 60.0,
            enemy: AIConfig::default(),
            enemy_movement: MovementStats::default(),
            enemy_weapon: WeaponConfig::default(),
            enemy_health: 100,
            player_movement: MovementStats::default(),
            player_weapon: WeaponConfig::default(),
            player_health: 100,
            look_sensitivity: 2.0,
        }
    }
}

impl SimulationConfig {
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_ron_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tick_hz > 0.0) {
            return Err(invalid(format!("tick_hz must be positive, got {}", self.tick_hz)));
        }

        let enemy = &self.enemy;
        positive("enemy.alert_radius", enemy.alert_radius)?;
        positive("enemy.combat_radius", enemy.combat_radius)?;
        positive("enemy.circle_speed", enemy.circle_speed)?;
        positive("enemy.melee_range_sq", enemy.melee_range_sq)?;
        positive("enemy.reselect_interval", enemy.reselect_interval)?;

        if enemy.circle_radius < 0.0 {
            return Err(invalid(format!(
                "enemy.circle_radius must not be negative, got {}",
                enemy.circle_radius
            )));
        }
        if enemy.combat_radius > enemy.alert_radius {
            return Err(invalid(format!(
                "enemy.combat_radius ({}) is larger than enemy.alert_radius ({})",
                enemy.combat_radius, enemy.alert_radius
            )));
        }
        if !(0.0 <= enemy.circle_threshold
            && enemy.circle_threshold <= enemy.flip_threshold
            && enemy.flip_threshold <= 1.0)
        {
            return Err(invalid(format!(
                "thresholds must satisfy 0 <= circle ({}) <= flip ({}) <= 1",
                enemy.circle_threshold, enemy.flip_threshold
            )));
        }
        if enemy.melee_attack_index >= self.enemy_weapon.combos.len() {
            return Err(invalid(format!(
                "enemy.melee_attack_index {} has no combo in enemy_weapon",
                enemy.melee_attack_index
            )));
        }

        for (name, stats) in [
            ("enemy_movement", &self.enemy_movement),
            ("player_movement", &self.player_movement),
        ] {
            positive(&format!("{name}.move_speed"), stats.move_speed)?;
            positive(&format!("{name}.sprint_speed"), stats.sprint_speed)?;
            positive(&format!("{name}.dash_speed"), stats.dash_speed)?;
            positive(&format!("{name}.dash_duration"), stats.dash_duration)?;
        }

        if self.enemy_health == 0 || self.player_health == 0 {
            return Err(invalid("health must be positive".to_string()));
        }
        positive("look_sensitivity", self.look_sensitivity)?;

        Ok(())
    }
}

fn invalid(message: String) -> ConfigError {
    ConfigError::Invalid(message)
}

fn positive(name: &str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be positive, got {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_ron_keeps_defaults() {
        let config = SimulationConfig::from_ron_str(
            "(seed: 7, enemy: (alert_radius: 20.0, combat_radius: 8.0))",
        )
        .unwrap();

        assert_eq!(config.seed, 7);
        assert_eq!(config.enemy.alert_radius, 20.0);
        assert_eq!(config.enemy.combat_radius, 8.0);
        assert_eq!(config.enemy.reselect_interval, 2.5);
        assert_eq!(config.player_health, 100);
    }

    #[test]
    fn test_parse_error() {
        let err = SimulationConfig::from_ron_str("(seed: \"nope\")").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_combat_radius_must_fit_alert_radius() {
        let err = SimulationConfig::from_ron_str("(enemy: (alert_radius: 5.0, combat_radius: 6.0))")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_thresholds_must_be_ordered() {
        let mut config = SimulationConfig::default();
        config.enemy.circle_threshold = 0.8;
        config.enemy.flip_threshold = 0.6;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_non_positive_values_rejected() {
        let mut config = SimulationConfig::default();
        config.tick_hz = 0.0;
        assert!(config.validate().is_err());

        let mut config = SimulationConfig::default();
        config.player_movement.move_speed = -1.0;
        assert!(config.validate().is_err());

        let mut config = SimulationConfig::default();
        config.enemy_health = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = SimulationConfig::load("/definitely/not/here.ron").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_headless_app_rejects_invalid_config() {
        let config = SimulationConfig {
            tick_hz: 0.0,
            ..SimulationConfig::default()
        };
        let result = crate::create_headless_app_with_config(config);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        assert!(crate::create_headless_app_with_config(SimulationConfig::default()).is_ok());
    }
}
