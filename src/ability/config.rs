//! Data-Driven Melee Attack Configuration
//!
//! The hit volume and cooldown of the melee attack are authored in
//! `assets/config/melee_attack.ron` instead of being hardcoded.
//!
//! ## Usage
//! ```ignore
//! fn my_system(defaults: Res<MeleeAttackDefaults>) {
//!     println!("Cooldown: {}", defaults.config.cooldown_secs);
//! }
//! ```

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Path of the default melee attack config, relative to the working directory.
pub const MELEE_ATTACK_CONFIG_PATH: &str = "assets/config/melee_attack.ron";

fn default_hit_extent() -> [f32; 3] {
    [1.0, 1.0, 0.0]
}

fn default_hit_offset() -> [f32; 3] {
    [1.0, 0.0, 0.0]
}

fn default_cooldown_secs() -> f32 {
    0.75
}

/// Author-time configuration of one actor's melee attack.
///
/// Immutable once the actor is spawned.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MeleeAttackConfig {
    /// Full size of the detection volume (width, height, depth) in world units
    #[serde(default = "default_hit_extent")]
    pub hit_extent: [f32; 3],
    /// Offset of the volume center from the actor, authored for a right-facing actor
    #[serde(default = "default_hit_offset")]
    pub hit_offset: [f32; 3],
    /// Minimum time between two accepted activations, in seconds
    #[serde(default = "default_cooldown_secs")]
    pub cooldown_secs: f32,
}

impl Default for MeleeAttackConfig {
    fn default() -> Self {
        Self {
            hit_extent: default_hit_extent(),
            hit_offset: default_hit_offset(),
            cooldown_secs: default_cooldown_secs(),
        }
    }
}

impl MeleeAttackConfig {
    pub fn hit_extent(&self) -> Vec3 {
        Vec3::from_array(self.hit_extent)
    }

    pub fn hit_offset(&self) -> Vec3 {
        Vec3::from_array(self.hit_offset)
    }

    /// Parse a config from RON text and validate it
    pub fn from_ron(contents: &str) -> Result<Self, String> {
        let config: MeleeAttackConfig =
            ron::from_str(contents).map_err(|e| format!("Failed to parse RON: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        for (axis, value) in ["x", "y", "z"].iter().zip(self.hit_extent) {
            if !value.is_finite() || value < 0.0 {
                return Err(format!(
                    "hit_extent.{} must be a non-negative finite number, got {}",
                    axis, value
                ));
            }
        }
        for (axis, value) in ["x", "y", "z"].iter().zip(self.hit_offset) {
            if !value.is_finite() {
                return Err(format!("hit_offset.{} must be finite, got {}", axis, value));
            }
        }
        if !self.cooldown_secs.is_finite() || self.cooldown_secs < 0.0 {
            return Err(format!(
                "cooldown_secs must be a non-negative finite number, got {}",
                self.cooldown_secs
            ));
        }
        Ok(())
    }
}

/// Melee attack config given to actors that don't bring their own.
///
/// Loaded from `assets/config/melee_attack.ron` at startup.
#[derive(Resource, Clone, Debug, Default)]
pub struct MeleeAttackDefaults {
    pub config: MeleeAttackConfig,
}

/// Load the melee attack config from `path`.
///
/// A missing file is not an error: the built-in defaults are used instead.
pub fn load_melee_attack_config(path: &Path) -> Result<MeleeAttackConfig, String> {
    if !path.exists() {
        info!("No melee attack config at {:?}, using defaults", path);
        return Ok(MeleeAttackConfig::default());
    }

    let contents = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    let config = MeleeAttackConfig::from_ron(&contents)
        .map_err(|e| format!("Invalid {}: {}", path.display(), e))?;

    info!("Loaded melee attack config from {}", path.display());

    Ok(config)
}

/// Bevy plugin for melee attack configuration loading
pub struct MeleeAttackConfigPlugin;

impl Plugin for MeleeAttackConfigPlugin {
    fn build(&self, app: &mut App) {
        match load_melee_attack_config(Path::new(MELEE_ATTACK_CONFIG_PATH)) {
            Ok(config) => {
                app.insert_resource(MeleeAttackDefaults { config });
            }
            Err(e) => {
                // A broken config file is an authoring error, don't silently run with defaults
                panic!("Failed to load melee attack config: {}", e);
            }
        }
    }
}
