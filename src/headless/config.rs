//! JSON configuration parsing for headless mode
//!
//! Describes the sandbox scene (actor, targets) and the scripted attacks to
//! run against it. The graphical sandbox reuses the scene half.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::ability::{Facing, MeleeAttackConfig};

/// The attacking actor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorConfig {
    /// Display name (default: "Player")
    #[serde(default = "default_actor_name")]
    pub name: String,
    /// World position
    #[serde(default)]
    pub position: [f32; 3],
    /// Initial facing (default: Right)
    #[serde(default)]
    pub facing: Facing,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            name: default_actor_name(),
            position: [0.0; 3],
            facing: Facing::Right,
        }
    }
}

/// One static target placed in the scene
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    pub name: String,
    /// World position of the body
    pub position: [f32; 3],
    /// Full size of the body (default: 0.5 x 1.0 x 0.5)
    #[serde(default = "default_target_size")]
    pub size: [f32; 3],
    /// Whether the target can be hit (default: true)
    #[serde(default = "default_true")]
    pub hitable: bool,
    /// Number of colliders the body is split into, stacked vertically (default: 1)
    #[serde(default = "default_colliders")]
    pub colliders: u32,
}

/// Randomly placed extra targets along the actor's horizontal axis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScatterConfig {
    /// How many targets to place
    pub count: usize,
    /// Maximum horizontal distance from the actor
    pub radius: f32,
    /// Random seed for reproducible placement
    #[serde(default)]
    pub seed: Option<u64>,
}

/// A scripted attack input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptedAttack {
    /// Run time at which the input is raised
    pub at_secs: f32,
    /// Turn the actor this way first (default: keep current facing)
    #[serde(default)]
    pub facing: Option<Facing>,
}

/// Headless sandbox configuration loaded from JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SandboxConfig {
    #[serde(default)]
    pub actor: ActorConfig,
    /// Melee attack override (default: assets/config/melee_attack.ron)
    #[serde(default)]
    pub ability: Option<MeleeAttackConfig>,
    #[serde(default)]
    pub targets: Vec<TargetConfig>,
    #[serde(default)]
    pub scatter: Option<ScatterConfig>,
    /// Attack inputs, in any order
    #[serde(default)]
    pub attacks: Vec<ScriptedAttack>,
    /// Run length in seconds (default: 5)
    #[serde(default = "default_max_duration")]
    pub max_duration_secs: f32,
    /// Custom output path for the combat log (optional)
    #[serde(default)]
    pub output_path: Option<String>,
}

fn default_actor_name() -> String {
    "Player".to_string()
}

fn default_target_size() -> [f32; 3] {
    [0.5, 1.0, 0.5]
}

fn default_true() -> bool {
    true
}

fn default_colliders() -> u32 {
    1
}

fn default_max_duration() -> f32 {
    5.0
}

impl Default for SandboxConfig {
    /// Training yard used by the graphical sandbox
    fn default() -> Self {
        let target = |name: &str, x: f32, hitable: bool, colliders: u32| TargetConfig {
            name: name.to_string(),
            position: [x, 0.0, 0.0],
            size: default_target_size(),
            hitable,
            colliders,
        };

        Self {
            actor: ActorConfig::default(),
            ability: None,
            targets: vec![
                target("Dummy A", 1.0, true, 1),
                target("Dummy B", 1.3, true, 3),
                target("Dummy C", -1.0, true, 1),
                target("Crate", -1.2, false, 1),
                target("Far Dummy", 4.0, true, 1),
            ],
            scatter: None,
            attacks: Vec::new(),
            max_duration_secs: default_max_duration(),
            output_path: None,
        }
    }
}

impl SandboxConfig {
    /// Load configuration from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        Self::from_json(&contents)
    }

    /// Parse and validate configuration from JSON text
    pub fn from_json(contents: &str) -> Result<Self, String> {
        let config: SandboxConfig =
            serde_json::from_str(contents).map_err(|e| format!("Failed to parse JSON: {}", e))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.actor.name.trim().is_empty() {
            return Err("actor.name must not be empty".to_string());
        }

        if let Some(ability) = &self.ability {
            ability.validate().map_err(|e| format!("ability: {}", e))?;
        }

        for (i, target) in self.targets.iter().enumerate() {
            if target.name.trim().is_empty() {
                return Err(format!("targets[{}].name must not be empty", i));
            }
            if target.size.iter().any(|s| !s.is_finite() || *s <= 0.0) {
                return Err(format!(
                    "targets[{}] ({}) size must be positive, got {:?}",
                    i, target.name, target.size
                ));
            }
            if target.colliders == 0 {
                return Err(format!(
                    "targets[{}] ({}) needs at least one collider",
                    i, target.name
                ));
            }
        }

        if let Some(scatter) = &self.scatter {
            if !scatter.radius.is_finite() || scatter.radius <= 0.0 {
                return Err(format!(
                    "scatter.radius must be positive, got {}",
                    scatter.radius
                ));
            }
        }

        if !self.max_duration_secs.is_finite() || self.max_duration_secs <= 0.0 {
            return Err("max_duration_secs must be positive".to_string());
        }

        for (i, attack) in self.attacks.iter().enumerate() {
            if !attack.at_secs.is_finite() || attack.at_secs < 0.0 {
                return Err(format!(
                    "attacks[{}].at_secs must be non-negative, got {}",
                    i, attack.at_secs
                ));
            }
            if attack.at_secs >= self.max_duration_secs {
                return Err(format!(
                    "attacks[{}] at {}s is past max_duration_secs ({}s)",
                    i, attack.at_secs, self.max_duration_secs
                ));
            }
        }

        Ok(())
    }
}
