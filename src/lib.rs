//! MeleeSim - Directional Melee Attack Sandbox
//!
//! A directional melee attack for side-on actors: a cooldown gate, facing
//! resolved from the actor's scale, and a mirrored hit box checked against
//! the physics world. The sandbox around it runs either graphically or
//! headless from a JSON script.
//!
//! This library exposes the core modules for testing and reuse.

pub mod ability;
pub mod camera;
pub mod cli;
pub mod combat;
pub mod headless;
pub mod input;
pub mod keybindings;
pub mod rendering;
pub mod scene;
pub mod ui;

// Re-export commonly used types
pub use ability::{
    Facing, HitVolume, Hitable, MeleeAttack, MeleeAttackConfig, MeleeAttackPlugin,
    MeleeAttackTriggered,
};
pub use combat::log::{CombatLog, CombatLogEventType};
pub use headless::{run_headless_sandbox, SandboxConfig, SandboxResult};
