//! Directional melee attack
//!
//! An actor carrying [`MeleeAttack`] swings when a [`MeleeAttackTriggered`]
//! event names it:
//! - the cooldown gate accepts or silently rejects the attempt
//! - facing is read from the actor's horizontal scale
//! - a box in front of the actor is checked against the avian3d world
//! - every unique, hitable, non-self body inside is hit once
//!
//! Physics (`avian3d::PhysicsPlugins`) must be added by the host app.

use bevy::prelude::*;

pub mod components;
pub mod config;
pub mod cooldown;
pub mod events;
pub mod facing;
pub mod gizmos;
pub mod pipeline;
pub mod systems;
pub mod targeting;

pub use components::{AnimatorParams, Hitable, ATTACKING_PARAM};
pub use config::{MeleeAttackConfig, MeleeAttackConfigPlugin, MeleeAttackDefaults};
pub use cooldown::CooldownGate;
pub use events::*;
pub use facing::Facing;
pub use pipeline::{apply_hits, Activation, MeleeAttack};
pub use targeting::{
    filter_targets, find_targets, HitVolume, HitableTargets, OverlapQuery, TargetList,
};

use systems::*;

/// Ordering of melee attack work within `Update`
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum MeleeAttackSet {
    /// Cooldown releases due this frame
    ReleaseCooldowns,
    /// Trigger handling and hit application
    Activate,
}

/// Plugin for the melee attack
pub struct MeleeAttackPlugin;

impl Plugin for MeleeAttackPlugin {
    fn build(&self, app: &mut App) {
        app
            // Inbound
            .add_event::<MeleeAttackTriggered>()
            // Outbound
            .add_event::<AbilityUsed>()
            .add_event::<AbilityUsedRight>()
            .add_event::<AbilityUsedLeft>()
            .add_event::<TargetHitRight>()
            .add_event::<TargetHitLeft>()
            .add_event::<HitReceived>()
            .configure_sets(
                Update,
                (MeleeAttackSet::ReleaseCooldowns, MeleeAttackSet::Activate).chain(),
            )
            .add_systems(
                Update,
                (
                    release_cooldowns.in_set(MeleeAttackSet::ReleaseCooldowns),
                    process_melee_triggers.in_set(MeleeAttackSet::Activate),
                ),
            );
    }
}
