//! Melee attack events
//!
//! One inbound event (the input trigger) and the outbound notifications of
//! an accepted activation. Outbound events are fire-and-forget: any number of
//! systems may read them, including none.

use bevy::prelude::*;

use super::facing::Facing;

/// Raised by input handling: `actor` wants to attack now
#[derive(Event, Debug, Clone, Copy)]
pub struct MeleeAttackTriggered {
    pub actor: Entity,
}

/// Fired once per accepted activation, whatever the facing
#[derive(Event, Debug, Clone, Copy)]
pub struct AbilityUsed {
    pub actor: Entity,
}

/// Fired on an accepted activation while facing right
#[derive(Event, Debug, Clone, Copy)]
pub struct AbilityUsedRight {
    pub actor: Entity,
}

/// Fired on an accepted activation while facing left
#[derive(Event, Debug, Clone, Copy)]
pub struct AbilityUsedLeft {
    pub actor: Entity,
}

/// Fired before each target is hit while facing right
#[derive(Event, Debug, Clone, Copy)]
pub struct TargetHitRight {
    pub actor: Entity,
    pub target: Entity,
}

/// Fired before each target is hit while facing left
#[derive(Event, Debug, Clone, Copy)]
pub struct TargetHitLeft {
    pub actor: Entity,
    pub target: Entity,
}

/// Target-side hit notification, for damage and reaction handlers
#[derive(Event, Debug, Clone, Copy)]
pub struct HitReceived {
    pub target: Entity,
    pub attacker: Entity,
}

/// Notification produced by the activation core, in emission order.
///
/// The Bevy systems translate each one into the matching event above.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeleeNotification {
    Used,
    UsedInDirection(Facing),
    TargetHit { target: Entity, facing: Facing },
}
