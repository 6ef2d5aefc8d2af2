//! Combat logging plugin
//!
//! Turns melee attack notifications into [`log::CombatLog`] entries.

use bevy::prelude::*;

pub mod log;

use crate::ability::{
    AbilityUsedLeft, AbilityUsedRight, Facing, MeleeAttackSet, TargetHitLeft, TargetHitRight,
};
use log::CombatLog;

/// Plugin for the combat log
pub struct CombatLogPlugin;

impl Plugin for CombatLogPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CombatLog>().add_systems(
            Update,
            record_combat_log.after(MeleeAttackSet::Activate),
        );
    }
}

fn display_name(names: &Query<&Name>, entity: Entity) -> String {
    names
        .get(entity)
        .map(|name| name.as_str().to_string())
        .unwrap_or_else(|_| format!("{:?}", entity))
}

/// Record melee notifications to the combat log
pub fn record_combat_log(
    mut combat_log: ResMut<CombatLog>,
    time: Res<Time>,
    mut used_right: EventReader<AbilityUsedRight>,
    mut used_left: EventReader<AbilityUsedLeft>,
    mut hit_right: EventReader<TargetHitRight>,
    mut hit_left: EventReader<TargetHitLeft>,
    names: Query<&Name>,
) {
    combat_log.match_time += time.delta_secs();

    // The directional events carry everything the generic one does
    for event in used_right.read() {
        combat_log.log_ability_used(display_name(&names, event.actor), Facing::Right);
    }
    for event in used_left.read() {
        combat_log.log_ability_used(display_name(&names, event.actor), Facing::Left);
    }

    for event in hit_right.read() {
        combat_log.log_hit(
            display_name(&names, event.actor),
            display_name(&names, event.target),
            Facing::Right,
        );
    }
    for event in hit_left.read() {
        combat_log.log_hit(
            display_name(&names, event.actor),
            display_name(&names, event.target),
            Facing::Left,
        );
    }
}
