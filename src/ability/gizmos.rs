//! Debug wireframe of each actor's hit volume
//!
//! Reads the melee attack state, never feeds back into it. Requires the
//! gizmo plugin, so only the graphical app adds it.

use bevy::prelude::*;

use super::pipeline::MeleeAttack;

const READY_COLOR: Color = Color::srgb(0.9, 0.15, 0.15);
const COOLDOWN_COLOR: Color = Color::srgb(0.45, 0.45, 0.5);

pub struct MeleeAttackGizmoPlugin;

impl Plugin for MeleeAttackGizmoPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PostUpdate, draw_hit_volumes);
    }
}

fn draw_hit_volumes(mut gizmos: Gizmos, attacks: Query<(&MeleeAttack, &Transform)>) {
    for (attack, transform) in attacks.iter() {
        let volume = attack.volume_for(transform);
        let color = if attack.is_on_cooldown() {
            COOLDOWN_COLOR
        } else {
            READY_COLOR
        };
        gizmos.cuboid(
            Transform::from_translation(volume.center).with_scale(volume.size()),
            color,
        );
    }
}
