//! Keyboard control of the sandbox actor
//!
//! Raises melee attack triggers and turns or steps the actor. Runs before
//! melee activation so a swing sees the facing chosen in the same frame.

use bevy::prelude::*;

use crate::ability::{Facing, Hitable, MeleeAttackSet, MeleeAttackTriggered};
use crate::combat::log::{CombatLog, CombatLogEventType};
use crate::keybindings::{Keybindings, SandboxAction};
use crate::scene::{face, SandboxActor, SandboxScene};

/// Distance covered by one step
pub const STEP_DISTANCE: f32 = 0.25;

pub struct SandboxInputPlugin;

impl Plugin for SandboxInputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Keybindings>().add_systems(
            Update,
            (handle_movement_input, handle_attack_input, handle_sandbox_keys)
                .chain()
                .before(MeleeAttackSet::Activate),
        );
    }
}

/// Turn towards `wanted`, or step that way if already facing it
pub fn turn_or_step(transform: &mut Transform, wanted: Facing) {
    if Facing::from_transform(transform) == wanted {
        transform.translation.x += wanted.sign() * STEP_DISTANCE;
    } else {
        face(transform, wanted);
    }
}

fn handle_movement_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    keybindings: Res<Keybindings>,
    mut actors: Query<&mut Transform, With<SandboxActor>>,
) {
    let wanted = if keybindings.action_just_pressed(SandboxAction::MoveLeft, &keyboard) {
        Facing::Left
    } else if keybindings.action_just_pressed(SandboxAction::MoveRight, &keyboard) {
        Facing::Right
    } else {
        return;
    };

    for mut transform in actors.iter_mut() {
        turn_or_step(&mut transform, wanted);
    }
}

fn handle_attack_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    keybindings: Res<Keybindings>,
    actors: Query<Entity, With<SandboxActor>>,
    mut triggers: EventWriter<MeleeAttackTriggered>,
) {
    if !keybindings.action_just_pressed(SandboxAction::Attack, &keyboard) {
        return;
    }
    for actor in actors.iter() {
        triggers.send(MeleeAttackTriggered { actor });
    }
}

fn handle_sandbox_keys(
    keyboard: Res<ButtonInput<KeyCode>>,
    keybindings: Res<Keybindings>,
    scene: Res<SandboxScene>,
    mut actors: Query<&mut Transform, With<SandboxActor>>,
    mut hitables: Query<&mut Hitable>,
    mut combat_log: ResMut<CombatLog>,
) {
    if keybindings.action_just_pressed(SandboxAction::ResetActor, &keyboard) {
        let start = &scene.0.actor;
        for mut transform in actors.iter_mut() {
            transform.translation = Vec3::from_array(start.position);
            face(&mut transform, start.facing);
        }
        info!("Actor reset to {:?}", start.position);
    }

    if keybindings.action_just_pressed(SandboxAction::ClearLog, &keyboard) {
        for mut hitable in hitables.iter_mut() {
            *hitable = Hitable::default();
        }
        combat_log.clear();
        combat_log.log(
            CombatLogEventType::SandboxEvent,
            "Log and hit counters cleared".to_string(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_before_step() {
        let mut transform = Transform::default();

        turn_or_step(&mut transform, Facing::Left);
        assert_eq!(Facing::from_transform(&transform), Facing::Left);
        assert_eq!(transform.translation.x, 0.0);

        turn_or_step(&mut transform, Facing::Left);
        assert_eq!(transform.translation.x, -STEP_DISTANCE);
    }

    #[test]
    fn test_step_right_when_facing_right() {
        let mut transform = Transform::default();
        turn_or_step(&mut transform, Facing::Right);

        assert_eq!(transform.translation.x, STEP_DISTANCE);
        assert_eq!(Facing::from_transform(&transform), Facing::Right);
    }
}
