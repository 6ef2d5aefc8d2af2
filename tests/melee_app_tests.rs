//! Integration tests for the melee attack systems inside a Bevy app
//!
//! These tests verify that:
//! - Every trigger raises "Attacking", including ones the cooldown rejects
//! - The flag is raised by activation handling, not before it
//! - A swing uses the actor's pose from the same frame

use avian3d::prelude::{Collider, PhysicsPlugins, RigidBody};
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use meleesim::ability::{
    AbilityUsed, AnimatorParams, Hitable, MeleeAttack, MeleeAttackConfig, MeleeAttackPlugin,
    MeleeAttackSet, MeleeAttackTriggered, ATTACKING_PARAM,
};
use std::time::Duration;

/// What the app looked like around melee activation each frame
#[derive(Resource, Default)]
struct Observed {
    used: usize,
    /// "Attacking" as seen just before activation handling, per frame
    attacking_before_activation: Vec<bool>,
}

fn observe_before_activation(
    mut observed: ResMut<Observed>,
    animators: Query<&AnimatorParams>,
) {
    let attacking = animators.iter().any(|a| a.get_bool(ATTACKING_PARAM));
    observed.attacking_before_activation.push(attacking);
}

fn count_used(mut observed: ResMut<Observed>, mut used: EventReader<AbilityUsed>) {
    observed.used += used.read().count();
}

fn build_melee_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(TransformPlugin)
        .add_plugins(HierarchyPlugin)
        .add_plugins(PhysicsPlugins::default())
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / 60.0,
        )))
        .add_plugins(MeleeAttackPlugin)
        .init_resource::<Observed>()
        .add_systems(
            Update,
            (
                observe_before_activation.before(MeleeAttackSet::Activate),
                count_used.after(MeleeAttackSet::Activate),
            ),
        );
    app.finish();
    app.cleanup();
    app
}

fn boxed_config() -> MeleeAttackConfig {
    MeleeAttackConfig {
        hit_extent: [1.0, 1.0, 1.0],
        hit_offset: [1.0, 0.0, 0.0],
        cooldown_secs: 0.75,
    }
}

fn spawn_actor(app: &mut App, transform: Transform) -> Entity {
    app.world_mut()
        .spawn((
            transform,
            MeleeAttack::new(boxed_config()),
            AnimatorParams::default(),
        ))
        .id()
}

fn trigger(app: &mut App, actor: Entity) {
    app.world_mut().send_event(MeleeAttackTriggered { actor });
    app.update();
}

fn attacking(app: &App, actor: Entity) -> bool {
    app.world()
        .get::<AnimatorParams>(actor)
        .is_some_and(|a| a.get_bool(ATTACKING_PARAM))
}

// =============================================================================
// Animator Write-out Tests
// =============================================================================

#[test]
fn test_rejected_trigger_still_raises_attacking() {
    let mut app = build_melee_app();
    let actor = spawn_actor(&mut app, Transform::default());
    app.update();

    trigger(&mut app, actor);
    assert_eq!(app.world().resource::<Observed>().used, 1);
    assert!(attacking(&app, actor));

    // Emulate the animation finishing, then press again inside the cooldown
    if let Some(mut animator) = app.world_mut().get_mut::<AnimatorParams>(actor) {
        animator.set_bool(ATTACKING_PARAM, false);
    }
    trigger(&mut app, actor);

    let attack = app.world().get::<MeleeAttack>(actor).unwrap();
    assert!(attack.is_on_cooldown(), "Second trigger should hit the cooldown");
    assert_eq!(
        app.world().resource::<Observed>().used,
        1,
        "Rejected trigger must not announce a swing"
    );
    assert!(attacking(&app, actor), "Rejected trigger should still raise the flag");
}

#[test]
fn test_attacking_is_raised_by_activation_handling() {
    let mut app = build_melee_app();
    let actor = spawn_actor(&mut app, Transform::default());
    app.update();

    trigger(&mut app, actor);

    let observed = app.world().resource::<Observed>();
    assert_eq!(
        observed.attacking_before_activation.last(),
        Some(&false),
        "Flag should still be low before activation runs"
    );
    assert!(attacking(&app, actor));
}

#[test]
fn test_trigger_for_unknown_actor_is_ignored() {
    let mut app = build_melee_app();
    let actor = spawn_actor(&mut app, Transform::default());
    app.update();

    trigger(&mut app, Entity::from_raw(9999));

    assert_eq!(app.world().resource::<Observed>().used, 0);
    assert!(!attacking(&app, actor));
}

// =============================================================================
// Pose Tests
// =============================================================================

#[test]
fn test_swing_uses_position_moved_in_the_same_frame() {
    let mut app = build_melee_app();
    // Only reachable once the actor stands at x = 1
    let target = app
        .world_mut()
        .spawn((
            Transform::from_xyz(2.0, 0.0, 0.0),
            RigidBody::Static,
            Collider::cuboid(0.5, 1.0, 0.5),
            Hitable::default(),
        ))
        .id();
    let actor = spawn_actor(&mut app, Transform::default());

    // Let the physics world pick up the target
    for _ in 0..20 {
        app.update();
    }

    // Step and swing without an update in between
    if let Some(mut transform) = app.world_mut().get_mut::<Transform>(actor) {
        transform.translation.x = 1.0;
    }
    trigger(&mut app, actor);

    let hitable = app.world().get::<Hitable>(target).unwrap();
    assert_eq!(hitable.times_hit, 1, "Swing should reach from the new position");
    assert_eq!(hitable.last_attacker, Some(actor));
}

#[test]
fn test_swing_uses_facing_turned_in_the_same_frame() {
    let mut app = build_melee_app();
    let target = app
        .world_mut()
        .spawn((
            Transform::from_xyz(-1.0, 0.0, 0.0),
            RigidBody::Static,
            Collider::cuboid(0.5, 1.0, 0.5),
            Hitable::default(),
        ))
        .id();
    let actor = spawn_actor(&mut app, Transform::default());

    for _ in 0..20 {
        app.update();
    }

    if let Some(mut transform) = app.world_mut().get_mut::<Transform>(actor) {
        transform.scale.x = -1.0;
    }
    trigger(&mut app, actor);

    assert_eq!(app.world().get::<Hitable>(target).unwrap().times_hit, 1);
}
