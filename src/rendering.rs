//! Sandbox rendering
//!
//! Gives the physics-only scene entities meshes, flashes targets when they
//! are hit, and plays the actor's swing pose. The swing pose stands in for
//! an animation state machine: it shows while "Attacking" is raised and
//! lowers the flag again when the swing is over.

use bevy::prelude::*;

use crate::ability::{AnimatorParams, HitReceived, Hitable, MeleeAttackSet, ATTACKING_PARAM};
use crate::headless::config::TargetConfig;
use crate::scene::{SandboxActor, SandboxScene, SandboxTarget};

/// How long a target stays highlighted after a hit
pub const HIT_FLASH_SECS: f32 = 0.2;
/// How long the swing pose is held
pub const SWING_SECS: f32 = 0.3;

const ACTOR_COLOR: Color = Color::srgb(0.2, 0.4, 0.8);
const HITABLE_COLOR: Color = Color::srgb(0.75, 0.6, 0.35);
const INERT_COLOR: Color = Color::srgb(0.4, 0.4, 0.4);
const FLASH_COLOR: Color = Color::srgb(1.0, 0.25, 0.2);
const WEAPON_COLOR: Color = Color::srgb(0.85, 0.85, 0.9);

pub struct SandboxRenderingPlugin;

impl Plugin for SandboxRenderingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_ground)
            .add_systems(
                Update,
                (decorate_actor, decorate_targets).before(MeleeAttackSet::Activate),
            )
            .add_systems(
                Update,
                (start_hit_flash, update_hit_flash, update_swing_pose)
                    .chain()
                    .after(MeleeAttackSet::Activate),
            );
    }
}

/// Base colour a target returns to after flashing
#[derive(Component)]
pub struct TargetColor(pub Color);

/// Active hit highlight
#[derive(Component)]
pub struct HitFlash {
    pub timer: Timer,
}

/// Swing pose of the actor, driven by the "Attacking" parameter
#[derive(Component)]
pub struct SwingPose {
    pub timer: Timer,
    pub weapon: Entity,
}

fn spawn_ground(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(30.0, 0.1, 4.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.25, 0.3, 0.25),
            perceptual_roughness: 0.9,
            ..default()
        })),
        Transform::from_xyz(0.0, -0.55, 0.0),
    ));
}

fn decorate_actor(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    actors: Query<Entity, (Added<SandboxActor>, Without<Mesh3d>)>,
) {
    for actor in actors.iter() {
        // Weapon sits on the local +X side, so it follows the actor's facing
        let weapon = commands
            .spawn((
                Mesh3d(meshes.add(Cuboid::new(0.6, 0.08, 0.08))),
                MeshMaterial3d(materials.add(WEAPON_COLOR)),
                Transform::from_xyz(0.45, 0.1, 0.0),
                Visibility::Hidden,
            ))
            .id();

        commands
            .entity(actor)
            .try_insert((
                Mesh3d(meshes.add(Capsule3d::new(0.25, 0.5))),
                MeshMaterial3d(materials.add(ACTOR_COLOR)),
                Visibility::default(),
                SwingPose {
                    timer: Timer::from_seconds(SWING_SECS, TimerMode::Once),
                    weapon,
                },
            ))
            .add_child(weapon);
    }
}

fn decorate_targets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    scene: Res<SandboxScene>,
    targets: Query<(Entity, &Name, Option<&Hitable>), (Added<SandboxTarget>, Without<Mesh3d>)>,
) {
    for (entity, name, hitable) in targets.iter() {
        // Scattered targets aren't listed in the scene and use the default size
        let size = scene
            .0
            .targets
            .iter()
            .find(|t| t.name == name.as_str())
            .map_or(Vec3::new(0.5, 1.0, 0.5), |t: &TargetConfig| {
                Vec3::from_array(t.size)
            });
        let color = if hitable.is_some() {
            HITABLE_COLOR
        } else {
            INERT_COLOR
        };

        // Each target owns its material so a flash only tints that target
        commands.entity(entity).try_insert((
            Mesh3d(meshes.add(Cuboid::from_size(size))),
            MeshMaterial3d(materials.add(color)),
            Visibility::default(),
            TargetColor(color),
        ));
    }
}

fn start_hit_flash(
    mut commands: Commands,
    mut hits: EventReader<HitReceived>,
    targets: Query<&MeshMaterial3d<StandardMaterial>, With<TargetColor>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for hit in hits.read() {
        let Ok(material) = targets.get(hit.target) else {
            continue;
        };
        if let Some(material) = materials.get_mut(&material.0) {
            material.base_color = FLASH_COLOR;
        }
        commands.entity(hit.target).try_insert(HitFlash {
            timer: Timer::from_seconds(HIT_FLASH_SECS, TimerMode::Once),
        });
    }
}

fn update_hit_flash(
    mut commands: Commands,
    time: Res<Time>,
    mut flashing: Query<(
        Entity,
        &mut HitFlash,
        &TargetColor,
        &MeshMaterial3d<StandardMaterial>,
    )>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (entity, mut flash, color, material) in flashing.iter_mut() {
        flash.timer.tick(time.delta());
        if !flash.timer.finished() {
            continue;
        }
        if let Some(material) = materials.get_mut(&material.0) {
            material.base_color = color.0;
        }
        commands.entity(entity).remove::<HitFlash>();
    }
}

fn update_swing_pose(
    time: Res<Time>,
    mut actors: Query<(&mut AnimatorParams, &mut SwingPose)>,
    mut visibility: Query<&mut Visibility>,
) {
    for (mut animator, mut pose) in actors.iter_mut() {
        let attacking = animator.get_bool(ATTACKING_PARAM);
        if attacking {
            pose.timer.tick(time.delta());
            if pose.timer.finished() {
                animator.set_bool(ATTACKING_PARAM, false);
                pose.timer.reset();
            }
        }

        if let Ok(mut weapon) = visibility.get_mut(pose.weapon) {
            *weapon = if animator.get_bool(ATTACKING_PARAM) {
                Visibility::Inherited
            } else {
                Visibility::Hidden
            };
        }
    }
}
