//! Sandbox scene spawning
//!
//! Turns a [`SandboxConfig`] into physics entities: one actor carrying the
//! melee attack and static target bodies. Shared by headless and graphical
//! modes; rendering decorates these entities separately.

use avian3d::prelude::*;
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::ability::{AnimatorParams, Facing, Hitable, MeleeAttack, MeleeAttackDefaults};
use crate::headless::config::{SandboxConfig, TargetConfig};

/// Marker for the sandbox's attacking actor
#[derive(Component)]
pub struct SandboxActor;

/// Marker for sandbox target bodies
#[derive(Component)]
pub struct SandboxTarget;

/// Scene description the startup system spawns from
#[derive(Resource, Clone, Debug)]
pub struct SandboxScene(pub SandboxConfig);

/// Plugin spawning the sandbox scene at startup
pub struct SandboxScenePlugin {
    pub config: SandboxConfig,
}

impl Plugin for SandboxScenePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(SandboxScene(self.config.clone()))
            .add_systems(Startup, spawn_sandbox_scene);
    }
}

fn spawn_sandbox_scene(
    mut commands: Commands,
    scene: Res<SandboxScene>,
    defaults: Option<Res<MeleeAttackDefaults>>,
) {
    let config = &scene.0;

    let ability = config
        .ability
        .clone()
        .or_else(|| defaults.map(|d| d.config.clone()))
        .unwrap_or_default();

    let actor = &config.actor;
    commands.spawn((
        Name::new(actor.name.clone()),
        Transform::from_translation(Vec3::from_array(actor.position)).with_scale(Vec3::new(
            actor.facing.sign(),
            1.0,
            1.0,
        )),
        MeleeAttack::new(ability),
        AnimatorParams::default(),
        SandboxActor,
    ));

    for target in &config.targets {
        spawn_target(&mut commands, target);
    }

    if let Some(scatter) = &config.scatter {
        let mut rng = match scatter.seed {
            Some(seed) => {
                info!("Scattering {} targets with seed {}", scatter.count, seed);
                StdRng::seed_from_u64(seed)
            }
            None => {
                info!("Scattering {} targets (no seed)", scatter.count);
                StdRng::from_entropy()
            }
        };
        for target in scatter_targets(actor.position, scatter.count, scatter.radius, &mut rng) {
            spawn_target(&mut commands, &target);
        }
    }

    info!(
        "Sandbox scene spawned: {} facing {}, {} target(s)",
        actor.name,
        actor.facing.name(),
        config.targets.len() + config.scatter.as_ref().map_or(0, |s| s.count)
    );
}

/// Random hitable targets on the actor's horizontal axis
pub fn scatter_targets(
    origin: [f32; 3],
    count: usize,
    radius: f32,
    rng: &mut impl Rng,
) -> Vec<TargetConfig> {
    (0..count)
        .map(|i| TargetConfig {
            name: format!("Scatter {}", i + 1),
            position: [origin[0] + rng.gen_range(-radius..=radius), origin[1], origin[2]],
            size: [0.5, 1.0, 0.5],
            hitable: true,
            colliders: 1,
        })
        .collect()
}

/// Spawn one static target body.
///
/// A target with several colliders gets them as children stacked along Y,
/// so the physics query reports the same body once per collider.
pub fn spawn_target(commands: &mut Commands, target: &TargetConfig) -> Entity {
    let size = Vec3::from_array(target.size);
    let mut body = commands.spawn((
        Name::new(target.name.clone()),
        Transform::from_translation(Vec3::from_array(target.position)),
        RigidBody::Static,
        SandboxTarget,
    ));

    if target.hitable {
        body.insert(Hitable::default());
    }

    if target.colliders <= 1 {
        body.insert(Collider::cuboid(size.x, size.y, size.z));
    } else {
        let count = target.colliders as f32;
        let slice = size.y / count;
        body.with_children(|parent| {
            for i in 0..target.colliders {
                let y = -size.y / 2.0 + slice * (i as f32 + 0.5);
                parent.spawn((
                    Collider::cuboid(size.x, slice, size.z),
                    Transform::from_xyz(0.0, y, 0.0),
                ));
            }
        });
    }

    body.id()
}

/// Turn `transform` to face `facing`, keeping the scale magnitude
pub fn face(transform: &mut Transform, facing: Facing) {
    transform.scale.x = transform.scale.x.abs() * facing.sign();
}
