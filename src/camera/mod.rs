//! Camera system
//!
//! Side-on view of the sandbox. The camera trails the actor horizontally so
//! both swing directions stay on screen; `=`/`-` zoom in and out.

use bevy::prelude::*;

use crate::scene::SandboxActor;

/// Plugin for camera management
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraSettings>()
            .add_systems(Startup, setup_camera)
            .add_systems(Update, (camera_zoom, follow_actor).chain());
    }
}

/// Global camera settings
#[derive(Resource)]
pub struct CameraSettings {
    /// Current zoom level (distance from the actor along Z)
    pub zoom: f32,
    /// Minimum zoom distance
    pub zoom_min: f32,
    /// Maximum zoom distance
    pub zoom_max: f32,
    /// Camera movement smoothing factor
    pub smoothing: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            zoom: 8.0,
            zoom_min: 3.0,
            zoom_max: 20.0,
            smoothing: 5.0,
        }
    }
}

/// Marker component for the sandbox camera
#[derive(Component)]
pub struct MainCamera;

fn setup_camera(mut commands: Commands, settings: Res<CameraSettings>) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 1.5, settings.zoom).looking_at(Vec3::new(0.0, 0.5, 0.0), Vec3::Y),
        MainCamera,
    ));

    // Add directional light (sun-like)
    commands.spawn((
        DirectionalLight {
            illuminance: 12000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(4.0, 8.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 400.0,
    });
}

/// Keyboard zoom
fn camera_zoom(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut settings: ResMut<CameraSettings>,
) {
    let zoom_speed = 10.0 * time.delta_secs();
    if keyboard.pressed(KeyCode::Equal) || keyboard.pressed(KeyCode::NumpadAdd) {
        settings.zoom -= zoom_speed;
    }
    if keyboard.pressed(KeyCode::Minus) || keyboard.pressed(KeyCode::NumpadSubtract) {
        settings.zoom += zoom_speed;
    }
    settings.zoom = settings.zoom.clamp(settings.zoom_min, settings.zoom_max);
}

/// Ease the camera towards a point beside the actor
fn follow_actor(
    settings: Res<CameraSettings>,
    time: Res<Time>,
    actors: Query<&GlobalTransform, With<SandboxActor>>,
    mut cameras: Query<&mut Transform, With<MainCamera>>,
) {
    let Ok(mut camera_transform) = cameras.get_single_mut() else {
        return;
    };
    let focus = actors
        .get_single()
        .map(|t| t.translation())
        .unwrap_or(Vec3::ZERO);

    let goal = Vec3::new(focus.x, focus.y + 1.5, focus.z + settings.zoom);
    let t = (settings.smoothing * time.delta_secs()).min(1.0);
    camera_transform.translation = camera_transform.translation.lerp(goal, t);
    camera_transform.look_at(focus + Vec3::new(0.0, 0.5, 0.0), Vec3::Y);
}
