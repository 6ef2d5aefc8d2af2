//! Headless sandbox execution
//!
//! Runs the scripted attacks against the sandbox scene with real physics and
//! no graphical output. Time advances by a fixed 1/60 s per update, so a run
//! is reproducible frame for frame.

use avian3d::prelude::*;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use std::collections::VecDeque;
use std::time::Duration;

use crate::ability::{
    AbilityUsed, Hitable, MeleeAttackConfigPlugin, MeleeAttackPlugin, MeleeAttackSet,
    MeleeAttackTriggered,
};
use crate::combat::log::{CombatLog, CombatLogEventType};
use crate::combat::CombatLogPlugin;
use crate::scene::{face, SandboxActor, SandboxScenePlugin, SandboxTarget};

use super::config::{SandboxConfig, ScriptedAttack};

/// Simulation step of a headless run
pub const HEADLESS_TIMESTEP: f64 = 1.0 / 60.0;

/// Result of a completed headless run
///
/// Provides programmatic access to the outcome for testing and analysis.
#[derive(Debug, Clone)]
pub struct SandboxResult {
    /// Attack inputs raised by the script
    pub attacks_requested: usize,
    /// Inputs the cooldown gate let through
    pub attacks_accepted: usize,
    /// Per-target outcome, in spawn order
    pub targets: Vec<TargetResult>,
    /// Simulated time in seconds
    pub elapsed_secs: f32,
    pub combat_log: CombatLog,
    /// Where the combat log was saved, if it was
    pub log_path: Option<String>,
}

impl SandboxResult {
    pub fn target(&self, name: &str) -> Option<&TargetResult> {
        self.targets.iter().find(|t| t.name == name)
    }
}

/// Outcome for a single target
#[derive(Debug, Clone)]
pub struct TargetResult {
    pub name: String,
    pub hitable: bool,
    pub times_hit: u32,
}

/// Resource to track headless run state
#[derive(Resource)]
pub struct HeadlessSandboxState {
    pub max_duration: f32,
    pub elapsed_time: f32,
    /// Scripted attacks not raised yet, earliest first
    pub pending_attacks: VecDeque<ScriptedAttack>,
    pub attacks_requested: usize,
    pub attacks_accepted: usize,
    pub run_complete: bool,
}

impl HeadlessSandboxState {
    pub fn new(config: &SandboxConfig) -> Self {
        let mut attacks = config.attacks.clone();
        attacks.sort_by(|a, b| a.at_secs.total_cmp(&b.at_secs));
        Self {
            max_duration: config.max_duration_secs,
            elapsed_time: 0.0,
            pending_attacks: attacks.into(),
            attacks_requested: 0,
            attacks_accepted: 0,
            run_complete: false,
        }
    }
}

/// Plugin driving a scripted headless run
pub struct HeadlessPlugin {
    pub config: SandboxConfig,
}

impl Plugin for HeadlessPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(HeadlessSandboxState::new(&self.config))
            .add_plugins(SandboxScenePlugin {
                config: self.config.clone(),
            })
            .add_systems(Startup, headless_setup)
            .add_systems(
                Update,
                (headless_track_time, fire_scripted_attacks)
                    .chain()
                    .before(MeleeAttackSet::Activate),
            )
            .add_systems(
                Update,
                count_accepted_attacks.after(MeleeAttackSet::Activate),
            );
    }
}

fn headless_setup(mut combat_log: ResMut<CombatLog>) {
    combat_log.clear();
    combat_log.log(
        CombatLogEventType::SandboxEvent,
        "Sandbox run started (headless mode)".to_string(),
    );
}

/// Track elapsed time and flag the end of the run
fn headless_track_time(time: Res<Time>, mut state: ResMut<HeadlessSandboxState>) {
    if state.run_complete {
        return;
    }
    state.elapsed_time += time.delta_secs();
    if state.elapsed_time >= state.max_duration && state.pending_attacks.is_empty() {
        state.run_complete = true;
    }
}

/// Raise every scripted attack that is due, turning the actor first if asked
fn fire_scripted_attacks(
    mut state: ResMut<HeadlessSandboxState>,
    mut actors: Query<(Entity, &mut Transform), With<SandboxActor>>,
    mut triggers: EventWriter<MeleeAttackTriggered>,
) {
    let Ok((actor, mut transform)) = actors.get_single_mut() else {
        return;
    };

    while state
        .pending_attacks
        .front()
        .is_some_and(|attack| attack.at_secs <= state.elapsed_time)
    {
        let Some(attack) = state.pending_attacks.pop_front() else {
            break;
        };
        if let Some(facing) = attack.facing {
            face(&mut transform, facing);
        }
        triggers.send(MeleeAttackTriggered { actor });
        state.attacks_requested += 1;
    }
}

fn count_accepted_attacks(
    mut used: EventReader<AbilityUsed>,
    mut state: ResMut<HeadlessSandboxState>,
) {
    state.attacks_accepted += used.read().count();
}

/// Build the headless app without running it
pub fn build_headless_app(config: SandboxConfig) -> App {
    let mut app = App::new();
    app
        // Minimal plugins - no window, no rendering
        .add_plugins(MinimalPlugins)
        .add_plugins(LogPlugin::default())
        // Transform and hierarchy plugins needed for entity positions
        .add_plugins(TransformPlugin)
        .add_plugins(HierarchyPlugin)
        .add_plugins(PhysicsPlugins::default())
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            HEADLESS_TIMESTEP,
        )))
        .add_plugins((MeleeAttackConfigPlugin, MeleeAttackPlugin, CombatLogPlugin))
        .add_plugins(HeadlessPlugin { config });
    app
}

/// Run a headless sandbox with the given configuration
pub fn run_headless_sandbox(config: SandboxConfig) -> Result<SandboxResult, String> {
    config.validate()?;

    info!(
        "Starting headless sandbox: {} target(s), {} scripted attack(s), {:.1}s",
        config.targets.len(),
        config.attacks.len(),
        config.max_duration_secs
    );

    let output_path = config.output_path.clone();
    // Safety net against a run that never flags completion
    let max_updates = (f64::from(config.max_duration_secs) / HEADLESS_TIMESTEP).ceil() as usize + 120;

    let mut app = build_headless_app(config);
    app.finish();
    app.cleanup();

    for _ in 0..max_updates {
        app.update();
        if app.world().resource::<HeadlessSandboxState>().run_complete {
            break;
        }
    }

    let world = app.world_mut();
    let state = world.resource::<HeadlessSandboxState>();
    if !state.run_complete {
        return Err(format!(
            "Sandbox run did not complete after {} updates",
            max_updates
        ));
    }
    let attacks_requested = state.attacks_requested;
    let attacks_accepted = state.attacks_accepted;
    let elapsed_secs = state.elapsed_time;

    let mut target_query =
        world.query_filtered::<(Entity, &Name, Option<&Hitable>), With<SandboxTarget>>();
    let mut targets: Vec<(Entity, TargetResult)> = target_query
        .iter(world)
        .map(|(entity, name, hitable)| {
            (
                entity,
                TargetResult {
                    name: name.as_str().to_string(),
                    hitable: hitable.is_some(),
                    times_hit: hitable.map_or(0, |h| h.times_hit),
                },
            )
        })
        .collect();
    targets.sort_by_key(|(entity, _)| entity.index());

    let mut combat_log = world.resource::<CombatLog>().clone();
    combat_log.log(
        CombatLogEventType::SandboxEvent,
        format!(
            "Sandbox run complete: {}/{} attacks accepted",
            attacks_accepted, attacks_requested
        ),
    );

    let log_path = match output_path {
        Some(path) => match combat_log.save_to_file(Some(&path)) {
            Ok(path) => {
                info!("Combat log saved to: {}", path);
                Some(path)
            }
            Err(e) => {
                warn!("Failed to save combat log: {}", e);
                None
            }
        },
        None => None,
    };

    Ok(SandboxResult {
        attacks_requested,
        attacks_accepted,
        targets: targets.into_iter().map(|(_, target)| target).collect(),
        elapsed_secs,
        combat_log,
        log_path,
    })
}
