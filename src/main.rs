//! MeleeSim - Directional Melee Attack Sandbox
//!
//! Graphical sandbox by default; `--headless <CONFIG_FILE>` runs a scripted
//! sandbox without a window and prints the outcome.

use avian3d::prelude::*;
use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use std::process::ExitCode;

use meleesim::ability::gizmos::MeleeAttackGizmoPlugin;
use meleesim::ability::{MeleeAttackConfigPlugin, MeleeAttackPlugin};
use meleesim::camera::CameraPlugin;
use meleesim::cli::{parse_args, Args};
use meleesim::combat::CombatLogPlugin;
use meleesim::headless::{run_headless_sandbox, SandboxConfig, SandboxResult};
use meleesim::input::SandboxInputPlugin;
use meleesim::rendering::SandboxRenderingPlugin;
use meleesim::scene::SandboxScenePlugin;
use meleesim::ui::UiPlugin;

fn main() -> ExitCode {
    let args = parse_args();

    if let Some(config_path) = &args.headless {
        return run_headless(&args, config_path);
    }

    let scene = match &args.scene {
        Some(path) => match SandboxConfig::load_from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading scene {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => SandboxConfig::default(),
    };

    let exit = App::new()
        // Bevy default plugins with custom window settings
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "MeleeSim".to_string(),
                resolution: (1280.0, 720.0).into(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins((EguiPlugin, PhysicsPlugins::default()))
        // Our sandbox plugins
        .add_plugins((
            MeleeAttackConfigPlugin,
            MeleeAttackPlugin,
            MeleeAttackGizmoPlugin,
            CombatLogPlugin,
            SandboxScenePlugin { config: scene },
            SandboxInputPlugin,
            SandboxRenderingPlugin,
            CameraPlugin,
            UiPlugin,
        ))
        .run();

    if exit.is_error() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn run_headless(args: &Args, config_path: &std::path::Path) -> ExitCode {
    let mut config = match SandboxConfig::load_from_file(config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Command line overrides the file
    if let Some(output) = &args.output {
        config.output_path = Some(output.to_string_lossy().into_owned());
    }
    if let Some(max_duration) = args.max_duration {
        config.max_duration_secs = max_duration;
    }

    match run_headless_sandbox(config) {
        Ok(result) => {
            print_summary(&result);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Headless sandbox failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn print_summary(result: &SandboxResult) {
    println!(
        "Attacks: {} requested, {} accepted ({:.2}s simulated)",
        result.attacks_requested, result.attacks_accepted, result.elapsed_secs
    );
    for target in &result.targets {
        if target.hitable {
            println!("  {:<16} {} hit(s)", target.name, target.times_hit);
        } else {
            println!("  {:<16} not hitable", target.name);
        }
    }
    if let Some(path) = &result.log_path {
        println!("Combat log: {}", path);
    }
}
