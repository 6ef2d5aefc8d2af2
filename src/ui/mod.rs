//! UI System
//!
//! egui side panel for the graphical sandbox:
//! - the actor's facing, cooldown and "Attacking" flag
//! - per-target hit counters
//! - the recent combat log
//! - the key bindings

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::ability::{AnimatorParams, Facing, Hitable, MeleeAttack, ATTACKING_PARAM};
use crate::combat::log::{CombatLog, CombatLogEventType};
use crate::keybindings::{Keybindings, SandboxAction};
use crate::scene::{SandboxActor, SandboxTarget};

/// Number of log lines shown in the panel
pub const RECENT_LOG_LINES: usize = 12;

/// Plugin for UI management
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, render_sandbox_panel);
    }
}

/// Common colors used throughout the UI
pub mod colors {
    use bevy_egui::egui::Color32;

    /// Section headers
    pub const HEADER: Color32 = Color32::from_rgb(230, 204, 153);
    /// Ability ready
    pub const READY: Color32 = Color32::from_rgb(100, 220, 100);
    /// Ability cooling down
    pub const COOLDOWN: Color32 = Color32::from_rgb(150, 150, 150);
    /// Swing entries in the log
    pub const SWING: Color32 = Color32::from_rgb(120, 170, 255);
    /// Hit entries in the log
    pub const HIT: Color32 = Color32::from_rgb(255, 120, 100);
    /// Run/sandbox entries in the log
    pub const SYSTEM: Color32 = Color32::from_rgb(180, 180, 180);
}

fn log_color(event_type: CombatLogEventType) -> egui::Color32 {
    match event_type {
        CombatLogEventType::AbilityUsed => colors::SWING,
        CombatLogEventType::TargetHit => colors::HIT,
        CombatLogEventType::SandboxEvent => colors::SYSTEM,
    }
}

fn render_sandbox_panel(
    mut contexts: EguiContexts,
    combat_log: Res<CombatLog>,
    keybindings: Res<Keybindings>,
    actors: Query<(&Name, &MeleeAttack, &Transform, Option<&AnimatorParams>), With<SandboxActor>>,
    targets: Query<(&Name, Option<&Hitable>), With<SandboxTarget>>,
) {
    // Use try_ctx_mut to gracefully handle window close
    let Some(ctx) = contexts.try_ctx_mut() else {
        return;
    };

    egui::SidePanel::left("sandbox_panel")
        .default_width(300.0)
        .resizable(true)
        .frame(
            egui::Frame::side_top_panel(&ctx.style())
                .fill(egui::Color32::from_black_alpha(180))
                .stroke(egui::Stroke::NONE),
        )
        .show(ctx, |ui| {
            for (name, attack, transform, animator) in actors.iter() {
                ui.label(
                    egui::RichText::new(name.as_str())
                        .size(16.0)
                        .color(colors::HEADER),
                );
                let facing = Facing::from_transform(transform);
                ui.label(format!("Facing: {}", facing.name()));

                let gate = attack.gate();
                if gate.is_on_cooldown() {
                    ui.colored_label(
                        colors::COOLDOWN,
                        format!("Cooldown: {:.2}s", gate.remaining().as_secs_f32()),
                    );
                } else {
                    ui.colored_label(colors::READY, "Ready");
                }

                let attacking = animator.is_some_and(|a| a.get_bool(ATTACKING_PARAM));
                ui.label(format!("{}: {}", ATTACKING_PARAM, attacking));
                ui.separator();
            }

            ui.label(egui::RichText::new("Targets").color(colors::HEADER));
            for (name, hitable) in targets.iter() {
                match hitable {
                    Some(hitable) => ui.label(format!("{}: {} hit(s)", name, hitable.times_hit)),
                    None => ui.colored_label(colors::COOLDOWN, format!("{}: not hitable", name)),
                };
            }
            ui.separator();

            ui.label(egui::RichText::new("Combat Log").color(colors::HEADER));
            for entry in combat_log.recent(RECENT_LOG_LINES) {
                ui.colored_label(
                    log_color(entry.event_type),
                    format!("[{:>6.2}] {}", entry.timestamp, entry.message),
                );
            }
            ui.separator();

            for action in SandboxAction::all() {
                ui.label(
                    egui::RichText::new(format!(
                        "{}: {}",
                        action.description(),
                        keybindings.binding_display(action)
                    ))
                    .size(12.0)
                    .color(colors::SYSTEM),
                );
            }
        });
}
