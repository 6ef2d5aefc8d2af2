//! Cooldown gate
//!
//! Rejects activations while a cooldown is running. An accepted activation
//! arms a one-shot release timer; nothing cancels, resets or extends it.

use bevy::prelude::*;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct CooldownGate {
    cooldown: Duration,
    on_cooldown: bool,
    /// Pending release of the current cooldown, if one is running
    release: Option<Timer>,
}

impl CooldownGate {
    pub fn new(cooldown_secs: f32) -> Self {
        Self {
            cooldown: Duration::from_secs_f32(cooldown_secs.max(0.0)),
            on_cooldown: false,
            release: None,
        }
    }

    pub fn is_on_cooldown(&self) -> bool {
        self.on_cooldown
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// Time left until the gate reopens (zero when open)
    pub fn remaining(&self) -> Duration {
        self.release
            .as_ref()
            .map(Timer::remaining)
            .unwrap_or(Duration::ZERO)
    }

    /// Check-and-set. Returns false without touching anything while the
    /// cooldown is running.
    pub fn try_activate(&mut self) -> bool {
        if self.on_cooldown {
            return false;
        }
        self.on_cooldown = true;
        self.release = Some(Timer::new(self.cooldown, TimerMode::Once));
        true
    }

    /// Advance the pending release by `delta`, reopening the gate once the
    /// configured cooldown has elapsed.
    pub fn tick(&mut self, delta: Duration) {
        let Some(release) = self.release.as_mut() else {
            return;
        };
        release.tick(delta);
        if release.finished() {
            self.on_cooldown = false;
            self.release = None;
        }
    }
}
