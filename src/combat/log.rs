//! Combat logging
//!
//! Records melee notifications for display and post-run analysis.

use bevy::prelude::*;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

use crate::ability::Facing;

/// Directory headless runs save their logs into when no path is given
pub const DEFAULT_LOG_DIR: &str = "match_logs";

/// A single entry in the combat log
#[derive(Debug, Clone, Serialize)]
pub struct CombatLogEntry {
    /// Timestamp in run time (seconds since start)
    pub timestamp: f32,
    /// The type of event
    pub event_type: CombatLogEventType,
    /// Acting entity's name
    pub actor: Option<String>,
    /// Entity on the receiving end, for hits
    pub target: Option<String>,
    /// Direction of the swing, for directional events
    pub facing: Option<Facing>,
    /// Human-readable description of the event
    pub message: String,
}

/// Types of combat log events for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CombatLogEventType {
    /// Melee attack accepted
    AbilityUsed,
    /// Target hit by a melee attack
    TargetHit,
    /// Run event (start, end, etc.)
    SandboxEvent,
}

/// The combat log resource storing all events
#[derive(Resource, Default, Debug, Clone, Serialize)]
pub struct CombatLog {
    /// All log entries in chronological order
    pub entries: Vec<CombatLogEntry>,
    /// Current run time
    pub match_time: f32,
}

impl CombatLog {
    /// Clear the log for a new run
    pub fn clear(&mut self) {
        self.entries.clear();
        self.match_time = 0.0;
    }

    /// Add a free-form entry
    pub fn log(&mut self, event_type: CombatLogEventType, message: String) {
        self.entries.push(CombatLogEntry {
            timestamp: self.match_time,
            event_type,
            actor: None,
            target: None,
            facing: None,
            message,
        });
    }

    pub fn log_ability_used(&mut self, actor: String, facing: Facing) {
        let message = format!("{} swings {}", actor, facing.name());
        self.entries.push(CombatLogEntry {
            timestamp: self.match_time,
            event_type: CombatLogEventType::AbilityUsed,
            actor: Some(actor),
            target: None,
            facing: Some(facing),
            message,
        });
    }

    pub fn log_hit(&mut self, actor: String, target: String, facing: Facing) {
        let message = format!("{} hits {} ({})", actor, target, facing.name());
        self.entries.push(CombatLogEntry {
            timestamp: self.match_time,
            event_type: CombatLogEventType::TargetHit,
            actor: Some(actor),
            target: Some(target),
            facing: Some(facing),
            message,
        });
    }

    /// Get entries filtered by event type
    pub fn filter_by_type(&self, event_type: CombatLogEventType) -> Vec<&CombatLogEntry> {
        self.entries
            .iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    /// Get the last N entries
    pub fn recent(&self, count: usize) -> Vec<&CombatLogEntry> {
        self.entries.iter().rev().take(count).rev().collect()
    }

    /// Number of accepted swings by `actor`
    pub fn swings_by(&self, actor: &str) -> usize {
        self.entries
            .iter()
            .filter(|e| {
                e.event_type == CombatLogEventType::AbilityUsed && e.actor.as_deref() == Some(actor)
            })
            .count()
    }

    /// Hit count per target name
    pub fn hits_by_target(&self) -> HashMap<String, usize> {
        let mut hits = HashMap::new();
        for entry in self.filter_by_type(CombatLogEventType::TargetHit) {
            if let Some(target) = &entry.target {
                *hits.entry(target.clone()).or_insert(0) += 1;
            }
        }
        hits
    }

    /// Save the log as JSON.
    ///
    /// Without an explicit path the log goes to a timestamped file under
    /// [`DEFAULT_LOG_DIR`]. Returns the path written.
    pub fn save_to_file(&self, output_path: Option<&str>) -> Result<String, String> {
        let path = match output_path {
            Some(path) => path.to_string(),
            None => {
                let stamp = std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .map(|d| d.as_secs())
                    .unwrap_or(0);
                format!("{}/melee_log_{}.json", DEFAULT_LOG_DIR, stamp)
            }
        };

        if let Some(parent) = Path::new(&path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| format!("Failed to create {}: {}", parent.display(), e))?;
            }
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize combat log: {}", e))?;
        std::fs::write(&path, json).map_err(|e| format!("Failed to write {}: {}", path, e))?;

        Ok(path)
    }
}
