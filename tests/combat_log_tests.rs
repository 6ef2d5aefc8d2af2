//! Unit tests for combat log query and aggregation methods
//!
//! These tests verify that the CombatLog correctly:
//! - Records swings and hits with their direction
//! - Filters and aggregates entries
//! - Saves itself as JSON

use meleesim::ability::Facing;
use meleesim::combat::log::{CombatLog, CombatLogEventType};

fn create_test_log() -> CombatLog {
    CombatLog::default()
}

// =============================================================================
// Recording Tests
// =============================================================================

#[test]
fn test_swing_entry_carries_direction() {
    let mut log = create_test_log();
    log.match_time = 1.25;

    log.log_ability_used("Player".to_string(), Facing::Left);

    let entry = &log.entries[0];
    assert_eq!(entry.event_type, CombatLogEventType::AbilityUsed);
    assert_eq!(entry.actor.as_deref(), Some("Player"));
    assert_eq!(entry.target, None);
    assert_eq!(entry.facing, Some(Facing::Left));
    assert_eq!(entry.timestamp, 1.25);
    assert_eq!(entry.message, "Player swings left");
}

#[test]
fn test_hit_entry_names_both_sides() {
    let mut log = create_test_log();

    log.log_hit("Player".to_string(), "Dummy A".to_string(), Facing::Right);

    let entry = &log.entries[0];
    assert_eq!(entry.event_type, CombatLogEventType::TargetHit);
    assert_eq!(entry.target.as_deref(), Some("Dummy A"));
    assert_eq!(entry.message, "Player hits Dummy A (right)");
}

#[test]
fn test_clear_resets_time() {
    let mut log = create_test_log();
    log.match_time = 3.0;
    log.log(CombatLogEventType::SandboxEvent, "start".to_string());

    log.clear();

    assert!(log.entries.is_empty());
    assert_eq!(log.match_time, 0.0);
}

// =============================================================================
// Query Tests
// =============================================================================

#[test]
fn test_filter_by_type() {
    let mut log = create_test_log();
    log.log(CombatLogEventType::SandboxEvent, "start".to_string());
    log.log_ability_used("Player".to_string(), Facing::Right);
    log.log_hit("Player".to_string(), "Dummy A".to_string(), Facing::Right);
    log.log_hit("Player".to_string(), "Dummy B".to_string(), Facing::Right);

    assert_eq!(log.filter_by_type(CombatLogEventType::TargetHit).len(), 2);
    assert_eq!(log.filter_by_type(CombatLogEventType::AbilityUsed).len(), 1);
    assert_eq!(log.filter_by_type(CombatLogEventType::SandboxEvent).len(), 1);
}

#[test]
fn test_recent_keeps_chronological_order() {
    let mut log = create_test_log();
    for i in 0..5 {
        log.log(CombatLogEventType::SandboxEvent, format!("event {}", i));
    }

    let recent: Vec<&str> = log.recent(2).iter().map(|e| e.message.as_str()).collect();
    assert_eq!(recent, vec!["event 3", "event 4"]);
    assert_eq!(log.recent(10).len(), 5, "Asking for more than exists returns all");
}

#[test]
fn test_swings_by_actor() {
    let mut log = create_test_log();
    log.log_ability_used("Player".to_string(), Facing::Right);
    log.log_ability_used("Player".to_string(), Facing::Left);
    log.log_ability_used("Rival".to_string(), Facing::Right);
    log.log_hit("Player".to_string(), "Dummy A".to_string(), Facing::Right);

    assert_eq!(log.swings_by("Player"), 2);
    assert_eq!(log.swings_by("Rival"), 1);
    assert_eq!(log.swings_by("Nobody"), 0);
}

#[test]
fn test_hits_by_target() {
    let mut log = create_test_log();
    log.log_hit("Player".to_string(), "Dummy A".to_string(), Facing::Right);
    log.log_hit("Player".to_string(), "Dummy A".to_string(), Facing::Right);
    log.log_hit("Player".to_string(), "Dummy C".to_string(), Facing::Left);

    let hits = log.hits_by_target();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits.get("Dummy A"), Some(&2));
    assert_eq!(hits.get("Dummy C"), Some(&1));
}

#[test]
fn test_hits_by_target_empty_log() {
    let log = create_test_log();
    assert!(log.hits_by_target().is_empty(), "Empty log should have no hits");
}

// =============================================================================
// Persistence Tests
// =============================================================================

#[test]
fn test_save_to_file_writes_json() {
    let mut log = create_test_log();
    log.log_ability_used("Player".to_string(), Facing::Right);
    log.log_hit("Player".to_string(), "Dummy A".to_string(), Facing::Right);

    let dir = std::env::temp_dir().join(format!("meleesim_log_test_{}", std::process::id()));
    let path = dir.join("nested").join("log.json");
    let path_str = path.to_string_lossy().into_owned();

    let written = log.save_to_file(Some(&path_str)).unwrap();
    assert_eq!(written, path_str);

    let contents = std::fs::read_to_string(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&contents).unwrap();
    let entries = json["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["event_type"], "AbilityUsed");
    assert_eq!(entries[0]["facing"], "Right");
    assert_eq!(entries[1]["target"], "Dummy A");

    let _ = std::fs::remove_dir_all(&dir);
}
