//! Keybindings for the graphical sandbox
//!
//! Maps sandbox actions to keys, each with an optional secondary key.

use bevy::prelude::*;
use std::collections::HashMap;

/// All possible actions that can be bound to keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SandboxAction {
    Attack,
    /// Turn left, or step left when already facing left
    MoveLeft,
    /// Turn right, or step right when already facing right
    MoveRight,
    /// Put the actor back where the scene started it
    ResetActor,
    /// Clear the combat log and hit counters
    ClearLog,
}

impl SandboxAction {
    pub fn description(&self) -> &'static str {
        match self {
            SandboxAction::Attack => "Attack",
            SandboxAction::MoveLeft => "Turn / Step Left",
            SandboxAction::MoveRight => "Turn / Step Right",
            SandboxAction::ResetActor => "Reset Actor",
            SandboxAction::ClearLog => "Clear Log",
        }
    }

    pub fn all() -> Vec<SandboxAction> {
        vec![
            SandboxAction::Attack,
            SandboxAction::MoveLeft,
            SandboxAction::MoveRight,
            SandboxAction::ResetActor,
            SandboxAction::ClearLog,
        ]
    }
}

/// Key binding with primary and optional secondary key
#[derive(Debug, Clone, PartialEq)]
pub struct KeyBinding {
    pub primary: KeyCode,
    pub secondary: Option<KeyCode>,
}

impl KeyBinding {
    pub fn new(primary: KeyCode) -> Self {
        Self {
            primary,
            secondary: None,
        }
    }

    pub fn with_secondary(primary: KeyCode, secondary: KeyCode) -> Self {
        Self {
            primary,
            secondary: Some(secondary),
        }
    }
}

/// Complete keybindings configuration
#[derive(Debug, Clone, Resource)]
pub struct Keybindings {
    bindings: HashMap<SandboxAction, KeyBinding>,
}

impl Default for Keybindings {
    fn default() -> Self {
        Self::create_defaults()
    }
}

impl Keybindings {
    /// Create default keybindings
    pub fn create_defaults() -> Self {
        let mut bindings = HashMap::new();

        bindings.insert(
            SandboxAction::Attack,
            KeyBinding::with_secondary(KeyCode::Space, KeyCode::KeyJ),
        );
        bindings.insert(
            SandboxAction::MoveLeft,
            KeyBinding::with_secondary(KeyCode::ArrowLeft, KeyCode::KeyA),
        );
        bindings.insert(
            SandboxAction::MoveRight,
            KeyBinding::with_secondary(KeyCode::ArrowRight, KeyCode::KeyD),
        );
        bindings.insert(SandboxAction::ResetActor, KeyBinding::new(KeyCode::KeyR));
        bindings.insert(SandboxAction::ClearLog, KeyBinding::new(KeyCode::KeyC));

        Self { bindings }
    }

    /// Get the binding for an action
    pub fn get(&self, action: SandboxAction) -> Option<&KeyBinding> {
        self.bindings.get(&action)
    }

    /// Check if an action was just pressed this frame
    pub fn action_just_pressed(
        &self,
        action: SandboxAction,
        keyboard: &ButtonInput<KeyCode>,
    ) -> bool {
        if let Some(binding) = self.get(action) {
            keyboard.just_pressed(binding.primary)
                || binding
                    .secondary
                    .is_some_and(|key| keyboard.just_pressed(key))
        } else {
            false
        }
    }

    /// Get a human-readable string for a key
    pub fn key_name(key: KeyCode) -> &'static str {
        match key {
            KeyCode::Space => "SPACE",
            KeyCode::KeyA => "A",
            KeyCode::KeyC => "C",
            KeyCode::KeyD => "D",
            KeyCode::KeyJ => "J",
            KeyCode::KeyR => "R",
            KeyCode::ArrowLeft => "←",
            KeyCode::ArrowRight => "→",
            _ => "???",
        }
    }

    /// Get display string for a binding
    pub fn binding_display(&self, action: SandboxAction) -> String {
        if let Some(binding) = self.get(action) {
            let primary = Self::key_name(binding.primary);
            if let Some(secondary) = binding.secondary {
                format!("{} / {}", primary, Self::key_name(secondary))
            } else {
                primary.to_string()
            }
        } else {
            "Unbound".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_action_has_a_default_binding() {
        let bindings = Keybindings::default();
        for action in SandboxAction::all() {
            assert!(bindings.get(action).is_some(), "{:?} is unbound", action);
        }
    }

    #[test]
    fn test_default_bindings_do_not_conflict() {
        let bindings = Keybindings::default();
        let keys: Vec<KeyCode> = SandboxAction::all()
            .into_iter()
            .filter_map(|action| bindings.get(action))
            .flat_map(|binding| std::iter::once(binding.primary).chain(binding.secondary))
            .collect();
        let unique: std::collections::HashSet<KeyCode> = keys.iter().copied().collect();
        assert_eq!(unique.len(), keys.len(), "A key is bound to two actions");
    }

    #[test]
    fn test_just_pressed_matches_secondary_key() {
        let bindings = Keybindings::default();
        let mut keyboard = ButtonInput::<KeyCode>::default();
        keyboard.press(KeyCode::KeyJ);

        assert!(bindings.action_just_pressed(SandboxAction::Attack, &keyboard));
        assert!(!bindings.action_just_pressed(SandboxAction::MoveLeft, &keyboard));
    }

    #[test]
    fn test_binding_display() {
        let bindings = Keybindings::default();
        assert_eq!(bindings.binding_display(SandboxAction::Attack), "SPACE / J");
        assert_eq!(bindings.binding_display(SandboxAction::ResetActor), "R");
    }
}
