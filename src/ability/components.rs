//! Components the melee attack reads from or writes to on other entities

use bevy::prelude::*;
use std::collections::HashMap;

/// Animator parameter raised on every melee attack input
pub const ATTACKING_PARAM: &str = "Attacking";

/// Hit contract of a target.
///
/// Entities without this component can't be hit. The damage/reaction a hit
/// causes belongs to whoever listens for [`super::events::HitReceived`].
#[derive(Component, Debug, Clone, Default)]
pub struct Hitable {
    /// Number of hits taken since spawn
    pub times_hit: u32,
    /// Entity that landed the most recent hit
    pub last_attacker: Option<Entity>,
}

impl Hitable {
    pub fn receive_hit(&mut self, attacker: Entity) {
        self.times_hit += 1;
        self.last_attacker = Some(attacker);
    }
}

/// Named boolean parameters of the actor's animation state machine.
///
/// The melee attack only writes here, it never reads.
#[derive(Component, Debug, Clone, Default)]
pub struct AnimatorParams {
    bools: HashMap<String, bool>,
}

impl AnimatorParams {
    pub fn set_bool(&mut self, name: &str, value: bool) {
        self.bools.insert(name.to_string(), value);
    }

    /// Unset parameters read as false
    pub fn get_bool(&self, name: &str) -> bool {
        self.bools.get(name).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receive_hit_counts_and_remembers_attacker() {
        let mut hitable = Hitable::default();
        let attacker = Entity::from_raw(7);

        hitable.receive_hit(attacker);
        hitable.receive_hit(attacker);

        assert_eq!(hitable.times_hit, 2);
        assert_eq!(hitable.last_attacker, Some(attacker));
    }

    #[test]
    fn test_animator_params_default_false() {
        let mut params = AnimatorParams::default();
        assert!(!params.get_bool(ATTACKING_PARAM));

        params.set_bool(ATTACKING_PARAM, true);
        assert!(params.get_bool(ATTACKING_PARAM));
    }
}
