//! Activation pipeline
//!
//! The melee attack has two states, idle and cooling down, driven only by
//! its cooldown gate. An accepted activation runs to completion in one call:
//!
//! 1. gate accepts, cooldown armed
//! 2. `Used`
//! 3. facing resolved from the actor's current orientation
//! 4. `UsedInDirection(facing)`
//! 5. hit volume queried and filtered
//! 6. per target: `TargetHit` then the hit itself
//!
//! A rejected activation does nothing at all.

use bevy::prelude::*;
use std::time::Duration;

use super::config::MeleeAttackConfig;
use super::cooldown::CooldownGate;
use super::events::MeleeNotification;
use super::facing::Facing;
use super::targeting::{find_targets, HitVolume, HitableTargets, OverlapQuery, TargetList};

/// Directional melee attack owned by one actor
#[derive(Component, Debug, Clone)]
pub struct MeleeAttack {
    config: MeleeAttackConfig,
    gate: CooldownGate,
    /// Facing resolved by the most recent accepted activation
    facing: Facing,
}

/// Everything one accepted activation did
#[derive(Debug, Clone)]
pub struct Activation {
    pub facing: Facing,
    pub volume: HitVolume,
    /// Filtered targets, in query order
    pub targets: TargetList,
    /// Targets that actually received a hit
    pub hits_applied: usize,
    pub notifications: Vec<MeleeNotification>,
}

impl MeleeAttack {
    pub fn new(config: MeleeAttackConfig) -> Self {
        let gate = CooldownGate::new(config.cooldown_secs);
        Self {
            config,
            gate,
            facing: Facing::default(),
        }
    }

    pub fn config(&self) -> &MeleeAttackConfig {
        &self.config
    }

    pub fn gate(&self) -> &CooldownGate {
        &self.gate
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn is_on_cooldown(&self) -> bool {
        self.gate.is_on_cooldown()
    }

    /// Advance the pending cooldown release
    pub fn tick_cooldown(&mut self, delta: Duration) {
        self.gate.tick(delta);
    }

    /// Hit volume an activation would use right now for an actor posed by `transform`
    pub fn volume_for(&self, transform: &Transform) -> HitVolume {
        HitVolume::for_facing(
            transform.translation,
            &self.config,
            Facing::from_transform(transform),
        )
    }

    /// Run one activation for `actor` standing at `origin` with local `transform`.
    ///
    /// Returns `None` when the cooldown gate rejects the attempt.
    pub fn activate<O, T>(
        &mut self,
        actor: Entity,
        origin: Vec3,
        transform: &Transform,
        overlaps: &O,
        targets: &mut T,
    ) -> Option<Activation>
    where
        O: OverlapQuery + ?Sized,
        T: HitableTargets + ?Sized,
    {
        if !self.gate.try_activate() {
            return None;
        }

        let mut notifications = vec![MeleeNotification::Used];

        self.facing = Facing::from_transform(transform);
        let facing = self.facing;
        notifications.push(MeleeNotification::UsedInDirection(facing));

        let volume = HitVolume::for_facing(origin, &self.config, facing);
        let found = find_targets(actor, &volume, overlaps, targets);
        let hits_applied = apply_hits(actor, facing, &found, targets, &mut notifications);

        Some(Activation {
            facing,
            volume,
            targets: found,
            hits_applied,
            notifications,
        })
    }
}

/// Hit each target in order, announcing every hit in `facing` first.
///
/// The first target that is no longer hitable ends the whole batch: it and
/// every target after it are left untouched. Returns the number of hits.
pub fn apply_hits<T: HitableTargets + ?Sized>(
    actor: Entity,
    facing: Facing,
    targets: &[Entity],
    hitables: &mut T,
    notifications: &mut Vec<MeleeNotification>,
) -> usize {
    let mut applied = 0;
    for &target in targets {
        if !hitables.is_hitable(target) {
            return applied;
        }
        notifications.push(MeleeNotification::TargetHit { target, facing });
        if hitables.hit(target, actor) {
            applied += 1;
        }
    }
    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Default)]
    struct Dummies {
        hits: HashMap<Entity, u32>,
    }

    impl Dummies {
        fn with(indices: &[u32]) -> Self {
            Self {
                hits: indices.iter().map(|&i| (Entity::from_raw(i), 0)).collect(),
            }
        }
    }

    impl HitableTargets for Dummies {
        fn is_hitable(&self, target: Entity) -> bool {
            self.hits.contains_key(&target)
        }

        fn hit(&mut self, target: Entity, _attacker: Entity) -> bool {
            match self.hits.get_mut(&target) {
                Some(count) => {
                    *count += 1;
                    true
                }
                None => false,
            }
        }
    }

    struct NoOverlaps;

    impl OverlapQuery for NoOverlaps {
        fn overlap_box(&self, _volume: &HitVolume) -> Vec<Option<Entity>> {
            Vec::new()
        }
    }

    #[test]
    fn test_rejected_activation_changes_nothing() {
        let mut attack = MeleeAttack::new(MeleeAttackConfig::default());
        let actor = Entity::from_raw(0);
        let mut dummies = Dummies::default();

        assert!(attack
            .activate(actor, Vec3::ZERO, &Transform::default(), &NoOverlaps, &mut dummies)
            .is_some());

        let left = Transform::from_scale(Vec3::new(-1.0, 1.0, 1.0));
        assert!(attack
            .activate(actor, Vec3::ZERO, &left, &NoOverlaps, &mut dummies)
            .is_none());
        // Facing isn't re-resolved by a rejected attempt
        assert_eq!(attack.facing(), Facing::Right);
    }

    #[test]
    fn test_empty_swing_still_announces_use() {
        let mut attack = MeleeAttack::new(MeleeAttackConfig::default());
        let activation = attack
            .activate(
                Entity::from_raw(0),
                Vec3::ZERO,
                &Transform::default(),
                &NoOverlaps,
                &mut Dummies::default(),
            )
            .unwrap();

        assert_eq!(
            activation.notifications,
            vec![
                MeleeNotification::Used,
                MeleeNotification::UsedInDirection(Facing::Right)
            ]
        );
        assert_eq!(activation.hits_applied, 0);
    }

    #[test]
    fn test_volume_for_follows_live_facing_before_any_swing() {
        let attack = MeleeAttack::new(MeleeAttackConfig::default());
        let spawned_left = Transform::from_xyz(2.0, 0.0, 0.0).with_scale(Vec3::new(-1.0, 1.0, 1.0));

        let volume = attack.volume_for(&spawned_left);

        assert_eq!(volume.center, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(attack.facing(), Facing::Right, "Nothing resolved yet");
    }

    #[test]
    fn test_apply_hits_aborts_on_first_missing_capability() {
        let mut dummies = Dummies::with(&[2, 3]);
        let targets = [Entity::from_raw(1), Entity::from_raw(2), Entity::from_raw(3)];
        let mut notifications = Vec::new();

        let applied = apply_hits(
            Entity::from_raw(0),
            Facing::Left,
            &targets,
            &mut dummies,
            &mut notifications,
        );

        assert_eq!(applied, 0);
        assert!(notifications.is_empty());
        assert!(dummies.hits.values().all(|&count| count == 0));
    }

    #[test]
    fn test_apply_hits_keeps_hits_before_the_abort() {
        let mut dummies = Dummies::with(&[1, 3]);
        let targets = [Entity::from_raw(1), Entity::from_raw(2), Entity::from_raw(3)];
        let mut notifications = Vec::new();

        let applied = apply_hits(
            Entity::from_raw(0),
            Facing::Right,
            &targets,
            &mut dummies,
            &mut notifications,
        );

        assert_eq!(applied, 1);
        assert_eq!(dummies.hits[&Entity::from_raw(1)], 1);
        assert_eq!(dummies.hits[&Entity::from_raw(3)], 0);
        assert_eq!(notifications.len(), 1);
    }
}
