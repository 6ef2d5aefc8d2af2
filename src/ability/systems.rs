//! Melee attack systems
//!
//! Bevy glue around the activation core: cooldown release ticking, trigger
//! handling, and translation of core notifications into events.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use super::components::{AnimatorParams, Hitable, ATTACKING_PARAM};
use super::events::*;
use super::facing::Facing;
use super::pipeline::MeleeAttack;
use super::targeting::{HitableTargets, PhysicsOverlaps};

/// Hit capability view over every entity carrying [`Hitable`]
#[derive(SystemParam)]
pub struct HitReceivers<'w, 's> {
    hitables: Query<'w, 's, &'static mut Hitable>,
    received: EventWriter<'w, HitReceived>,
}

impl HitableTargets for HitReceivers<'_, '_> {
    fn is_hitable(&self, target: Entity) -> bool {
        self.hitables.contains(target)
    }

    fn hit(&mut self, target: Entity, attacker: Entity) -> bool {
        let Ok(mut hitable) = self.hitables.get_mut(target) else {
            return false;
        };
        hitable.receive_hit(attacker);
        self.received.send(HitReceived { target, attacker });
        true
    }
}

/// Writers for every outbound melee notification
#[derive(SystemParam)]
pub struct MeleeNotifiers<'w> {
    used: EventWriter<'w, AbilityUsed>,
    used_right: EventWriter<'w, AbilityUsedRight>,
    used_left: EventWriter<'w, AbilityUsedLeft>,
    hit_right: EventWriter<'w, TargetHitRight>,
    hit_left: EventWriter<'w, TargetHitLeft>,
}

impl MeleeNotifiers<'_> {
    pub fn send(&mut self, actor: Entity, notification: MeleeNotification) {
        match notification {
            MeleeNotification::Used => {
                self.used.send(AbilityUsed { actor });
            }
            MeleeNotification::UsedInDirection(Facing::Right) => {
                self.used_right.send(AbilityUsedRight { actor });
            }
            MeleeNotification::UsedInDirection(Facing::Left) => {
                self.used_left.send(AbilityUsedLeft { actor });
            }
            MeleeNotification::TargetHit {
                target,
                facing: Facing::Right,
            } => {
                self.hit_right.send(TargetHitRight { actor, target });
            }
            MeleeNotification::TargetHit {
                target,
                facing: Facing::Left,
            } => {
                self.hit_left.send(TargetHitLeft { actor, target });
            }
        }
    }
}

/// Advance pending cooldown releases
pub fn release_cooldowns(time: Res<Time>, mut attacks: Query<&mut MeleeAttack>) {
    let delta = time.delta();
    for mut attack in attacks.iter_mut() {
        if attack.is_on_cooldown() {
            attack.tick_cooldown(delta);
        }
    }
}

/// Run the activation pipeline for every melee attack trigger this frame
pub fn process_melee_triggers(
    mut triggers: EventReader<MeleeAttackTriggered>,
    mut actors: Query<(&mut MeleeAttack, &Transform, Option<&mut AnimatorParams>)>,
    overlaps: PhysicsOverlaps,
    mut hit_receivers: HitReceivers,
    mut notifiers: MeleeNotifiers,
) {
    for trigger in triggers.read() {
        let actor = trigger.actor;
        let Ok((mut attack, transform, animator)) = actors.get_mut(actor) else {
            warn!("Melee attack triggered for {:?}, which has no MeleeAttack", actor);
            continue;
        };

        // Actors are root entities, so the local transform is their world pose
        match attack.activate(
            actor,
            transform.translation,
            transform,
            &overlaps,
            &mut hit_receivers,
        ) {
            Some(activation) => {
                debug!(
                    "{:?} swung {} at {:?}: {} target(s), {} hit(s)",
                    actor,
                    activation.facing.name(),
                    activation.volume.center,
                    activation.targets.len(),
                    activation.hits_applied
                );
                for notification in activation.notifications {
                    notifiers.send(actor, notification);
                }
            }
            None => {
                debug!(
                    "{:?} melee attack rejected, {:.2}s of cooldown left",
                    actor,
                    attack.gate().remaining().as_secs_f32()
                );
            }
        }

        // Raised on every input, accepted or not
        if let Some(mut animator) = animator {
            animator.set_bool(ATTACKING_PARAM, true);
        }
    }
}
