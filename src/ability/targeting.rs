//! Hit-volume targeting
//!
//! Places an axis-aligned box in front of the actor, asks the physics world
//! which bodies overlap it, and narrows the answer down to the targets one
//! activation may hit:
//! - the body must resolve to a live entity
//! - it must be hitable
//! - each entity is kept once, however many colliders it exposes
//! - the acting entity never targets itself
//!
//! Survivors keep the order the physics query reported them in.

use avian3d::prelude::*;
use bevy::ecs::entity::Entities;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use smallvec::SmallVec;

use super::config::MeleeAttackConfig;
use super::facing::Facing;

/// Targets collected by one activation. Most swings touch only a handful.
pub type TargetList = SmallVec<[Entity; 8]>;

/// Axis-aligned box in world space used to detect targets for one activation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitVolume {
    pub center: Vec3,
    pub half_extents: Vec3,
}

impl HitVolume {
    /// Volume for an actor at `origin` facing `facing`.
    ///
    /// The configured offset is authored for a right-facing actor and its X
    /// component is mirrored for a left-facing one.
    pub fn for_facing(origin: Vec3, config: &MeleeAttackConfig, facing: Facing) -> Self {
        Self {
            center: origin + facing.mirror(config.hit_offset()),
            half_extents: config.hit_extent() / 2.0,
        }
    }

    /// Full size of the box
    pub fn size(&self) -> Vec3 {
        self.half_extents * 2.0
    }

    pub fn contains(&self, point: Vec3) -> bool {
        let d = (point - self.center).abs();
        d.x <= self.half_extents.x && d.y <= self.half_extents.y && d.z <= self.half_extents.z
    }
}

/// Spatial overlap query against the physics world.
pub trait OverlapQuery {
    /// Every body overlapping `volume`, one entry per overlapping collider.
    ///
    /// An entry is `None` when the collider's owning entity can't be resolved.
    /// Bodies with several colliders may appear several times.
    fn overlap_box(&self, volume: &HitVolume) -> Vec<Option<Entity>>;
}

/// Hit capability lookup and application on potential targets.
pub trait HitableTargets {
    /// Whether `target` currently exposes the hit contract
    fn is_hitable(&self, target: Entity) -> bool;

    /// Apply a hit from `attacker`. Returns false when `target` isn't hitable.
    fn hit(&mut self, target: Entity, attacker: Entity) -> bool;
}

/// Narrow raw overlap results to the unique, hitable, non-self targets.
pub fn filter_targets<T: HitableTargets + ?Sized>(
    actor: Entity,
    candidates: impl IntoIterator<Item = Option<Entity>>,
    targets: &T,
) -> TargetList {
    let mut accepted = TargetList::new();
    for candidate in candidates {
        let Some(entity) = candidate else {
            continue;
        };
        if !targets.is_hitable(entity) {
            continue;
        }
        if accepted.contains(&entity) {
            continue;
        }
        if entity == actor {
            continue;
        }
        accepted.push(entity);
    }
    accepted
}

/// Query the overlapping bodies for `volume` and filter them for `actor`.
pub fn find_targets<O, T>(actor: Entity, volume: &HitVolume, overlaps: &O, targets: &T) -> TargetList
where
    O: OverlapQuery + ?Sized,
    T: HitableTargets + ?Sized,
{
    filter_targets(actor, overlaps.overlap_box(volume), targets)
}

/// Overlap queries backed by the avian3d spatial query pipeline.
///
/// Colliders attached to a child of a rigid body resolve to that body.
#[derive(SystemParam)]
pub struct PhysicsOverlaps<'w, 's> {
    spatial: SpatialQuery<'w, 's>,
    collider_parents: Query<'w, 's, &'static ColliderParent>,
    entities: &'w Entities,
}

impl OverlapQuery for PhysicsOverlaps<'_, '_> {
    fn overlap_box(&self, volume: &HitVolume) -> Vec<Option<Entity>> {
        // avian cuboids take full side lengths
        let size = volume.size();
        let shape = Collider::cuboid(size.x, size.y, size.z);

        self.spatial
            .shape_intersections(
                &shape,
                volume.center,
                Quat::IDENTITY,
                &SpatialQueryFilter::default(),
            )
            .into_iter()
            .map(|collider| {
                let body = self
                    .collider_parents
                    .get(collider)
                    .map(ColliderParent::get)
                    .unwrap_or(collider);
                self.entities.contains(body).then_some(body)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct HitableSet(HashSet<Entity>);

    impl HitableTargets for HitableSet {
        fn is_hitable(&self, target: Entity) -> bool {
            self.0.contains(&target)
        }

        fn hit(&mut self, target: Entity, _attacker: Entity) -> bool {
            self.0.contains(&target)
        }
    }

    fn e(index: u32) -> Entity {
        Entity::from_raw(index)
    }

    fn hitables(indices: &[u32]) -> HitableSet {
        HitableSet(indices.iter().map(|&i| e(i)).collect())
    }

    #[test]
    fn test_volume_center_right() {
        let config = MeleeAttackConfig {
            hit_extent: [1.0, 1.0, 0.0],
            hit_offset: [1.0, 0.0, 0.0],
            cooldown_secs: 0.75,
        };
        let origin = Vec3::new(3.0, 2.0, -1.0);
        let volume = HitVolume::for_facing(origin, &config, Facing::Right);

        assert_eq!(volume.center, origin + Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(volume.half_extents, Vec3::new(0.5, 0.5, 0.0));
    }

    #[test]
    fn test_volume_center_left_mirrors_x_only() {
        let config = MeleeAttackConfig {
            hit_extent: [2.0, 1.0, 1.0],
            hit_offset: [1.5, 0.5, 0.25],
            cooldown_secs: 0.75,
        };
        let volume = HitVolume::for_facing(Vec3::ZERO, &config, Facing::Left);

        assert_eq!(volume.center, Vec3::new(-1.5, 0.5, 0.25));
        assert_eq!(volume.size(), Vec3::new(2.0, 1.0, 1.0));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let volume = HitVolume {
            center: Vec3::ZERO,
            half_extents: Vec3::splat(0.5),
        };
        assert!(volume.contains(Vec3::new(0.5, -0.5, 0.0)));
        assert!(!volume.contains(Vec3::new(0.51, 0.0, 0.0)));
    }

    #[test]
    fn test_filter_drops_unresolved_bodies() {
        let targets = hitables(&[1, 2]);
        let result = filter_targets(e(0), [Some(e(1)), None, Some(e(2))], &targets);
        assert_eq!(result.as_slice(), &[e(1), e(2)]);
    }

    #[test]
    fn test_filter_drops_non_hitable() {
        let targets = hitables(&[2]);
        let result = filter_targets(e(0), [Some(e(1)), Some(e(2))], &targets);
        assert_eq!(result.as_slice(), &[e(2)]);
    }

    #[test]
    fn test_filter_deduplicates_multi_collider_bodies() {
        let targets = hitables(&[1, 2]);
        let result = filter_targets(
            e(0),
            [Some(e(1)), Some(e(2)), Some(e(1)), Some(e(1))],
            &targets,
        );
        assert_eq!(result.as_slice(), &[e(1), e(2)]);
    }

    #[test]
    fn test_filter_excludes_actor_even_if_hitable() {
        let targets = hitables(&[0, 1]);
        let result = filter_targets(e(0), [Some(e(0)), Some(e(1)), Some(e(0))], &targets);
        assert_eq!(result.as_slice(), &[e(1)]);
    }

    #[test]
    fn test_filter_keeps_query_order() {
        let targets = hitables(&[1, 2, 3]);
        let result = filter_targets(e(0), [Some(e(3)), Some(e(1)), Some(e(2))], &targets);
        assert_eq!(result.as_slice(), &[e(3), e(1), e(2)]);
    }

    #[test]
    fn test_empty_query_yields_no_targets() {
        let targets = hitables(&[1]);
        assert!(filter_targets(e(0), Vec::new(), &targets).is_empty());
    }
}
