//! Horizontal facing of an actor

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Signed horizontal direction an actor is oriented toward.
///
/// Only two values exist, so a zero facing can't be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    /// Resolve facing from a horizontal scale: a mirrored (negative) X scale faces left.
    ///
    /// Uses the sign bit so a `-0.0` scale also counts as mirrored.
    pub fn from_scale(scale: Vec3) -> Self {
        if scale.x.is_sign_negative() {
            Facing::Left
        } else {
            Facing::Right
        }
    }

    /// Resolve the actor's current facing from its local transform
    pub fn from_transform(transform: &Transform) -> Self {
        Self::from_scale(transform.scale)
    }

    /// +1 for right, -1 for left
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Facing::Right => Facing::Left,
            Facing::Left => Facing::Right,
        }
    }

    /// Reflect a vector authored for a right-facing actor into this facing
    pub fn mirror(self, v: Vec3) -> Vec3 {
        Vec3::new(v.x * self.sign(), v.y, v.z)
    }

    pub fn name(self) -> &'static str {
        match self {
            Facing::Right => "right",
            Facing::Left => "left",
        }
    }
}
