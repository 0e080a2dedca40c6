use std::fmt;

use serde::{Deserialize, Serialize};

/// Converts a stored [`LocationRecord`] into the host's own position type.
///
/// The host decides what a position is (a world handle plus coordinates, an
/// entity transform, ...). Nothing here checks that the world still exists;
/// the host fails at teleport time if it does not.
pub trait Materialize {
    /// The host-native position type.
    type Position;

    /// Build a host position from a stored record.
    fn materialize(&self, record: &LocationRecord) -> Self::Position;
}

/// A bookmarked point in the game world.
///
/// Records are always captured from a concrete position and never change
/// once created: all fields are private and only readable through accessors.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    world: String,
    x: f64,
    y: f64,
    z: f64,
    yaw: f32,
    pitch: f32,
}

impl LocationRecord {
    /// Capture a record from a concrete position.
    pub fn capture(
        world: impl Into<String>,
        x: f64,
        y: f64,
        z: f64,
        yaw: f32,
        pitch: f32,
    ) -> Self {
        Self {
            world: world.into(),
            x,
            y,
            z,
            yaw,
            pitch,
        }
    }

    /// Hand the record to the host to obtain a host-native position.
    pub fn materialize<C: Materialize + ?Sized>(&self, ctx: &C) -> C::Position {
        ctx.materialize(self)
    }

    /// Identifier of the world this record lives in.
    pub fn world(&self) -> &str {
        &self.world
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn z(&self) -> f64 {
        self.z
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }
}

impl fmt::Display for LocationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({:.1}, {:.1}, {:.1})",
            self.world, self.x, self.y, self.z
        )
    }
}
