use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::geometry::{BBox, Point};

/// What an orb represents. Decides which color batch it is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrbKind {
    Player,
    Star,
}

/// A round point-entity in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Orb {
    pub kind: OrbKind,
    pub position: Point,
    pub radius: f64,
}

impl Orb {
    pub fn new(kind: OrbKind, position: Point, radius: f64) -> Self {
        Self {
            kind,
            position,
            radius,
        }
    }

    pub fn star(position: Point, radius: f64) -> Self {
        Self::new(OrbKind::Star, position, radius)
    }

    pub fn is_player(&self) -> bool {
        self.kind == OrbKind::Player
    }

    pub fn bbox(&self) -> BBox {
        BBox::around(self.position, self.radius)
    }
}

/// Recent player positions, newest first. Never holds more than `capacity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "TrailData")]
pub struct Trail {
    particles: VecDeque<Point>,
    capacity: usize,
}

impl Trail {
    pub fn new(capacity: usize) -> Self {
        Self {
            particles: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Build a trail from points already ordered newest first, keeping at
    /// most `capacity` of them.
    pub fn from_newest(capacity: usize, points: impl IntoIterator<Item = Point>) -> Self {
        Self {
            particles: points.into_iter().take(capacity).collect(),
            capacity,
        }
    }

    /// Push a position to the front, dropping the oldest one past capacity.
    pub fn record(&mut self, position: Point) {
        if self.capacity == 0 {
            return;
        }
        self.particles.push_front(position);
        self.particles.truncate(self.capacity);
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Point> {
        self.particles.iter()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

/// Wire form of a [`Trail`]; the capacity bound is re-applied on load.
#[derive(Deserialize)]
struct TrailData {
    particles: Vec<Point>,
    capacity: usize,
}

impl From<TrailData> for Trail {
    fn from(data: TrailData) -> Self {
        Trail::from_newest(data.capacity, data.particles)
    }
}

/// The controllable orb. Carries its trail and fuel tank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub orb: Orb,
    pub trail: Trail,
    pub fuel: f64,
    pub max_fuel: f64,
}

impl Player {
    pub fn new(position: Point, radius: f64, max_fuel: f64, trail_capacity: usize) -> Self {
        Self {
            orb: Orb::new(OrbKind::Player, position, radius),
            trail: Trail::new(trail_capacity),
            fuel: max_fuel,
            max_fuel,
        }
    }

    pub fn position(&self) -> Point {
        self.orb.position
    }

    /// Move the player and record the new position in the trail.
    pub fn move_to(&mut self, position: Point) {
        self.orb.position = position;
        self.trail.record(position);
    }
}
