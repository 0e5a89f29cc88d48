//! # Orbital Core
//!
//! Plain data shared between the simulation and the renderer: world-space
//! geometry, the orb entities the universe hands over each frame, the color
//! palette, and an R-tree index for culling large star fields.
//!
//! Nothing in this crate draws. The renderer reads these types; the
//! simulation owns and mutates them.

pub mod geometry;
pub mod entity;
pub mod color;
pub mod spatial;

pub use geometry::{BBox, Point, Size};
pub use entity::{Orb, OrbKind, Player, Trail};
pub use color::{Palette, Rgb, Rgba};
pub use spatial::OrbIndex;
