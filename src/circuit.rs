//! Representation and editing of circuits on the grid

mod circuit;
mod gates;
pub mod generators;
pub mod geometry;
mod id;
pub mod stats;
mod wire;

pub use circuit::Circuit;
pub use gates::{Gate, GateKind};
pub use geometry::Point;
pub use id::{GateId, WireId};
pub use wire::{Elbow, Wire};
