//! The region graph and its topology

pub mod graph;
pub mod names;
pub mod region;
pub mod topology;

pub use graph::{RegionArray, RegionGraph};
pub use region::{Gate, Market, Production, Region, Structure, StructureKind, Town, TownTier};
pub use topology::GeometryMode;
