//! Hexmarch - turn-based world simulation engine
//!
//! A region-graph world on rectangular-toroidal or icosahedral topology,
//! with cellular-automaton terrain generation, a staircase-wage economy,
//! two-phase population migration, and a level-aware distance oracle.

pub mod catalog;
pub mod core;
pub mod distance;
pub mod economy;
pub mod migration;
pub mod persist;
pub mod turn;
pub mod world;
pub mod worldgen;
