//! Conway's Game of Life on a wrapping (toroidal) square grid.
//!
//! [`Grid`] is an immutable snapshot, [`step::next_generation`] computes the
//! following generation, [`patterns`] seeds grids, and
//! [`SimulationController`] holds the current grid and steps it on a tokio
//! timer while running.

pub mod config;
pub mod controller;
pub mod error;
pub mod grid;
pub mod patterns;
pub mod step;

pub use config::SimulationConfig;
pub use controller::{SimulationController, Snapshot};
pub use error::{LifeError, Result};
pub use grid::Grid;
pub use patterns::{Pattern, PatternId, Seed};
