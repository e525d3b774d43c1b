//! Conway's game of life on an unbounded plane.
//!
//! State is a sparse [`LiveSet`] of cells; [`next_generation`] only ever looks at live
//! cells and their neighbors, so patterns may wander arbitrarily far without a grid.

pub use cell::Cell;
mod cell;

pub use error::{LifeError, Result};
mod error;

pub use neighborhood::{moore_neighbors, neighborhood, neighbors, Radius};
mod neighborhood;

pub use world::LiveSet;
mod world;

pub use engine::{advance, is_alive_next, next_generation, next_generation_with_radius};
mod engine;

pub mod pattern;

pub use sim::{Sim, SimCmd, SimConfig, SimHandle, Status};
mod sim;

pub use view::View;
pub mod view;
