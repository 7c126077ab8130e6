//! Core game logic. Keep this crate free of IO and platform concerns.

pub mod config;
pub mod digits;
pub mod enumerate;
pub mod eval;
pub mod events;
pub mod game;
pub mod operator;
pub mod rng;
pub mod round;
pub mod schedule;
pub mod solver;
pub mod state;

pub use config::*;
pub use digits::*;
pub use enumerate::*;
pub use eval::*;
pub use events::*;
pub use game::*;
pub use operator::*;
pub use rng::*;
pub use schedule::*;
pub use solver::*;
pub use state::*;
