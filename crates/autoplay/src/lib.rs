//! Seeded headless play: a scripted player against the AI over the core
//! session API.

mod action;
mod config;
mod error;
mod simulator;
mod trace;

pub use action::*;
pub use config::*;
pub use error::*;
pub use simulator::*;
pub use trace::*;
