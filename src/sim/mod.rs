//! The iterative force simulation.
//!
//! One engine, two termination policies: alpha cooling for network-style
//! layouts that run to quiescence, and a fixed relaxation budget for
//! layouts that want a bounded number of passes (the word cloud).

mod engine;

pub use engine::{
    DEFAULT_ALPHA, DEFAULT_ALPHA_DECAY, DEFAULT_ALPHA_MIN, DEFAULT_MAX_TICKS,
    DEFAULT_VELOCITY_DECAY, Simulation, SimulationConfig, TerminationMode,
};
