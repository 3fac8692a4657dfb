//! MB-Simulation: Stand-in EMG band for demos and tests
//!
//! Activation patterns, a rectified envelope simulator and a paced reading
//! stream.

pub mod emg_simulator;
pub mod real_time_stream;
pub mod signal_patterns;

pub use emg_simulator::*;
pub use real_time_stream::*;
pub use signal_patterns::*;
