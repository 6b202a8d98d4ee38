//! Sliding-window rate monitoring for tick-sampled cumulative counters,
//! Geiger-counter style: a fixed-capacity delta buffer answers "how many
//! pulses in the last N ticks?" in O(1), and the layers around it turn
//! those deltas into counts-per-minute, dose rates, and status lines.

pub mod config;
pub mod delta_buffer;
pub mod dose;
pub mod format;
pub mod monitor;
pub mod persist;
pub mod source;
