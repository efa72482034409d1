//! src/lib.rs
pub mod accumulators;
pub mod cli;
pub mod configuration;
pub mod control;
pub mod emitter;
pub mod error;
pub mod executors;
pub mod extractors;
pub mod format;
pub mod group;
pub mod jobs;
pub mod pipeline;
pub mod record;
pub mod reducer;
pub mod shard;
pub mod shuffle;
pub mod telemetry;
#[cfg(test)]
mod test_utils;
