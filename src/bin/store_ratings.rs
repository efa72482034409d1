//! src/bin/store_ratings.rs
use listing_aggregates::{cli, jobs};
use std::process::ExitCode;

fn main() -> ExitCode {
    cli::run_job("store-ratings", jobs::store_ratings())
}
