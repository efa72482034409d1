//! src/bin/category_revenue.rs
use listing_aggregates::{cli, jobs};
use std::process::ExitCode;

fn main() -> ExitCode {
    cli::run_job("category-revenue", jobs::category_revenue())
}
