//! tests/api/cli.rs
use crate::helpers::{listings_csv, read_output, scratch_dir};
use assert_cmd::Command;
use predicates::prelude::*;

fn job(name: &str) -> Command {
    let mut cmd = Command::cargo_bin(name).expect("Failed to find job binary");
    cmd.current_dir(env!("CARGO_MANIFEST_DIR"));
    cmd
}

#[test]
fn should_print_usage_without_arguments() {
    job("category-revenue")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn should_print_usage_with_a_single_argument() {
    job("store-ratings")
        .arg(listings_csv())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("<OUTPUT>"));
}

#[test]
fn category_revenue_should_write_results_and_a_success_marker() {
    let output = scratch_dir();

    job("category-revenue")
        .arg(listings_csv())
        .arg(&output)
        .assert()
        .success();

    assert_eq!(read_output(&output), "Lamps\t98.0\nMugs\t38.5\nTents\t676.5\n");
    assert!(output.join("_SUCCESS").exists());
    std::fs::remove_dir_all(output).expect("Failed to delete dirs");
}

#[test]
fn store_ratings_should_write_one_line_per_store() {
    let output = scratch_dir();

    job("store-ratings")
        .arg(listings_csv())
        .arg(&output)
        .assert()
        .success();

    let written = read_output(&output);
    assert_eq!(written.lines().count(), 3);
    assert!(written.starts_with(
        "Acme Outdoors\tHighly Rated Products: 2 (100%) | Average Rating: 4.7 | Total Products: 2\n"
    ));
    std::fs::remove_dir_all(output).expect("Failed to delete dirs");
}

#[test]
fn should_refuse_to_overwrite_an_existing_output_directory() {
    let output = scratch_dir();
    std::fs::create_dir_all(&output).expect("Failed to create test directory");
    std::fs::write(output.join("keep.txt"), "previous run").expect("Failed to write file");

    job("category-revenue")
        .arg(listings_csv())
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    assert!(output.join("keep.txt").exists());
    std::fs::remove_dir_all(output).expect("Failed to delete dirs");
}

#[test]
fn should_fail_when_the_input_is_missing() {
    let dir = scratch_dir();

    job("store-ratings")
        .arg(dir.join("missing.csv"))
        .arg(dir.join("out"))
        .assert()
        .failure();

    assert!(!dir.join("out").exists());
}

#[test]
fn environment_should_override_the_partition_count() {
    let output = scratch_dir();

    job("category-revenue")
        .env("LISTINGS_PIPELINE__REDUCE_TASKS", "3")
        .arg(listings_csv())
        .arg(&output)
        .assert()
        .success();

    let mut lines = 0;
    for partition in 0..3 {
        let path = output.join(format!("part-r-{partition:05}"));
        lines += std::fs::read_to_string(path)
            .expect("Failed to read partition")
            .lines()
            .count();
    }
    assert_eq!(lines, 3);
    std::fs::remove_dir_all(output).expect("Failed to delete dirs");
}

#[test]
fn should_fail_and_leave_no_output_when_the_rejection_limit_is_hit() {
    let output = scratch_dir();

    job("store-ratings")
        .env("LISTINGS_PIPELINE__MAX_REJECTED_RECORDS", "0")
        .arg(listings_csv())
        .arg(&output)
        .assert()
        .failure();

    assert!(!output.exists());
}
