//! tests/api/pipeline.rs
use crate::helpers::{listings_csv, read_output, scratch_dir};
use claims::{assert_matches, assert_ok};
use listing_aggregates::control::{CancellationFlag, RunControl};
use listing_aggregates::emitter::{FileEmitter, MemoryEmitter, SUCCESS_MARKER};
use listing_aggregates::error::PipelineError;
use listing_aggregates::executors::{ParallelExecutor, SequentialExecutor};
use listing_aggregates::jobs;
use std::fs::File;
use std::io::BufReader;

fn open_listings() -> BufReader<File> {
    BufReader::new(File::open(listings_csv()).expect("Failed to open test data"))
}

#[test]
fn should_total_revenue_per_category_from_a_file() {
    let output = scratch_dir();
    let mut emitter = assert_ok!(FileEmitter::create(&output, 1));

    let report = assert_ok!(jobs::category_revenue().run(
        open_listings(),
        &SequentialExecutor,
        &mut emitter,
        &RunControl::default()
    ));
    drop(emitter);

    assert_eq!(read_output(&output), "Lamps\t98.0\nMugs\t38.5\nTents\t676.5\n");
    assert!(output.join(SUCCESS_MARKER).exists());
    assert_eq!(report.keys, 3);
    assert_eq!(report.stats.lines, 11);
    assert_eq!(report.stats.headers, 1);
    assert_eq!(report.stats.accepted, 6);
    assert_eq!(report.stats.skipped, 2);
    assert_eq!(report.stats.rejected, 2);
    std::fs::remove_dir_all(output).expect("Failed to delete dirs");
}

#[test]
fn should_summarise_store_ratings_from_a_file() {
    let mut emitter = MemoryEmitter::new();

    let report = assert_ok!(jobs::store_ratings().run(
        open_listings(),
        &SequentialExecutor,
        &mut emitter,
        &RunControl::default()
    ));

    assert_eq!(
        emitter.get("Acme Outdoors"),
        Some("Highly Rated Products: 2 (100%) | Average Rating: 4.7 | Total Products: 2")
    );
    assert_eq!(
        emitter.get("Brightside"),
        Some("Highly Rated Products: 0 (0%) | Average Rating: 4 | Total Products: 2")
    );
    assert_eq!(
        emitter.get("Corner Shop"),
        Some("Highly Rated Products: 2 (100%) | Average Rating: 4.75 | Total Products: 2")
    );
    assert_eq!(report.stats.accepted, 6);
    assert_eq!(report.stats.skipped, 2);
    assert_eq!(report.stats.rejected, 2);
}

#[test]
fn parallel_and_sequential_runs_should_agree() {
    let sequential = {
        let mut emitter = MemoryEmitter::new();
        assert_ok!(jobs::store_ratings().run(
            open_listings(),
            &SequentialExecutor,
            &mut emitter,
            &RunControl::default()
        ));
        emitter.results().to_vec()
    };

    let executor = assert_ok!(ParallelExecutor::new(3));
    let settings = listing_aggregates::configuration::PipelineSettings {
        split_size_in_bytes: 128,
        ..Default::default()
    };
    let mut emitter = MemoryEmitter::new();
    let report = assert_ok!(jobs::store_ratings().with_settings(&settings).run(
        open_listings(),
        &executor,
        &mut emitter,
        &RunControl::default()
    ));

    assert!(report.shards > 1);
    assert_eq!(emitter.results(), sequential.as_slice());
}

#[test]
fn should_abort_once_too_many_records_are_rejected() {
    let output = scratch_dir();
    let mut emitter = assert_ok!(FileEmitter::create(&output, 1));

    let result = jobs::category_revenue().run(
        open_listings(),
        &SequentialExecutor,
        &mut emitter,
        &RunControl::new(CancellationFlag::new(), Some(1)),
    );
    drop(emitter);

    assert_matches!(
        result,
        Err(PipelineError::TooManyRejections { rejected: 2, limit: 1 })
    );
    assert!(!output.exists());
}
