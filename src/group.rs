//! src/group.rs
use crate::accumulators::Accumulator;
use crate::control::RunControl;
use crate::error::PipelineError;
use crate::extractors::{Extraction, FieldExtractor, SkipReason};
use crate::record::{GroupKey, RecordParser, Rejection};
use crate::shard::InputShard;
use std::collections::HashMap;

/// Line counters for a shard, and after merging, for a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShardStats {
    pub lines: u64,
    pub headers: u64,
    pub accepted: u64,
    pub skipped: u64,
    pub rejected: u64,
}

impl ShardStats {
    pub fn merge(&mut self, other: ShardStats) {
        self.lines += other.lines;
        self.headers += other.headers;
        self.accepted += other.accepted;
        self.skipped += other.skipped;
        self.rejected += other.rejected;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    Accepted,
    Header,
    Skipped(SkipReason),
    Rejected(Rejection),
}

/// Map side partial aggregates of one shard.
#[derive(Debug)]
pub struct ShardOutput<A> {
    pub shard_id: usize,
    pub groups: HashMap<GroupKey, A>,
    pub stats: ShardStats,
}

/// Map phase driver. Buckets accepted measures by key; a key only appears
/// once something has been absorbed into it.
pub struct GroupAggregator<'a, E, A> {
    parser: &'a RecordParser,
    extractor: &'a E,
    groups: HashMap<GroupKey, A>,
    stats: ShardStats,
}

impl<'a, E, A> GroupAggregator<'a, E, A>
where
    E: FieldExtractor,
    A: Accumulator<Measure = E::Measure>,
{
    pub fn new(parser: &'a RecordParser, extractor: &'a E) -> Self {
        GroupAggregator {
            parser,
            extractor,
            groups: HashMap::new(),
            stats: ShardStats::default(),
        }
    }

    pub fn absorb_line(&mut self, line_index: usize, line: &str) -> LineOutcome {
        self.stats.lines += 1;
        let extraction = self
            .parser
            .parse(line, line_index)
            .and_then(|record| self.extractor.extract(&record));

        match extraction {
            Ok(Extraction::Emit(key, measure)) => {
                self.groups
                    .entry(key)
                    .or_insert_with(A::identity)
                    .absorb(measure);
                self.stats.accepted += 1;
                LineOutcome::Accepted
            }
            Ok(Extraction::Skip(reason)) => {
                tracing::trace!(line_index, %reason, "skipped record");
                self.stats.skipped += 1;
                LineOutcome::Skipped(reason)
            }
            Err(Rejection::Header) => {
                tracing::debug!(line_index, "skipped header line");
                self.stats.headers += 1;
                LineOutcome::Header
            }
            Err(rejection) => {
                tracing::warn!(
                    line_index,
                    raw_line = line,
                    reason = %rejection,
                    "Rejected malformed record"
                );
                self.stats.rejected += 1;
                LineOutcome::Rejected(rejection)
            }
        }
    }

    #[tracing::instrument(
        name = "Map shard",
        skip_all,
        fields(job = self.extractor.name(), shard = shard.id(), lines = shard.len())
    )]
    pub fn run(mut self, shard: &InputShard, control: &RunControl) -> Result<ShardOutput<A>, PipelineError> {
        for (line_index, line) in shard.lines() {
            control.checkpoint()?;
            if let LineOutcome::Rejected(_) = self.absorb_line(line_index, line) {
                control.record_rejection()?;
            }
        }
        Ok(self.finish(shard.id()))
    }

    pub fn groups(&self) -> &HashMap<GroupKey, A> {
        &self.groups
    }

    pub fn stats(&self) -> ShardStats {
        self.stats
    }

    pub fn finish(self, shard_id: usize) -> ShardOutput<A> {
        ShardOutput {
            shard_id,
            groups: self.groups,
            stats: self.stats,
        }
    }
}
