//! src/pipeline.rs
use crate::accumulators::{Accumulator, AggregateResult};
use crate::configuration::PipelineSettings;
use crate::control::RunControl;
use crate::emitter::ResultEmitter;
use crate::error::PipelineError;
use crate::executors::Executor;
use crate::extractors::FieldExtractor;
use crate::group::{GroupAggregator, ShardStats};
use crate::record::{GroupKey, RecordParser};
use crate::reducer::reduce;
use crate::shard::{InputShard, ShardSplitter};
use crate::shuffle::Shuffle;
use std::io::BufRead;
use std::marker::PhantomData;

/// Counters for a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineReport {
    pub shards: usize,
    pub keys: usize,
    pub stats: ShardStats,
}

/// Wires parser, extractor, map, shuffle, reduce and sink together. Holds no
/// job logic of its own.
pub struct Pipeline<E, A> {
    parser: RecordParser,
    extractor: E,
    split_size_in_bytes: u64,
    _accumulator: PhantomData<fn() -> A>,
}

impl<E, A> Pipeline<E, A>
where
    E: FieldExtractor,
    A: Accumulator<Measure = E::Measure>,
{
    pub fn new(extractor: E) -> Self {
        Pipeline {
            parser: RecordParser::default(),
            extractor,
            split_size_in_bytes: PipelineSettings::default().split_size_in_bytes,
            _accumulator: PhantomData,
        }
    }

    pub fn with_settings(mut self, settings: &PipelineSettings) -> Self {
        self.split_size_in_bytes = settings.split_size_in_bytes;
        self
    }

    pub fn name(&self) -> &'static str {
        self.extractor.name()
    }

    #[tracing::instrument(name = "Run pipeline", skip_all, fields(job = self.name(), executor = executor.name()))]
    pub fn run<R, X, W>(
        &self,
        input: R,
        executor: &X,
        emitter: &mut W,
        control: &RunControl,
    ) -> Result<PipelineReport, PipelineError>
    where
        R: BufRead,
        X: Executor,
        W: ResultEmitter,
    {
        let shards = ShardSplitter::new(self.split_size_in_bytes).shards(input, control);
        let (results, report) = self.run_shards(shards, executor, control)?;
        for (key, result) in &results {
            emitter.emit(key, result)?;
        }
        emitter.commit()?;
        tracing::info!(
            shards = report.shards,
            keys = report.keys,
            lines = report.stats.lines,
            accepted = report.stats.accepted,
            skipped = report.stats.skipped,
            rejected = report.stats.rejected,
            "pipeline finished"
        );
        Ok(report)
    }

    /// Map shards as they are read, at most `executor.parallelism()` at a
    /// time, then shuffle by key and reduce every key. Results come back in
    /// ascending key order.
    pub fn run_shards<I, X>(
        &self,
        shards: I,
        executor: &X,
        control: &RunControl,
    ) -> Result<(Vec<(GroupKey, AggregateResult)>, PipelineReport), PipelineError>
    where
        I: IntoIterator<Item = Result<InputShard, PipelineError>>,
        X: Executor,
    {
        let batch_size = executor.parallelism().max(1);
        let mut shards = shards.into_iter();
        let mut shuffle = Shuffle::new();
        let mut stats = ShardStats::default();
        let mut shard_count = 0;

        loop {
            let batch = shards
                .by_ref()
                .take(batch_size)
                .collect::<Result<Vec<_>, _>>()?;
            if batch.is_empty() {
                break;
            }
            shard_count += batch.len();
            let outputs = executor.execute(batch, |shard| {
                GroupAggregator::<E, A>::new(&self.parser, &self.extractor).run(&shard, control)
            })?;
            for output in outputs {
                tracing::debug!(
                    shard = output.shard_id,
                    keys = output.groups.len(),
                    "routing shard output"
                );
                stats.merge(output.stats);
                shuffle.route(output.groups);
            }
            tracing::debug!(shards = shard_count, keys = shuffle.key_count(), "mapped batch");
        }

        let keyed: Vec<(GroupKey, Vec<A>)> = shuffle.into_groups().into_iter().collect();
        let results = executor.execute(keyed, |(key, partials)| {
            control.checkpoint()?;
            let result = reduce(&key, partials)?;
            Ok((key, result))
        })?;

        let report = PipelineReport {
            shards: shard_count,
            keys: results.len(),
            stats,
        };
        Ok((results, report))
    }
}
