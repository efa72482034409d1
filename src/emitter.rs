//! src/emitter.rs
use crate::accumulators::AggregateResult;
use crate::error::PipelineError;
use crate::record::GroupKey;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const SUCCESS_MARKER: &str = "_SUCCESS";

/// Sink for final per-key results.
pub trait ResultEmitter {
    fn emit(&mut self, key: &GroupKey, result: &AggregateResult) -> Result<(), PipelineError>;

    /// Called once after every key was emitted.
    fn commit(&mut self) -> Result<(), PipelineError> {
        Ok(())
    }
}

/// Collects results in emission order.
#[derive(Debug, Default)]
pub struct MemoryEmitter {
    results: Vec<(GroupKey, AggregateResult)>,
    committed: bool,
}

impl MemoryEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn results(&self) -> &[(GroupKey, AggregateResult)] {
        &self.results
    }

    pub fn is_committed(&self) -> bool {
        self.committed
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.results
            .iter()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, result)| result.as_str())
    }
}

impl ResultEmitter for MemoryEmitter {
    fn emit(&mut self, key: &GroupKey, result: &AggregateResult) -> Result<(), PipelineError> {
        self.results.push((key.clone(), result.clone()));
        Ok(())
    }

    fn commit(&mut self) -> Result<(), PipelineError> {
        self.committed = true;
        Ok(())
    }
}

/// Writes `key<TAB>result` lines into `part-r-NNNNN` files, one per reduce
/// partition. The output directory must not exist yet; it is removed again
/// if the emitter is dropped before `commit`.
#[derive(Debug)]
pub struct FileEmitter {
    output_dir: PathBuf,
    writers: Vec<BufWriter<File>>,
    committed: bool,
}

impl FileEmitter {
    pub fn create(output_dir: impl AsRef<Path>, partition_count: usize) -> Result<Self, PipelineError> {
        let output_dir = output_dir.as_ref().to_path_buf();
        if output_dir.exists() {
            return Err(PipelineError::OutputExists(output_dir.display().to_string()));
        }
        std::fs::create_dir_all(&output_dir).map_err(PipelineError::Output)?;

        let mut emitter = FileEmitter {
            output_dir,
            writers: Vec::with_capacity(partition_count.max(1)),
            committed: false,
        };
        for partition in 0..partition_count.max(1) {
            let path = emitter.output_dir.join(partition_file_name(partition));
            let file = File::create(&path).map_err(PipelineError::Output)?;
            emitter.writers.push(BufWriter::with_capacity(8192, file));
        }
        Ok(emitter)
    }

    pub fn get_partition(&self, key: &GroupKey) -> usize {
        partition_for(key, self.writers.len())
    }

    fn flush_all(&mut self) -> std::io::Result<()> {
        for writer in self.writers.iter_mut() {
            writer.flush()?;
        }
        Ok(())
    }
}

impl ResultEmitter for FileEmitter {
    fn emit(&mut self, key: &GroupKey, result: &AggregateResult) -> Result<(), PipelineError> {
        let partition = self.get_partition(key);
        let writer = &mut self.writers[partition];
        writeln!(writer, "{key}\t{result}").map_err(PipelineError::Output)
    }

    fn commit(&mut self) -> Result<(), PipelineError> {
        self.flush_all().map_err(PipelineError::Output)?;
        File::create(self.output_dir.join(SUCCESS_MARKER)).map_err(PipelineError::Output)?;
        self.committed = true;
        tracing::info!(output_dir = %self.output_dir.display(), "committed output");
        Ok(())
    }
}

impl Drop for FileEmitter {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        self.writers.clear();
        if let Err(e) = std::fs::remove_dir_all(&self.output_dir) {
            tracing::warn!(error = %e, output_dir = %self.output_dir.display(), "failed to remove partial output");
        }
    }
}

pub fn partition_file_name(partition: usize) -> String {
    format!("part-r-{partition:05}")
}

/// Stable across runs and platforms, unlike the std hasher.
pub fn partition_for(key: &GroupKey, partition_count: usize) -> usize {
    let mut hash = 0usize;
    for byte in key.as_str().bytes() {
        hash = hash.wrapping_mul(31).wrapping_add(byte as usize);
    }
    hash % partition_count.max(1)
}
