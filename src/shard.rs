//! src/shard.rs
use crate::control::RunControl;
use crate::error::PipelineError;
use std::io::BufRead;

/// Contiguous run of input lines processed by one map task.
#[derive(Debug, Clone, PartialEq)]
pub struct InputShard {
    id: usize,
    first_line: usize,
    lines: Vec<String>,
    size_in_bytes: usize,
}

impl InputShard {
    pub fn new(id: usize, first_line: usize, lines: Vec<String>) -> Self {
        let size_in_bytes = lines.iter().map(String::len).sum();
        InputShard {
            id,
            first_line,
            lines,
            size_in_bytes,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn first_line(&self) -> usize {
        self.first_line
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn size_in_bytes(&self) -> usize {
        self.size_in_bytes
    }

    /// Lines paired with their index in the whole input.
    pub fn lines(&self) -> impl Iterator<Item = (usize, &str)> {
        self.lines
            .iter()
            .enumerate()
            .map(|(offset, line)| (self.first_line + offset, line.as_str()))
    }
}

pub struct ShardSplitter {
    split_size_in_bytes: u64,
}

impl ShardSplitter {
    pub fn new(split_size_in_bytes: u64) -> Self {
        ShardSplitter {
            split_size_in_bytes: split_size_in_bytes.max(1),
        }
    }

    /// Cuts the input on line boundaries as it is read. A shard only exceeds
    /// the budget when a single line does. Cancellation is checked before
    /// every line.
    pub fn shards<'c, R: BufRead>(&self, reader: R, control: &'c RunControl) -> Shards<'c, R> {
        Shards {
            reader,
            control,
            budget: self.split_size_in_bytes as usize,
            next_id: 0,
            next_line: 0,
            pending: None,
            buf: Vec::new(),
            done: false,
        }
    }
}

/// Lazily read shards. Stops after the first error.
pub struct Shards<'c, R> {
    reader: R,
    control: &'c RunControl,
    budget: usize,
    next_id: usize,
    next_line: usize,
    /// Line that overflowed the previous shard, with its global index.
    pending: Option<(usize, String)>,
    buf: Vec<u8>,
    done: bool,
}

impl<R: BufRead> Shards<'_, R> {
    fn read_line(&mut self) -> Result<Option<String>, PipelineError> {
        self.buf.clear();
        let read = self
            .reader
            .read_until(b'\n', &mut self.buf)
            .map_err(PipelineError::Input)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(decode_line(&self.buf)))
    }

    fn next_shard(&mut self) -> Result<Option<InputShard>, PipelineError> {
        let mut first_line = self.next_line;
        let mut lines = Vec::new();
        let mut size = 0;
        if let Some((index, line)) = self.pending.take() {
            first_line = index;
            size = line.len();
            lines.push(line);
        }

        loop {
            self.control.checkpoint()?;
            let Some(line) = self.read_line()? else {
                break;
            };
            let index = self.next_line;
            self.next_line += 1;
            if !lines.is_empty() && size + line.len() > self.budget {
                self.pending = Some((index, line));
                break;
            }
            size += line.len();
            lines.push(line);
        }

        if lines.is_empty() {
            return Ok(None);
        }
        let shard = InputShard::new(self.next_id, first_line, lines);
        self.next_id += 1;
        tracing::debug!(
            shard = shard.id(),
            first_line = shard.first_line(),
            lines = shard.len(),
            "read shard"
        );
        Ok(Some(shard))
    }
}

impl<R: BufRead> Iterator for Shards<'_, R> {
    type Item = Result<InputShard, PipelineError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_shard() {
            Ok(Some(shard)) => Some(Ok(shard)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

fn decode_line(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw).into_owned()
}
