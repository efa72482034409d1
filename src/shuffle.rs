//! src/shuffle.rs
use crate::record::GroupKey;
use std::collections::{BTreeMap, HashMap};

/// In-process stand-in for the shuffle: routes every partial aggregate of a
/// key to the same bucket as map outputs arrive.
#[derive(Debug)]
pub struct Shuffle<A> {
    groups: BTreeMap<GroupKey, Vec<A>>,
}

impl<A> Default for Shuffle<A> {
    fn default() -> Self {
        Shuffle {
            groups: BTreeMap::new(),
        }
    }
}

impl<A> Shuffle<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(&mut self, shard: HashMap<GroupKey, A>) {
        for (key, acc) in shard {
            self.groups.entry(key).or_default().push(acc);
        }
    }

    pub fn key_count(&self) -> usize {
        self.groups.len()
    }

    /// Buckets in ascending key order.
    pub fn into_groups(self) -> BTreeMap<GroupKey, Vec<A>> {
        tracing::debug!(keys = self.groups.len(), "grouped partial aggregates");
        self.groups
    }
}
