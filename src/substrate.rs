// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Partitioned collections and broadcast values.
//!
//! A [`Partitioned`] collection is split into independent partitions that are
//! processed concurrently on the current rayon pool. Work is expressed as
//! partition-local processing followed by a keyed reduction, so the only
//! synchronisation points are the reductions themselves.
//!
//! ```text
//! 1. map_partitions: every partition accumulates into its own local buffer
//! 2. reduce_by_key:  local buffers are merged with an associative, commutative op
//! ```
//!
//! [`Broadcast`] wraps read-only values (cardinalities, conditioning columns,
//! frequency tables) shared by every worker of a pass.

use rayon::prelude::*;
use std::collections::BTreeMap;
use std::ops::Deref;
use std::sync::Arc;

/// Immutable snapshot shared by every worker of a pass.
#[derive(Debug)]
pub struct Broadcast<T>(Arc<T>);

impl<T> Broadcast<T> {
    pub fn new(value: T) -> Self {
        Self(Arc::new(value))
    }

    pub fn value(&self) -> &T {
        &self.0
    }
}

impl<T> Clone for Broadcast<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> Deref for Broadcast<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

/// A collection split into partitions that are processed independently.
#[derive(Debug, Clone)]
pub struct Partitioned<T> {
    partitions: Vec<Vec<T>>,
}

impl<T> Partitioned<T> {
    /// Wrap pre-built partitions. An empty list becomes a single empty partition.
    pub fn new(partitions: Vec<Vec<T>>) -> Self {
        if partitions.is_empty() {
            return Self {
                partitions: vec![Vec::new()],
            };
        }
        Self { partitions }
    }

    /// Split `items` into `n_partitions` contiguous chunks (at least one partition).
    pub fn from_items(items: Vec<T>, n_partitions: usize) -> Self {
        let n_partitions = n_partitions.max(1);
        let chunk = items.len().div_ceil(n_partitions).max(1);
        let mut partitions: Vec<Vec<T>> = (0..n_partitions).map(|_| Vec::new()).collect();
        for (i, item) in items.into_iter().enumerate() {
            partitions[i / chunk].push(item);
        }
        Self { partitions }
    }

    pub fn n_partitions(&self) -> usize {
        self.partitions.len()
    }

    pub fn len(&self) -> usize {
        self.partitions.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.partitions.iter().all(Vec::is_empty)
    }

    pub fn partitions(&self) -> &[Vec<T>] {
        &self.partitions
    }

    /// Gather every item to the caller, partition by partition.
    pub fn collect(self) -> Vec<T> {
        self.partitions.into_iter().flatten().collect()
    }

    /// Iterate all items, partition by partition.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.partitions.iter().flatten()
    }
}

impl<T: Send + Sync> Partitioned<T> {
    /// Run `f` on every partition concurrently.
    pub fn map_partitions<U, F>(&self, f: F) -> Partitioned<U>
    where
        U: Send,
        F: Fn(&[T]) -> Vec<U> + Sync + Send,
    {
        let partitions = self.partitions.par_iter().map(|p| f(p.as_slice())).collect();
        Partitioned { partitions }
    }

    /// Fallible [`map_partitions`](Self::map_partitions); fails if any partition fails.
    pub fn try_map_partitions<U, E, F>(&self, f: F) -> Result<Partitioned<U>, E>
    where
        U: Send,
        E: Send,
        F: Fn(&[T]) -> Result<Vec<U>, E> + Sync + Send,
    {
        let partitions = self
            .partitions
            .par_iter()
            .map(|p| f(p.as_slice()))
            .collect::<Result<Vec<_>, E>>()?;
        Ok(Partitioned { partitions })
    }

    /// Keep the items matching `pred`, preserving the partitioning.
    pub fn filter<F>(&self, pred: F) -> Partitioned<T>
    where
        T: Clone,
        F: Fn(&T) -> bool + Sync + Send,
    {
        self.map_partitions(|part| part.iter().filter(|item| pred(*item)).cloned().collect())
    }
}

impl<K, V> Partitioned<(K, V)>
where
    K: Ord + Send,
    V: Send,
{
    /// Merge values sharing a key, first within each partition, then across partitions.
    ///
    /// `op` must be associative and commutative; the result is then independent of
    /// partition count and merge order. The reduced pairs are collected to the caller.
    pub fn reduce_by_key<F>(self, op: F) -> BTreeMap<K, V>
    where
        F: Fn(V, V) -> V + Sync + Send,
    {
        self.partitions
            .into_par_iter()
            .map(|part| {
                let mut local = BTreeMap::new();
                for (key, value) in part {
                    merge_into(&mut local, key, value, &op);
                }
                local
            })
            .reduce(BTreeMap::new, |mut acc, other| {
                for (key, value) in other {
                    merge_into(&mut acc, key, value, &op);
                }
                acc
            })
    }
}

fn merge_into<K: Ord, V, F: Fn(V, V) -> V>(map: &mut BTreeMap<K, V>, key: K, value: V, op: &F) {
    let merged = match map.remove(&key) {
        Some(prev) => op(prev, value),
        None => value,
    };
    map.insert(key, merged);
}
