// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Engine and layout configuration.

use crate::error::{InfoSelError, Result};

/// Worker parallelism for histogram passes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Parallelism {
    /// Run every pass on a single worker.
    Sequential,
    /// Run passes on up to `n` workers. `n <= 1` behaves like `Sequential`.
    Parallel(usize),
}

impl Default for Parallelism {
    fn default() -> Self {
        Self::from_threads(0)
    }
}

impl Parallelism {
    /// - `0` → rayon's current thread count
    /// - `1` → sequential
    /// - `n > 1` → parallel with n threads
    #[inline]
    pub fn from_threads(n_threads: usize) -> Self {
        match n_threads {
            0 => Self::Parallel(rayon::current_num_threads()),
            1 => Self::Sequential,
            n => Self::Parallel(n),
        }
    }

    #[inline]
    pub fn allows_parallel(self) -> bool {
        matches!(self, Self::Parallel(n) if n > 1)
    }

    /// Thread count for the worker pool (1 for sequential).
    #[inline]
    pub fn n_threads(self) -> usize {
        match self {
            Self::Sequential => 1,
            Self::Parallel(n) => n.max(1),
        }
    }
}

/// Configuration of an information-theory engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EngineConfig {
    pub parallelism: Parallelism,
}

impl EngineConfig {
    pub fn with_threads(n_threads: usize) -> Self {
        Self {
            parallelism: Parallelism::from_threads(n_threads),
        }
    }

    /// Worker pool that every pass of the engine runs on.
    pub(crate) fn build_pool(&self) -> Result<rayon::ThreadPool> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.parallelism.n_threads())
            .thread_name(|i| format!("infosel-worker-{i}"))
            .build()?;
        Ok(pool)
    }
}

/// How row-major code matrices are cut into partitions and dense blocks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutConfig {
    pub n_partitions: usize,
    /// Instances per dense block.
    pub block_size: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            n_partitions: 4,
            block_size: 1024,
        }
    }
}

impl LayoutConfig {
    pub fn new(n_partitions: usize, block_size: usize) -> Result<Self> {
        let config = Self {
            n_partitions,
            block_size,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.n_partitions == 0 {
            return Err(InfoSelError::InvalidConfig(
                "n_partitions must be at least 1".to_string(),
            ));
        }
        if self.block_size == 0 {
            return Err(InfoSelError::InvalidConfig(
                "block_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
