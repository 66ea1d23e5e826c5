// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # infosel
//!
//! Mutual information and conditional mutual information between discretized
//! features and a fixed conditioning feature (usually the label), computed
//! over partitioned column datasets. It is the statistics engine behind
//! greedy feature selection such as mRMR: relevance is I(X; label), redundancy
//! is the pair I(X; Y), I(X; Y | label) for already-selected features Y.
//!
//! ## Quick Start
//!
//! ```rust
//! use infosel::config::{EngineConfig, LayoutConfig};
//! use infosel::estimators::mutual_information::MutualInformation;
//! use ndarray::array;
//!
//! // instances x features; feature 2 is the label
//! let rows = array![[0u8, 1, 0], [0, 1, 0], [1, 0, 1], [1, 0, 1]];
//! let engine = MutualInformation::sparse_from_rows(
//!     rows.view(),
//!     2,
//!     &LayoutConfig::default(),
//!     EngineConfig::default(),
//! )
//! .unwrap();
//!
//! assert!((engine.relevances()[&0] - 1.0).abs() < 1e-12);
//! let redundancies = engine.get_redundancies([0], 1).unwrap();
//! assert!((redundancies[&0].mi - 1.0).abs() < 1e-12);
//! ```
//!
//! ## Layouts
//!
//! | Layout | Record | Implicit entries |
//! |--------|--------|------------------|
//! | Sparse | feature → (instance id → code) | absent instance = code 0 |
//! | Dense | feature → (block id, codes) | none |
//!
//! Both layouts implement [`estimators::ColumnStore`] and yield identical
//! histograms for the same logical data.
//!
//! ## Architecture
//!
//! 1. **Substrate**: partitioned collections with partition-local processing,
//!    keyed reduction and broadcast values, running on a rayon pool
//! 2. **Histograms**: cardinality resolution, 2-D and 3-D count tables per layout
//! 3. **Normalization**: probability tables cached at construction
//! 4. **Engine**: relevances at construction, redundancies per query
//!
//! All logarithms are base 2 (bits).

pub mod config;
pub mod error;
pub mod estimators;
pub mod substrate;

pub use error::{InfoSelError, Result};
