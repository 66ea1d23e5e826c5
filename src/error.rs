// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types shared by the layouts, the histogram passes and the engine.

/// Errors raised while validating data or answering queries.
#[derive(Debug, thiserror::Error)]
pub enum InfoSelError {
    #[error("feature index {index} out of range for {n_features} features")]
    FeatureOutOfRange { index: usize, n_features: usize },

    #[error("candidate feature set is empty")]
    EmptyCandidates,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("data shape mismatch: {0}")]
    DataShape(String),

    #[error("code {code} of feature {feature} does not fit the 8-bit alphabet")]
    CodeOutOfRange { feature: usize, code: u32 },

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl InfoSelError {
    /// True for errors caused by the caller's arguments rather than by the data.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::FeatureOutOfRange { .. } | Self::EmptyCandidates | Self::InvalidConfig(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, InfoSelError>;
