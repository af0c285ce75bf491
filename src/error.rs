//! Error type for precondition violations
//!
//! Accumulators never retry or return partial results: a violated
//! precondition is reported immediately as an [`InvalidState`] and the
//! accumulator stays usable.

#[cfg(feature = "std")]
use std::string::String;

#[cfg(not(feature = "std"))]
use alloc::string::String;

/// A precondition on accumulator state or configuration was violated
#[derive(Debug, Clone, PartialEq)]
pub enum InvalidState {
    /// Rolling windows need room for at least one sample
    ZeroWindow,
    /// A construction parameter is out of range
    InvalidParameter {
        name: &'static str,
        value: String,
    },
    /// The upstream accumulator has not seen any sample
    EmptyStream,
    /// The histogram is too short to interpolate in
    TooFewBins { required: usize, found: usize },
    /// The scan ran past the last bin without reaching the target
    TargetNotReached { target: f64 },
    /// The running sum already met the target before the first bin was read
    NoPrecedingBin { sum: f64, target: f64 },
    /// The crossing bin has no bin before it
    MissingPredecessor { index: usize },
    /// The crossing bin has no bin after it
    MissingSuccessor { index: usize },
    /// Cumulative fractions decrease at this bin
    NonMonotonic { index: usize },
}

impl core::fmt::Display for InvalidState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            InvalidState::ZeroWindow => write!(f, "window size must be at least 1"),
            InvalidState::InvalidParameter { name, value } => {
                write!(f, "invalid parameter {}: {}", name, value)
            }
            InvalidState::EmptyStream => write!(f, "no samples observed"),
            InvalidState::TooFewBins { required, found } => {
                write!(f, "too few bins: need {}, found {}", required, found)
            }
            InvalidState::TargetNotReached { target } => {
                write!(f, "histogram exhausted before reaching {}", target)
            }
            InvalidState::NoPrecedingBin { sum, target } => {
                write!(f, "running sum {} already at target {} before any bin", sum, target)
            }
            InvalidState::MissingPredecessor { index } => {
                write!(f, "bin {} has no predecessor", index)
            }
            InvalidState::MissingSuccessor { index } => {
                write!(f, "bin {} has no successor", index)
            }
            InvalidState::NonMonotonic { index } => {
                write!(f, "cumulative fraction decreases at bin {}", index)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvalidState {}

/// Result alias used throughout the crate
pub type Result<T> = core::result::Result<T, InvalidState>;
