use crate::kmeans::{DEFAULT_MAX_ITERATIONS, MAX_K};
use serde::{Deserialize, Serialize};

pub const DEFAULT_K: usize = 6;
pub const DEFAULT_STRIDE: usize = 8;
pub const MAX_STRIDE: usize = 50;

/// Tuning knobs for a single extraction.
///
/// `k` is kept in `1..=20` and `stride` in `1..=50` by every constructor, and
/// by the extraction itself for values built by hand or deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Number of palette colors.
    pub k: usize,
    /// Distance in pixels between two sampled pixels, on both axes.
    pub stride: usize,
    pub max_iterations: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        ExtractOptions {
            k: DEFAULT_K,
            stride: DEFAULT_STRIDE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl ExtractOptions {
    pub fn new(k: usize, stride: usize) -> Self {
        ExtractOptions {
            k,
            stride,
            ..Default::default()
        }
        .clamped()
    }

    /// Builds options from loosely typed user input, such as form fields.
    ///
    /// A missing or zero value falls back to the default, anything else is
    /// clamped into range (so negative values become 1).
    pub fn from_user_input(k: Option<i64>, stride: Option<i64>) -> Self {
        fn resolve(value: Option<i64>, default: usize, max: usize) -> usize {
            match value {
                None | Some(0) => default,
                Some(v) => v.clamp(1, max as i64) as usize,
            }
        }

        ExtractOptions {
            k: resolve(k, DEFAULT_K, MAX_K),
            stride: resolve(stride, DEFAULT_STRIDE, MAX_STRIDE),
            ..Default::default()
        }
    }

    pub fn with_max_iterations(self, max_iterations: usize) -> Self {
        ExtractOptions {
            max_iterations,
            ..self
        }
    }

    pub fn clamped(self) -> Self {
        ExtractOptions {
            k: self.k.clamp(1, MAX_K),
            stride: self.stride.clamp(1, MAX_STRIDE),
            ..self
        }
    }
}
