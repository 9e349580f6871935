//! msum - moving (sliding window) sums over numeric sequences.
//!
//! Given a sequence of `n` values and a window of `w` elements, the moving
//! sum is the sequence of `n - w + 1` sums of every run of `w` consecutive
//! values. It is computed in a single pass by updating a running sum as the
//! window slides.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                          msum                            │
//! ├──────────────────────────────────────────────────────────┤
//! │  ┌─────────────┐   ┌─────────────┐   ┌─────────────┐     │
//! │  │   Dynamic   │──▶│  Validate   │──▶│   Moving    │     │
//! │  │ (JSON args) │   │  (window)   │   │    sum      │     │
//! │  └─────────────┘   └─────────────┘   └─────────────┘     │
//! │                                             │            │
//! │                                             ▼            │
//! │                                   ┌──────────────────┐   │
//! │                                   │ Fresh or aliased │   │
//! │                                   │     output       │   │
//! │                                   └──────────────────┘   │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use msum::{moving_sum, moving_sum_by, windowed_sum, ReturnMode};
//!
//! let sums = moving_sum(&[2, 4, 4, 6, 2], 3).unwrap();
//! assert_eq!(sums, vec![10, 14, 12]);
//!
//! // Sum a field of each element.
//! let points = [(0, 1.0), (1, 2.0), (2, 3.0)];
//! let sums = moving_sum_by(&points, 2, |p| p.1).unwrap();
//! assert_eq!(sums, vec![3.0, 5.0]);
//!
//! // Reuse the input buffer for the output.
//! let mut buf = vec![1, 1, 1];
//! let sums = windowed_sum(&mut buf, 3, ReturnMode::InPlace).unwrap();
//! assert!(sums.is_aliased());
//! assert_eq!(&*sums, &[3]);
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod input;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigError, OutputFormat};
pub use crate::core::{
    moving_sum, moving_sum_by, moving_sum_by_in_place, moving_sum_in_place, windowed_sum,
    windowed_sum_by, windowed_sum_value, Accessor, Options, ReturnMode, WindowValue,
    WindowedSums,
};
pub use error::{MsumError, Result};
pub use input::{parse_input, read_input, InputError};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
