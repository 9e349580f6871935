//! Core functionality for msum.
//!
//! This module contains:
//! - The element trait used by the running sum
//! - Window validation shared by every entry point
//! - The typed moving sum transform with copy and in-place modes
//! - A loosely typed front end over JSON values

pub mod dynamic;
pub mod element;
pub mod msum;
pub mod validate;

// Re-export commonly used types
pub use dynamic::{to_number, window_from_value, windowed_sum_value, Accessor, Options};
pub use element::WindowValue;
pub use msum::{
    moving_sum, moving_sum_by, moving_sum_by_in_place, moving_sum_in_place, windowed_sum,
    windowed_sum_by, ReturnMode, WindowedSums,
};
pub use validate::check_window;
