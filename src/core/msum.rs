//! Moving sum over a slice of numeric values.
//!
//! The window slides one element at a time and the running sum is updated
//! incrementally: the value leaving the window is subtracted and the value
//! entering it is added. The whole pass is O(n) regardless of the window
//! size.
//!
//! Two return modes are supported. [`ReturnMode::Copy`] leaves the input
//! alone and returns a new vector. [`ReturnMode::InPlace`] overwrites the
//! input buffer with the sums and truncates it to the output length, so the
//! result aliases the caller's storage.

use std::ops::Deref;

use tracing::trace;

use crate::core::element::WindowValue;
use crate::core::validate::{check_window, output_len};
use crate::error::Result;

/// Where the window sums are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReturnMode {
    /// Allocate a fresh output vector and leave the input untouched.
    #[default]
    Copy,
    /// Overwrite the input buffer and truncate it to the output length.
    InPlace,
}

impl ReturnMode {
    /// Map the loosely typed `copy` flag onto a mode.
    pub fn from_copy_flag(copy: bool) -> Self {
        if copy {
            ReturnMode::Copy
        } else {
            ReturnMode::InPlace
        }
    }
}

/// Window sums returned by [`windowed_sum`] and [`windowed_sum_by`].
#[derive(Debug)]
pub enum WindowedSums<'a, T> {
    /// Newly allocated output, independent of the input.
    Fresh(Vec<T>),
    /// The input buffer itself, rewritten and truncated.
    Aliased(&'a mut Vec<T>),
}

impl<'a, T> WindowedSums<'a, T> {
    /// Whether the sums live in the caller's input buffer.
    pub fn is_aliased(&self) -> bool {
        matches!(self, WindowedSums::Aliased(_))
    }

    pub fn as_slice(&self) -> &[T] {
        match self {
            WindowedSums::Fresh(v) => v,
            WindowedSums::Aliased(v) => v,
        }
    }

    /// Take the sums as an owned vector, cloning when they are aliased.
    pub fn into_vec(self) -> Vec<T>
    where
        T: Clone,
    {
        match self {
            WindowedSums::Fresh(v) => v,
            WindowedSums::Aliased(v) => v.clone(),
        }
    }
}

impl<'a, T> Deref for WindowedSums<'a, T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

/// Compute the moving sum of `input` over windows of `window` elements.
///
/// Returns `input.len() - window + 1` sums. Fails if `window` is zero or
/// larger than the input.
///
/// ```
/// let sums = msum::moving_sum(&[1, 1, 1], 3).unwrap();
/// assert_eq!(sums, vec![3]);
/// ```
pub fn moving_sum<T>(input: &[T], window: usize) -> Result<Vec<T>>
where
    T: WindowValue,
{
    moving_sum_by(input, window, |v| *v)
}

/// Compute the moving sum of values extracted from `input` by `accessor`.
///
/// The accessor is called exactly once per element, in order.
pub fn moving_sum_by<E, T, F>(input: &[E], window: usize, accessor: F) -> Result<Vec<T>>
where
    T: WindowValue,
    F: FnMut(&E) -> T,
{
    check_window(window, input.len())?;
    trace!(len = input.len(), window, "moving sum into fresh buffer");

    let mut out: Vec<T> = input.iter().map(accessor).collect();
    slide(&mut out, window);
    Ok(out)
}

/// Replace the contents of `buf` with its moving sums.
///
/// On success `buf` is truncated to `len - window + 1`. On failure it is
/// left unchanged.
pub fn moving_sum_in_place<T>(buf: &mut Vec<T>, window: usize) -> Result<()>
where
    T: WindowValue,
{
    check_window(window, buf.len())?;
    trace!(len = buf.len(), window, "moving sum in place");

    slide(buf, window);
    Ok(())
}

/// Map every element of `buf` through `accessor`, then replace the contents
/// with the moving sums of the mapped values.
pub fn moving_sum_by_in_place<T, F>(buf: &mut Vec<T>, window: usize, mut accessor: F) -> Result<()>
where
    T: WindowValue,
    F: FnMut(&T) -> T,
{
    check_window(window, buf.len())?;
    trace!(len = buf.len(), window, "moving sum in place with accessor");

    for value in buf.iter_mut() {
        *value = accessor(value);
    }
    slide(buf, window);
    Ok(())
}

/// Moving sum with an explicit [`ReturnMode`].
///
/// The input is borrowed mutably in both modes because `InPlace` may
/// rewrite it. `Copy` never modifies it; callers that only need a copy and
/// hold a shared borrow should use [`moving_sum`] instead.
pub fn windowed_sum<T>(input: &mut Vec<T>, window: usize, mode: ReturnMode) -> Result<WindowedSums<'_, T>>
where
    T: WindowValue,
{
    match mode {
        ReturnMode::Copy => moving_sum(input.as_slice(), window).map(WindowedSums::Fresh),
        ReturnMode::InPlace => {
            moving_sum_in_place(input, window)?;
            Ok(WindowedSums::Aliased(input))
        }
    }
}

/// Moving sum of accessor-mapped values with an explicit [`ReturnMode`].
///
/// In-place mode writes the mapped values back into `input`, so the
/// accessor must return the element type itself. As with [`windowed_sum`],
/// `Copy` leaves `input` untouched despite the mutable borrow; use
/// [`moving_sum_by`] from a shared borrow, which also allows an accessor
/// from any element type.
pub fn windowed_sum_by<T, F>(
    input: &mut Vec<T>,
    window: usize,
    accessor: F,
    mode: ReturnMode,
) -> Result<WindowedSums<'_, T>>
where
    T: WindowValue,
    F: FnMut(&T) -> T,
{
    match mode {
        ReturnMode::Copy => moving_sum_by(input.as_slice(), window, accessor).map(WindowedSums::Fresh),
        ReturnMode::InPlace => {
            moving_sum_by_in_place(input, window, accessor)?;
            Ok(WindowedSums::Aliased(input))
        }
    }
}

/// Rewrite `values` with its window sums and drop the trailing `window - 1`
/// slots. The window must already be validated against `values.len()`.
fn slide<T>(values: &mut Vec<T>, window: usize)
where
    T: WindowValue,
{
    let n_out = output_len(window, values.len());

    let mut sum = values[..window]
        .iter()
        .fold(T::zero(), |acc, &v| acc.window_add(v));

    // Slot i is overwritten before slot i + window - 1 is read, so the value
    // leaving the window has to be held aside.
    let mut leaving = values[0];
    values[0] = sum;

    for i in 1..n_out {
        sum = sum.window_sub(leaving).window_add(values[i + window - 1]);
        leaving = values[i];
        values[i] = sum;
    }

    values.truncate(n_out);
}
