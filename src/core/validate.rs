//! Argument validation shared by every moving sum entry point.

use crate::error::{MsumError, Result};

/// Check a window size against the length of the input.
///
/// A window of zero is an invalid argument; a window longer than the input
/// is a range error. Empty input therefore always fails.
pub fn check_window(window: usize, len: usize) -> Result<()> {
    if window == 0 {
        return Err(MsumError::invalid(
            "window must be a positive integer, got 0",
        ));
    }
    if window > len {
        return Err(MsumError::WindowTooLarge { window, len });
    }
    Ok(())
}

/// Number of window sums produced for an input of `len` elements.
///
/// Only meaningful after [`check_window`] has accepted the pair.
pub fn output_len(window: usize, len: usize) -> usize {
    len - window + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_window_is_invalid() {
        let err = check_window(0, 5).unwrap_err();
        assert!(matches!(err, MsumError::InvalidArgument(_)));
    }

    #[test]
    fn test_window_larger_than_input() {
        assert_eq!(
            check_window(4, 3),
            Err(MsumError::WindowTooLarge { window: 4, len: 3 })
        );
        assert!(check_window(1, 0).unwrap_err().is_range_error());
    }

    #[test]
    fn test_valid_windows() {
        assert!(check_window(1, 1).is_ok());
        assert!(check_window(3, 3).is_ok());
        assert_eq!(output_len(3, 12), 10);
        assert_eq!(output_len(3, 3), 1);
    }
}
