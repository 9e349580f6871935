//! Element types a moving sum can be computed over.

use num_traits::Num;

/// Numeric element with the additions used by the running sum.
///
/// Integers wrap: a partial sum may leave the range of the type while every
/// window sum still fits, and two's-complement wrapping then yields the
/// exact window sum. Floats add normally, so NaN and infinities propagate.
pub trait WindowValue: Num + Copy {
    fn window_add(self, rhs: Self) -> Self;
    fn window_sub(self, rhs: Self) -> Self;
}

macro_rules! impl_wrapping {
    ($($t:ty),*) => {
        $(
            impl WindowValue for $t {
                #[inline]
                fn window_add(self, rhs: Self) -> Self {
                    self.wrapping_add(rhs)
                }

                #[inline]
                fn window_sub(self, rhs: Self) -> Self {
                    self.wrapping_sub(rhs)
                }
            }
        )*
    };
}

macro_rules! impl_float {
    ($($t:ty),*) => {
        $(
            impl WindowValue for $t {
                #[inline]
                fn window_add(self, rhs: Self) -> Self {
                    self + rhs
                }

                #[inline]
                fn window_sub(self, rhs: Self) -> Self {
                    self - rhs
                }
            }
        )*
    };
}

impl_wrapping!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_float!(f32, f64);
