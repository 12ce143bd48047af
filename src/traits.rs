//! Boundary conversion traits.
//!
//! Signals handed to the span extractor may be stored as booleans, integer
//! flags, floating-point masks with missing values, or optional values. The
//! [`BoolLike`] trait converts each element explicitly, once, at the boundary.

/// A value that can be interpreted as a boolean flag.
///
/// # Conversion rules
/// - `bool`: itself
/// - integers: non-zero is `true`
/// - floats: non-zero is `true`; `NaN` is treated as missing and is `false`
/// - `Option<T>`: `None` is `false`, `Some(v)` defers to `v`
pub trait BoolLike {
    /// Returns `true` when this value marks an "on" position of a signal.
    fn is_truthy(&self) -> bool;

    /// Returns the value as a `0`/`1` integer.
    fn as_flag(&self) -> i8 {
        i8::from(self.is_truthy())
    }
}

impl BoolLike for bool {
    #[inline]
    fn is_truthy(&self) -> bool {
        *self
    }
}

macro_rules! impl_bool_like_int {
    ($($t:ty),* $(,)?) => {
        $(
            impl BoolLike for $t {
                #[inline]
                fn is_truthy(&self) -> bool {
                    *self != 0
                }
            }
        )*
    };
}

macro_rules! impl_bool_like_float {
    ($($t:ty),* $(,)?) => {
        $(
            impl BoolLike for $t {
                #[inline]
                fn is_truthy(&self) -> bool {
                    !self.is_nan() && *self != 0.0
                }
            }
        )*
    };
}

impl_bool_like_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_bool_like_float!(f32, f64);

impl<T: BoolLike> BoolLike for Option<T> {
    #[inline]
    fn is_truthy(&self) -> bool {
        self.as_ref().is_some_and(BoolLike::is_truthy)
    }
}

impl<T: BoolLike + ?Sized> BoolLike for &T {
    #[inline]
    fn is_truthy(&self) -> bool {
        (**self).is_truthy()
    }
}
