// Whole-number coercion for year specifiers and state codes
// Integers pass through, floats truncate toward zero, strings are parsed.

use crate::error::{FarsError, Result};

/// A value that may be coerced to a whole number.
///
/// Implemented for the integer primitives, `f32`/`f64` (truncated toward
/// zero, non-finite values rejected) and strings (trimmed, then parsed as an
/// integer or as a float that is truncated).
pub trait IntegerLike {
    /// The coerced value, or `None` when the value has no whole-number reading.
    fn to_integer(&self) -> Option<i64>;

    /// How the value is shown in error and warning messages.
    fn label(&self) -> String;
}

macro_rules! lossless_integer_like {
    ($($t:ty),*) => {
        $(
            impl IntegerLike for $t {
                fn to_integer(&self) -> Option<i64> {
                    Some(i64::from(*self))
                }

                fn label(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

lossless_integer_like!(i8, i16, i32, i64, u8, u16, u32);

impl IntegerLike for u64 {
    fn to_integer(&self) -> Option<i64> {
        i64::try_from(*self).ok()
    }

    fn label(&self) -> String {
        self.to_string()
    }
}

impl IntegerLike for usize {
    fn to_integer(&self) -> Option<i64> {
        i64::try_from(*self).ok()
    }

    fn label(&self) -> String {
        self.to_string()
    }
}

impl IntegerLike for f64 {
    fn to_integer(&self) -> Option<i64> {
        truncate_float(*self)
    }

    fn label(&self) -> String {
        self.to_string()
    }
}

impl IntegerLike for f32 {
    fn to_integer(&self) -> Option<i64> {
        truncate_float(f64::from(*self))
    }

    fn label(&self) -> String {
        self.to_string()
    }
}

impl IntegerLike for str {
    fn to_integer(&self) -> Option<i64> {
        let trimmed = self.trim();
        if let Ok(value) = trimmed.parse::<i64>() {
            return Some(value);
        }
        trimmed.parse::<f64>().ok().and_then(truncate_float)
    }

    fn label(&self) -> String {
        self.to_string()
    }
}

impl IntegerLike for String {
    fn to_integer(&self) -> Option<i64> {
        self.as_str().to_integer()
    }

    fn label(&self) -> String {
        self.clone()
    }
}

impl<T: IntegerLike + ?Sized> IntegerLike for &T {
    fn to_integer(&self) -> Option<i64> {
        (**self).to_integer()
    }

    fn label(&self) -> String {
        (**self).label()
    }
}

fn truncate_float(value: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive
    if !value.is_finite() || value >= i64::MAX as f64 || value < i64::MIN as f64 {
        return None;
    }
    Some(value.trunc() as i64)
}

/// Coerce a year specifier, failing with `InvalidYear`.
pub fn coerce_year<Y: IntegerLike + ?Sized>(year: &Y) -> Result<i32> {
    year.to_integer()
        .and_then(|value| i32::try_from(value).ok())
        .ok_or_else(|| FarsError::InvalidYear { value: year.label() })
}

/// Coerce a state code, failing with `InvalidStateCode`.
pub fn coerce_state<S: IntegerLike + ?Sized>(state: &S) -> Result<i64> {
    state
        .to_integer()
        .ok_or_else(|| FarsError::InvalidStateCode { value: state.label() })
}
