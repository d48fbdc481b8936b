//! No space overhead `Option`s for types with sentinels

use std::fmt::Debug;

/// Trait to define sentinel values for types used with `InRangeOption`.
pub trait Sentinel: PartialEq + Copy {
    const SENTINEL: Self;
}

impl Sentinel for u32 {
    const SENTINEL: u32 = u32::MAX;
}

impl Sentinel for usize {
    const SENTINEL: usize = usize::MAX;
}

/// A struct to get `Option`s without space overhead.
///
/// Conceptually similar to the `NonNull` types but with configurable sentinels.
/// `InRangeOption`s are constructed from real `Option`s, or from a raw value
/// when decoding sentinel-encoded arrays (such as the middle node arrays of a
/// contracted graph).
/// To work with the encapsulated data, convert back into an actual `Option`
/// through the `value` method.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InRangeOption<T: Sentinel + Debug>(T);

impl<T: Sentinel + Debug> InRangeOption<T> {
    #[inline]
    pub fn new(value: Option<T>) -> InRangeOption<T> {
        match value {
            Some(value) => {
                assert_ne!(value, T::SENTINEL, "InRangeOption::new: Got sentinel as a value");
                InRangeOption(value)
            }
            None => InRangeOption(T::SENTINEL),
        }
    }

    /// Reinterpret a raw, possibly-sentinel value as an `InRangeOption`.
    #[inline]
    pub fn from_raw(raw: T) -> InRangeOption<T> {
        InRangeOption(raw)
    }

    /// The raw value including the sentinel encoding, for storing in plain arrays.
    #[inline]
    pub fn raw(self) -> T {
        self.0
    }

    #[inline]
    pub fn value(self) -> Option<T> {
        let InRangeOption(value) = self;
        if value != T::SENTINEL {
            Some(value)
        } else {
            None
        }
    }
}

impl<T: Sentinel + Debug> Default for InRangeOption<T> {
    fn default() -> Self {
        Self::new(None)
    }
}
