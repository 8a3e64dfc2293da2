use std::fmt::Debug;
use std::ops::{Add, Mul, Sub};

/// Numeric element stored in a [`Matrix`](crate::math::matrix::Matrix).
///
/// `Default::default()` is the additive identity used to zero-fill buffers
/// and to seed sums.
pub trait Element:
    Copy + Default + PartialEq + Debug + Add<Output = Self> + Sub<Output = Self> + Mul<Output = Self>
{
}

impl<T> Element for T where
    T: Copy
        + Default
        + PartialEq
        + Debug
        + Add<Output = T>
        + Sub<Output = T>
        + Mul<Output = T>
{
}
