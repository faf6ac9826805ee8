//! # Edge Weights
//!
//! Networks are generic over their edge weight type. The [`Weight`] trait
//! collects what the algorithms need from it:
//!
//! - **`zero()`**: the additive identity, used for the source distance and
//!   for detecting exhausted residual capacity.
//! - **`total_cmp`**: a total order. Floats use IEEE total ordering so they
//!   can key a priority queue.
//! - **`hash_weight`**: a hash consistent with `total_cmp`, so a weight can be
//!   part of a hashed queue key.
//! - **`checked_add`**: addition that reports overflow instead of wrapping or
//!   panicking. Floats never overflow this way; they saturate to infinity.
//!
//! Implementations are generated for the primitive integer and float types.

use duplicate::duplicate;
use std::cmp::Ordering;
use std::fmt::{Debug, Display};
use std::hash::{Hash, Hasher};
use std::ops::{Add, Sub};

pub trait Weight:
    Copy + PartialOrd + Add<Output = Self> + Sub<Output = Self> + Debug + Display
{
    fn zero() -> Self;

    fn total_cmp(&self, other: &Self) -> Ordering;

    fn hash_weight<H: Hasher>(&self, state: &mut H);

    fn checked_add(self, other: Self) -> Option<Self>;

    /// Numeric sign test: `-0.0` is not negative.
    fn is_negative(&self) -> bool {
        *self < Self::zero()
    }

    /// True once a capacity has nothing left to give.
    fn is_exhausted(&self) -> bool {
        self.total_cmp(&Self::zero()) != Ordering::Greater
    }
}

duplicate! {
    [types zero_value;
        [f32] [0.0];
        [f64] [0.0];
        ]

    impl Weight for types {
        fn zero() -> Self {
            zero_value
        }

        fn total_cmp(&self, other: &Self) -> Ordering {
            types::total_cmp(self, other)
        }

        fn hash_weight<H: Hasher>(&self, state: &mut H) {
            self.to_bits().hash(state)
        }

        fn checked_add(self, other: Self) -> Option<Self> {
            Some(self + other)
        }
    }
}

duplicate! {
    [types;
        [i8]; [i16]; [i32]; [i64]; [i128]; [isize];
        [u8]; [u16]; [u32]; [u64]; [u128]; [usize];
        ]

    impl Weight for types {
        fn zero() -> Self {
            0
        }

        fn total_cmp(&self, other: &Self) -> Ordering {
            self.cmp(other)
        }

        fn hash_weight<H: Hasher>(&self, state: &mut H) {
            self.hash(state)
        }

        fn checked_add(self, other: Self) -> Option<Self> {
            types::checked_add(self, other)
        }
    }
}
