use crate::weight::{BaseWeightOperations, Monoid, OrderedMonoid};
use num_traits::Zero;
use std::cmp::Ordering;

macro_rules! impl_base_weight_operations {
    ($weight_type:ty, $compare:expr) => {
        impl Monoid<$weight_type> for BaseWeightOperations {
            #[inline]
            fn zero(&self) -> $weight_type {
                <$weight_type as Zero>::zero()
            }

            #[inline]
            fn append(&self, a: &$weight_type, b: &$weight_type) -> $weight_type {
                *a + *b
            }

            #[inline]
            fn inverse(&self, a: &$weight_type) -> $weight_type {
                -*a
            }
        }

        impl OrderedMonoid<$weight_type> for BaseWeightOperations {
            #[inline]
            fn compare(&self, a: &$weight_type, b: &$weight_type) -> Ordering {
                let compare: fn(&$weight_type, &$weight_type) -> Ordering = $compare;
                compare(a, b)
            }
        }
    };
}

impl_base_weight_operations!(isize, Ord::cmp);
impl_base_weight_operations!(i8, Ord::cmp);
impl_base_weight_operations!(i16, Ord::cmp);
impl_base_weight_operations!(i32, Ord::cmp);
impl_base_weight_operations!(i64, Ord::cmp);
impl_base_weight_operations!(i128, Ord::cmp);
impl_base_weight_operations!(f32, f32::total_cmp);
impl_base_weight_operations!(f64, f64::total_cmp);
