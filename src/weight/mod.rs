//! The weight algebra used by the shortest path and spanning tree algorithms.
//!
//! The algorithms never assume that weights are numeric primitives.
//! Instead, weights are combined and compared only through a [Monoid](Monoid) or [OrderedMonoid](OrderedMonoid) object supplied by the caller.
//! Keeping the operations separate from the weight type allows e.g. to use `f64` weights, which are not `Ord`.

use crate::collections::fibonacci_heap::KeyOrder;
use std::cmp::Ordering;

mod weight_implementations;

/// An algebraic structure over `WeightType` with an identity element, an associative combination and an inverse.
///
/// Implementations must guarantee that `append` is associative, that `zero` is the identity of `append`
/// and that `append(a, inverse(a)) == zero()`.
pub trait Monoid<WeightType> {
    /// Returns the identity element of `append`.
    fn zero(&self) -> WeightType;

    /// Combines two weights.
    fn append(&self, a: &WeightType, b: &WeightType) -> WeightType;

    /// Returns the inverse of `a` with respect to `append`.
    fn inverse(&self, a: &WeightType) -> WeightType;

    /// Alias of [zero](Monoid::zero).
    fn identity(&self) -> WeightType {
        self.zero()
    }
}

/// A [Monoid](Monoid) with a total order on its elements.
/// The order must be monotonic with respect to `append`, i.e. `a <= b` implies `append(a, c) <= append(b, c)`.
pub trait OrderedMonoid<WeightType>: Monoid<WeightType> {
    /// Compares two weights.
    fn compare(&self, a: &WeightType, b: &WeightType) -> Ordering;

    /// Returns true if `a` is strictly smaller than `b`.
    fn is_less(&self, a: &WeightType, b: &WeightType) -> bool {
        self.compare(a, b) == Ordering::Less
    }

    /// Returns the smaller of the two weights, preferring `a` if they are equal.
    fn min<'a>(&self, a: &'a WeightType, b: &'a WeightType) -> &'a WeightType {
        if self.compare(b, a) == Ordering::Less {
            b
        } else {
            a
        }
    }
}

/// The algebra of primitive numeric weights, i.e. addition, negation and the usual ordering.
/// Floating point weights are ordered by `total_cmp`.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub struct BaseWeightOperations;

/// Edge data that has a weight usable for shortest path and spanning tree computation.
pub trait WeightedEdgeData<WeightType> {
    /// The weight of the edge.
    fn weight(&self) -> WeightType;
}

impl<WeightType: Clone> WeightedEdgeData<WeightType> for WeightType {
    #[inline]
    fn weight(&self) -> WeightType {
        self.clone()
    }
}

/// Orders heap keys by an [OrderedMonoid](OrderedMonoid).
pub struct WeightOrder<'a, Operations> {
    weight_operations: &'a Operations,
}

impl<'a, Operations> WeightOrder<'a, Operations> {
    /// Creates a key order that compares keys with the given operations.
    pub fn new(weight_operations: &'a Operations) -> Self {
        Self { weight_operations }
    }
}

impl<'a, WeightType, Operations: OrderedMonoid<WeightType>> KeyOrder<WeightType>
    for WeightOrder<'a, Operations>
{
    fn compare(&self, a: &WeightType, b: &WeightType) -> Ordering {
        self.weight_operations.compare(a, b)
    }
}

#[cfg(test)]
mod tests {
    use crate::weight::{BaseWeightOperations, Monoid, OrderedMonoid, WeightedEdgeData};
    use std::cmp::Ordering;

    #[test]
    fn test_integer_operations() {
        let operations = BaseWeightOperations;
        assert_eq!(Monoid::<i32>::zero(&operations), 0);
        assert_eq!(operations.append(&3i32, &4), 7);
        assert_eq!(operations.inverse(&3i64), -3);
        assert_eq!(operations.append(&5i64, &operations.inverse(&5)), 0);
        assert_eq!(operations.compare(&-1i16, &1), Ordering::Less);
        assert_eq!(*operations.min(&4i8, &2), 2);
    }

    #[test]
    fn test_float_operations() {
        let operations = BaseWeightOperations;
        assert_eq!(Monoid::<f64>::identity(&operations), 0.0);
        assert_eq!(operations.append(&1.5f64, &2.0), 3.5);
        assert_eq!(operations.compare(&1.5f32, &1.5), Ordering::Equal);
        assert!(operations.is_less(&-0.5f64, &0.25));
        assert_eq!(operations.compare(&2.0f64, &1.0), Ordering::Greater);
    }

    #[test]
    fn test_associativity() {
        let operations = BaseWeightOperations;
        let values = [-7i64, 0, 3, 11];
        for a in &values {
            for b in &values {
                for c in &values {
                    assert_eq!(
                        operations.append(&operations.append(a, b), c),
                        operations.append(a, &operations.append(b, c))
                    );
                }
            }
        }
    }

    #[test]
    fn test_primitive_weights_are_weighted_edge_data() {
        assert_eq!(WeightedEdgeData::<i32>::weight(&5i32), 5);
        assert_eq!(WeightedEdgeData::<f64>::weight(&0.5f64), 0.5);
    }
}
