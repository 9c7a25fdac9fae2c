pub mod disjoint_set;
pub mod fibonacci_heap;
