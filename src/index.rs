use num_traits::{NumCast, PrimInt, ToPrimitive};
use std::hash::Hash;
use std::marker::PhantomData;

#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Copy, Clone)]
/// A valid node index.
pub struct NodeIndex<IndexType: Sized = usize>(IndexType);
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Copy, Clone)]
/// A valid edge index.
pub struct EdgeIndex<IndexType: Sized = usize>(IndexType);

/// A valid graph index.
///
/// Graph indices are consecutive, starting from zero, such that per-node or per-edge state can be stored in vectors.
pub trait GraphIndex:
    std::fmt::Debug + Eq + Ord + Hash + Copy + Sized + From<usize> + std::ops::Add<usize, Output = Self>
{
    // We don't wanna have GraphIndex: Into<usize>, to make this type strong, i.e. make it hard to accidentally convert it to a different type.
    /// Get this index as `usize`.
    fn as_usize(self) -> usize;
}

macro_rules! impl_graph_index {
    ($GraphIndexType:ident) => {
        impl<IndexType: PrimInt + Hash> GraphIndex for $GraphIndexType<IndexType> {
            #[inline]
            fn as_usize(self) -> usize {
                <usize as NumCast>::from(self.0).unwrap()
            }
        }

        impl<IndexType: PrimInt + Hash> std::fmt::Debug for $GraphIndexType<IndexType> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_usize())
            }
        }

        impl<IndexType: PrimInt> From<usize> for $GraphIndexType<IndexType> {
            fn from(source: usize) -> Self {
                let source = <IndexType as NumCast>::from(source).unwrap();
                debug_assert!(source != IndexType::max_value());
                Self(source)
            }
        }

        impl<IndexType: PrimInt + Hash> std::ops::Add<usize> for $GraphIndexType<IndexType> {
            type Output = Self;

            fn add(self, rhs: usize) -> Self::Output {
                Self::from(self.as_usize() + rhs)
            }
        }

        impl<T, IndexType: PrimInt + Hash> std::ops::Index<$GraphIndexType<IndexType>> for Vec<T> {
            type Output = T;

            fn index(&self, index: $GraphIndexType<IndexType>) -> &Self::Output {
                &self[index.as_usize()]
            }
        }

        impl<T, IndexType: PrimInt + Hash> std::ops::IndexMut<$GraphIndexType<IndexType>>
            for Vec<T>
        {
            fn index_mut(&mut self, index: $GraphIndexType<IndexType>) -> &mut Self::Output {
                &mut self[index.as_usize()]
            }
        }
    };
}

impl_graph_index!(NodeIndex);
impl_graph_index!(EdgeIndex);

/// An iterator over a consecutive sequence of graph indices.
pub struct GraphIndices<IndexType> {
    start: usize,
    end: usize,
    index_type: PhantomData<IndexType>,
}

impl<RawType: ToPrimitive, IndexType: GraphIndex> From<(RawType, RawType)>
    for GraphIndices<IndexType>
{
    fn from(raw: (RawType, RawType)) -> Self {
        Self {
            start: raw.0.to_usize().unwrap(),
            end: raw.1.to_usize().unwrap(),
            index_type: Default::default(),
        }
    }
}

impl<IndexType: GraphIndex> Iterator for GraphIndices<IndexType> {
    type Item = IndexType;

    fn next(&mut self) -> Option<Self::Item> {
        if self.start < self.end {
            let result = IndexType::from(self.start);
            self.start += 1;
            Some(result)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end.saturating_sub(self.start);
        (remaining, Some(remaining))
    }
}

impl<IndexType: GraphIndex> ExactSizeIterator for GraphIndices<IndexType> {}

impl<IndexType: GraphIndex> DoubleEndedIterator for GraphIndices<IndexType> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.start < self.end {
            self.end -= 1;
            Some(IndexType::from(self.end))
        } else {
            None
        }
    }
}
