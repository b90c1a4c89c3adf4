use core::fmt;
use core::num::NonZeroU32;

/// Compact, stable identifier for a node of the route graph.
///
/// - `u32` keeps adjacency tables small
/// - `NonZero` lets `Option<NodeId>` (the predecessor slot of every label)
///   stay the same size as `NodeId`
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(NonZeroU32);

impl Id {
    /// Create an Id from a 0-based index by storing index+1.
    ///
    /// Indices at `u32::MAX` saturate; graphs never get close to that size.
    pub fn from_index(index: u32) -> Self {
        Self(NonZeroU32::MIN.saturating_add(index))
    }

    /// Create an Id from a `usize` position in a node table.
    pub fn from_usize(index: usize) -> Self {
        Self::from_index(u32::try_from(index).unwrap_or(u32::MAX - 1))
    }

    /// Recover the 0-based index.
    pub fn index(self) -> u32 {
        self.0.get() - 1
    }

    /// The 0-based index as a table offset.
    pub fn idx(self) -> usize {
        self.index() as usize
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.index())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Id {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.index())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Id {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let index = <u32 as serde::Deserialize>::deserialize(deserializer)?;
        if index == u32::MAX {
            return Err(serde::de::Error::custom("node index out of range"));
        }
        Ok(Id::from_index(index))
    }
}

/// Node identifiers; index 0 is the source and `N-1` the sink of a graph.
pub type NodeId = Id;


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn index_survives_the_offset(i in 0u32..u32::MAX) {
            let id = Id::from_index(i);
            prop_assert_eq!(id.index(), i);
            prop_assert_eq!(Id::from_usize(i as usize), id);
        }
    }
}
