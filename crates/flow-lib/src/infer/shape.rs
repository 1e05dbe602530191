use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use super::table::{DimVar, RankVar, Term};

pub type Axis = Term<DimVar>;
pub type Rank = Term<RankVar>;

/// Shape of one value: its axes and its own length.
///
/// The length pass only fills `length`; `dims` stays empty until the shape is seeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    pub dims: Vec<Axis>,
    pub length: Rank,
}

impl Shape {
    /// A shape whose axes are not known yet.
    pub fn with_rank(length: Rank) -> Self {
        Self {
            dims: Vec::new(),
            length,
        }
    }

    pub fn from_axes(dims: Vec<Axis>) -> Self {
        let length = Rank::Known(dims.len());
        Self { dims, length }
    }

    pub fn known(dims: &[usize]) -> Self {
        Self::from_axes(dims.iter().copied().map(Axis::Known).collect())
    }

    /// Length is concrete and matches the axis count.
    pub fn is_seeded(&self) -> bool {
        self.length == Rank::Known(self.dims.len())
    }

    pub fn rank(&self) -> Option<usize> {
        self.length.known()
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_seeded() {
            return write!(f, "rank {}", self.length);
        }
        f.write_str("[")?;
        for (i, axis) in self.dims.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{axis}")?;
        }
        f.write_str("]")
    }
}

/// `{"rank": 2, "dims": [3, "?d1"]}`; `dims` is `null` before seeding.
impl Serialize for Shape {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        let mut state = s.serialize_struct("Shape", 2)?;
        state.serialize_field("rank", &self.length)?;
        let dims = self.is_seeded().then_some(&self.dims);
        state.serialize_field("dims", &dims)?;
        state.end()
    }
}
