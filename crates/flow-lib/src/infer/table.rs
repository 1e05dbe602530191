//! Resolution tables for unification variables.
//!
//! Every inference run owns one `Tables`. Variables are indices into a slot
//! arena; a slot either links to another variable of the same kind (a self-link
//! means unresolved) or holds a concrete size.

use std::fmt;

use serde::{Serialize, Serializer};

/// An unknown axis size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DimVar(u32);

/// An unknown rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RankVar(u32);

pub trait VarKey: Copy + Eq + fmt::Debug + fmt::Display {
    fn from_raw(index: u32) -> Self;
    fn index(self) -> usize;
}

impl VarKey for DimVar {
    #[inline]
    fn from_raw(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

impl VarKey for RankVar {
    #[inline]
    fn from_raw(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for DimVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "?d{}", self.0)
    }
}

impl fmt::Display for RankVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "?r{}", self.0)
    }
}

/// A size that is either concrete or still a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Term<K> {
    Known(usize),
    Var(K),
}

impl<K: VarKey> Term<K> {
    pub fn known(self) -> Option<usize> {
        match self {
            Term::Known(n) => Some(n),
            Term::Var(_) => None,
        }
    }
}

impl<K: VarKey> fmt::Display for Term<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Known(n) => write!(f, "{n}"),
            Term::Var(v) => write!(f, "{v}"),
        }
    }
}

/// Concrete sizes serialize as numbers, variables as their `?d3` / `?r1` names.
impl<K: VarKey> Serialize for Term<K> {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        match self {
            Term::Known(n) => s.serialize_u64(*n as u64),
            Term::Var(v) => s.collect_str(v),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot<K> {
    Link(K),
    Known(usize),
}

#[derive(Debug, Clone)]
pub struct VarTable<K> {
    slots: Vec<Slot<K>>,
}

impl<K> Default for VarTable<K> {
    fn default() -> Self {
        Self { slots: Vec::new() }
    }
}

impl<K: VarKey> VarTable<K> {
    pub fn fresh(&mut self) -> K {
        let key = K::from_raw(self.slots.len() as u32);
        self.slots.push(Slot::Link(key));
        key
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Follows links until a concrete size or an unresolved variable.
    pub fn resolve(&self, mut key: K) -> Term<K> {
        loop {
            match self.slots[key.index()] {
                Slot::Known(n) => return Term::Known(n),
                Slot::Link(next) if next == key => return Term::Var(key),
                Slot::Link(next) => key = next,
            }
        }
    }

    pub fn resolve_term(&self, term: Term<K>) -> Term<K> {
        match term {
            Term::Known(n) => Term::Known(n),
            Term::Var(v) => self.resolve(v),
        }
    }

    /// Binds an unresolved variable to a concrete size.
    pub fn bind(&mut self, root: K, value: usize) {
        debug_assert_eq!(self.resolve(root), Term::Var(root));
        tracing::trace!(var = %root, value, "bind");
        self.slots[root.index()] = Slot::Known(value);
    }

    /// Aliases two unresolved variables. The higher index points at the lower one,
    /// which survives and is returned.
    pub fn link(&mut self, a: K, b: K) -> K {
        debug_assert_eq!(self.resolve(a), Term::Var(a));
        debug_assert_eq!(self.resolve(b), Term::Var(b));
        if a == b {
            return a;
        }
        let (low, high) = if a.index() < b.index() { (a, b) } else { (b, a) };
        tracing::trace!(from = %high, to = %low, "link");
        self.slots[high.index()] = Slot::Link(low);
        low
    }
}

/// The two arenas shared by every context of one inference run.
#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub(super) dims: VarTable<DimVar>,
    pub(super) ranks: VarTable<RankVar>,
}

impl Tables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define_dimension(&mut self) -> DimVar {
        self.dims.fresh()
    }

    pub fn define_shape_length(&mut self) -> RankVar {
        self.ranks.fresh()
    }

    pub fn resolve_axis(&self, axis: Term<DimVar>) -> Term<DimVar> {
        self.dims.resolve_term(axis)
    }

    pub fn resolve_rank(&self, rank: Term<RankVar>) -> Term<RankVar> {
        self.ranks.resolve_term(rank)
    }

    pub fn dimensions(&self) -> &VarTable<DimVar> {
        &self.dims
    }

    pub fn shape_lengths(&self) -> &VarTable<RankVar> {
        &self.ranks
    }
}
