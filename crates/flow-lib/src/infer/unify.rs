//! Consolidation of ranks and shapes.
//!
//! Both passes go through here. A clash leaves the tables as they were up to
//! the failing axis; callers abort the run on any error.

use super::shape::{Axis, Rank, Shape};
use super::table::{Tables, Term, VarKey, VarTable};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnifyError {
    #[error("rank {left} against rank {right}")]
    ShapeLengthClash { left: usize, right: usize },
    #[error("axis of size {left} against axis of size {right}")]
    DimensionClash { left: usize, right: usize },
}

/// Unify two terms of the same kind. `Err` carries the two clashing sizes.
fn unify_term<K: VarKey>(
    table: &mut VarTable<K>,
    a: Term<K>,
    b: Term<K>,
) -> Result<Term<K>, (usize, usize)> {
    match (table.resolve_term(a), table.resolve_term(b)) {
        (Term::Known(x), Term::Known(y)) if x == y => Ok(Term::Known(x)),
        (Term::Known(x), Term::Known(y)) => Err((x, y)),
        (Term::Var(v), Term::Known(n)) | (Term::Known(n), Term::Var(v)) => {
            table.bind(v, n);
            Ok(Term::Known(n))
        }
        (Term::Var(x), Term::Var(y)) => Ok(Term::Var(table.link(x, y))),
    }
}

pub fn unify_rank(tables: &mut Tables, a: Rank, b: Rank) -> Result<Rank, UnifyError> {
    unify_term(&mut tables.ranks, a, b)
        .map_err(|(left, right)| UnifyError::ShapeLengthClash { left, right })
}

pub fn unify_axis(tables: &mut Tables, a: Axis, b: Axis) -> Result<Axis, UnifyError> {
    unify_term(&mut tables.dims, a, b)
        .map_err(|(left, right)| UnifyError::DimensionClash { left, right })
}

/// Merge two ranks.
///
/// Rules:
/// - nothing ∪ nothing → fresh rank variable
/// - one side present → that side
/// - otherwise the two lengths are unified
pub fn consolidate_length(
    tables: &mut Tables,
    a: Option<&Shape>,
    b: Option<&Shape>,
) -> Result<Shape, UnifyError> {
    match (a, b) {
        (None, None) => Ok(Shape::with_rank(Rank::Var(tables.define_shape_length()))),
        (Some(s), None) | (None, Some(s)) => Ok(s.clone()),
        (Some(a), Some(b)) if a == b => Ok(a.clone()),
        (Some(a), Some(b)) => {
            let length = unify_rank(tables, a.length, b.length)?;
            Ok(Shape::with_rank(length))
        }
    }
}

/// Merge two seeded shapes axis by axis.
///
/// Shapes with different axis counts clash on their length.
pub fn consolidate_shape(
    tables: &mut Tables,
    a: Option<&Shape>,
    b: Option<&Shape>,
) -> Result<Option<Shape>, UnifyError> {
    let (a, b) = match (a, b) {
        (None, None) => return Ok(None),
        (Some(s), None) | (None, Some(s)) => return Ok(Some(s.clone())),
        (Some(a), Some(b)) => (a, b),
    };
    if a.dims.len() != b.dims.len() {
        return Err(UnifyError::ShapeLengthClash {
            left: a.dims.len(),
            right: b.dims.len(),
        });
    }
    let dims = a
        .dims
        .iter()
        .zip(&b.dims)
        .map(|(&x, &y)| unify_axis(tables, x, y))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Some(Shape::from_axes(dims)))
}
