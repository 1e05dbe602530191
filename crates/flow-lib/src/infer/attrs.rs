//! Attribute table for `value.attr` and `value.attr(args)`.

use rowan::TextRange;

use super::error::{InferError, InferErrorKind};
use super::shape::{Rank, Shape};
use crate::program::{Expr, Number};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Min,
    Max,
    Len,
    Shape,
    /// Transpose.
    T,
}

impl Attribute {
    pub const ALL: [Attribute; 5] = [
        Attribute::Min,
        Attribute::Max,
        Attribute::Len,
        Attribute::Shape,
        Attribute::T,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Attribute::Min => "min",
            Attribute::Max => "max",
            Attribute::Len => "len",
            Attribute::Shape => "shape",
            Attribute::T => "T",
        }
    }
}

/// The right-hand side of `.` once validated.
#[derive(Debug, Clone, Copy)]
pub(super) struct Member<'e> {
    pub attr: Attribute,
    pub args: &'e [Expr],
    pub range: TextRange,
}

impl<'e> Member<'e> {
    pub(super) fn parse(member: &'e Expr) -> Result<Self, InferError> {
        let (name, args): (&str, &[Expr]) = match member {
            Expr::Var(v) => (v.name.as_str(), &[]),
            Expr::Call(c) => (c.name.as_str(), c.args.as_slice()),
            _ => {
                return Err(InferError::new(
                    InferErrorKind::InvalidAttribute,
                    member.range(),
                ));
            }
        };
        let Some(attr) = Attribute::from_name(name) else {
            return Err(InferError::new(
                InferErrorKind::UnknownAttribute(name.to_string()),
                member.range(),
            ));
        };
        Ok(Self {
            attr,
            args,
            range: member.range(),
        })
    }

    /// Rank rule used by the length pass.
    pub(super) fn length(&self, operand: Option<Shape>) -> Result<Shape, InferError> {
        match self.attr {
            Attribute::Min | Attribute::Max | Attribute::Len => {
                Ok(Shape::with_rank(Rank::Known(1)))
            }
            Attribute::Shape => {
                self.shaped(operand)?;
                Ok(Shape::with_rank(Rank::Known(2)))
            }
            Attribute::T => {
                self.transpose_axes()?;
                let operand = self.shaped(operand)?;
                Ok(Shape::with_rank(operand.length))
            }
        }
    }

    /// Axis rule used by the shape pass.
    pub(super) fn shape(&self, operand: Option<Shape>) -> Result<Shape, InferError> {
        match self.attr {
            Attribute::Min | Attribute::Max | Attribute::Len => Ok(Shape::known(&[1])),
            Attribute::Shape => {
                let operand = self.shaped(operand)?;
                Ok(Shape::known(&[1, operand.dims.len()]))
            }
            Attribute::T => {
                let (a, b) = self.transpose_axes()?;
                let mut operand = self.shaped(operand)?;
                let rank = operand.dims.len();
                let a = self.normalize(a, rank)?;
                let b = self.normalize(b, rank)?;
                operand.dims.swap(a, b);
                Ok(Shape::from_axes(operand.dims))
            }
        }
    }

    fn shaped(&self, operand: Option<Shape>) -> Result<Shape, InferError> {
        operand.ok_or_else(|| {
            InferError::new(
                InferErrorKind::UnshapedOperand(self.attr.name().to_string()),
                self.range,
            )
        })
    }

    /// The two axes `T` swaps: the last two by default, or the given axis with the second-to-last.
    fn transpose_axes(&self) -> Result<(i64, i64), InferError> {
        match self.args {
            [] => Ok((-2, -1)),
            [a] => Ok((axis_literal(a)?, -2)),
            [a, b] => Ok((axis_literal(a)?, axis_literal(b)?)),
            _ => Err(InferError::new(
                InferErrorKind::InvalidTranspose("`T` takes at most two axes".to_string()),
                self.range,
            )),
        }
    }

    fn normalize(&self, axis: i64, rank: usize) -> Result<usize, InferError> {
        let signed = rank as i64;
        let index = if axis < 0 { axis + signed } else { axis };
        if (0..signed).contains(&index) {
            return Ok(index as usize);
        }
        Err(InferError::new(
            InferErrorKind::InvalidTranspose(format!(
                "axis {axis} is out of range for rank {rank}"
            )),
            self.range,
        ))
    }
}

fn axis_literal(expr: &Expr) -> Result<i64, InferError> {
    let value = match expr {
        Expr::Num {
            value: Number::Int(n),
            ..
        } => Some(*n),
        Expr::Neg { operand, .. } => match operand.as_ref() {
            Expr::Num {
                value: Number::Int(n),
                ..
            } => n.checked_neg(),
            _ => None,
        },
        _ => None,
    };
    value.ok_or_else(|| {
        InferError::new(
            InferErrorKind::InvalidTranspose("axes are integer literals".to_string()),
            expr.range(),
        )
    })
}

