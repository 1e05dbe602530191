use rowan::TextRange;

use super::unify::UnifyError;
use crate::diagnostics::{DiagnosticKind, Diagnostics};

/// Failure of one inference run. Every error aborts the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferError {
    pub kind: InferErrorKind,
    pub range: TextRange,
}

/// Display text is the detail slotted into the diagnostic template of the kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InferErrorKind {
    #[error(transparent)]
    Unify(#[from] UnifyError),
    #[error("{0}")]
    InvalidTranspose(String),
    #[error("{0}")]
    UnknownAttribute(String),
    #[error("expected a name or a call after `.`")]
    InvalidAttribute,
    #[error("`{name}` in flow `{flow}`")]
    UnresolvedRank { name: String, flow: String },
    #[error("{0}")]
    UnknownSubFlow(String),
    #[error("{0}")]
    UnknownFlow(String),
    #[error("{0}")]
    MatMulRank(String),
    #[error("{0}")]
    RecursiveCall(String),
    #[error("`{0}` applied to an unshaped value")]
    UnshapedOperand(String),
    #[error("call to `{0}` has no sub-context")]
    UninferredCall(String),
    #[error("{0}")]
    UnknownParameter(String),
    #[error("{0}")]
    DuplicateShapeSpec(String),
}

impl InferErrorKind {
    pub fn diagnostic_kind(&self) -> DiagnosticKind {
        match self {
            Self::Unify(UnifyError::ShapeLengthClash { .. }) => DiagnosticKind::ShapeLengthClash,
            Self::Unify(UnifyError::DimensionClash { .. }) => DiagnosticKind::DimensionClash,
            Self::InvalidTranspose(_) => DiagnosticKind::InvalidTranspose,
            Self::UnknownAttribute(_) => DiagnosticKind::UnknownAttribute,
            Self::InvalidAttribute => DiagnosticKind::InvalidAttribute,
            Self::UnresolvedRank { .. } => DiagnosticKind::UnresolvedRank,
            Self::UnknownSubFlow(_) => DiagnosticKind::UnknownSubFlow,
            Self::UnknownFlow(_) => DiagnosticKind::UnknownFlow,
            Self::MatMulRank(_) => DiagnosticKind::MatMulRank,
            Self::RecursiveCall(_) => DiagnosticKind::RecursiveCall,
            Self::UnshapedOperand(_) => DiagnosticKind::UnshapedOperand,
            Self::UninferredCall(_) => DiagnosticKind::UninferredCall,
            Self::UnknownParameter(_) => DiagnosticKind::UnknownParameter,
            Self::DuplicateShapeSpec(_) => DiagnosticKind::DuplicateShapeSpec,
        }
    }
}

impl InferError {
    pub fn new(kind: impl Into<InferErrorKind>, range: TextRange) -> Self {
        Self {
            kind: kind.into(),
            range,
        }
    }

    /// `scope` names what was being inferred, like "flow `f`" or "build `main`".
    pub fn report(&self, diag: &mut Diagnostics, scope: impl std::fmt::Display, at: TextRange) {
        diag.report(self.kind.diagnostic_kind(), self.range)
            .message(self.kind.to_string())
            .related_to(format!("in {scope}"), at)
            .emit();
    }
}

impl std::fmt::Display for InferError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = self.kind.diagnostic_kind();
        write!(f, "{}", kind.message(Some(&self.kind.to_string())))
    }
}

impl std::error::Error for InferError {}

/// Attaches a source range to a range-free unification failure.
pub(crate) trait AtRange<T> {
    fn at(self, range: TextRange) -> Result<T, InferError>;
}

impl<T> AtRange<T> for Result<T, UnifyError> {
    fn at(self, range: TextRange) -> Result<T, InferError> {
        self.map_err(|e| InferError::new(e, range))
    }
}
