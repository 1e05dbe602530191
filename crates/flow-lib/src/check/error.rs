use rowan::TextRange;

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::program::{FlowId, Program};

/// First violation found while checking a flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckError {
    pub kind: CheckErrorKind,
    pub range: TextRange,
    /// Flow the range belongs to; a callee when the violation is inside one.
    pub flow: FlowId,
    /// The `let` handle a failing call went through.
    pub handle: Option<TextRange>,
}

/// Display text is the detail slotted into the diagnostic template of the kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckErrorKind {
    #[error("{0}")]
    UnknownIdentifier(String),
    #[error("{0}")]
    UnknownFlow(String),
    #[error("{0}")]
    UnknownSubFlow(String),
    #[error("{0}")]
    UnknownAttribute(String),
    #[error("expected a name or a call after `.`")]
    InvalidAttribute,
    #[error("{0}")]
    InvalidAssignment(String),
    #[error("found {0} values")]
    MultiValueReturn(usize),
    #[error("`{handle}` expects {expected}, got {found}")]
    ArityMismatch {
        handle: String,
        expected: usize,
        found: usize,
    },
}

impl CheckErrorKind {
    pub fn diagnostic_kind(&self) -> DiagnosticKind {
        match self {
            Self::UnknownIdentifier(_) => DiagnosticKind::UnknownIdentifier,
            Self::UnknownFlow(_) => DiagnosticKind::UnknownFlow,
            Self::UnknownSubFlow(_) => DiagnosticKind::UnknownSubFlow,
            Self::UnknownAttribute(_) => DiagnosticKind::UnknownAttribute,
            Self::InvalidAttribute => DiagnosticKind::InvalidAttribute,
            Self::InvalidAssignment(_) => DiagnosticKind::InvalidAssignment,
            Self::MultiValueReturn(_) => DiagnosticKind::MultiValueReturn,
            Self::ArityMismatch { .. } => DiagnosticKind::ArityMismatch,
        }
    }
}

impl CheckError {
    pub fn report(&self, diag: &mut Diagnostics, program: &Program) {
        let flow = program.flow(self.flow);
        let mut builder = diag
            .report(self.kind.diagnostic_kind(), self.range)
            .message(self.kind.to_string())
            .related_to(format!("in flow `{}`", flow.name), flow.name_range);
        if let Some(range) = self.handle {
            builder = builder.related_to("handle bound here", range);
        }
        builder.emit();
    }
}

impl std::fmt::Display for CheckError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = self.kind.diagnostic_kind();
        write!(f, "{}", kind.message(Some(&self.kind.to_string())))
    }
}

impl std::error::Error for CheckError {}
