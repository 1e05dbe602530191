use rowan::TextRange;

/// Declaration order is priority order: earlier kinds hide later ones
/// reported over the same stretch of source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Everything after the opener is suspect
    UnclosedParen,
    UnclosedBracket,
    UnclosedBrace,

    // Missing tokens
    ExpectedItem,
    ExpectedBody,
    ExpectedStatement,
    ExpectedExpression,
    ExpectedIdentifier,
    ExpectedSemicolon,
    ExpectedAssignment,
    ExpectedAttribute,
    ExpectedShapeSpec,

    // Tokens that do not belong
    UnexpectedToken,
    DuplicateParameterList,
    InvalidDimension,
    InvalidNumber,

    // Checker
    UnknownIdentifier,
    UnknownFlow,
    UnknownSubFlow,
    UnknownAttribute,
    InvalidAttribute,
    InvalidAssignment,
    MultiValueReturn,
    ArityMismatch,
    ShadowedFlow,

    // Build declarations
    UnknownParameter,
    DuplicateShapeSpec,

    // Inference
    ShapeLengthClash,
    DimensionClash,
    MatMulRank,
    InvalidTranspose,
    UnshapedOperand,
    RecursiveCall,
    UninferredCall,
    UnresolvedRank,
}

impl DiagnosticKind {
    pub fn default_severity(&self) -> Severity {
        if *self == Self::ShadowedFlow {
            Severity::Warning
        } else {
            Severity::Error
        }
    }

    pub fn suppresses(&self, other: &DiagnosticKind) -> bool {
        self < other
    }

    /// Unclosed delimiters.
    pub fn is_structural_error(&self) -> bool {
        *self <= Self::UnclosedBrace
    }

    /// Missing tokens, the usual cause of an unclosed delimiter at the same spot.
    pub fn is_root_cause_error(&self) -> bool {
        (Self::ExpectedItem..=Self::ExpectedShapeSpec).contains(self)
    }

    /// Message used when the reporter gives no detail.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::UnclosedParen => "missing closing `)`",
            Self::UnclosedBracket => "missing closing `]`",
            Self::UnclosedBrace => "missing closing `}`",

            Self::ExpectedItem => "expected `flow` or `build`",
            Self::ExpectedBody => "expected a body",
            Self::ExpectedStatement => "expected a statement",
            Self::ExpectedExpression => "expected an expression",
            Self::ExpectedIdentifier => "expected an identifier",
            Self::ExpectedSemicolon => "expected `;`",
            Self::ExpectedAssignment => "expected `=`",
            Self::ExpectedAttribute => "expected an attribute after `.`",
            Self::ExpectedShapeSpec => "expected a shape spec",

            Self::UnexpectedToken => "unexpected token",
            Self::DuplicateParameterList => "duplicate parameter list",
            Self::InvalidDimension => "invalid dimension",
            Self::InvalidNumber => "invalid number",

            Self::UnknownIdentifier => "unknown identifier",
            Self::UnknownFlow => "unknown flow",
            Self::UnknownSubFlow => "unknown sub-flow",
            Self::UnknownAttribute => "unknown attribute",
            Self::InvalidAttribute => "invalid attribute",
            Self::InvalidAssignment => "invalid assignment target",
            Self::MultiValueReturn => "flows return a single value",
            Self::ArityMismatch => "wrong number of arguments",
            Self::ShadowedFlow => "flow shadows an earlier declaration",

            Self::UnknownParameter => "unknown parameter",
            Self::DuplicateShapeSpec => "duplicate shape spec",

            Self::ShapeLengthClash => "rank mismatch",
            Self::DimensionClash => "dimension mismatch",
            Self::MatMulRank => "`@` needs operands with at least two axes",
            Self::InvalidTranspose => "invalid transpose",
            Self::UnshapedOperand => "attribute needs a shaped operand",
            Self::RecursiveCall => "recursive flow call",
            Self::UninferredCall => "call was not length-inferred",
            Self::UnresolvedRank => "rank could not be inferred",
        }
    }

    /// Final message text. Name-carrying kinds take the bare name as `detail`;
    /// the rest append it to their fallback message.
    pub fn message(&self, detail: Option<&str>) -> String {
        let Some(detail) = detail else {
            return self.fallback_message().to_string();
        };
        match self {
            Self::UnknownIdentifier => format!("`{detail}` is not defined"),
            Self::UnknownFlow => format!("`{detail}` is not a known flow"),
            Self::UnknownSubFlow => format!("`{detail}` is not bound by a preceding `let`"),
            Self::UnknownAttribute => format!("`{detail}` is not a known attribute"),
            Self::UnknownParameter => format!("`{detail}` is not a parameter of the target flow"),
            Self::DuplicateShapeSpec => format!("`{detail}` is already given a shape"),
            Self::ShadowedFlow => format!("flow `{detail}` shadows an earlier declaration"),
            Self::RecursiveCall => format!("flow `{detail}` calls itself"),
            Self::UnexpectedToken => detail.to_string(),
            kind if kind.is_structural_error() => format!("{}; {detail}", kind.fallback_message()),
            kind => format!("{}: {detail}", kind.fallback_message()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub(crate) range: TextRange,
    pub(crate) message: String,
}

impl RelatedInfo {
    pub fn new(range: TextRange, message: impl Into<String>) -> Self {
        Self {
            range,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    /// Underlined in rendered output.
    pub(crate) range: TextRange,
    pub(crate) message: String,
    pub(crate) related: Vec<RelatedInfo>,
}

impl DiagnosticMessage {
    pub(crate) fn with_default_message(kind: DiagnosticKind, range: TextRange) -> Self {
        Self {
            kind,
            range,
            message: kind.fallback_message().to_string(),
            related: Vec::new(),
        }
    }

    pub(crate) fn severity(&self) -> Severity {
        self.kind.default_severity()
    }
}

/// `severity at start..end: message`, one `(related: ...)` suffix per note.
impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let span = |r: TextRange| format!("{}..{}", u32::from(r.start()), u32::from(r.end()));
        write!(f, "{} at {}: {}", self.severity(), span(self.range), self.message)?;
        self.related
            .iter()
            .try_for_each(|r| write!(f, " (related: {} at {})", r.message, span(r.range)))
    }
}
