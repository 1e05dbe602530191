//! Diagnostics collected across parsing, checking and inference.

mod message;
mod printer;


use rowan::TextRange;

pub use message::{DiagnosticKind, Severity};
pub use printer::DiagnosticsPrinter;

pub(crate) use message::DiagnosticMessage;
use message::RelatedInfo;

#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    messages: Vec<DiagnosticMessage>,
}

/// Pending diagnostic; nothing is recorded until [`emit`](Self::emit).
#[must_use = "call .emit() to record the diagnostic"]
pub struct DiagnosticBuilder<'a> {
    sink: &'a mut Vec<DiagnosticMessage>,
    pending: DiagnosticMessage,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a diagnostic carrying the kind's fallback message.
    pub fn report(&mut self, kind: DiagnosticKind, range: TextRange) -> DiagnosticBuilder<'_> {
        DiagnosticBuilder {
            sink: &mut self.messages,
            pending: DiagnosticMessage::with_default_message(kind, range),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    fn count(&self, severity: Severity) -> usize {
        self.messages
            .iter()
            .filter(|m| m.severity() == severity)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.count(Severity::Error) > 0
    }

    pub fn has_warnings(&self) -> bool {
        self.count(Severity::Warning) > 0
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    /// Whether a diagnostic of `kind` already covers exactly `range`.
    pub fn contains(&self, kind: DiagnosticKind, range: TextRange) -> bool {
        self.messages.iter().any(|m| m.kind == kind && m.range == range)
    }

    /// Kinds in emission order.
    pub fn kinds(&self) -> impl Iterator<Item = DiagnosticKind> + '_ {
        self.messages.iter().map(|m| m.kind)
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.messages.extend(other.messages);
    }

    /// Messages worth showing: repeats dropped, then anything another
    /// message explains away.
    pub(crate) fn filtered(&self) -> Vec<DiagnosticMessage> {
        let mut unique: Vec<&DiagnosticMessage> = Vec::with_capacity(self.messages.len());
        for msg in &self.messages {
            if !unique.iter().any(|u| u.kind == msg.kind && u.range == msg.range) {
                unique.push(msg);
            }
        }

        unique
            .iter()
            .enumerate()
            .filter(|&(j, msg)| {
                !unique
                    .iter()
                    .enumerate()
                    .any(|(i, other)| i != j && shadows(other, msg))
            })
            .map(|(_, msg)| (*msg).clone())
            .collect()
    }

    pub fn printer<'a>(&self, source: &'a str) -> DiagnosticsPrinter<'a> {
        DiagnosticsPrinter::new(self.messages.clone(), source)
    }

    /// Printer over [`filtered`](Self::filtered) messages.
    pub fn filtered_printer<'a>(&self, source: &'a str) -> DiagnosticsPrinter<'a> {
        DiagnosticsPrinter::new(self.filtered(), source)
    }

    pub fn render(&self, source: &str) -> String {
        self.printer(source).render()
    }
}

/// Whether `outer` makes `inner` redundant.
///
/// A higher-priority kind hides what its span strictly encloses, or what
/// starts at the same offset. At a shared start a missing-token error also
/// hides the unclosed-delimiter error it caused, regardless of priority.
fn shadows(outer: &DiagnosticMessage, inner: &DiagnosticMessage) -> bool {
    let (a, b) = (outer.range, inner.range);
    if a.start() == b.start() {
        if outer.kind.is_structural_error() && inner.kind.is_root_cause_error() {
            return false;
        }
        return (outer.kind.is_root_cause_error() && inner.kind.is_structural_error())
            || outer.kind.suppresses(&inner.kind);
    }
    a.start() < b.start() && b.end() <= a.end() && outer.kind.suppresses(&inner.kind)
}

impl DiagnosticBuilder<'_> {
    /// Slots `detail` into the kind's message template.
    pub fn message(mut self, detail: impl Into<String>) -> Self {
        self.pending.message = self.pending.kind.message(Some(&detail.into()));
        self
    }

    pub fn related_to(mut self, msg: impl Into<String>, range: TextRange) -> Self {
        self.pending.related.push(RelatedInfo::new(range, msg));
        self
    }

    pub fn emit(self) {
        self.sink.push(self.pending);
    }
}
