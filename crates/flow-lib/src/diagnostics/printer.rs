//! Rendering through annotate-snippets, or as one plain line per diagnostic.

use std::fmt::Write;
use std::ops::Range;

use annotate_snippets::{AnnotationKind, Level, Renderer, Snippet};
use rowan::TextRange;

use super::message::{DiagnosticMessage, Severity};

pub struct DiagnosticsPrinter<'a> {
    messages: Vec<DiagnosticMessage>,
    source: &'a str,
    path: Option<&'a str>,
    colored: bool,
}

impl<'a> DiagnosticsPrinter<'a> {
    pub(crate) fn new(messages: Vec<DiagnosticMessage>, source: &'a str) -> Self {
        Self {
            messages,
            source,
            path: None,
            colored: false,
        }
    }

    pub fn path(mut self, path: &'a str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("writing to a String cannot fail");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let renderer = match self.colored {
            true => Renderer::styled(),
            false => Renderer::plain(),
        };
        for (i, msg) in self.messages.iter().enumerate() {
            if i > 0 {
                w.write_char('\n')?;
            }
            let primary = AnnotationKind::Primary
                .span(self.visible(msg.range))
                .label(&msg.message);
            let mut snippet = Snippet::source(self.source).line_start(1).annotation(primary);
            if let Some(path) = self.path {
                snippet = snippet.path(path);
            }
            for related in &msg.related {
                snippet = snippet.annotation(
                    AnnotationKind::Context
                        .span(self.visible(related.range))
                        .label(&related.message),
                );
            }
            let report = [level(msg.severity())
                .primary_title(&msg.message)
                .element(snippet)];
            write!(w, "{}", renderer.render(&report))?;
        }
        Ok(())
    }

    /// Empty ranges widen to one character so the caret has something to point at.
    fn visible(&self, range: TextRange) -> Range<usize> {
        let Range { start, end } = Range::<usize>::from(range);
        if start == end {
            start..(start + 1).min(self.source.len())
        } else {
            start..end
        }
    }

    /// `severity at start..end: message` per diagnostic, no source excerpt.
    pub fn render_plain(&self) -> String {
        self.messages
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn level(severity: Severity) -> Level<'static> {
    match severity {
        Severity::Error => Level::ERROR,
        Severity::Warning => Level::WARNING,
    }
}
