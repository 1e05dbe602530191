use std::fmt::Write;

use rowan::{NodeOrToken, TextRange, WalkEvent};

use super::cst::SyntaxNode;

/// Indented dump of a concrete syntax tree, one node or token per line.
pub struct CstPrinter<'n> {
    root: &'n SyntaxNode,
    trivia: bool,
    spans: bool,
}

impl<'n> CstPrinter<'n> {
    pub fn new(root: &'n SyntaxNode) -> Self {
        Self {
            root,
            trivia: false,
            spans: false,
        }
    }

    pub fn with_trivia(mut self, trivia: bool) -> Self {
        self.trivia = trivia;
        self
    }

    pub fn with_spans(mut self, spans: bool) -> Self {
        self.spans = spans;
        self
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("writing to a String cannot fail");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let mut depth = 0usize;
        for event in self.root.preorder_with_tokens() {
            let element = match event {
                WalkEvent::Enter(element) => element,
                WalkEvent::Leave(NodeOrToken::Node(_)) => {
                    depth -= 1;
                    continue;
                }
                WalkEvent::Leave(NodeOrToken::Token(_)) => continue,
            };
            let indent = "  ".repeat(depth);
            match element {
                NodeOrToken::Node(node) => {
                    writeln!(w, "{indent}{:?}{}", node.kind(), self.span(node.text_range()))?;
                    depth += 1;
                }
                NodeOrToken::Token(token) if self.trivia || !token.kind().is_trivia() => {
                    let span = self.span(token.text_range());
                    writeln!(w, "{indent}{:?}{span} {:?}", token.kind(), token.text())?;
                }
                NodeOrToken::Token(_) => {}
            }
        }
        Ok(())
    }

    fn span(&self, range: TextRange) -> String {
        match self.spans {
            true => format!(" [{}..{}]", u32::from(range.start()), u32::from(range.end())),
            false => String::new(),
        }
    }
}
