use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;
use crate::parser::cst::SyntaxKind;
use crate::parser::cst::token_sets::{DIM_FIRST, ITEM_FIRST, LIST_RECOVERY, STMT_RECOVERY};

impl Parser<'_> {
    pub fn parse_root(&mut self) {
        self.start_node(SyntaxKind::Root);

        while !self.at_end() {
            match self.current() {
                SyntaxKind::KwFlow => self.parse_flow_def(),
                SyntaxKind::KwBuild => self.parse_build_def(),
                _ => self.error_until_next_item(),
            }
        }

        self.eat_trivia();
        self.finish_node();
    }

    fn error_until_next_item(&mut self) {
        self.error_recover(
            DiagnosticKind::ExpectedItem,
            "found stray input at the top level",
            ITEM_FIRST,
        );
    }

    /// `flow name (symbols) [args] { body }`
    ///
    /// Parameter lists are optional and may come in either order, at most one of each.
    fn parse_flow_def(&mut self) {
        self.assert_current(SyntaxKind::KwFlow);
        self.start_node(SyntaxKind::FlowDef);
        self.bump();

        self.expect(SyntaxKind::Id, "a flow name after `flow`");

        let mut seen_symbols = false;
        let mut seen_args = false;
        loop {
            match self.current() {
                SyntaxKind::ParenOpen => {
                    if seen_symbols {
                        self.error(DiagnosticKind::DuplicateParameterList);
                    }
                    seen_symbols = true;
                    self.parse_param_list(SyntaxKind::SymbolList, SyntaxKind::ParenClose);
                }
                SyntaxKind::BracketOpen => {
                    if seen_args {
                        self.error(DiagnosticKind::DuplicateParameterList);
                    }
                    seen_args = true;
                    self.parse_param_list(SyntaxKind::ArgList, SyntaxKind::BracketClose);
                }
                _ => break,
            }
        }

        if self.currently_is(SyntaxKind::BraceOpen) {
            self.parse_body();
        } else {
            self.error_msg(DiagnosticKind::ExpectedBody, "expected `{` to open the flow body");
        }

        self.finish_node();
    }

    fn parse_param_list(&mut self, node: SyntaxKind, close: SyntaxKind) {
        self.start_node(node);
        let open = self.current();
        self.push_delimiter(open);
        self.bump();

        while !self.at_end() && !self.currently_is(close) {
            if self.currently_is(SyntaxKind::Id) {
                self.bump();
            } else if self.currently_is_one_of(LIST_RECOVERY) {
                break;
            } else {
                self.error_and_bump_msg(
                    DiagnosticKind::ExpectedIdentifier,
                    "parameters are plain names",
                );
                continue;
            }
            if !self.eat_token(SyntaxKind::Comma) {
                break;
            }
        }

        self.close_delimiter(close);
        self.finish_node();
    }

    fn parse_body(&mut self) {
        self.start_node(SyntaxKind::Body);
        self.push_delimiter(SyntaxKind::BraceOpen);
        self.bump();

        while !self.at_end()
            && !self.currently_is(SyntaxKind::BraceClose)
            && !self.currently_is_one_of(ITEM_FIRST)
        {
            self.parse_stmt();
        }

        self.close_delimiter(SyntaxKind::BraceClose);
        self.finish_node();
    }

    /// `build flow_name build_name { x => [3, 4]; ... }`
    fn parse_build_def(&mut self) {
        self.assert_current(SyntaxKind::KwBuild);
        self.start_node(SyntaxKind::BuildDef);
        self.bump();

        self.expect(SyntaxKind::Id, "the target flow name after `build`");
        self.expect(SyntaxKind::Id, "a build name");

        if self.currently_is(SyntaxKind::BraceOpen) {
            self.parse_build_body();
        } else {
            self.error_msg(DiagnosticKind::ExpectedBody, "expected `{` to open the build body");
        }

        self.finish_node();
    }

    fn parse_build_body(&mut self) {
        self.start_node(SyntaxKind::BuildBody);
        self.push_delimiter(SyntaxKind::BraceOpen);
        self.bump();

        while !self.at_end()
            && !self.currently_is(SyntaxKind::BraceClose)
            && !self.currently_is_one_of(ITEM_FIRST)
        {
            if self.currently_is(SyntaxKind::Id) {
                self.parse_shape_spec();
            } else {
                self.error_recover(
                    DiagnosticKind::ExpectedShapeSpec,
                    "e.g. `x => [3, 4];`",
                    STMT_RECOVERY,
                );
                self.eat_token(SyntaxKind::Semicolon);
            }
        }

        self.close_delimiter(SyntaxKind::BraceClose);
        self.finish_node();
    }

    /// `name => dims;`
    fn parse_shape_spec(&mut self) {
        self.start_node(SyntaxKind::ShapeSpec);
        self.bump();
        self.expect(SyntaxKind::FatArrow, "`=>` after the parameter name");
        self.parse_dims();
        self.expect_semicolon();
        self.finish_node();
    }

    /// `[3, n]`, `(3, n)`, or a bare `3, n`.
    fn parse_dims(&mut self) {
        self.start_node(SyntaxKind::Dims);
        match self.current() {
            SyntaxKind::BracketOpen => self.parse_delimited_dims(SyntaxKind::BracketClose),
            SyntaxKind::ParenOpen => self.parse_delimited_dims(SyntaxKind::ParenClose),
            kind if DIM_FIRST.contains(kind) => self.parse_dim_list(SyntaxKind::Semicolon),
            _ => self.error_msg(DiagnosticKind::ExpectedShapeSpec, "e.g. `[3, 4]`"),
        }
        self.finish_node();
    }

    fn parse_delimited_dims(&mut self, close: SyntaxKind) {
        let open = self.current();
        self.push_delimiter(open);
        self.bump();
        self.parse_dim_list(close);
        self.close_delimiter(close);
    }

    fn parse_dim_list(&mut self, close: SyntaxKind) {
        while !self.at_end() && !self.currently_is(close) {
            match self.current() {
                SyntaxKind::Number => {
                    self.start_node(SyntaxKind::Literal);
                    self.bump();
                    self.finish_node();
                }
                SyntaxKind::Id => {
                    self.start_node(SyntaxKind::NameRef);
                    self.bump();
                    self.finish_node();
                }
                _ if self.currently_is_one_of(LIST_RECOVERY) => break,
                _ => {
                    self.error_and_bump_msg(
                        DiagnosticKind::InvalidDimension,
                        "axis sizes are integers or names",
                    );
                    continue;
                }
            }
            if !self.eat_token(SyntaxKind::Comma) {
                break;
            }
        }
    }
}
