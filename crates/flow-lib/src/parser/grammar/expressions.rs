use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;
use crate::parser::cst::SyntaxKind;
use crate::parser::cst::token_sets::{EXPR_FIRST, LIST_RECOVERY};

impl Parser<'_> {
    /// `expr (, expr)*`; more than one element wraps a `TupleExpr`.
    pub(crate) fn parse_expr_list(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_expr();

        if !self.currently_is(SyntaxKind::Comma) {
            return;
        }

        self.start_node_at(checkpoint, SyntaxKind::TupleExpr);
        while self.eat_token(SyntaxKind::Comma) {
            if self.currently_is_one_of(EXPR_FIRST) {
                self.parse_expr();
            } else {
                self.error_msg(DiagnosticKind::ExpectedExpression, "after `,`");
                break;
            }
        }
        self.finish_node();
    }

    /// Comma-separated expressions up to (not including) `close`. Trailing comma allowed.
    pub(crate) fn parse_exprs_until(&mut self, close: SyntaxKind) {
        while !self.at_end() && !self.currently_is(close) {
            if !self.currently_is_one_of(EXPR_FIRST) {
                break;
            }
            self.parse_expr();
            if !self.eat_token(SyntaxKind::Comma) {
                break;
            }
        }
    }

    pub(crate) fn parse_expr(&mut self) {
        self.parse_expr_bp(0);
    }

    /// Pratt loop over infix operators. Binding powers live on `SyntaxKind`.
    fn parse_expr_bp(&mut self, min_bp: u8) {
        if !self.enter_recursion() {
            self.bail_out();
            return;
        }

        let checkpoint = self.checkpoint();
        self.parse_prefix();

        while let Some((left_bp, right_bp)) = self.current().infix_binding_power() {
            if left_bp < min_bp {
                break;
            }
            self.start_node_at(checkpoint, SyntaxKind::BinaryExpr);
            self.bump();
            if self.currently_is_one_of(EXPR_FIRST) {
                self.parse_expr_bp(right_bp);
            } else {
                self.error_msg(DiagnosticKind::ExpectedExpression, "after operator");
            }
            self.finish_node();
        }

        self.exit_recursion();
    }

    /// Unary minus binds looser than `.` and tighter than every infix operator.
    fn parse_prefix(&mut self) {
        if !self.currently_is(SyntaxKind::Minus) {
            self.parse_postfix();
            return;
        }

        if !self.enter_recursion() {
            self.bail_out();
            return;
        }
        self.start_node(SyntaxKind::NegExpr);
        self.bump();
        if self.currently_is_one_of(EXPR_FIRST) {
            self.parse_prefix();
        } else {
            self.error_msg(DiagnosticKind::ExpectedExpression, "after `-`");
        }
        self.finish_node();
        self.exit_recursion();
    }

    /// `primary (. member)*`
    fn parse_postfix(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_primary();

        while self.currently_is(SyntaxKind::Dot) {
            self.start_node_at(checkpoint, SyntaxKind::AttrExpr);
            self.bump();
            self.parse_member();
            self.finish_node();
        }
    }

    /// Right side of `.`. Anything primary-like parses; the checker decides validity.
    fn parse_member(&mut self) {
        match self.current() {
            SyntaxKind::Id => self.parse_name_or_call(),
            SyntaxKind::Number => self.parse_literal(),
            SyntaxKind::ParenOpen => self.parse_paren_expr(),
            _ => self.error_msg(DiagnosticKind::ExpectedAttribute, "e.g. `x.T` or `x.shape`"),
        }
    }

    fn parse_primary(&mut self) {
        match self.current() {
            SyntaxKind::Number => self.parse_literal(),
            SyntaxKind::Id => self.parse_name_or_call(),
            SyntaxKind::ParenOpen => self.parse_paren_expr(),
            _ if self.currently_is_one_of(LIST_RECOVERY) => {
                self.error(DiagnosticKind::ExpectedExpression);
            }
            _ => {
                self.error_and_bump_msg(DiagnosticKind::ExpectedExpression, "not a valid expression");
            }
        }
    }

    fn parse_literal(&mut self) {
        self.start_node(SyntaxKind::Literal);
        self.bump();
        self.finish_node();
    }

    /// LL(2): `Id (` is a call, a lone `Id` is a name reference.
    fn parse_name_or_call(&mut self) {
        if !self.next_is(SyntaxKind::ParenOpen) {
            self.start_node(SyntaxKind::NameRef);
            self.bump();
            self.finish_node();
            return;
        }

        self.start_node(SyntaxKind::CallExpr);
        self.bump();
        self.start_node(SyntaxKind::CallArgs);
        self.push_delimiter(SyntaxKind::ParenOpen);
        self.bump();
        self.parse_exprs_until(SyntaxKind::ParenClose);
        self.close_delimiter(SyntaxKind::ParenClose);
        self.finish_node();
        self.finish_node();
    }

    fn parse_paren_expr(&mut self) {
        self.start_node(SyntaxKind::ParenExpr);
        self.push_delimiter(SyntaxKind::ParenOpen);
        self.bump();
        if self.currently_is_one_of(EXPR_FIRST) {
            self.parse_expr_list();
        } else {
            self.error_msg(DiagnosticKind::ExpectedExpression, "inside `( )`");
        }
        self.close_delimiter(SyntaxKind::ParenClose);
        self.finish_node();
    }

    /// On recursion exhaustion the rest of the input goes into one `Error` node.
    fn bail_out(&mut self) {
        self.start_node(SyntaxKind::Error);
        while !self.should_stop() {
            self.bump();
        }
        self.finish_node();
    }
}
