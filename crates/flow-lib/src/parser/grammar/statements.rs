use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;
use crate::parser::cst::SyntaxKind;
use crate::parser::cst::token_sets::{EXPR_FIRST, STMT_FIRST, STMT_RECOVERY};

impl Parser<'_> {
    pub(crate) fn parse_stmt(&mut self) {
        match self.current() {
            SyntaxKind::KwLet => self.parse_let(),
            SyntaxKind::KwReturn => self.parse_return(),
            SyntaxKind::Semicolon => {
                self.error_and_bump_msg(DiagnosticKind::UnexpectedToken, "stray `;`");
            }
            kind if STMT_FIRST.contains(kind) => self.parse_assign(),
            _ => {
                self.error_recover(
                    DiagnosticKind::ExpectedStatement,
                    "statements are `let`, `return`, or assignments",
                    STMT_RECOVERY,
                );
                self.eat_token(SyntaxKind::Semicolon);
            }
        }
    }

    /// `let Flow a, b [init];`
    fn parse_let(&mut self) {
        self.start_node(SyntaxKind::LetStmt);
        self.bump();

        self.expect(SyntaxKind::Id, "a flow name after `let`");
        self.expect(SyntaxKind::Id, "a name for the sub-flow");
        while self.eat_token(SyntaxKind::Comma) {
            self.expect(SyntaxKind::Id, "a name for the sub-flow");
        }

        if self.currently_is(SyntaxKind::BracketOpen) {
            self.start_node(SyntaxKind::LetInit);
            self.push_delimiter(SyntaxKind::BracketOpen);
            self.bump();
            self.parse_exprs_until(SyntaxKind::BracketClose);
            self.close_delimiter(SyntaxKind::BracketClose);
            self.finish_node();
        }

        self.expect_semicolon();
        self.finish_node();
    }

    /// `return expr;`
    fn parse_return(&mut self) {
        self.start_node(SyntaxKind::ReturnStmt);
        self.bump();

        if self.currently_is_one_of(EXPR_FIRST) {
            self.parse_expr_list();
        } else {
            self.error_msg(DiagnosticKind::ExpectedExpression, "after `return`");
        }

        self.expect_semicolon();
        self.finish_node();
    }

    /// `target = expr;`
    ///
    /// The target is parsed as a full expression; the checker rejects non-variable targets.
    fn parse_assign(&mut self) {
        self.start_node(SyntaxKind::AssignStmt);
        self.parse_expr_list();

        if self.eat_token(SyntaxKind::Equals) {
            if self.currently_is_one_of(EXPR_FIRST) {
                self.parse_expr_list();
            } else {
                self.error_msg(DiagnosticKind::ExpectedExpression, "after `=`");
            }
        } else {
            self.error(DiagnosticKind::ExpectedAssignment);
        }

        self.expect_semicolon();
        self.finish_node();
    }

    pub(crate) fn expect_semicolon(&mut self) {
        if self.eat_token(SyntaxKind::Semicolon) {
            return;
        }
        self.error_recover(
            DiagnosticKind::ExpectedSemicolon,
            "statements end with `;`",
            STMT_RECOVERY,
        );
        self.eat_token(SyntaxKind::Semicolon);
    }
}
