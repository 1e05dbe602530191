use rowan::Language;

use super::cst::token_sets::{EXPR_FIRST, STMT_FIRST, STMT_RECOVERY};
use super::cst::{FlowLang, SyntaxKind::*, TokenSet};

#[test]
fn sets_hold_exactly_their_members() {
    let set = TokenSet::new(&[ParenOpen, Star]).union(TokenSet::new(&[Plus]));

    insta::assert_snapshot!(format!("{set:?}"), @"{ParenOpen, Plus, Star}");
    assert!(!set.contains(At));
    assert!(!TokenSet::EMPTY.contains(ParenOpen));
}

#[test]
fn node_kinds_never_match() {
    let set = TokenSet::new(&[Id, Garbage]);

    assert!(set.contains(Garbage));
    assert!(!set.contains(Root));
    assert!(!set.contains(BinaryExpr));
}

#[test]
fn statements_start_with_expressions_or_keywords() {
    assert!(STMT_FIRST.contains(Minus));
    assert!(STMT_FIRST.contains(KwLet));
    assert!(!EXPR_FIRST.contains(KwReturn));
    assert!(STMT_RECOVERY.contains(KwBuild));
}

#[test]
fn classification() {
    for kind in [Whitespace, Newline, LineComment, BlockComment] {
        assert!(kind.is_trivia(), "{kind:?}");
    }
    assert!(!Garbage.is_trivia());
    assert!(Error.is_error() && Garbage.is_error());
    assert!(!Number.is_error());
}

#[test]
fn binding_powers() {
    let left = |k: super::SyntaxKind| k.infix_binding_power().map(|(l, _)| l);

    assert!(left(Plus) < left(Star));
    assert!(left(Star) < left(At));
    assert!(left(At) < left(Caret));
    assert!(matches!(Caret.infix_binding_power(), Some((l, r)) if r < l));
    assert_eq!(left(Dot), None);
}

#[test]
fn raw_kinds_convert_back() {
    for kind in [ParenOpen, KwFlow, Garbage, Error, Root, Literal] {
        assert_eq!(FlowLang::kind_from_raw(FlowLang::kind_to_raw(kind)), kind);
    }
}
