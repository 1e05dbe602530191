use indoc::indoc;

use super::{cst, cst_with_trivia};

#[test]
fn flow_with_both_parameter_lists() {
    let input = indoc! {r#"
    flow f(x)[y] { z = x + y; return z; }
    "#};

    insta::assert_snapshot!(cst(input), @r#"
    Root
      FlowDef
        KwFlow "flow"
        Id "f"
        SymbolList
          ParenOpen "("
          Id "x"
          ParenClose ")"
        ArgList
          BracketOpen "["
          Id "y"
          BracketClose "]"
        Body
          BraceOpen "{"
          AssignStmt
            NameRef
              Id "z"
            Equals "="
            BinaryExpr
              NameRef
                Id "x"
              Plus "+"
              NameRef
                Id "y"
            Semicolon ";"
          ReturnStmt
            KwReturn "return"
            NameRef
              Id "z"
            Semicolon ";"
          BraceClose "}"
    "#);
}

#[test]
fn parameter_lists_in_either_order() {
    let input = indoc! {r#"
    flow f[n, m](a) { }
    "#};

    insta::assert_snapshot!(cst(input), @r#"
    Root
      FlowDef
        KwFlow "flow"
        Id "f"
        ArgList
          BracketOpen "["
          Id "n"
          Comma ","
          Id "m"
          BracketClose "]"
        SymbolList
          ParenOpen "("
          Id "a"
          ParenClose ")"
        Body
          BraceOpen "{"
          BraceClose "}"
    "#);
}

#[test]
fn operator_precedence() {
    let input = indoc! {r#"
    flow f { a = b + c * d @ e ^ g ^ h; }
    "#};

    insta::assert_snapshot!(cst(input), @r#"
    Root
      FlowDef
        KwFlow "flow"
        Id "f"
        Body
          BraceOpen "{"
          AssignStmt
            NameRef
              Id "a"
            Equals "="
            BinaryExpr
              NameRef
                Id "b"
              Plus "+"
              BinaryExpr
                NameRef
                  Id "c"
                Star "*"
                BinaryExpr
                  NameRef
                    Id "d"
                  At "@"
                  BinaryExpr
                    NameRef
                      Id "e"
                    Caret "^"
                    BinaryExpr
                      NameRef
                        Id "g"
                      Caret "^"
                      NameRef
                        Id "h"
            Semicolon ";"
          BraceClose "}"
    "#);
}

#[test]
fn subtraction_is_left_associative() {
    let input = indoc! {r#"
    flow f { a = b - c - d; }
    "#};

    insta::assert_snapshot!(cst(input), @r#"
    Root
      FlowDef
        KwFlow "flow"
        Id "f"
        Body
          BraceOpen "{"
          AssignStmt
            NameRef
              Id "a"
            Equals "="
            BinaryExpr
              BinaryExpr
                NameRef
                  Id "b"
                Minus "-"
                NameRef
                  Id "c"
              Minus "-"
              NameRef
                Id "d"
            Semicolon ";"
          BraceClose "}"
    "#);
}

#[test]
fn negation_binds_looser_than_attribute() {
    let input = indoc! {r#"
    flow f { a = -x.T; }
    "#};

    insta::assert_snapshot!(cst(input), @r#"
    Root
      FlowDef
        KwFlow "flow"
        Id "f"
        Body
          BraceOpen "{"
          AssignStmt
            NameRef
              Id "a"
            Equals "="
            NegExpr
              Minus "-"
              AttrExpr
                NameRef
                  Id "x"
                Dot "."
                NameRef
                  Id "T"
            Semicolon ";"
          BraceClose "}"
    "#);
}

#[test]
fn let_with_init_and_attribute_call() {
    let input = indoc! {r#"
    flow g(a) { let f h [1, 2]; b = h(a).T(0, -1); }
    "#};

    insta::assert_snapshot!(cst(input), @r#"
    Root
      FlowDef
        KwFlow "flow"
        Id "g"
        SymbolList
          ParenOpen "("
          Id "a"
          ParenClose ")"
        Body
          BraceOpen "{"
          LetStmt
            KwLet "let"
            Id "f"
            Id "h"
            LetInit
              BracketOpen "["
              Literal
                Number "1"
              Comma ","
              Literal
                Number "2"
              BracketClose "]"
            Semicolon ";"
          AssignStmt
            NameRef
              Id "b"
            Equals "="
            AttrExpr
              CallExpr
                Id "h"
                CallArgs
                  ParenOpen "("
                  NameRef
                    Id "a"
                  ParenClose ")"
              Dot "."
              CallExpr
                Id "T"
                CallArgs
                  ParenOpen "("
                  Literal
                    Number "0"
                  Comma ","
                  NegExpr
                    Minus "-"
                    Literal
                      Number "1"
                  ParenClose ")"
            Semicolon ";"
          BraceClose "}"
    "#);
}

#[test]
fn let_with_several_handles() {
    let input = indoc! {r#"
    flow g { let f a, b; }
    "#};

    insta::assert_snapshot!(cst(input), @r#"
    Root
      FlowDef
        KwFlow "flow"
        Id "g"
        Body
          BraceOpen "{"
          LetStmt
            KwLet "let"
            Id "f"
            Id "a"
            Comma ","
            Id "b"
            Semicolon ";"
          BraceClose "}"
    "#);
}

#[test]
fn tuples() {
    let input = indoc! {r#"
    flow f { a, b = c, d; return (a, b); }
    "#};

    insta::assert_snapshot!(cst(input), @r#"
    Root
      FlowDef
        KwFlow "flow"
        Id "f"
        Body
          BraceOpen "{"
          AssignStmt
            TupleExpr
              NameRef
                Id "a"
              Comma ","
              NameRef
                Id "b"
            Equals "="
            TupleExpr
              NameRef
                Id "c"
              Comma ","
              NameRef
                Id "d"
            Semicolon ";"
          ReturnStmt
            KwReturn "return"
            ParenExpr
              ParenOpen "("
              TupleExpr
                NameRef
                  Id "a"
                Comma ","
                NameRef
                  Id "b"
              ParenClose ")"
            Semicolon ";"
          BraceClose "}"
    "#);
}

#[test]
fn build_dims_in_every_form() {
    let input = indoc! {r#"
    build f main { x => [3, N]; y => (4); z => 2, 3; }
    "#};

    insta::assert_snapshot!(cst(input), @r#"
    Root
      BuildDef
        KwBuild "build"
        Id "f"
        Id "main"
        BuildBody
          BraceOpen "{"
          ShapeSpec
            Id "x"
            FatArrow "=>"
            Dims
              BracketOpen "["
              Literal
                Number "3"
              Comma ","
              NameRef
                Id "N"
              BracketClose "]"
            Semicolon ";"
          ShapeSpec
            Id "y"
            FatArrow "=>"
            Dims
              ParenOpen "("
              Literal
                Number "4"
              ParenClose ")"
            Semicolon ";"
          ShapeSpec
            Id "z"
            FatArrow "=>"
            Dims
              Literal
                Number "2"
              Comma ","
              Literal
                Number "3"
            Semicolon ";"
          BraceClose "}"
    "#);
}

#[test]
fn comments_are_trivia() {
    let input = "flow f {\n  // hi\n}";

    insta::assert_snapshot!(cst_with_trivia(input), @r#"
    Root
      FlowDef
        KwFlow "flow"
        Whitespace " "
        Id "f"
        Whitespace " "
        Body
          BraceOpen "{"
          Newline "\n"
          Whitespace "  "
          LineComment "// hi"
          Newline "\n"
          BraceClose "}"
    "#);
}

#[test]
fn block_comments_between_tokens() {
    let input = indoc! {r#"
    flow /* name */ f { return /* value */ 1; }
    "#};

    insta::assert_snapshot!(cst(input), @r#"
    Root
      FlowDef
        KwFlow "flow"
        Id "f"
        Body
          BraceOpen "{"
          ReturnStmt
            KwReturn "return"
            Literal
              Number "1"
            Semicolon ";"
          BraceClose "}"
    "#);
}
