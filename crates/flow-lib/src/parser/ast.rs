//! Typed AST wrappers over CST nodes.
//!
//! Each struct wraps a `SyntaxNode` and provides typed accessors.
//! Cast is infallible for correct `SyntaxKind` - validation happens elsewhere.

use super::cst::{SyntaxKind, SyntaxNode, SyntaxToken};

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl $name {
            pub fn cast(node: SyntaxNode) -> Option<Self> {
                (node.kind() == SyntaxKind::$kind).then(|| Self(node))
            }

            pub fn as_cst(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

ast_node!(Root, Root);
ast_node!(FlowDef, FlowDef);
ast_node!(SymbolList, SymbolList);
ast_node!(ArgList, ArgList);
ast_node!(Body, Body);
ast_node!(LetStmt, LetStmt);
ast_node!(LetInit, LetInit);
ast_node!(AssignStmt, AssignStmt);
ast_node!(ReturnStmt, ReturnStmt);
ast_node!(BuildDef, BuildDef);
ast_node!(ShapeSpec, ShapeSpec);
ast_node!(Dims, Dims);
ast_node!(BinaryExpr, BinaryExpr);
ast_node!(NegExpr, NegExpr);
ast_node!(AttrExpr, AttrExpr);
ast_node!(CallExpr, CallExpr);
ast_node!(ParenExpr, ParenExpr);
ast_node!(TupleExpr, TupleExpr);
ast_node!(NameRef, NameRef);
ast_node!(Literal, Literal);

/// Flow body statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Stmt {
    Let(LetStmt),
    Assign(AssignStmt),
    Return(ReturnStmt),
}

impl Stmt {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::LetStmt => LetStmt::cast(node).map(Stmt::Let),
            SyntaxKind::AssignStmt => AssignStmt::cast(node).map(Stmt::Assign),
            SyntaxKind::ReturnStmt => ReturnStmt::cast(node).map(Stmt::Return),
            _ => None,
        }
    }

    pub fn as_cst(&self) -> &SyntaxNode {
        match self {
            Stmt::Let(n) => n.as_cst(),
            Stmt::Assign(n) => n.as_cst(),
            Stmt::Return(n) => n.as_cst(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    Binary(BinaryExpr),
    Neg(NegExpr),
    Attr(AttrExpr),
    Call(CallExpr),
    Paren(ParenExpr),
    Tuple(TupleExpr),
    Name(NameRef),
    Literal(Literal),
}

impl Expr {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::BinaryExpr => BinaryExpr::cast(node).map(Expr::Binary),
            SyntaxKind::NegExpr => NegExpr::cast(node).map(Expr::Neg),
            SyntaxKind::AttrExpr => AttrExpr::cast(node).map(Expr::Attr),
            SyntaxKind::CallExpr => CallExpr::cast(node).map(Expr::Call),
            SyntaxKind::ParenExpr => ParenExpr::cast(node).map(Expr::Paren),
            SyntaxKind::TupleExpr => TupleExpr::cast(node).map(Expr::Tuple),
            SyntaxKind::NameRef => NameRef::cast(node).map(Expr::Name),
            SyntaxKind::Literal => Literal::cast(node).map(Expr::Literal),
            _ => None,
        }
    }

    pub fn as_cst(&self) -> &SyntaxNode {
        match self {
            Expr::Binary(n) => n.as_cst(),
            Expr::Neg(n) => n.as_cst(),
            Expr::Attr(n) => n.as_cst(),
            Expr::Call(n) => n.as_cst(),
            Expr::Paren(n) => n.as_cst(),
            Expr::Tuple(n) => n.as_cst(),
            Expr::Name(n) => n.as_cst(),
            Expr::Literal(n) => n.as_cst(),
        }
    }
}

fn tokens_of(node: &SyntaxNode, kind: SyntaxKind) -> impl Iterator<Item = SyntaxToken> + '_ {
    node.children_with_tokens()
        .filter_map(|it| it.into_token())
        .filter(move |t| t.kind() == kind)
}

fn exprs_of(node: &SyntaxNode) -> impl Iterator<Item = Expr> + '_ {
    node.children().filter_map(Expr::cast)
}

impl Root {
    pub fn flows(&self) -> impl Iterator<Item = FlowDef> + '_ {
        self.0.children().filter_map(FlowDef::cast)
    }

    pub fn builds(&self) -> impl Iterator<Item = BuildDef> + '_ {
        self.0.children().filter_map(BuildDef::cast)
    }
}

impl FlowDef {
    pub fn name(&self) -> Option<SyntaxToken> {
        tokens_of(&self.0, SyntaxKind::Id).next()
    }

    /// The `( .. )` rank-parameter list. Only the first one counts.
    pub fn symbols(&self) -> Option<SymbolList> {
        self.0.children().find_map(SymbolList::cast)
    }

    /// The `[ .. ]` scalar-parameter list. Only the first one counts.
    pub fn args(&self) -> Option<ArgList> {
        self.0.children().find_map(ArgList::cast)
    }

    pub fn body(&self) -> Option<Body> {
        self.0.children().find_map(Body::cast)
    }
}

impl SymbolList {
    pub fn names(&self) -> impl Iterator<Item = SyntaxToken> + '_ {
        tokens_of(&self.0, SyntaxKind::Id)
    }
}

impl ArgList {
    pub fn names(&self) -> impl Iterator<Item = SyntaxToken> + '_ {
        tokens_of(&self.0, SyntaxKind::Id)
    }
}

impl Body {
    pub fn stmts(&self) -> impl Iterator<Item = Stmt> + '_ {
        self.0.children().filter_map(Stmt::cast)
    }
}

impl LetStmt {
    pub fn flow_name(&self) -> Option<SyntaxToken> {
        tokens_of(&self.0, SyntaxKind::Id).next()
    }

    /// Local handles introduced by this `let`, in order.
    pub fn handles(&self) -> impl Iterator<Item = SyntaxToken> + '_ {
        tokens_of(&self.0, SyntaxKind::Id).skip(1)
    }

    pub fn init(&self) -> Option<LetInit> {
        self.0.children().find_map(LetInit::cast)
    }
}

impl LetInit {
    pub fn exprs(&self) -> impl Iterator<Item = Expr> + '_ {
        exprs_of(&self.0)
    }
}

impl AssignStmt {
    pub fn target(&self) -> Option<Expr> {
        exprs_of(&self.0).next()
    }

    pub fn value(&self) -> Option<Expr> {
        exprs_of(&self.0).nth(1)
    }
}

impl ReturnStmt {
    pub fn value(&self) -> Option<Expr> {
        exprs_of(&self.0).next()
    }
}

impl BuildDef {
    /// Target flow, the first name after `build`.
    pub fn flow_name(&self) -> Option<SyntaxToken> {
        tokens_of(&self.0, SyntaxKind::Id).next()
    }

    pub fn name(&self) -> Option<SyntaxToken> {
        tokens_of(&self.0, SyntaxKind::Id).nth(1)
    }

    pub fn specs(&self) -> impl Iterator<Item = ShapeSpec> + '_ {
        self.0
            .children()
            .filter(|n| n.kind() == SyntaxKind::BuildBody)
            .flat_map(|body| body.children().filter_map(ShapeSpec::cast))
    }
}

impl ShapeSpec {
    pub fn name(&self) -> Option<SyntaxToken> {
        tokens_of(&self.0, SyntaxKind::Id).next()
    }

    pub fn dims(&self) -> Option<Dims> {
        self.0.children().find_map(Dims::cast)
    }
}

impl Dims {
    /// Axis entries: `Literal` or `NameRef`.
    pub fn items(&self) -> impl Iterator<Item = Expr> + '_ {
        exprs_of(&self.0)
    }
}

impl BinaryExpr {
    pub fn lhs(&self) -> Option<Expr> {
        exprs_of(&self.0).next()
    }

    pub fn rhs(&self) -> Option<Expr> {
        exprs_of(&self.0).nth(1)
    }

    pub fn op(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|t| t.kind().infix_binding_power().is_some())
    }
}

impl NegExpr {
    pub fn operand(&self) -> Option<Expr> {
        exprs_of(&self.0).next()
    }
}

impl AttrExpr {
    pub fn base(&self) -> Option<Expr> {
        exprs_of(&self.0).next()
    }

    pub fn member(&self) -> Option<Expr> {
        exprs_of(&self.0).nth(1)
    }
}

impl CallExpr {
    pub fn name(&self) -> Option<SyntaxToken> {
        tokens_of(&self.0, SyntaxKind::Id).next()
    }

    pub fn args(&self) -> impl Iterator<Item = Expr> + '_ {
        self.0
            .children()
            .filter(|n| n.kind() == SyntaxKind::CallArgs)
            .flat_map(|args| args.children().filter_map(Expr::cast))
    }
}

impl ParenExpr {
    pub fn inner(&self) -> Option<Expr> {
        exprs_of(&self.0).next()
    }
}

impl TupleExpr {
    pub fn elements(&self) -> impl Iterator<Item = Expr> + '_ {
        exprs_of(&self.0)
    }
}

impl NameRef {
    pub fn token(&self) -> Option<SyntaxToken> {
        tokens_of(&self.0, SyntaxKind::Id).next()
    }
}

impl Literal {
    pub fn token(&self) -> Option<SyntaxToken> {
        tokens_of(&self.0, SyntaxKind::Number).next()
    }
}
