//! Closed set of syntax node kinds.
//!
//! The passes dispatch on [`SyntaxKind`] with exhaustive matches where it
//! matters, so adding a kind surfaces every place that needs to handle it.
//! Grammar nodes the passes never inspect are lowered to [`SyntaxKind::Unknown`]
//! but keep their children, so traversal still reaches everything underneath.

/// Kind tag of a syntax tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    SourceFile,

    // Function-like declarations (each owns a hoisting scope)
    FunctionDecl,
    FunctionExpr,
    ArrowFunction,
    MethodDecl,
    /// Bodyless function declaration (overload or ambient)
    FunctionSignature,
    MethodSignature,

    ClassDecl,
    ClassExpr,
    ClassBody,
    PublicFieldDef,
    Decorator,
    AccessibilityModifier,
    FormalParameters,
    Parameter,

    EnumDecl,
    EnumBody,
    EnumMember,

    InterfaceDecl,
    InterfaceBody,
    PropertySignature,
    TypeAliasDecl,
    TypeAnnotation,

    ImportDecl,
    ImportClause,
    NamedImports,
    ImportSpecifier,
    NamespaceImport,
    ExportStatement,

    // Statements
    Block,
    IfStatement,
    ElseClause,
    ForStatement,
    /// Covers both `for..in` and `for..of`
    ForInStatement,
    WhileStatement,
    DoStatement,
    ExpressionStatement,
    ReturnStatement,
    BreakStatement,
    ContinueStatement,
    ThrowStatement,
    DebuggerStatement,
    EmptyStatement,

    // Declarations and bindings
    VariableDeclarationList,
    VariableDeclaration,
    ObjectPattern,
    ArrayPattern,
    PairPattern,
    AssignmentPattern,
    RestPattern,

    // Expressions
    Identifier,
    PropertyIdentifier,
    NumericLiteral,
    StringLiteral,
    PropertyAccess,
    ElementAccess,
    AssignmentExpr,
    CompoundAssignmentExpr,
    UpdateExpr,

    // Declaration keywords (token nodes)
    VarKeyword,
    LetKeyword,
    ConstKeyword,

    Unknown,
}

impl SyntaxKind {
    /// Nodes that introduce a hoisting (function) scope for `var` declarations.
    #[must_use]
    pub fn is_function_like(self) -> bool {
        matches!(
            self,
            SyntaxKind::FunctionDecl
                | SyntaxKind::FunctionExpr
                | SyntaxKind::ArrowFunction
                | SyntaxKind::MethodDecl
        )
    }

    /// Nodes that bound a block scope for `let`/`const` declarations.
    ///
    /// Loop headers count: a `for (let i = ...)` binding lives in the loop's
    /// scope, not the surrounding block.
    #[must_use]
    pub fn is_block_scope(self) -> bool {
        matches!(
            self,
            SyntaxKind::ForStatement
                | SyntaxKind::ForInStatement
                | SyntaxKind::Block
                | SyntaxKind::SourceFile
        )
    }

    /// Statement kinds that must end with a semicolon.
    ///
    /// Variable declaration lists are included, but only when they stand as a
    /// statement (the caller excludes loop-header lists).
    #[must_use]
    pub fn wants_semicolon(self) -> bool {
        matches!(
            self,
            SyntaxKind::ExpressionStatement
                | SyntaxKind::ReturnStatement
                | SyntaxKind::BreakStatement
                | SyntaxKind::ContinueStatement
                | SyntaxKind::ThrowStatement
                | SyntaxKind::DebuggerStatement
                | SyntaxKind::DoStatement
                | SyntaxKind::ImportDecl
                | SyntaxKind::TypeAliasDecl
                | SyntaxKind::PublicFieldDef
                | SyntaxKind::VariableDeclarationList
        )
    }

    /// Loop statements whose body must be a braced block.
    #[must_use]
    pub fn is_iteration(self) -> bool {
        matches!(
            self,
            SyntaxKind::ForStatement
                | SyntaxKind::ForInStatement
                | SyntaxKind::WhileStatement
                | SyntaxKind::DoStatement
        )
    }

    /// Write-classified expression kinds (assignment targets and mutators).
    #[must_use]
    pub fn is_mutation(self) -> bool {
        matches!(
            self,
            SyntaxKind::AssignmentExpr | SyntaxKind::CompoundAssignmentExpr | SyntaxKind::UpdateExpr
        )
    }
}
