/// Grammar rule identifiers.
///
/// Optional grammar elements (`ClassModifier`, `BaseClause`, `ElseClause`,
/// `ForInit`, ...) are always present in the tree as a list node with zero or
/// one child, so child indices of the enclosing rule never shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// `ClassDefinition*`
    Program,

    // Classes
    /// `[ClassModifier, PrimitiveMarker, BackendMarker, label, Identifier, BaseClause, "{", MemberList, "}"]`
    ClassDefinition,
    ClassModifier,
    PrimitiveMarker,
    BackendMarker,
    /// `[]` or `[":", Identifier]`
    BaseClause,
    MemberList,

    // Members
    /// `[Accessor, MemberModifier, StaticMarker, type, FieldAtomList, ";"]`
    FieldDefinition,
    /// `[Accessor, MemberModifier, StaticMarker, type, Identifier, "(", ParameterList, ")", Block | ";"]`
    MethodDefinition,
    /// `[Accessor, MemberModifier, StaticMarker, type, "operator", symbol, "(", ParameterList, ")", Block | ";"]`
    OperatorDefinition,
    Accessor,
    MemberModifier,
    StaticMarker,
    FieldAtomList,
    /// `[Identifier]` or `[Identifier, "=", expression]`
    FieldAtom,
    ParameterList,
    /// `[type, Identifier]`
    Parameter,

    // Statements
    /// `["{", StatementList, "}"]`
    Block,
    StatementList,
    /// `["return", expression?, ";"]`
    ReturnStatement,
    BreakStatement,
    ContinueStatement,
    /// `[type, FieldAtomList, ";"?]`
    DeclarationStatement,
    /// `["while", "(", condition, ")", statement]`
    WhileStatement,
    /// `["do", statement, "while", "(", condition, ")", ";"]`
    DoWhileStatement,
    /// `["if", "(", condition, ")", statement, ElseClause]`
    IfStatement,
    /// `[]` or `["else", statement]`
    ElseClause,
    /// `["for", "(", ForInit, ";", ForCondition, ";", ForStep, ")", statement]`
    ForStatement,
    ForInit,
    ForCondition,
    ForStep,
    /// `[expression, ";"]`
    ExpressionStatement,

    // Expressions
    /// `[target, ".", Identifier]`
    MemberAccess,
    /// `[callee, "(", ArgumentList, ")"]`
    MethodCall,
    /// argument expressions only
    ArgumentList,
    /// `["new", Identifier, "(", ArgumentList, ")"]`
    NewExpression,
    /// `[operator, operand]`
    UnaryExpression,
    /// `[left, operator, right]`
    BinaryExpression,
    /// `[target, operator, value]`
    AssignmentExpression,
    /// `["(", expression, ")"]`
    ParenthesizedExpression,

    // Terminals
    Identifier,
    IntegerLiteral,
    RealLiteral,
    StringLiteral,
    CharLiteral,
    BooleanLiteral,
    Keyword,
    Operator,
    Punctuation,
}

impl Rule {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Rule::Identifier
                | Rule::IntegerLiteral
                | Rule::RealLiteral
                | Rule::StringLiteral
                | Rule::CharLiteral
                | Rule::BooleanLiteral
                | Rule::Keyword
                | Rule::Operator
                | Rule::Punctuation
        )
    }

    pub fn is_statement(&self) -> bool {
        matches!(
            self,
            Rule::Block
                | Rule::ReturnStatement
                | Rule::BreakStatement
                | Rule::ContinueStatement
                | Rule::DeclarationStatement
                | Rule::WhileStatement
                | Rule::DoWhileStatement
                | Rule::IfStatement
                | Rule::ForStatement
                | Rule::ExpressionStatement
        )
    }
}
