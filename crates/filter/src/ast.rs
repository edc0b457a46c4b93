//! Defines the Abstract Syntax Tree (AST) for filter expressions.

/// A literal appearing in the expression source.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

/// The top-level representation of a parsed filter expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Literal(Literal),
    /// A bound name such as `value` or one of the character-class constants.
    Variable(String),
    /// A call to a registered function, e.g. `unDoubleQuote(value)`.
    FunctionCall { name: String, args: Vec<Expression> },
    /// `receiver.name(args)`, or a property read `receiver.name` when `args` is `None`.
    Member {
        receiver: Box<Expression>,
        name: String,
        args: Option<Vec<Expression>>,
    },
    /// `receiver[index]`.
    Index {
        receiver: Box<Expression>,
        index: Box<Expression>,
    },
    UnaryOp {
        op: UnaryOperator,
        expr: Box<Expression>,
    },
    BinaryOp {
        left: Box<Expression>,
        op: BinaryOperator,
        right: Box<Expression>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Not,
    Minus,
}

/// A binary operator used in an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    // Logical
    Or,
    And,
    // Equality
    Equals,
    NotEquals,
    StrictEquals,
    StrictNotEquals,
    // Relational
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    // Additive
    Plus,
    Minus,
    // Multiplicative
    Multiply,
    Divide,
    Modulo,
}
