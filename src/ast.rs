use crate::interpreter::{lexer::Position, symbol::Symbol};

/// The four primitive types of the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    /// 64-bit signed integers.
    Integer,
    /// 64-bit floating-point numbers.
    Real,
    /// Text.
    String,
    /// `TRUE` or `FALSE`.
    Boolean,
}

impl DataType {
    /// All primitive types, in the order they are seeded into the global
    /// scope.
    pub const ALL: [Self; 4] = [Self::Integer, Self::Real, Self::String, Self::Boolean];

    /// Returns the type's name as written in source code.
    ///
    /// # Example
    /// ```
    /// use pascaline::ast::DataType;
    ///
    /// assert_eq!(DataType::Boolean.name(), "BOOLEAN");
    /// ```
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Integer => "INTEGER",
            Self::Real => "REAL",
            Self::String => "STRING",
            Self::Boolean => "BOOLEAN",
        }
    }

    /// Returns `true` for `INTEGER` and `REAL`.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Real)
    }

    /// Returns `true` if a value of type `source` may be stored where `self`
    /// is expected. Identical types are compatible, and an `INTEGER` may be
    /// promoted to `REAL`.
    #[must_use]
    pub fn accepts(self, source: Self) -> bool {
        self == source || (self == Self::Real && source == Self::Integer)
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Represents a literal value in the language.
///
/// `LiteralValue` covers the constants that can appear directly in source
/// code. It is used for constant expressions and for the right-hand side of
/// `CONST` declarations.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// A 64-bit signed integer literal.
    Integer(i64),
    /// A 64-bit floating-point literal.
    Real(f64),
    /// A string literal.
    String(String),
    /// A boolean literal value: `TRUE` or `FALSE`.
    Boolean(bool),
}

impl LiteralValue {
    /// Returns the static type of the literal.
    #[must_use]
    pub const fn data_type(&self) -> DataType {
        match self {
            Self::Integer(_) => DataType::Integer,
            Self::Real(_) => DataType::Real,
            Self::String(_) => DataType::String,
            Self::Boolean(_) => DataType::Boolean,
        }
    }
}

/// Identifies one procedure or function declaration within a program.
///
/// The parser numbers routines in declaration order. The evaluator maps the
/// identifier stored in a resolved call symbol back to the declaring block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoutineId(pub usize);

/// The root of a parsed program.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// The name after `PROGRAM`, uppercased.
    pub name:     String,
    /// The program block.
    pub block:    Block,
    /// The position of the `PROGRAM` keyword.
    pub position: Position,
}

/// Declarations followed by a compound statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Declarations in source order.
    pub declarations: Vec<Declaration>,
    /// The statements of the `BEGIN ... END` part.
    pub body:         Vec<Statement>,
}

/// A formal parameter of a procedure or function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// The parameter name.
    pub name:      String,
    /// The declared type.
    pub data_type: DataType,
    /// Where the parameter name appears.
    pub position:  Position,
}

/// A procedure or function declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutineDecl {
    /// Identity used to find this declaration at run time.
    pub id:          RoutineId,
    /// The routine name.
    pub name:        String,
    /// Formal parameters in declaration order.
    pub params:      Vec<Parameter>,
    /// The declared result type, `None` for procedures.
    pub return_type: Option<DataType>,
    /// The routine body.
    pub block:       Block,
    /// Where the routine name appears.
    pub position:    Position,
}

/// A declaration inside a block.
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    /// `VAR name: type`. Lists like `a, b: INTEGER` produce one declaration
    /// per name.
    Variable {
        /// The variable name.
        name:      String,
        /// The declared type.
        data_type: DataType,
        /// Where the name appears.
        position:  Position,
    },
    /// `CONST name = literal`.
    Constant {
        /// The constant name.
        name:     String,
        /// The bound value.
        value:    LiteralValue,
        /// Where the name appears.
        position: Position,
    },
    /// `PROCEDURE name(params); block;`
    Procedure(RoutineDecl),
    /// `FUNCTION name(params): type; block;`
    Function(RoutineDecl),
}

impl Declaration {
    /// Returns the declared name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Variable { name, .. } | Self::Constant { name, .. } => name,
            Self::Procedure(decl) | Self::Function(decl) => &decl.name,
        }
    }
}

/// A procedure or function invocation.
///
/// `symbol` is `None` straight out of the parser and is filled in by the
/// semantic analyzer.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    /// The callee name.
    pub name:      String,
    /// Actual arguments in source order.
    pub arguments: Vec<Expr>,
    /// Where the callee name appears.
    pub position:  Position,
    /// The resolved callee.
    pub symbol:    Option<Symbol>,
}

impl Call {
    /// Creates an unresolved call.
    #[must_use]
    pub const fn new(name: String, arguments: Vec<Expr>, position: Position) -> Self {
        Self { name,
               arguments,
               position,
               symbol: None }
    }
}

/// A variable read by `READ` or `READLN`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputTarget {
    /// The variable name.
    pub name:      String,
    /// Where the name appears.
    pub position:  Position,
    /// The declared type, filled in by the semantic analyzer.
    pub data_type: Option<DataType>,
}

/// An abstract syntax tree (AST) node representing a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `BEGIN statement; ... END`
    Compound(Vec<Self>),
    /// `name := value`
    Assign {
        /// The assigned name: a variable, or the enclosing function's name.
        target:      String,
        /// The assigned expression.
        value:       Expr,
        /// The position of the target.
        position:    Position,
        /// The declared type of the target, filled in by the semantic
        /// analyzer.
        target_type: Option<DataType>,
    },
    /// `IF condition THEN statement [ELSE statement]`
    If {
        /// The condition.
        condition:   Expr,
        /// Executed when the condition holds.
        then_branch: Box<Self>,
        /// Executed otherwise.
        else_branch: Option<Box<Self>>,
        /// The position of `IF`.
        position:    Position,
    },
    /// `WHILE condition DO statement`
    While {
        /// The loop condition.
        condition: Expr,
        /// The loop body.
        body:      Box<Self>,
        /// The position of `WHILE`.
        position:  Position,
    },
    /// A procedure call used as a statement.
    ProcedureCall(Call),
    /// `READ(...)` or `READLN(...)`.
    Input {
        /// `true` for `READLN`.
        newline:  bool,
        /// Variables receiving one input line each.
        targets:  Vec<InputTarget>,
        /// The position of the builtin name.
        position: Position,
    },
    /// `WRITE(...)` or `WRITELN(...)`.
    Output {
        /// `true` for `WRITELN`.
        newline:   bool,
        /// Values printed left to right.
        arguments: Vec<Expr>,
        /// The position of the builtin name.
        position:  Position,
    },
    /// The empty statement.
    NoOp,
}

/// An abstract syntax tree (AST) node representing an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value.
    Constant {
        /// The constant value.
        value:    LiteralValue,
        /// Position in the source code.
        position: Position,
    },
    /// Reference to a variable, parameter or constant by name.
    Identifier {
        /// Name of the variable.
        name:     String,
        /// Position in the source code.
        position: Position,
    },
    /// A unary operation.
    UnaryOp {
        /// The unary operator to apply.
        op:       UnaryOperator,
        /// The operand expression.
        expr:     Box<Self>,
        /// Position of the operator.
        position: Position,
    },
    /// A binary operation.
    BinaryOp {
        /// Left operand.
        left:     Box<Self>,
        /// The operator.
        op:       BinaryOperator,
        /// Right operand.
        right:    Box<Self>,
        /// Position of the operator.
        position: Position,
    },
    /// Function call expression, with or without parentheses.
    FunctionCall(Call),
}

impl Expr {
    /// Returns the position the expression is reported at.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::Constant { position, .. }
            | Self::Identifier { position, .. }
            | Self::UnaryOp { position, .. }
            | Self::BinaryOp { position, .. } => *position,
            Self::FunctionCall(call) => call.position,
        }
    }
}

/// Unary operators supported by the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `NOT`
    Not,
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Not => "NOT",
        };
        write!(f, "{s}")
    }
}

/// Binary operators supported by the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`, always producing a real.
    RealDiv,
    /// `DIV`, truncating toward zero.
    IntDiv,
    /// `MOD`
    Mod,
    /// `=`
    Equal,
    /// `<>`
    NotEqual,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
    /// `AND`
    And,
    /// `OR`
    Or,
}

impl BinaryOperator {
    /// Returns `true` for the six comparison operators.
    #[must_use]
    pub const fn is_relational(self) -> bool {
        matches!(self,
                 Self::Equal
                 | Self::NotEqual
                 | Self::Less
                 | Self::LessEqual
                 | Self::Greater
                 | Self::GreaterEqual)
    }
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::RealDiv => "/",
            Self::IntDiv => "DIV",
            Self::Mod => "MOD",
            Self::Equal => "=",
            Self::NotEqual => "<>",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::And => "AND",
            Self::Or => "OR",
        };
        write!(f, "{s}")
    }
}
