/// Activation records.
///
/// An activation record holds the bindings of one program, procedure or
/// function invocation together with its nesting level and the index of its
/// static parent on the call stack.
pub mod activation;
/// The analyzer module checks a parsed program before it runs.
///
/// The analyzer walks the tree with a fresh scoped symbol table, rejects
/// duplicate declarations, undeclared names, wrong argument counts and
/// ill-typed expressions, and annotates call sites and assignment targets
/// for the evaluator.
///
/// # Responsibilities
/// - Enforces declaration uniqueness per scope.
/// - Type-checks expressions, assignments, conditions and calls.
/// - Annotates the tree with resolved symbols and declared types.
pub mod analyzer;
/// The call stack of live activation records.
///
/// Enforces the call-depth limit and resolves names through the
/// static-parent chain of the top record.
pub mod call_stack;
/// The evaluator module executes an analyzed program.
///
/// The evaluator traverses the annotated tree, evaluates expressions and
/// statements, manages the call stack and collects program output.
///
/// # Responsibilities
/// - Evaluates expressions with checked integer arithmetic.
/// - Executes control flow, calls and I/O statements.
/// - Reports runtime errors such as division by zero or stack overflow.
pub mod evaluator;
/// Line sources for `READ` and `READLN`.
pub mod io;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a stream of lexemes,
/// each a token paired with its line and column. Keywords and identifiers
/// are case-insensitive and both comment styles are skipped.
///
/// # Responsibilities
/// - Converts the input character stream into positioned tokens.
/// - Handles numeric, string and boolean literals, identifiers and
///   operators.
/// - Reports lexical errors for characters that start no token.
pub mod lexer;
/// The parser module builds the abstract syntax tree from lexemes.
///
/// The parser is a recursive-descent parser that keeps its own scoped
/// symbol table while it runs. Statements and factors starting with an
/// identifier are classified by what that identifier was declared as.
///
/// # Responsibilities
/// - Converts lexemes into [`Program`](crate::ast::Program) trees.
/// - Reports grammar errors and references to undeclared names.
pub mod parser;
/// Lexically nested scopes and the scoped symbol table.
pub mod scope;
/// Symbols stored in scopes.
///
/// A symbol records what a name denotes: a variable, constant, type,
/// procedure, function or I/O builtin.
pub mod symbol;
/// The value module defines the runtime values.
///
/// Declares the [`Value`](value::Value) enum with its integer, real, string,
/// boolean and unassigned variants, together with promotion, coercion to a
/// declared type, input parsing and output formatting.
pub mod value;
