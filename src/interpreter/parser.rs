/// Core parser state and token cursor.
///
/// Defines the [`Parser`](core::Parser) itself, the [`ParseResult`](core::ParseResult)
/// alias and the program entry point.
pub mod core;

/// Declaration parsing.
///
/// Handles the declaration part of a block: `CONST` and `VAR` sections and
/// nested procedure and function declarations. Every declaration is entered
/// into the open scope as soon as it is parsed.
pub mod declaration;

/// Expression parsing.
///
/// Implements the precedence levels from relational operators down to
/// factors, including the scope-aware choice between a function call and a
/// variable reference.
pub mod expression;

/// Statement parsing.
///
/// Implements compound, assignment, conditional, loop, I/O and procedure
/// call statements. A statement starting with an identifier is classified by
/// looking the identifier up in the open scope.
pub mod statement;

/// Utility functions for the parser.
///
/// Provides the operator tables and the shared list helpers.
pub mod utils;
