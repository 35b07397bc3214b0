/// Binary operator evaluation logic.
///
/// Handles arithmetic, integer division and remainder, comparisons and the
/// logical operators, including integer to real promotion.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements unary plus, arithmetic negation and logical `NOT`.
pub mod unary;

/// Core evaluation logic and context management.
///
/// Contains the runtime context, the program entry point and expression
/// evaluation.
pub mod core;

/// Statement execution.
///
/// Runs blocks, assignments, control flow and the I/O builtins.
pub mod statement;

/// Procedure and function calls.
///
/// Evaluates arguments, builds the callee's activation record, runs the
/// callee and reads a function's result back.
pub mod call;
