/// Analyzer state and entry point.
///
/// Defines the [`SemanticAnalyzer`](core::SemanticAnalyzer), its result
/// alias and the name-resolution helpers shared by the other submodules.
pub mod core;

/// Declaration checks.
///
/// Rebuilds the scope chain from the declarations of each block, rejecting
/// duplicate names and unknown type names.
pub mod declaration;

/// Expression type checking.
///
/// Computes the static type of every expression, checks operators against
/// the per-type allow-lists and resolves function calls.
pub mod expression;

/// Statement checks.
///
/// Checks assignments, conditions, procedure calls and I/O statements, and
/// records the declared types the evaluator needs for coercion.
pub mod statement;

/// Utility functions for the analyzer.
///
/// Builds the tokens carried by semantic errors and holds the operator
/// allow-lists.
pub mod utils;
