//! # pascaline
//!
//! pascaline is an interpreter for a small Pascal subset written in Rust.
//! It tokenizes, parses and semantically checks a program with nested
//! procedures and functions, then runs it on a tree-walking evaluator with
//! an explicit call stack.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use log::debug;

use crate::{
    ast::Program,
    interpreter::{
        analyzer::core::SemanticAnalyzer,
        call_stack::DEFAULT_MAX_CALL_DEPTH,
        evaluator::core::Context,
        io::{LineReader, NoInput},
        lexer::tokenize,
        parser::core::Parser,
    },
};
pub use crate::{
    error::Error,
    interpreter::evaluator::core::{Bindings, Execution},
};

/// Defines the structure of parsed programs.
///
/// This module declares the program, block, declaration, statement and
/// expression types built by the parser, annotated by the analyzer and
/// walked by the evaluator.
///
/// # Responsibilities
/// - Defines node types for all language constructs.
/// - Attaches source positions to nodes for error reporting.
/// - Carries the annotations the analyzer adds for the evaluator.
pub mod ast;
/// Provides unified error types for every phase.
///
/// This module defines all errors that can be raised while lexing, parsing,
/// analyzing or executing a program, and collapses them into one [`Error`]
/// with a numeric code, a source position and a message.
///
/// # Responsibilities
/// - Defines error enums for all failure modes.
/// - Attaches line and column numbers for context.
/// - Maps every error to a stable code and process exit status.
pub mod error;
/// Orchestrates the entire process of running a program.
///
/// This module ties together lexing, parsing, analysis, evaluation and the
/// runtime data structures they share.
pub mod interpreter;
/// Host stack management shared by the recursive passes.
pub mod util;

/// Tokenizes and parses a program without analyzing it.
///
/// # Errors
/// Returns the first lexical, parse or parser-side semantic error.
///
/// # Examples
/// ```
/// use pascaline::parse;
///
/// let program = parse("program Demo; begin end.").unwrap();
/// assert_eq!(program.name, "DEMO");
///
/// assert!(parse("PROGRAM p; BEGIN x := 1 END.").is_err());
/// ```
pub fn parse(source: &str) -> Result<Program, Error> {
    let lexemes = tokenize(source)?;
    debug!("Tokenized {} lexemes", lexemes.len());

    let program = Parser::new(lexemes).parse()?;
    debug!("Parsed program {}", program.name);

    Ok(program)
}

/// Parses and analyzes a program, returning the annotated tree.
///
/// # Errors
/// Returns the first lexical, parse or semantic error.
///
/// # Examples
/// ```
/// use pascaline::{analyze, error::ErrorCode};
///
/// let source = "PROGRAM p; VAR x: INTEGER; x: REAL; BEGIN END.";
/// let error = analyze(source).unwrap_err();
///
/// assert_eq!(error.code(), ErrorCode::DuplicateIdentifier);
/// ```
pub fn analyze(source: &str) -> Result<Program, Error> {
    let mut program = parse(source)?;
    SemanticAnalyzer::new().analyze(&mut program)?;
    debug!("Analyzed program {}", program.name);

    Ok(program)
}

/// Runs a program end to end.
///
/// # Parameters
/// - `source`: The program text.
/// - `input`: Supplies lines to `READ` and `READLN`.
/// - `max_call_depth`: The largest number of live frames.
///
/// # Returns
/// The final bindings of the program frame and everything written.
///
/// # Errors
/// Returns the first error of any phase. Nothing is executed unless lexing,
/// parsing and analysis all succeed.
///
/// # Examples
/// ```
/// use pascaline::{execute, interpreter::io::ScriptedInput};
///
/// let source = "PROGRAM p; VAR n: INTEGER; BEGIN READLN(n); WRITELN('N=', n * 2) END.";
/// let mut input = ScriptedInput::new(["21"]);
/// let execution = execute(source, &mut input, 64).unwrap();
///
/// assert_eq!(execution.output, "N=42\n");
/// ```
pub fn execute(source: &str,
               input: &mut dyn LineReader,
               max_call_depth: usize)
               -> Result<Execution, Error> {
    let program = analyze(source)?;
    let execution = Context::new(&program, input, max_call_depth).run()?;

    Ok(execution)
}

/// Runs a program with no input and the default call-depth limit.
///
/// # Errors
/// Returns the first error of any phase.
///
/// # Examples
/// ```
/// use pascaline::{interpreter::value::Value, run_program};
///
/// let source = "PROGRAM p; VAR a: INTEGER; BEGIN a := 2 + 3 * 4 END.";
/// let execution = run_program(source).unwrap();
///
/// assert_eq!(execution.bindings["A"], Value::Integer(14));
/// ```
pub fn run_program(source: &str) -> Result<Execution, Error> {
    execute(source, &mut NoInput, DEFAULT_MAX_CALL_DEPTH)
}
