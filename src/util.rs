/// Host stack management for the recursive passes.
///
/// The parser, the analyzer and the evaluator recurse once per nesting
/// level or call. Their recursive entry points run through
/// [`guarded`](stack::guarded), which moves execution onto a fresh stack
/// segment when the current one runs low.
pub mod stack;
