/// Remaining stack below which a new segment is allocated.
pub const STACK_RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
pub const STACK_GROW_SIZE: usize = 4 * 1024 * 1024;

/// Runs `f`, first switching to a new stack segment if fewer than
/// [`STACK_RED_ZONE`] bytes of the current one remain.
///
/// # Example
/// ```
/// use pascaline::util::stack::guarded;
///
/// fn depth(n: u32) -> u32 {
///     guarded(|| if n == 0 { 0 } else { 1 + depth(n - 1) })
/// }
///
/// assert_eq!(depth(100_000), 100_000);
/// ```
pub fn guarded<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, f)
}
