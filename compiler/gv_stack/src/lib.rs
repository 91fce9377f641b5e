//! Stack growth for the recursive compiler passes.
//!
//! Statement trees are recursive: an `if` inside a `while` inside a `begin`
//! block nests one frame per level in both the parser and the high→mid
//! lowering. Generated or machine-written sources can nest far deeper than
//! a hand-written game loop, so both passes wrap their recursive step in
//! [`ensure_sufficient_stack`].
//!
//! On native targets the `stacker` crate allocates a fresh segment when the
//! remaining stack drops below [`RED_ZONE`]. On WASM the call is a plain
//! passthrough.

/// Remaining stack below which a new segment is allocated (64KB).
const RED_ZONE: usize = 64 * 1024;

/// Size of each new stack segment (1MB).
const SEGMENT_SIZE: usize = 1024 * 1024;

/// Run `f`, growing the stack first if less than [`RED_ZONE`] remains.
///
/// ```text
/// fn lower_stmts(&mut self, stmts: &[Stmt]) {
///     ensure_sufficient_stack(|| {
///         for stmt in stmts {
///             self.lower_stmt(stmt);
///         }
///     });
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// WASM manages its own stack; call `f` directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
