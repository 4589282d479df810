//! Stack growth for deep recursion.
//!
//! The compiler descends once per grammar level and the evaluator once per
//! nested node or function call, so a long operator chain or a recursive
//! template can exhaust the native stack. Recursive entry points wrap their
//! bodies in [`ensure_sufficient_stack`].
//!
//! On native targets the `stacker` crate allocates a new segment when less
//! than the red zone remains. On wasm the closure is called directly.

/// Grow when less than this much stack remains.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first growing the stack if it is close to exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
