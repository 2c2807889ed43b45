/// Classification for fallback policy.
///
/// Used by the executor to decide what a completion outcome means for the
/// rest of the chain and for later calls in the same process.
///
/// # Behavior Summary
///
/// | Class | Stop the chain? | Add to exhausted set? |
/// |-------|-----------------|-----------------------|
/// | `Return` | Yes, with the text | No |
/// | `ExcludeAndContinue` | No | Yes (affects every later call) |
/// | `Continue` | No | No |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FallbackClass {
    /// Usable text. First success wins.
    Return,

    /// Try the next candidate and skip this one for the rest of the process.
    ///
    /// Used for quota exhaustion and permanent rejections.
    ExcludeAndContinue,

    /// Try the next candidate without recording anything.
    ///
    /// Used for truncated output and transient errors; the candidate stays
    /// eligible for later, independent summary calls.
    Continue,
}
