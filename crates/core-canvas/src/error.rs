//! Canvas-level failures.
//!
//! These are programmer errors: spec.md §7 calls them out as "never
//! expected at runtime if the algorithm is correct". Callers that hold that
//! invariant may `.expect()` on them; callers that don't (the sprite parser,
//! deciding whether a mirror applies) use [`MirrorMiss`] instead, which is a
//! recoverable outcome rather than a bug signal.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CanvasError {
    #[error("rectangle does not fit in canvas")]
    OutOfBounds,
    #[error("line is too wide for canvas")]
    TooWide,
}

/// Raised by `mirror_x`/`mirror_y` when the supplied substitution has no
/// entry for some character in the canvas. Not a [`CanvasError`]: the parser
/// treats this as "this sprite can't be mirrored", not as a bug.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("character has no entry in the mirror dictionary")]
pub struct MirrorMiss;
