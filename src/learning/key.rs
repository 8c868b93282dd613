//! Symmetry-aware state/action keys
//!
//! Keys are resolved lazily: instead of normalizing every position to a fixed
//! canonical form, a (state, action) pair is mapped onto whichever symmetric
//! variant has already been written to the table. The first variant found
//! wins, so the probe order below is part of the key identity.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tictactoe::{BoardState, D4Transform};

/// Symmetric variants probed before falling back to the literal key.
///
/// Rotations come first (90, 180, 270 degrees clockwise), then the same
/// rotations of the mirrored board, then the plain mirror.
pub const PROBE_ORDER: [D4Transform; 7] = [
    D4Transform::rotation(1),
    D4Transform::rotation(2),
    D4Transform::rotation(3),
    D4Transform::mirrored(1),
    D4Transform::mirrored(2),
    D4Transform::mirrored(3),
    D4Transform::mirrored(0),
];

/// Table key for a (state, action) pair: the nine cells in raster order
/// followed by the action digit, e.g. `"X...O....8"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateActionKey(String);

impl StateActionKey {
    /// Literal key of the untransformed pair
    pub fn literal(state: &BoardState, action: usize) -> Self {
        StateActionKey(format!("{}{}", state.encode(), action))
    }

    /// Literal key of the pair after applying a symmetry to both board and action
    pub fn transformed(state: &BoardState, action: usize, t: &D4Transform) -> Self {
        Self::literal(&state.transform(t), t.transform_position(action))
    }

    /// Get the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateActionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolve the key to read or write for `(state, action)`.
///
/// `is_known` reports whether a key already exists in the table. The first
/// known variant in [`PROBE_ORDER`] is returned; if none is known the literal
/// key is returned and becomes the class representative once written.
pub fn canonical_key<F>(is_known: F, state: &BoardState, action: usize) -> StateActionKey
where
    F: Fn(&StateActionKey) -> bool,
{
    for t in &PROBE_ORDER {
        let candidate = StateActionKey::transformed(state, action, t);
        if is_known(&candidate) {
            tracing::trace!(key = %candidate, ?t, "resolved symmetric key");
            return candidate;
        }
    }
    StateActionKey::literal(state, action)
}
