use serde::{Deserialize, Serialize};

/// The singleton weekly voting window.
///
/// Voting is open while `is_finalized` is false. Finalize flips the flag,
/// Reset clears it; nothing else is stored, winners are always recomputed
/// from live vote counts.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MenuState {
    pub is_finalized: bool,
}

impl MenuState {
    pub const fn open() -> Self {
        Self { is_finalized: false }
    }

    pub const fn finalized() -> Self {
        Self { is_finalized: true }
    }
}
