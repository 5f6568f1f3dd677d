use serde::{Deserialize, Serialize};

/// Player-visible state of a single cell.
///
/// While a round is live only the first four variants occur; a hidden cell
/// may become `Flagged`, `Questioned`, or `Revealed`, flag toggling cycles
/// `Hidden -> Flagged -> Questioned -> Hidden`, and `Revealed` is terminal
/// until the next round. The remaining variants are end-of-round markers.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Hidden,
    Flagged,
    Questioned,
    /// Open, carrying the adjacent-mine count computed at reveal time.
    Revealed(u8),
    // set only once the round is over:
    /// The mine (or mines, through a chord) that ended the round.
    Detonated,
    /// A mine shown after a loss.
    Mine,
    /// A flag that sat on a safe cell, shown after a loss.
    WrongFlag,
    /// A cosmetic flag a win places on each remaining closed mine.
    AutoFlagged,
}

impl CellState {
    /// Whether the player can still act on this cell mid-round.
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged | Self::Questioned)
    }

    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed(_))
    }
}

/// One board position: whether it hides a mine, and what the player sees.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub mined: bool,
    pub state: CellState,
}
