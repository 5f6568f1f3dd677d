use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

/// Upper bound on the elapsed-tick counter (a three-digit timer display).
pub const TICK_LIMIT: u32 = 999;

// keeps the relocation draw decorrelated from the layout draw on the same seed
const RELOCATION_STREAM: u64 = 0x9e37_79b9_7f4a_7c15;

/// Round phase.
///
/// Valid transitions:
/// - NotStarted -> Playing (via `new_game`)
/// - Playing -> Won
/// - Playing -> Lost
///
/// `Won` and `Lost` are terminal until the next `new_game`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// No round has been dealt into this slot yet.
    #[default]
    NotStarted,
    Playing,
    Won,
    Lost,
}

impl Phase {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    /// Indicates the round has ended and no moves are accepted anymore.
    pub const fn is_over(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Discrete player input produced by an input adapter.
///
/// Mapping pointer events to cells (and the header region to `new_game`) is
/// the adapter's job; the engine only sees cell-level intents.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Reveal(Coord2),
    ToggleFlag(Coord2),
}

/// One round of minesweeper, from deal to win or loss.
///
/// Owns the grid for the lifetime of the round; every mutation happens inside
/// the handling of one discrete call (`reveal`, `toggle_flag`, `tick`) and
/// runs to completion before it returns.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    config: GameConfig,
    grid: Grid,
    seed: u64,
    phase: Phase,
    revealed_count: CellCount,
    flag_count: CellCount,
    elapsed_ticks: u32,
    first_reveal_done: bool,
}

impl Game {
    /// Deals a fresh round: validates the config, lays mines with no
    /// exclusions, and enters `Playing`.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_layout(config, &mut RandomMineLayout::new(seed), seed)
    }

    /// Deals a fresh round with a caller-chosen layout strategy.
    pub fn with_layout(config: GameConfig, layout: &mut dyn MineLayout, seed: u64) -> Result<Self> {
        let config = GameConfig::new(config.size, config.mines)?;
        let mut grid = Grid::new(config.size)?;
        layout.place(&mut grid, config.mines, &[])?;
        log::debug!("new round: {:?}", config);

        Ok(Self {
            config,
            grid,
            seed,
            phase: Phase::Playing,
            revealed_count: 0,
            flag_count: 0,
            elapsed_ticks: 0,
            first_reveal_done: false,
        })
    }

    /// Replaces the current round with a freshly dealt one.
    ///
    /// On error the previous round is kept unchanged. Any timer driving the
    /// old round must be cancelled by the shell; a stale `tick` against the
    /// new round is indistinguishable from a fresh one and harmless.
    pub fn new_game(&mut self, config: GameConfig, seed: u64) -> Result<()> {
        *self = Self::new(config, seed)?;
        Ok(())
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines
    }

    /// Mine counter for the header display: total mines minus placed flags.
    /// Goes negative when the player over-flags.
    pub fn flags_remaining(&self) -> i32 {
        self.config.mines as i32 - self.flag_count as i32
    }

    pub fn elapsed_ticks(&self) -> u32 {
        self.elapsed_ticks
    }

    /// Coordinates must be in bounds.
    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.grid[coords]
    }

    pub fn for_each_cell(&self, f: impl FnMut(Coord2, Cell)) {
        self.grid.for_each_cell(f);
    }

    /// Read-only view for the renderer.
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            grid: &self.grid,
            phase: self.phase,
            flags_remaining: self.flags_remaining(),
            elapsed_ticks: self.elapsed_ticks,
        }
    }

    /// Applies one adapter action, reporting whether the visible board
    /// changed.
    pub fn apply(&mut self, action: Action) -> Result<bool> {
        Ok(match action {
            Action::Reveal(coords) => self.reveal(coords)?.has_update(),
            Action::ToggleFlag(coords) => self.toggle_flag(coords)?.has_update(),
        })
    }

    /// Reveals a cell: flood fill on safe ground, chord on a revealed
    /// number, loss on a mine.
    ///
    /// The first reveal of a round relocates the mine under it, if any, so it
    /// can never lose. Inert outside `Playing`, on flagged or questioned
    /// cells, and on revealed zeros.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        use RevealOutcome::*;

        let coords = self.grid.validate_coords(coords)?;
        if !self.phase.is_playing() {
            return Ok(NoChange);
        }

        if self.grid[coords].state == CellState::Hidden && !self.first_reveal_done {
            self.first_reveal_done = true;
            let mut rng = SmallRng::seed_from_u64(self.seed ^ RELOCATION_STREAM);
            relocate_if_mined(&mut self.grid, &mut rng, coords);
        }

        let cell = self.grid[coords];
        Ok(match cell.state {
            CellState::Hidden if cell.mined => {
                self.grid[coords].state = CellState::Detonated;
                self.finish(false);
                Detonated
            }
            CellState::Hidden => {
                self.revealed_count += flood_reveal(&mut self.grid, coords);
                if self.evaluate_win() { Won } else { Revealed }
            }
            CellState::Revealed(count) if count > 0 => {
                match chord_reveal(&mut self.grid, coords) {
                    ChordOutcome::NotApplicable => NoChange,
                    ChordOutcome::Resolved { revealed, detonated } => {
                        self.revealed_count += revealed;
                        if detonated {
                            self.finish(false);
                            Detonated
                        } else if revealed == 0 {
                            NoChange
                        } else if self.evaluate_win() {
                            Won
                        } else {
                            Revealed
                        }
                    }
                }
            }
            _ => NoChange,
        })
    }

    /// Cycles a closed cell `Hidden -> Flagged -> Questioned -> Hidden`.
    /// Inert on revealed cells and outside `Playing`.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        use CellState::*;
        use FlagOutcome::*;

        let coords = self.grid.validate_coords(coords)?;
        if !self.phase.is_playing() {
            return Ok(NoChange);
        }

        let outcome = match self.grid[coords].state {
            Hidden => {
                self.grid[coords].state = Flagged;
                self.flag_count += 1;
                Changed
            }
            Flagged => {
                self.grid[coords].state = Questioned;
                self.flag_count -= 1;
                Changed
            }
            Questioned => {
                self.grid[coords].state = Hidden;
                Changed
            }
            _ => NoChange,
        };

        if outcome.has_update() {
            // the win rule runs after every board change; a flag alone can
            // never satisfy it
            self.evaluate_win();
        }
        Ok(outcome)
    }

    /// One timer signal. Counts only while `Playing` and saturates at
    /// [`TICK_LIMIT`]; ticks delivered in any other phase are dropped.
    pub fn tick(&mut self) {
        if self.phase.is_playing() {
            self.elapsed_ticks = (self.elapsed_ticks + 1).min(TICK_LIMIT);
        }
    }

    /// Won iff every non-mined cell is revealed. Returns whether this call
    /// ended the round.
    fn evaluate_win(&mut self) -> bool {
        if self.phase.is_playing() && self.revealed_count == self.config.safe_cells() {
            self.finish(true);
            return true;
        }
        false
    }

    fn finish(&mut self, won: bool) {
        self.phase = if won { Phase::Won } else { Phase::Lost };
        self.resolve_endgame(won);
        log::debug!("round over: {:?}", self.phase);
    }

    /// Rewrites markers once the round ends: a loss shows every mine and
    /// exposes wrong flags, a win auto-flags the remaining closed mines.
    fn resolve_endgame(&mut self, won: bool) {
        let (cols, rows) = self.grid.size();
        for col in 0..cols {
            for row in 0..rows {
                let coords = (col, row);
                let cell = self.grid[coords];
                match (cell.mined, won) {
                    (true, true) => {
                        if matches!(cell.state, CellState::Hidden | CellState::Questioned) {
                            self.grid[coords].state = CellState::AutoFlagged;
                            self.flag_count += 1;
                        }
                    }
                    (true, false) => {
                        if cell.state != CellState::Detonated {
                            self.grid[coords].state = CellState::Mine;
                        }
                    }
                    (false, false) => {
                        if cell.state == CellState::Flagged {
                            self.grid[coords].state = CellState::WrongFlag;
                        }
                    }
                    (false, true) => {}
                }
            }
        }
    }
}

/// Read-only snapshot handed to the renderer: the cells plus the three
/// header scalars, nothing else.
#[derive(Clone, Debug, Serialize)]
pub struct Snapshot<'a> {
    grid: &'a Grid,
    pub phase: Phase,
    pub flags_remaining: i32,
    pub elapsed_ticks: u32,
}

impl Snapshot<'_> {
    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn for_each_cell(&self, f: impl FnMut(Coord2, Cell)) {
        self.grid.for_each_cell(f);
    }
}
