use serde::{Deserialize, Serialize};

/// One board position. `hazard` and `adjacent` are fixed at generation, only `revealed` changes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub hazard: bool,
    /// Hazards in the 8-neighborhood, always 0 for hazard cells.
    pub adjacent: u8,
    pub revealed: bool,
}

impl Cell {
    pub const fn is_revealed_safe(self) -> bool {
        self.revealed && !self.hazard
    }
}

/// Player-visible state of a cell, suitable for rendering.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Revealed(u8),
    Hazard,
}

impl Default for CellView {
    fn default() -> Self {
        Self::Hidden
    }
}
