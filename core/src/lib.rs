#![no_std]

extern crate alloc;

use alloc::collections::BTreeSet;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use tile::*;
pub use types::*;

mod engine;
mod error;
mod generator;
mod tile;
mod types;

/// Board dimensions and hazard count, validated on construction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub hazards: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, hazards: CellCount) -> Self {
        Self { size, hazards }
    }

    pub fn new(size: Coord2, hazards: CellCount) -> Result<Self, ConfigError> {
        let config = Self::new_unchecked(size, hazards);
        config.validate()?;
        Ok(config)
    }

    /// Checks `0 < hazards < width * height` on a non-empty board.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (width, height) = self.size;
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyBoard);
        }
        if self.hazards == 0 {
            return Err(ConfigError::NoHazards);
        }
        let total = self.total_cells();
        if self.hazards >= total {
            return Err(ConfigError::TooManyHazards {
                hazards: self.hazards,
                total,
            });
        }
        Ok(())
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.hazards)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked((5, 5), 4)
    }
}

/// A game board: fixed hazard layout plus the per-cell revealed flags.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoardData")]
pub struct Board {
    cells: Array2<Cell>,
    hazard_count: CellCount,
    revealed_safe_count: CellCount,
    triggered_hazard: Option<Coord2>,
}

impl Board {
    /// Builds a board from a row-major hazard mask, computing adjacency counts.
    ///
    /// The caller is responsible for the mask satisfying [`GameConfig::validate`].
    pub(crate) fn from_hazard_mask(hazard_mask: &Array2<bool>) -> Self {
        let cells = Array2::from_shape_fn(hazard_mask.dim(), |(y, x)| {
            let coords = (x as Coord, y as Coord);
            let hazard = hazard_mask[coords.to_nd_index()];
            let adjacent = if hazard {
                0
            } else {
                hazard_mask
                    .iter_neighbors(coords)
                    .filter(|&pos| hazard_mask[pos.to_nd_index()])
                    .count() as u8
            };
            Cell {
                hazard,
                adjacent,
                revealed: false,
            }
        });
        let hazard_count = hazard_mask.iter().filter(|&&hazard| hazard).count() as CellCount;

        Self {
            cells,
            hazard_count,
            revealed_safe_count: 0,
            triggered_hazard: None,
        }
    }

    /// Builds a board with hazards at exactly the given coordinates. Duplicates collapse.
    pub fn from_hazard_coords(size: Coord2, hazard_coords: &[Coord2]) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(ConfigError::EmptyBoard.into());
        }

        let mut hazard_mask: Array2<bool> = Array2::default(size_to_dim(size));
        for &coords in hazard_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(out_of_bounds(coords).into());
            }
            hazard_mask[coords.to_nd_index()] = true;
        }

        let hazards = hazard_mask.iter().filter(|&&hazard| hazard).count() as CellCount;
        GameConfig::new(size, hazards)?;
        Ok(Self::from_hazard_mask(&hazard_mask))
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.hazard_count)
    }

    /// `(width, height)`.
    pub fn size(&self) -> Coord2 {
        grid_size(&self.cells)
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len() as CellCount
    }

    pub fn hazard_count(&self) -> CellCount {
        self.hazard_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells().saturating_sub(self.hazard_count)
    }

    pub fn revealed_safe_count(&self) -> CellCount {
        self.revealed_safe_count
    }

    /// The hazard that ended the game, if any.
    pub fn triggered_hazard(&self) -> Option<Coord2> {
        self.triggered_hazard
    }

    pub fn state(&self) -> GameState {
        if self.triggered_hazard.is_some() {
            GameState::Lost
        } else if self.revealed_safe_count == self.safe_cell_count() {
            GameState::Won
        } else {
            GameState::InProgress
        }
    }

    pub fn is_finished(&self) -> bool {
        self.state().is_finished()
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2, OutOfBoundsError> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(out_of_bounds(coords))
        }
    }

    /// Converts signed caller input into board coordinates, rejecting anything off the board.
    pub fn checked_coords(&self, x: i64, y: i64) -> Result<Coord2, OutOfBoundsError> {
        let error = OutOfBoundsError { x, y };
        let x = Coord::try_from(x).map_err(|_| error)?;
        let y = Coord::try_from(y).map_err(|_| error)?;
        self.validate_coords((x, y)).map_err(|_| error)
    }

    pub fn cell(&self, coords: Coord2) -> Result<Cell, OutOfBoundsError> {
        let coords = self.validate_coords(coords)?;
        Ok(self.cells[coords.to_nd_index()])
    }

    pub fn is_revealed(&self, coords: Coord2) -> Result<bool, OutOfBoundsError> {
        Ok(self.cell(coords)?.revealed)
    }

    /// Raw hazard layout. Renderers should prefer [`Board::cell_view`], which hides hazards
    /// until the game is over.
    pub fn is_hazard(&self, coords: Coord2) -> Result<bool, OutOfBoundsError> {
        Ok(self.cell(coords)?.hazard)
    }

    pub fn adjacent_count(&self, coords: Coord2) -> Result<u8, OutOfBoundsError> {
        Ok(self.cell(coords)?.adjacent)
    }

    pub fn cell_view(&self, coords: Coord2) -> Result<CellView, OutOfBoundsError> {
        let cell = self.cell(coords)?;
        Ok(match cell {
            Cell { hazard: true, .. } if cell.revealed || self.is_finished() => CellView::Hazard,
            Cell { revealed: true, .. } => CellView::Revealed(cell.adjacent),
            _ => CellView::Hidden,
        })
    }

    /// Every revealed coordinate, hazards included.
    pub fn revealed_coords(&self) -> BTreeSet<Coord2> {
        self.cells
            .indexed_iter()
            .filter(|(_, cell)| cell.revealed)
            .map(|((y, x), _)| (x as Coord, y as Coord))
            .collect()
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    pub(crate) fn cell_mut(&mut self, coords: Coord2) -> &mut Cell {
        &mut self.cells[coords.to_nd_index()]
    }

    /// Marks a hidden safe cell as revealed. Returns whether anything changed.
    pub(crate) fn reveal_safe_cell(&mut self, coords: Coord2) -> bool {
        let cell = self.cell_mut(coords);
        if cell.revealed || cell.hazard {
            return false;
        }
        cell.revealed = true;
        self.revealed_safe_count += 1;
        true
    }

    pub(crate) fn reveal_hazard_cell(&mut self, coords: Coord2) {
        self.cell_mut(coords).revealed = true;
        self.triggered_hazard = Some(coords);
    }
}

/// Serialized form of [`Board`], checked against the board invariants before use.
#[derive(Deserialize)]
struct BoardData {
    cells: Array2<Cell>,
    hazard_count: CellCount,
    revealed_safe_count: CellCount,
    triggered_hazard: Option<Coord2>,
}

impl TryFrom<BoardData> for Board {
    type Error = GameError;

    fn try_from(data: BoardData) -> Result<Self> {
        let (rows, cols) = data.cells.dim();
        if rows > usize::from(Coord::MAX) || cols > usize::from(Coord::MAX) {
            return Err(GameError::InconsistentBoard("board larger than 255x255"));
        }

        let mut board = Self::from_hazard_mask(&data.cells.map(|cell| cell.hazard));
        board.game_config().validate()?;
        if board.hazard_count != data.hazard_count {
            return Err(GameError::InconsistentBoard("hazard count does not match cells"));
        }
        let counts_match = board
            .cells
            .iter()
            .zip(data.cells.iter())
            .all(|(fresh, stored)| fresh.adjacent == stored.adjacent);
        if !counts_match {
            return Err(GameError::InconsistentBoard("adjacent counts do not match hazards"));
        }

        board.cells = data.cells;
        board.revealed_safe_count = board
            .cells
            .iter()
            .filter(|cell| cell.is_revealed_safe())
            .count() as CellCount;
        if board.revealed_safe_count != data.revealed_safe_count {
            return Err(GameError::InconsistentBoard("revealed count does not match cells"));
        }

        let mut revealed_hazards = board
            .cells
            .indexed_iter()
            .filter(|(_, cell)| cell.hazard && cell.revealed)
            .map(|((y, x), _)| (x as Coord, y as Coord));
        let triggered = revealed_hazards.next();
        if revealed_hazards.next().is_some() || triggered != data.triggered_hazard {
            return Err(GameError::InconsistentBoard("revealed hazard does not match trigger"));
        }
        board.triggered_hazard = triggered;
        Ok(board)
    }
}

fn size_to_dim((width, height): Coord2) -> (usize, usize) {
    (height.into(), width.into())
}

fn out_of_bounds((x, y): Coord2) -> OutOfBoundsError {
    OutOfBoundsError {
        x: x.into(),
        y: y.into(),
    }
}

/// What a single reveal did to the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevealResult {
    pub outcome: GameState,
    pub newly_revealed: BTreeSet<Coord2>,
}

impl RevealResult {
    pub(crate) fn no_change(outcome: GameState) -> Self {
        Self {
            outcome,
            newly_revealed: BTreeSet::new(),
        }
    }

    /// Whether this reveal could have caused an update to the game.
    pub fn has_update(&self) -> bool {
        !self.newly_revealed.is_empty()
    }
}
