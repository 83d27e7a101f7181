use alloc::collections::{BTreeSet, VecDeque};
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    InProgress,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::InProgress
    }
}

/// Order in which the flood fill drains its work list. The revealed region is the same
/// either way.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Traversal {
    /// FIFO queue.
    #[default]
    BreadthFirst,
    /// LIFO stack.
    DepthFirst,
}

/// Applies reveal moves to a [`Board`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RevealEngine {
    traversal: Traversal,
}

impl RevealEngine {
    pub const fn new(traversal: Traversal) -> Self {
        Self { traversal }
    }

    /// Reveals the cell at `coords`, cascading through zero-count regions.
    ///
    /// Out-of-bounds coordinates are an error and never touch the board. Revealing an already
    /// revealed cell, or any cell after the game ended, is a no-op reporting the current state.
    pub fn reveal(
        &self,
        board: &mut Board,
        coords: Coord2,
    ) -> Result<RevealResult, OutOfBoundsError> {
        let coords = board.validate_coords(coords)?;

        let state = board.state();
        if state.is_finished() {
            log::trace!("Ignoring reveal at {:?}, game already {:?}", coords, state);
            return Ok(RevealResult::no_change(state));
        }

        let cell = board.cells[coords.to_nd_index()];
        if cell.revealed {
            return Ok(RevealResult::no_change(state));
        }

        if cell.hazard {
            board.reveal_hazard_cell(coords);
            log::debug!("Hazard revealed at {:?}", coords);
            return Ok(RevealResult {
                outcome: GameState::Lost,
                newly_revealed: BTreeSet::from([coords]),
            });
        }

        let newly_revealed = self.flood_fill(board, coords);
        let outcome = board.state();
        log::debug!(
            "Reveal at {:?} opened {} cells, {}/{} safe cells revealed, {:?}",
            coords,
            newly_revealed.len(),
            board.revealed_safe_count(),
            board.safe_cell_count(),
            outcome
        );

        Ok(RevealResult {
            outcome,
            newly_revealed,
        })
    }

    /// Same as [`RevealEngine::reveal`] for signed caller input; negative values are out of bounds.
    pub fn reveal_at(
        &self,
        board: &mut Board,
        x: i64,
        y: i64,
    ) -> Result<RevealResult, OutOfBoundsError> {
        let coords = board.checked_coords(x, y)?;
        self.reveal(board, coords)
    }

    /// Reveals the hidden safe cell at `start` and every cell reachable through zero-count cells.
    fn flood_fill(&self, board: &mut Board, start: Coord2) -> BTreeSet<Coord2> {
        let mut newly_revealed = BTreeSet::new();
        if !board.reveal_safe_cell(start) {
            return newly_revealed;
        }
        newly_revealed.insert(start);
        log::trace!("Flood fill from {:?}, {:?}", start, self.traversal);

        let mut to_visit = VecDeque::from([start]);
        while let Some(visit_coords) = self.next_to_visit(&mut to_visit) {
            if board.cells[visit_coords.to_nd_index()].adjacent != 0 {
                continue;
            }

            for pos in board.iter_neighbors(visit_coords) {
                if !board.reveal_safe_cell(pos) {
                    continue;
                }
                newly_revealed.insert(pos);
                if board.cells[pos.to_nd_index()].adjacent == 0 {
                    to_visit.push_back(pos);
                }
            }
        }

        newly_revealed
    }

    fn next_to_visit(&self, to_visit: &mut VecDeque<Coord2>) -> Option<Coord2> {
        match self.traversal {
            Traversal::BreadthFirst => to_visit.pop_front(),
            Traversal::DepthFirst => to_visit.pop_back(),
        }
    }
}

impl Board {
    /// Reveals with the default breadth-first [`RevealEngine`].
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealResult, OutOfBoundsError> {
        RevealEngine::default().reveal(self, coords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn board(size: Coord2, hazards: &[Coord2]) -> Board {
        Board::from_hazard_coords(size, hazards).unwrap()
    }

    fn coords_set(coords: &[Coord2]) -> BTreeSet<Coord2> {
        coords.iter().copied().collect()
    }

    #[test]
    fn revealing_the_only_safe_cell_wins() {
        let mut board = board((2, 1), &[(1, 0)]);

        let first = board.reveal((0, 0)).unwrap();
        assert_eq!(board.adjacent_count((0, 0)), Ok(1));
        assert_eq!(first.outcome, GameState::Won);
        assert_eq!(first.newly_revealed, coords_set(&[(0, 0)]));

        let second = board.reveal((1, 0)).unwrap();
        assert_eq!(second.outcome, GameState::Won);
        assert!(second.newly_revealed.is_empty());
        assert_eq!(board.triggered_hazard(), None);
        assert_eq!(board.is_revealed((1, 0)), Ok(false));
    }

    #[test]
    fn numbered_cell_reveals_alone_then_hazard_loses() {
        let mut board = board((3, 1), &[(1, 0)]);

        let first = board.reveal((0, 0)).unwrap();
        assert_eq!(board.adjacent_count((0, 0)), Ok(1));
        assert_eq!(first.outcome, GameState::InProgress);
        assert_eq!(first.newly_revealed, coords_set(&[(0, 0)]));

        let second = board.reveal((1, 0)).unwrap();
        assert_eq!(second.outcome, GameState::Lost);
        assert_eq!(second.newly_revealed, coords_set(&[(1, 0)]));
        assert_eq!(board.triggered_hazard(), Some((1, 0)));
        assert_eq!(board.state(), GameState::Lost);
    }

    #[test]
    fn zero_cell_floods_whole_board_and_wins() {
        let mut board = board((3, 3), &[(2, 2)]);

        let result = board.reveal((0, 0)).unwrap();

        assert_eq!(result.outcome, GameState::Won);
        assert_eq!(result.newly_revealed.len(), 8);
        assert!(!result.newly_revealed.contains(&(2, 2)));
        assert_eq!(board.revealed_safe_count(), 8);
        assert_eq!(board.is_revealed((2, 2)), Ok(false));
        assert_eq!(board.cell_view((1, 1)), Ok(CellView::Revealed(1)));
    }

    #[test]
    fn hazard_reveal_never_cascades() {
        let mut board = board((4, 4), &[(0, 0)]);

        let result = board.reveal((0, 0)).unwrap();

        assert_eq!(result.outcome, GameState::Lost);
        assert_eq!(result.newly_revealed, coords_set(&[(0, 0)]));
        assert_eq!(board.revealed_safe_count(), 0);
        assert_eq!(board.revealed_coords(), coords_set(&[(0, 0)]));
    }

    #[test]
    fn numbered_border_is_revealed_but_not_expanded() {
        // hazard column at x = 2 splits the board; the right side stays hidden
        let mut board = board((5, 3), &[(2, 0), (2, 1), (2, 2)]);

        let result = board.reveal((0, 1)).unwrap();

        assert_eq!(result.outcome, GameState::InProgress);
        let expected: Vec<Coord2> = (0..3).flat_map(|y| [(0, y), (1, y)]).collect();
        assert_eq!(result.newly_revealed, coords_set(&expected));
        assert_eq!(board.is_revealed((3, 1)), Ok(false));
        assert_eq!(board.is_revealed((4, 1)), Ok(false));
    }

    #[test]
    fn repeated_reveal_is_a_no_op() {
        let mut board = board((3, 3), &[(0, 0), (2, 2)]);

        let first = board.reveal((1, 1)).unwrap();
        let snapshot = board.clone();
        let second = board.reveal((1, 1)).unwrap();

        assert_eq!(first.outcome, second.outcome);
        assert!(first.has_update());
        assert!(!second.has_update());
        assert_eq!(board, snapshot);
    }

    #[test]
    fn no_moves_after_loss() {
        let mut board = board((3, 1), &[(0, 0)]);
        board.reveal((0, 0)).unwrap();
        let snapshot = board.clone();

        let result = board.reveal((2, 0)).unwrap();

        assert_eq!(result, RevealResult::no_change(GameState::Lost));
        assert_eq!(board, snapshot);
    }

    #[test]
    fn no_moves_after_win() {
        let mut board = board((2, 1), &[(0, 0)]);
        assert_eq!(board.reveal((1, 0)).unwrap().outcome, GameState::Won);

        let result = board.reveal((0, 0)).unwrap();

        assert_eq!(result, RevealResult::no_change(GameState::Won));
        assert_eq!(board.triggered_hazard(), None);
        assert_eq!(board.is_revealed((0, 0)), Ok(false));
    }

    #[test]
    fn out_of_bounds_always_fails() {
        let engine = RevealEngine::default();
        let mut board = board((2, 2), &[(0, 0)]);

        assert_eq!(
            engine.reveal(&mut board, (2, 0)),
            Err(OutOfBoundsError { x: 2, y: 0 })
        );
        assert_eq!(
            engine.reveal_at(&mut board, -1, 0),
            Err(OutOfBoundsError { x: -1, y: 0 })
        );
        assert_eq!(
            engine.reveal_at(&mut board, 0, -3),
            Err(OutOfBoundsError { x: 0, y: -3 })
        );

        board.reveal((0, 0)).unwrap();
        assert_eq!(
            engine.reveal_at(&mut board, 1, 2),
            Err(OutOfBoundsError { x: 1, y: 2 })
        );
        assert!(engine.reveal_at(&mut board, 1, 1).is_ok());
    }

    #[test]
    fn traversal_order_does_not_change_revealed_region() {
        let hazards = [(3, 0), (0, 4), (5, 5), (6, 1), (2, 6)];
        let moves = [(0, 0), (6, 6), (4, 3), (0, 6)];

        let mut bfs_board = board((7, 7), &hazards);
        let mut dfs_board = bfs_board.clone();
        let bfs = RevealEngine::new(Traversal::BreadthFirst);
        let dfs = RevealEngine::new(Traversal::DepthFirst);

        for coords in moves {
            let a = bfs.reveal(&mut bfs_board, coords).unwrap();
            let b = dfs.reveal(&mut dfs_board, coords).unwrap();
            assert_eq!(a, b);
        }
        assert_eq!(bfs_board, dfs_board);
    }
}
