use alloc::vec::Vec;
use ndarray::Array2;
use rand::Rng;
use rand::prelude::*;
use rand::rngs::SmallRng;

use super::*;

/// Purely random hazard placement drawing from an explicit random source.
#[derive(Clone, Debug)]
pub struct RandomBoardGenerator<R> {
    rng: R,
}

impl<R: Rng> RandomBoardGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomBoardGenerator<SmallRng> {
    pub fn from_seed(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> BoardGenerator for RandomBoardGenerator<R> {
    fn generate(mut self, config: GameConfig) -> Result<Board, ConfigError> {
        config.validate()?;
        let hazard_mask = place_hazards(config, &mut self.rng);
        let board = Board::from_hazard_mask(&hazard_mask);
        log::debug!(
            "Generated {}x{} board with {} hazards",
            config.size.0,
            config.size.1,
            board.hazard_count()
        );
        Ok(board)
    }
}

/// Marks exactly `config.hazards` distinct cells, `config` must already be validated.
fn place_hazards<R: Rng>(config: GameConfig, rng: &mut R) -> Array2<bool> {
    let (width, height) = config.size;
    let total_cells = config.total_cells();
    let mut hazard_mask: Array2<bool> = Array2::default((height.into(), width.into()));

    if u32::from(config.hazards) * 2 <= u32::from(total_cells) {
        // sparse: redraw on duplicates, expected draws stay close to the hazard count
        let mut placed = 0;
        while placed < config.hazards {
            let coords = index_to_coords(rng.random_range(0..total_cells), width);
            let cell = &mut hazard_mask[coords.to_nd_index()];
            if !*cell {
                *cell = true;
                placed += 1;
            }
        }
    } else {
        // dense: partial Fisher-Yates over all cells, first `hazards` entries win
        log::trace!(
            "Dense board ({} of {} cells), placing hazards by permutation",
            config.hazards,
            total_cells
        );
        let mut indices: Vec<CellCount> = (0..total_cells).collect();
        for i in 0..config.hazards {
            let j = rng.random_range(i..total_cells);
            indices.swap(i.into(), j.into());
        }
        for &index in &indices[..usize::from(config.hazards)] {
            hazard_mask[index_to_coords(index, width).to_nd_index()] = true;
        }
    }

    hazard_mask
}
