use crate::*;
pub use random::*;

mod random;

/// Produces a fresh board for a configuration. Invalid configurations never yield a partial board.
pub trait BoardGenerator {
    fn generate(self, config: GameConfig) -> Result<Board, ConfigError>;
}

/// Generates a `width` x `height` board with `hazards` randomly placed hazards drawn from `rng`.
pub fn generate_board<R: rand::Rng>(
    width: Coord,
    height: Coord,
    hazards: CellCount,
    rng: &mut R,
) -> Result<Board, ConfigError> {
    let config = GameConfig::new((width, height), hazards)?;
    RandomBoardGenerator::new(rng).generate(config)
}
