use std::io::{BufRead, Write};

use anyhow::Result;
use sweeper_core::{Board, GameState, RevealEngine};

use crate::notation::{Command, parse_command};
use crate::render::{BoardView, HELP, render_title};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// One game played over a line-based input and a text output.
pub struct Session<R, W> {
    board: Board,
    engine: RevealEngine,
    input: R,
    output: W,
    clear_screen: bool,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(board: Board, input: R, output: W) -> Self {
        Self {
            board,
            engine: RevealEngine::default(),
            input,
            output,
            clear_screen: false,
        }
    }

    pub fn with_clear_screen(mut self, clear_screen: bool) -> Self {
        self.clear_screen = clear_screen;
        self
    }

    /// Plays until the game ends, the player quits, or input runs out.
    pub fn run(mut self) -> Result<GameState> {
        let mut notice = None;
        while !self.board.is_finished() {
            self.draw()?;
            if let Some(message) = notice.take() {
                writeln!(self.output, "{message}")?;
            }
            write!(self.output, "> ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                log::debug!("Input closed, leaving game");
                break;
            }

            notice = match parse_command(&line) {
                Ok(Command::Quit) => break,
                Ok(Command::Help) => Some(HELP.to_owned()),
                Ok(Command::Reveal { x, y }) => match self.engine.reveal_at(&mut self.board, x, y) {
                    Ok(result) => {
                        log::trace!("Revealed {:?}", result.newly_revealed);
                        None
                    }
                    Err(err) => {
                        log::debug!("{err}");
                        Some(format!("{} is not on the board", line.trim()))
                    }
                },
                Err(err) => Some(err.to_string()),
            };
        }

        let state = self.board.state();
        self.draw()?;
        match state {
            GameState::Lost => writeln!(self.output, "BOOM! Game over!")?,
            GameState::Won => writeln!(self.output, "You win!")?,
            GameState::InProgress => writeln!(self.output, "Bye!")?,
        }
        Ok(state)
    }

    fn draw(&mut self) -> Result<()> {
        if self.clear_screen {
            write!(self.output, "{CLEAR_SCREEN}")?;
        }
        writeln!(self.output, "{}", render_title(&self.board))?;
        write!(self.output, "{}", BoardView(&self.board))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(board: Board, input: &str) -> (GameState, String) {
        let mut output = Vec::new();
        let state = Session::new(board, input.as_bytes(), &mut output)
            .run()
            .unwrap();
        (state, String::from_utf8(output).unwrap())
    }

    #[test]
    fn hitting_a_hazard_loses() {
        let board = Board::from_hazard_coords((3, 1), &[(1, 0)]).unwrap();

        let (state, output) = play(board, "a1\nb1\n");

        assert_eq!(state, GameState::Lost);
        assert!(output.contains("1 1 . .\n"));
        assert!(output.ends_with("1 1 M .\nBOOM! Game over!\n"));
    }

    #[test]
    fn clearing_the_board_wins() {
        let board = Board::from_hazard_coords((3, 3), &[(2, 2)]).unwrap();

        let (state, output) = play(board, "A1\n");

        assert_eq!(state, GameState::Won);
        assert!(output.ends_with("3 0 1 M\nYou win!\n"));
    }

    #[test]
    fn bad_input_is_reported_and_reprompted() {
        let board = Board::from_hazard_coords((2, 2), &[(0, 0)]).unwrap();

        let (state, output) = play(board, "Z9\nxyz\nh\nq\n");

        assert_eq!(state, GameState::InProgress);
        assert!(output.contains("Z9 is not on the board"));
        assert!(output.contains("\"xyz\" is not a cell"));
        assert!(output.contains("SWEEPER HELP"));
        assert!(output.ends_with("Bye!\n"));
    }

    #[test]
    fn end_of_input_leaves_game() {
        let board = Board::from_hazard_coords((2, 2), &[(0, 0)]).unwrap();

        let (state, output) = play(board, "b2\n");

        assert_eq!(state, GameState::InProgress);
        assert!(output.contains("2 . 1\n"));
        assert!(!output.contains(CLEAR_SCREEN));
    }
}
