//! Player input: spreadsheet-style cell names (`A1`, `c7`, `AB12`) and single-letter commands.

use sweeper_core::Coord;
use thiserror::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Raw 0-indexed coordinates, bounds are checked by the board.
    Reveal { x: i64, y: i64 },
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Type a cell like A1, h for help or q to quit")]
    Empty,
    #[error("\"{0}\" is not a cell, expected a column letter followed by a row number")]
    Malformed(String),
}

pub fn parse_command(input: &str) -> Result<Command, ParseError> {
    let input = input.trim();
    match input.to_ascii_lowercase().as_str() {
        "" => return Err(ParseError::Empty),
        "h" | "help" | "?" => return Ok(Command::Help),
        "q" | "quit" | "exit" => return Ok(Command::Quit),
        _ => {}
    }

    let malformed = || ParseError::Malformed(input.to_owned());
    let split = input
        .find(|c: char| !c.is_ascii_alphabetic())
        .ok_or_else(malformed)?;
    let (letters, digits) = input.split_at(split);
    if letters.is_empty() || letters.len() > 3 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }

    let column = letters
        .bytes()
        .map(|b| i64::from(b.to_ascii_uppercase() - b'A') + 1)
        .fold(0, |acc, digit| acc * 26 + digit);
    let row: i64 = digits.parse().map_err(|_| malformed())?;

    Ok(Command::Reveal {
        x: column - 1,
        y: row - 1,
    })
}

/// Column name for a 0-indexed `x`: `A`..`Z`, then `AA`, `AB`, ...
pub fn column_label(x: Coord) -> String {
    let mut n = u32::from(x) + 1;
    let mut label = Vec::new();
    while n > 0 {
        n -= 1;
        label.push(b'A' + (n % 26) as u8);
        n /= 26;
    }
    label.iter().rev().map(|&b| char::from(b)).collect()
}
