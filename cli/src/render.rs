use std::fmt;

use sweeper_core::{Board, CellView};

use crate::notation::column_label;

pub const HELP: &str = "\
SWEEPER HELP
Goal: reveal all safe cells without hitting a hazard
Numbers show how many hazards touch that cell
Legend: . (hidden) | 0-8 (safe) | M (hazard)
Cells are named column + row: A1, B3, AA12
Commands: A1 | h (help) | q (quit)";

const fn cell_char(view: CellView) -> char {
    match view {
        CellView::Hidden => '.',
        CellView::Revealed(count) => (b'0' + count) as char,
        CellView::Hazard => 'M',
    }
}

/// Text grid with column letters on top and 1-based row numbers on the left.
pub struct BoardView<'a>(pub &'a Board);

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = self.0;
        let (width, height) = board.size();
        let col_width = column_label(width.saturating_sub(1)).len();
        let row_width = height.to_string().len();

        let header = (0..width)
            .map(|x| format!("{:<col_width$}", column_label(x)))
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(f, "{}", format!("{:row_width$} {header}", "").trim_end())?;

        for y in 0..height {
            let row = (0..width)
                .map(|x| {
                    let view = board.cell_view((x, y)).unwrap_or_default();
                    format!("{:<col_width$}", cell_char(view))
                })
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(f, "{}", format!("{:>row_width$} {row}", y + 1).trim_end())?;
        }
        Ok(())
    }
}

pub fn render_title(board: &Board) -> String {
    let (width, height) = board.size();
    format!(
        "SWEEPER - {}x{} - {} hazards\nType: A1 (reveal) | h (help) | q (quit)",
        width,
        height,
        board.hazard_count()
    )
}
