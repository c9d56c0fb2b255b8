use anyhow::Result;
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use network_ai::{board::Board, piece::Cell};

/// Draws the board to stdout, x increasing to the right and y downwards
///
/// White's goal columns are tinted grey, Black's goal rows dark grey.
pub fn display(board: &Board) -> Result<()> {
    let mut stdout = stdout();
    let size = board.size();

    let header: String = (0..size).map(|x| format!(" {}", x)).collect();
    stdout.queue(PrintStyledContent(style(format!("  {}\n", header))))?;

    for y in 0..size {
        stdout.queue(PrintStyledContent(style(format!("{} ", y))))?;
        for x in 0..size {
            let background = if board.is_corner(x, y) {
                Color::Black
            } else if x == 0 || x == size - 1 {
                Color::Grey
            } else if y == 0 || y == size - 1 {
                Color::DarkGrey
            } else {
                Color::DarkBlue
            };
            let (symbol, foreground) = match board.cell(x, y) {
                Cell::White => (" O", Color::White),
                Cell::Black => (" O", Color::Black),
                Cell::Empty => (" .", background),
            };
            stdout.queue(PrintStyledContent(
                style(symbol)
                    .attribute(Attribute::Bold)
                    .on(background)
                    .with(foreground),
            ))?;
        }
        stdout.queue(PrintStyledContent(style("\n")))?;
    }
    stdout.flush()?;
    Ok(())
}
