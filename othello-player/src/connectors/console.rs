//! [`Connector`] for playing in a terminal.

use super::{Connector, Input};
use crate::{CellView, Highlight, SessionSnapshot};
use async_std::io;
use async_trait::async_trait;
use itertools::Itertools;
use othello_core::{format_grid, Color, Location, ParseLocationError};
use std::fmt;
use std::io::Write;

/// How much help the board shows about where to move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CandidateDisplay {
    None,
    /// Mark legal cells with `+`.
    Legal,
    /// Mark legal cells, star the best-scored ones and list the scores.
    Scores,
}

impl CandidateDisplay {
    /// From the numeric console setting: 0, 1 or 2.
    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            0 => Some(CandidateDisplay::None),
            1 => Some(CandidateDisplay::Legal),
            2 => Some(CandidateDisplay::Scores),
            _ => None,
        }
    }
}

pub struct ConsoleConnector {
    candidates: CandidateDisplay,
}

impl ConsoleConnector {
    pub fn new(candidates: CandidateDisplay) -> Self {
        Self { candidates }
    }

    fn symbol(&self, cell: &CellView) -> char {
        match (cell.color, cell.legal, self.candidates) {
            (Color::Empty, true, CandidateDisplay::Scores)
                if cell.annotation.highlight == Highlight::Top =>
            {
                '*'
            }
            (Color::Empty, true, CandidateDisplay::Legal)
            | (Color::Empty, true, CandidateDisplay::Scores) => '+',
            (color, _, _) => color.symbol(),
        }
    }
}

/// The board part of a snapshot, drawn with a connector's symbols.
struct BoardView<'a> {
    connector: &'a ConsoleConnector,
    cells: &'a [CellView],
}

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_grid(self.cells.iter().map(|cell| self.connector.symbol(cell)), f)
    }
}

/// Read one line of console input.
/// An empty line (or "pass") lets the side to move act; cells are "d3" or "19".
pub fn parse_input(line: &str) -> Result<Input, ParseLocationError> {
    match line.trim().to_ascii_lowercase().as_str() {
        "" | "pass" => Ok(Input::Advance),
        "r" | "restart" => Ok(Input::Restart),
        "q" | "quit" => Ok(Input::Quit),
        cell => cell.parse::<Location>().map(Input::Cell),
    }
}

#[async_trait]
impl Connector for ConsoleConnector {
    fn render(&mut self, snapshot: &SessionSnapshot) {
        let fields = &snapshot.fields;
        println!(
            "\n{}\n",
            BoardView {
                connector: self,
                cells: &snapshot.cells,
            }
        );
        println!("{:<12}{}", fields.black_count, fields.black_name);
        println!("{:<12}{}", fields.white_count, fields.white_name);
        if !fields.record.is_empty() {
            println!("Record: {}", fields.record);
        }

        if self.candidates == CandidateDisplay::Scores {
            let scores = snapshot
                .cells
                .iter()
                .enumerate()
                .filter(|(_, cell)| !cell.annotation.text.is_empty())
                .map(|(index, cell)| {
                    format!(
                        "{} {}",
                        Location::from_index(index as u8),
                        cell.annotation.text
                    )
                })
                .join("  ");
            if !scores.is_empty() {
                println!("Scores: {}", scores);
            }
        }

        print!("{} > ", fields.status_line);
        // A prompt that fails to show is not worth stopping the game for.
        let _ = std::io::stdout().flush();
    }

    async fn read_input(&mut self) -> Option<Input> {
        loop {
            let mut line = String::new();
            match io::stdin().read_line(&mut line).await {
                Ok(0) | Err(_) => return None,
                Ok(_) => {}
            }

            match parse_input(&line) {
                Ok(input) => return Some(input),
                Err(err) => {
                    print!(
                        "{}: {:?}. Try a cell like d3, Enter, r or q > ",
                        err,
                        line.trim()
                    );
                    let _ = std::io::stdout().flush();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Annotation;

    #[test]
    fn parse_console_input() {
        assert_eq!(parse_input("\n"), Ok(Input::Advance));
        assert_eq!(parse_input("pass\n"), Ok(Input::Advance));
        assert_eq!(parse_input("Q"), Ok(Input::Quit));
        assert_eq!(parse_input("restart"), Ok(Input::Restart));
        assert_eq!(
            parse_input("d3\n"),
            Ok(Input::Cell(Location::from_coords(2, 3)))
        );
        assert_eq!(parse_input("19"), Ok(Input::Cell(Location::from_index(19))));
        assert!(parse_input("z9").is_err());
    }

    #[test]
    fn candidate_symbols() {
        let top = CellView {
            color: Color::Empty,
            legal: true,
            annotation: Annotation {
                highlight: Highlight::Top,
                text: "4.000".to_string(),
            },
        };
        let black = CellView {
            color: Color::Black,
            legal: false,
            annotation: Annotation::default(),
        };

        assert_eq!(
            ConsoleConnector::new(CandidateDisplay::None).symbol(&top),
            '.'
        );
        assert_eq!(
            ConsoleConnector::new(CandidateDisplay::Legal).symbol(&top),
            '+'
        );
        assert_eq!(
            ConsoleConnector::new(CandidateDisplay::Scores).symbol(&top),
            '*'
        );
        assert_eq!(
            ConsoleConnector::new(CandidateDisplay::Scores).symbol(&black),
            '#'
        );
        assert_eq!(CandidateDisplay::from_level(3), None);
    }
}
