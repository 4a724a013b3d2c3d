use std::fmt;

use crate::config::{DEFAULT_COLUMNS, DEFAULT_ROWS, validate_dimensions};
use crate::error::{ReversiError, Result};
use crate::types::{Cell, Color, Position};

/// Reversi board: a `columns x rows` grid of cells stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    columns: u8,
    rows: u8,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates the initial board with white on the center diagonal:
    /// on 8x8, d4=white, e4=black, d5=black, e5=white.
    pub fn new(columns: u8, rows: u8) -> Result<Self> {
        Self::with_diagonal(columns, rows, Color::White)
    }

    /// Creates the initial board with `diagonal` on `(C/2-1, R/2-1)` and `(C/2, R/2)`
    /// and the opposite color on the other two center cells.
    pub fn with_diagonal(columns: u8, rows: u8, diagonal: Color) -> Result<Self> {
        validate_dimensions(columns, rows)?;
        Ok(Self::seeded(columns, rows, diagonal))
    }

    /// Builds a board from row-major cells. Any non-empty rectangle is accepted.
    pub fn from_cells(columns: u8, rows: u8, cells: Vec<Cell>) -> Result<Self> {
        if columns == 0 || rows == 0 {
            return Err(ReversiError::configuration("board must have at least one cell"));
        }
        let expected = columns as usize * rows as usize;
        if cells.len() != expected {
            return Err(ReversiError::configuration(format!(
                "expected {expected} cells for a {columns}x{rows} board, got {}",
                cells.len()
            )));
        }
        Ok(Self {
            columns,
            rows,
            cells,
        })
    }

    /// Parses a diagram with one line per row: `B`/`X` black, `W`/`O` white, `.`/`-` empty.
    /// Blank lines and whitespace inside a line are ignored.
    pub fn from_diagram(diagram: &str) -> Result<Self> {
        let mut cells = Vec::new();
        let mut columns: Option<usize> = None;
        let mut rows = 0usize;

        for line in diagram.lines() {
            let mut width = 0usize;
            for ch in line.chars().filter(|ch| !ch.is_whitespace()) {
                let cell = match ch {
                    'B' | 'b' | 'X' | 'x' => Cell::Occupied(Color::Black),
                    'W' | 'w' | 'O' | 'o' => Cell::Occupied(Color::White),
                    '.' | '-' => Cell::Empty,
                    other => {
                        return Err(ReversiError::configuration(format!(
                            "unexpected character {other:?} in board diagram"
                        )));
                    }
                };
                cells.push(cell);
                width += 1;
            }
            if width == 0 {
                continue;
            }
            match columns {
                None => columns = Some(width),
                Some(expected) if expected != width => {
                    return Err(ReversiError::configuration(format!(
                        "diagram row {rows} has {width} cells, expected {expected}"
                    )));
                }
                Some(_) => {}
            }
            rows += 1;
        }

        let columns = columns.unwrap_or(0);
        let columns = u8::try_from(columns)
            .map_err(|_| ReversiError::configuration("diagram is too wide"))?;
        let rows =
            u8::try_from(rows).map_err(|_| ReversiError::configuration("diagram is too tall"))?;
        Self::from_cells(columns, rows, cells)
    }

    fn seeded(columns: u8, rows: u8, diagonal: Color) -> Self {
        let mut board = Self {
            columns,
            rows,
            cells: vec![Cell::Empty; columns as usize * rows as usize],
        };
        let (c, r) = (columns / 2, rows / 2);
        let anti = diagonal.opposite();
        board.set(Position::new(c - 1, r - 1), Cell::Occupied(diagonal));
        board.set(Position::new(c, r), Cell::Occupied(diagonal));
        board.set(Position::new(c - 1, r), Cell::Occupied(anti));
        board.set(Position::new(c, r - 1), Cell::Occupied(anti));
        board
    }

    pub fn columns(&self) -> u8 {
        self.columns
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn contains(&self, col: i32, row: i32) -> bool {
        (0..self.columns as i32).contains(&col) && (0..self.rows as i32).contains(&row)
    }

    /// Returns the cell at `(col, row)`, or `None` when off-board.
    pub fn get(&self, col: i32, row: i32) -> Option<Cell> {
        if self.contains(col, row) {
            Some(self.cells[self.index(col as usize, row as usize)])
        } else {
            None
        }
    }

    /// Returns the cell at `pos`, or `None` when off-board.
    pub fn at(&self, pos: Position) -> Option<Cell> {
        self.get(pos.col as i32, pos.row as i32)
    }

    /// Panics if `pos` is off-board; callers check with `contains` first.
    pub(crate) fn cell(&self, pos: Position) -> Cell {
        self.cells[self.index(pos.col as usize, pos.row as usize)]
    }

    pub(crate) fn set(&mut self, pos: Position, cell: Cell) {
        let idx = self.index(pos.col as usize, pos.row as usize);
        self.cells[idx] = cell;
    }

    /// Row-major view of the cells.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.columns).map(move |col| Position::new(col, row)))
    }

    pub fn empty_cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.positions().filter(|&pos| self.cell(pos).is_empty())
    }

    pub fn count(&self, color: Color) -> usize {
        self.cells
            .iter()
            .filter(|cell| cell.color() == Some(color))
            .count()
    }

    /// Returns `(black_count, white_count)`.
    pub fn counts(&self) -> (usize, usize) {
        (self.count(Color::Black), self.count(Color::White))
    }

    /// Returns the number of empty squares.
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_empty()).count()
    }

    pub fn corners(&self) -> [Position; 4] {
        let (last_col, last_row) = (self.columns - 1, self.rows - 1);
        [
            Position::new(0, 0),
            Position::new(0, last_row),
            Position::new(last_col, 0),
            Position::new(last_col, last_row),
        ]
    }

    pub fn is_corner(&self, pos: Position) -> bool {
        (pos.col == 0 || pos.col == self.columns - 1) && (pos.row == 0 || pos.row == self.rows - 1)
    }

    /// True for any square on the outer ring, corners included.
    pub fn is_edge(&self, pos: Position) -> bool {
        pos.col == 0 || pos.row == 0 || pos.col == self.columns - 1 || pos.row == self.rows - 1
    }

    /// Converts board to row-major codes where 0=empty, 1=black, 2=white.
    pub fn to_array(&self) -> Vec<u8> {
        self.cells.iter().map(|cell| cell.code()).collect()
    }

    /// Same geometry with every disk swapped to the other color.
    pub fn inverted(&self) -> Self {
        let cells = self
            .cells
            .iter()
            .map(|cell| match cell {
                Cell::Empty => Cell::Empty,
                Cell::Occupied(color) => Cell::Occupied(color.opposite()),
            })
            .collect();
        Self {
            columns: self.columns,
            rows: self.rows,
            cells,
        }
    }

    fn index(&self, col: usize, row: usize) -> usize {
        row * self.columns as usize + col
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::seeded(DEFAULT_COLUMNS, DEFAULT_ROWS, Color::White)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for col in 0..self.columns {
                let ch = match self.cell(Position::new(col, row)) {
                    Cell::Empty => '.',
                    Cell::Occupied(Color::Black) => 'B',
                    Cell::Occupied(Color::White) => 'W',
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
