//! Move legality, flip propagation and the termination predicate.

use crate::board::Board;
use crate::error::{InvalidMoveReason, ReversiError, Result};
use crate::types::{Cell, Color, FlipSet, Position};

/// `(dcol, drow)` steps: N, NE, E, SE, S, SW, W, NW.
const DIRECTIONS: [(i32, i32); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// Returns the disks `color` would flip by playing `(col, row)`.
/// Empty when the move is illegal, including off-board and occupied targets.
pub fn flips_for(board: &Board, color: Color, col: i32, row: i32) -> FlipSet {
    match board.get(col, row) {
        Some(Cell::Empty) => {}
        _ => return FlipSet::new(),
    }

    let mut flips = FlipSet::new();
    for (dc, dr) in DIRECTIONS {
        collect_run(board, color, col, row, dc, dr, &mut flips);
    }
    flips
}

/// Appends the opposing run between `(col, row)` and the first own disk along `(dc, dr)`.
fn collect_run(
    board: &Board,
    color: Color,
    col: i32,
    row: i32,
    dc: i32,
    dr: i32,
    flips: &mut FlipSet,
) {
    let start = flips.len();
    let (mut c, mut r) = (col + dc, row + dr);

    while let Some(cell) = board.get(c, r) {
        match cell {
            Cell::Occupied(owner) if owner == color => {
                // Anchored. An anchor directly adjacent leaves the run empty.
                return;
            }
            Cell::Occupied(_) => flips.push(Position::new(c as u8, r as u8)),
            Cell::Empty => break,
        }
        c += dc;
        r += dr;
    }

    // Edge or gap reached before an anchor.
    flips.truncate(start);
}

pub fn is_legal(board: &Board, color: Color, col: i32, row: i32) -> bool {
    !flips_for(board, color, col, row).is_empty()
}

/// Places a disk for `color` and flips captured disks. Returns the flipped cells.
/// The board is untouched when the move is illegal.
pub fn apply_move(board: &mut Board, color: Color, col: i32, row: i32) -> Result<FlipSet> {
    let reason = match board.get(col, row) {
        None => Some(InvalidMoveReason::OutOfBounds),
        Some(Cell::Occupied(_)) => Some(InvalidMoveReason::Occupied),
        Some(Cell::Empty) => None,
    };
    if let Some(reason) = reason {
        return Err(ReversiError::invalid_move(col, row, reason));
    }

    let flips = flips_for(board, color, col, row);
    if flips.is_empty() {
        return Err(ReversiError::invalid_move(
            col,
            row,
            InvalidMoveReason::NoFlips,
        ));
    }

    board.set(Position::new(col as u8, row as u8), Cell::Occupied(color));
    for &pos in &flips {
        board.set(pos, Cell::Occupied(color));
    }

    Ok(flips)
}

/// Legal targets for `color`, scanned row-major.
pub fn legal_moves(board: &Board, color: Color) -> Vec<Position> {
    board
        .empty_cells()
        .filter(|pos| is_legal(board, color, pos.col as i32, pos.row as i32))
        .collect()
}

pub fn has_legal_move(board: &Board, color: Color) -> bool {
    board
        .empty_cells()
        .any(|pos| is_legal(board, color, pos.col as i32, pos.row as i32))
}

/// The game is over when the board is full, one color has been wiped out,
/// or the last empty cell is playable by neither color.
pub fn is_finished(board: &Board) -> bool {
    let empty = board.empty_count();
    if empty == 0 {
        return true;
    }

    let (black, white) = board.counts();
    if black == 0 || white == 0 {
        return true;
    }

    if empty == 1
        && let Some(last) = board.empty_cells().next()
    {
        let (col, row) = (last.col as i32, last.row as i32);
        return !is_legal(board, Color::Black, col, row) && !is_legal(board, Color::White, col, row);
    }

    false
}
