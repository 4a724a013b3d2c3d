//! Board keys for memoizing positions.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::board::Board;

/// Content key of a board: dimensions followed by row-major cell codes.
///
/// Hashing uses only the CRC32 digest; equality compares the full encoding,
/// so digest collisions never merge distinct positions.
#[derive(Clone)]
pub struct BoardKey {
    digest: u32,
    encoded: Box<[u8]>,
}

impl BoardKey {
    pub fn digest(&self) -> u32 {
        self.digest
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.encoded
    }
}

/// Canonicalizes `board` into a lookup key. Cells are encoded 0=empty, 1=black, 2=white.
pub fn hash(board: &Board) -> BoardKey {
    let mut encoded = Vec::with_capacity(2 + board.cells().len());
    encoded.push(board.columns());
    encoded.push(board.rows());
    encoded.extend(board.cells().iter().map(|cell| cell.code()));

    BoardKey {
        digest: crc32fast::hash(&encoded),
        encoded: encoded.into_boxed_slice(),
    }
}

impl PartialEq for BoardKey {
    fn eq(&self, other: &Self) -> bool {
        self.digest == other.digest && self.encoded == other.encoded
    }
}

impl Eq for BoardKey {}

impl Hash for BoardKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.digest.hash(state);
    }
}

impl fmt::Debug for BoardKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BoardKey({:#010x})", self.digest)
    }
}

impl fmt::Display for BoardKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.digest)
    }
}
