//! Errors raised while reading positions, squares and moves from text.

use std::error::Error;
use std::fmt;

use super::Color;

/// Why a FEN string could not be turned into a [`Position`](super::Position).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// Fewer than the four mandatory fields
    TooFewParts { found: usize },
    InvalidPiece { char: char },
    InvalidCastling { char: char },
    /// Side field other than `w` or `b`
    InvalidSideToMove { found: String },
    /// Unparseable target square, or one on the wrong rank for the side that just moved
    InvalidEnPassant { found: String },
    /// Placement field does not have eight ranks
    InvalidRank { rank: usize },
    /// A rank describes more or fewer than eight files
    BadFileCount { rank: usize, files: usize },
    InvalidClock { found: String },
    /// A side does not have exactly one king
    KingCount { color: Color, found: u32 },
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::TooFewParts { found } => {
                write!(f, "FEN has {found} fields, at least 4 are required")
            }
            FenError::InvalidPiece { char } => write!(f, "unknown piece letter '{char}'"),
            FenError::InvalidCastling { char } => write!(f, "unknown castling flag '{char}'"),
            FenError::InvalidSideToMove { found } => {
                write!(f, "side to move must be 'w' or 'b', got '{found}'")
            }
            FenError::InvalidEnPassant { found } => write!(f, "bad en-passant field '{found}'"),
            FenError::InvalidRank { rank } => {
                write!(f, "placement has {rank} ranks instead of 8")
            }
            FenError::BadFileCount { rank, files } => {
                write!(f, "rank field {rank} covers {files} files instead of 8")
            }
            FenError::InvalidClock { found } => write!(f, "move counter '{found}' is not a number"),
            FenError::KingCount { color, found } => {
                write!(f, "{color} has {found} kings instead of 1")
            }
        }
    }
}

impl Error for FenError {}

/// Why a long-algebraic move could not be matched against a position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    /// Notation is not 4 or 5 ASCII characters
    InvalidLength { len: usize },
    InvalidSquare { notation: String },
    /// Promotion letter other than n, b, r or q
    InvalidPromotion { char: char },
    /// Well-formed, but no legal move matches
    IllegalMove { notation: String },
}

impl fmt::Display for MoveParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveParseError::InvalidLength { len } => {
                write!(f, "move notation has {len} characters, expected 4 or 5")
            }
            MoveParseError::InvalidSquare { notation } => {
                write!(f, "bad square in move '{notation}'")
            }
            MoveParseError::InvalidPromotion { char } => {
                write!(f, "cannot promote to '{char}'")
            }
            MoveParseError::IllegalMove { notation } => {
                write!(f, "'{notation}' is not legal here")
            }
        }
    }
}

impl Error for MoveParseError {}

/// Why a square could not be built from coordinates or notation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareError {
    RankOutOfBounds { rank: usize },
    FileOutOfBounds { file: usize },
    /// Not a file letter a-h followed by a rank digit 1-8
    InvalidNotation { notation: String },
}

impl fmt::Display for SquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquareError::RankOutOfBounds { rank } => write!(f, "rank index {rank} is off the board"),
            SquareError::FileOutOfBounds { file } => write!(f, "file index {file} is off the board"),
            SquareError::InvalidNotation { notation } => {
                write!(f, "'{notation}' is not a square")
            }
        }
    }
}

impl Error for SquareError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offending_input() {
        assert_eq!(
            FenError::TooFewParts { found: 2 }.to_string(),
            "FEN has 2 fields, at least 4 are required"
        );
        assert_eq!(
            FenError::KingCount { color: Color::Black, found: 0 }.to_string(),
            "Black has 0 kings instead of 1"
        );
        assert!(MoveParseError::IllegalMove { notation: "e2e5".into() }
            .to_string()
            .contains("e2e5"));
        assert!(SquareError::InvalidNotation { notation: "xyz".into() }
            .to_string()
            .contains("xyz"));
    }

    #[test]
    fn test_errors_box_into_dyn_error() {
        let errors: Vec<Box<dyn Error>> = vec![
            Box::new(FenError::InvalidRank { rank: 9 }),
            Box::new(MoveParseError::InvalidLength { len: 3 }),
            Box::new(SquareError::FileOutOfBounds { file: 10 }),
        ];
        assert!(errors.iter().all(|err| !err.to_string().is_empty()));
    }
}
