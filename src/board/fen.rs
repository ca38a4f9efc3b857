use std::str::FromStr;

use super::error::{FenError, MoveParseError};
use super::{CastlingRights, Color, Move, Piece, Position, Square};

/// Standard starting position in FEN
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl Position {
    /// Parse a position from FEN notation.
    ///
    /// Only the placement, side, castling and en-passant fields are required;
    /// the clocks default to zero. Bitboards, phase and hash are derived from
    /// the parsed grid.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let mut position = Position::empty();
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if parts.len() < 4 {
            return Err(FenError::TooFewParts { found: parts.len() });
        }

        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::InvalidRank { rank: ranks.len() });
        }

        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx;
            let mut file = 0;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as usize;
                    continue;
                }
                let piece = Piece::from_char(c).ok_or(FenError::InvalidPiece { char: c })?;
                if file >= 8 {
                    return Err(FenError::BadFileCount {
                        rank: rank_idx,
                        files: file + 1,
                    });
                }
                let color = if c.is_ascii_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };
                position.grid[rank][file] = Some((color, piece));
                file += 1;
            }
            if file != 8 {
                return Err(FenError::BadFileCount {
                    rank: rank_idx,
                    files: file,
                });
            }
        }

        position.side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        };

        position.castling_rights = parse_castling(parts[2])?;

        if parts[3] != "-" {
            let invalid = || FenError::InvalidEnPassant {
                found: parts[3].to_string(),
            };
            let target: Square = parts[3].parse().map_err(|_| invalid())?;
            // the double-pushing side is the one that just moved
            let pusher = position.side_to_move.opponent();
            let expected_rank = match pusher {
                Color::White => 2,
                Color::Black => 5,
            };
            if target.rank() != expected_rank {
                return Err(invalid());
            }
            position.en_passant[pusher.index()] = Some(target.file() as u8);
        }

        if let Some(clock) = parts.get(4) {
            position.halfmove_clock = clock.parse().map_err(|_| FenError::InvalidClock {
                found: (*clock).to_string(),
            })?;
        }
        if let Some(fullmove) = parts.get(5) {
            fullmove
                .parse::<u32>()
                .map_err(|_| FenError::InvalidClock {
                    found: (*fullmove).to_string(),
                })?;
        }

        position.rebuild_derived();

        for color in Color::BOTH {
            let found = position.pieces(color, Piece::King).popcount();
            if found != 1 {
                return Err(FenError::KingCount { color, found });
            }
        }

        Ok(position)
    }

    /// Serialise the position to FEN. The full-move number is always 1.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut rows: Vec<String> = Vec::with_capacity(8);
        for rank in (0..8).rev() {
            let mut row = String::new();
            let mut empty = 0;
            for file in 0..8 {
                match self.grid[rank][file] {
                    Some((color, piece)) => {
                        if empty > 0 {
                            row.push_str(&empty.to_string());
                            empty = 0;
                        }
                        row.push(piece.to_fen_char(color));
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            rows.push(row);
        }

        let active = match self.side_to_move {
            Color::White => "w",
            Color::Black => "b",
        };

        let mut castling = String::new();
        for (color, kingside, c) in [
            (Color::White, true, 'K'),
            (Color::White, false, 'Q'),
            (Color::Black, true, 'k'),
            (Color::Black, false, 'q'),
        ] {
            if self.castling_rights.has(color, kingside) {
                castling.push(c);
            }
        }
        if castling.is_empty() {
            castling.push('-');
        }

        let pusher = self.side_to_move.opponent();
        let ep = self.en_passant_file(pusher).map_or_else(
            || "-".to_string(),
            |file| {
                let rank = match pusher {
                    Color::White => 2,
                    Color::Black => 5,
                };
                Square(rank, file).to_string()
            },
        );

        format!(
            "{} {} {} {} {} 1",
            rows.join("/"),
            active,
            castling,
            ep,
            self.halfmove_clock
        )
    }

    /// Parse a move in long algebraic notation (`e2e4`, `e7e8q`) against the
    /// legal moves of this position.
    ///
    /// A back-rank pawn move without a promotion letter resolves to the queen
    /// promotion.
    ///
    /// # Example
    /// ```
    /// use chess_search::board::Position;
    ///
    /// let position = Position::new();
    /// let mv = position.parse_move("e2e4").unwrap();
    /// assert_eq!(mv.to_string(), "e2e4");
    /// ```
    pub fn parse_move(&self, notation: &str) -> Result<Move, MoveParseError> {
        if !notation.is_ascii() || notation.len() < 4 || notation.len() > 5 {
            return Err(MoveParseError::InvalidLength {
                len: notation.len(),
            });
        }

        let invalid_square = || MoveParseError::InvalidSquare {
            notation: notation.to_string(),
        };
        let from: Square = notation[0..2].parse().map_err(|_| invalid_square())?;
        let to: Square = notation[2..4].parse().map_err(|_| invalid_square())?;

        let promotion = match notation[4..].chars().next() {
            Some(c) => match Piece::from_char(c) {
                Some(piece @ (Piece::Knight | Piece::Bishop | Piece::Rook | Piece::Queen)) => {
                    Some(piece)
                }
                _ => return Err(MoveParseError::InvalidPromotion { char: c }),
            },
            None => None,
        };

        let wanted = promotion.or(Some(Piece::Queen));
        self.legal_moves()
            .iter()
            .copied()
            .find(|mv| {
                mv.from() == from
                    && mv.to() == to
                    && (mv.promotion() == promotion || mv.promotion() == wanted)
            })
            .ok_or_else(|| MoveParseError::IllegalMove {
                notation: notation.to_string(),
            })
    }

    /// Parse a long-algebraic move and return the resulting position.
    pub fn play(&self, notation: &str) -> Result<Position, MoveParseError> {
        let mv = self.parse_move(notation)?;
        Ok(self.apply_move(mv))
    }
}

fn parse_castling(field: &str) -> Result<CastlingRights, FenError> {
    let mut rights = CastlingRights::none();
    for c in field.chars() {
        match c {
            'K' => rights.set(Color::White, true),
            'Q' => rights.set(Color::White, false),
            'k' => rights.set(Color::Black, true),
            'q' => rights.set(Color::Black, false),
            '-' => {}
            _ => return Err(FenError::InvalidCastling { char: c }),
        }
    }
    Ok(rights)
}

impl FromStr for Position {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::from_fen(s)
    }
}
