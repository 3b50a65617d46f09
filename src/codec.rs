// Save strings: a 4 byte big-endian score followed by every cell as a unary
// code (rank one-bits, then a zero-bit), packed MSB first and base64 encoded.
//
// Cells are written column by column, x outer and y inner. There is no version
// byte, so both sides must agree on GRID_SIZE.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::board::{Board, Rank};
use crate::error::CodecError;
use crate::{GRID_SIZE, MAX_RANK};

const SCORE_BYTES: usize = 4;
const CELLS: usize = GRID_SIZE * GRID_SIZE;

struct BitWriter {
    bytes: Vec<u8>,
    // bits already used in the last byte, 0 means a new byte is needed
    used: u8,
}

impl BitWriter {
    fn push(&mut self, bit: bool) {
        if self.used == 0 {
            self.bytes.push(0);
        }
        if bit {
            if let Some(last) = self.bytes.last_mut() {
                *last |= 0x80 >> self.used;
            }
        }
        self.used = (self.used + 1) % 8;
    }
}

/// Score header plus unary-coded cells, before the text encoding.
pub fn pack(score: u32, board: &Board) -> Vec<u8> {
    let mut writer = BitWriter {
        bytes: score.to_be_bytes().to_vec(),
        used: 0,
    };
    for column in board.cells() {
        for &rank in column {
            for _ in 0..rank {
                writer.push(true);
            }
            writer.push(false);
        }
    }
    writer.bytes
}

pub fn unpack(bytes: &[u8]) -> Result<(u32, Board), CodecError> {
    let Some((header, body)) = bytes.split_first_chunk::<SCORE_BYTES>() else {
        return Err(CodecError::MissingScore { len: bytes.len() });
    };
    let score = u32::from_be_bytes(*header);

    let mut board = Board::new();
    let mut cell = 0;
    let mut run: Rank = 0;
    let mut bits_read: usize = 0;
    'bytes: for &byte in body {
        for shift in (0..8).rev() {
            if cell == CELLS {
                break 'bytes;
            }
            bits_read += 1;
            if (byte >> shift) & 1 == 1 {
                if run == MAX_RANK {
                    return Err(CodecError::RankOutOfRange {
                        x: cell / GRID_SIZE,
                        y: cell % GRID_SIZE,
                        rank: run + 1,
                    });
                }
                run += 1;
            } else {
                board.set(cell / GRID_SIZE, cell % GRID_SIZE, run);
                run = 0;
                cell += 1;
            }
        }
    }
    if cell < CELLS {
        return Err(CodecError::Truncated { filled: cell });
    }

    // pad bits in the last byte are ignored, whole extra bytes are not
    let expected = SCORE_BYTES + bits_read.div_ceil(8);
    if bytes.len() != expected {
        return Err(CodecError::TrailingBytes {
            expected,
            actual: bytes.len(),
        });
    }
    Ok((score, board))
}

pub fn encode(score: u32, board: &Board) -> String {
    STANDARD.encode(pack(score, board))
}

/// Parses a save string. Nothing is returned unless the whole string is valid.
pub fn decode(save: &str) -> Result<(u32, Board), CodecError> {
    let bytes = STANDARD.decode(save)?;
    unpack(&bytes)
}
