// src/zobrist/prng.rs

use crate::constants::{LFSR_FEEDBACK, ZOBRIST_SEED};
use serde::{Deserialize, Serialize};

/// Which byte-extraction scheme the engine build uses.
///
/// The two are separate binary contracts: a book generated with one
/// variant hashes differently from the other on every position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum PrngVariant {
    /// One register shift per byte; the byte is the low half of the state.
    Direct,
    /// Eight register shifts per byte; the byte is low XOR high.
    Mixed,
}

/// 16-bit Galois LFSR, bit-for-bit the generator in the engine's zobrist.asm.
#[derive(Clone, Debug)]
pub struct Lfsr {
    state: u16,
    variant: PrngVariant,
}

impl Lfsr {
    pub fn new(variant: PrngVariant) -> Self {
        Self {
            state: ZOBRIST_SEED,
            variant,
        }
    }

    fn shift(&mut self) {
        let lsb = self.state & 1;
        self.state >>= 1;
        if lsb != 0 {
            self.state ^= LFSR_FEEDBACK;
        }
    }

    pub fn next_byte(&mut self) -> u8 {
        match self.variant {
            PrngVariant::Direct => {
                self.shift();
                self.state as u8
            }
            PrngVariant::Mixed => {
                for _ in 0..8 {
                    self.shift();
                }
                let [lo, hi] = self.state.to_le_bytes();
                lo ^ hi
            }
        }
    }

    /// Low byte is drawn first, matching the 6502 table fill loop.
    pub fn next_word(&mut self) -> u16 {
        let lo = self.next_byte();
        let hi = self.next_byte();
        u16::from_le_bytes([lo, hi])
    }
}

impl Iterator for Lfsr {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        Some(self.next_byte())
    }
}
