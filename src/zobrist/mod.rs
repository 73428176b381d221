// src/zobrist/mod.rs

pub mod hash;
pub mod prng;
pub mod tables;

pub use prng::{Lfsr, PrngVariant};
pub use tables::RandomTables;
