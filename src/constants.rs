// src/constants.rs

// Zobrist generator (must match the engine's ZobristSeed / feedback mask)
pub const ZOBRIST_SEED: u16 = 0xA7CE;
pub const LFSR_FEEDBACK: u16 = 0xB400;

// Random table shape
pub const PIECE_KINDS: usize = 12;
pub const BOARD_SQUARES: usize = 64;
pub const CASTLING_RIGHTS: usize = 4;
pub const EP_FILES: usize = 8;

// Book format
pub const BOOK_MAGIC: u16 = 0xB00C;
pub const BOOK_VERSION: u8 = 0x01;
pub const BOOK_FLAGS: u8 = 0x00;
pub const HEADER_SIZE: usize = 8;
pub const SLOT_SIZE: usize = 2;
pub const ENTRY_SIZE: usize = 4;
pub const EMPTY_SLOT: u16 = 0xFFFF;
pub const CHAIN_END: u8 = 0xFF;

// Memory reserved for the book on the target: $5B00-$BFFF
pub const BOOK_LOAD_ADDRESS: u16 = 0x5B00;
pub const DEFAULT_BUDGET_BYTES: usize = 0xC000 - BOOK_LOAD_ADDRESS as usize;

// Build defaults
pub const DEFAULT_TABLE_SIZE: usize = 256;
pub const DEFAULT_MAX_ENTRIES: usize = 255;
pub const DEFAULT_MAX_PLY: u32 = 15;
pub const MAX_MOVES_PER_POSITION: usize = 3;

// Graph walk
pub const EXPAND_CHUNK: usize = 256;
pub const PROGRESS_EVERY: usize = 500;

// Polyglot
pub const POLYGLOT_RECORD_SIZE: usize = 16;
