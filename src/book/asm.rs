// src/book/asm.rs
//
// KickAssembler source for the engine build. Same bytes as `to_bytes`,
// spelled as directives under the labels opening_moves.asm expects.

use super::CompiledBook;
use crate::constants::{CHAIN_END, EMPTY_SLOT, ENTRY_SIZE, SLOT_SIZE};
use std::io::{self, Write};

pub struct AsmOptions<'a> {
    /// Tool or input named in the banner.
    pub source: &'a str,
    /// `*=$xxxx` placement, or `*=*` to follow the previous segment.
    pub origin: Option<u16>,
}

pub fn write_asm<W: Write>(book: &CompiledBook, opts: &AsmOptions, out: &mut W) -> io::Result<()> {
    let n = book.len();
    let t = book.table_size();

    writeln!(out, "// Auto-generated Opening Book Data")?;
    writeln!(out, "// Source: {}", opts.source)?;
    writeln!(out, "// Entries: {n} | Table: {t} slots")?;
    writeln!(out, "// DO NOT EDIT - regenerate from source")?;
    writeln!(out)?;
    writeln!(out, "#importonce")?;
    writeln!(out)?;
    match opts.origin {
        Some(addr) => writeln!(out, "*=${addr:04X} \"Generated Opening Book\"")?,
        None => writeln!(out, "*=* \"Generated Opening Book\"")?,
    }
    writeln!(out)?;
    writeln!(out, ".const GEN_BOOK_MAGIC = ${:04X}", crate::constants::BOOK_MAGIC)?;
    writeln!(out, ".const GEN_BOOK_VERSION = ${:02X}", crate::constants::BOOK_VERSION)?;
    writeln!(out, ".const GEN_BOOK_CHAIN_END = ${CHAIN_END:02X}")?;
    writeln!(out)?;
    writeln!(out, "GeneratedBook:")?;
    writeln!(out, "  .word GEN_BOOK_MAGIC")?;
    writeln!(out, "  .byte GEN_BOOK_VERSION")?;
    writeln!(out, "  .word {n}")?;
    writeln!(out, "  .word {t}")?;
    writeln!(out, "  .byte $00")?;
    writeln!(out)?;

    writeln!(out, "// Hash table ({t} * {SLOT_SIZE} = {} bytes)", t * SLOT_SIZE)?;
    writeln!(out, "GeneratedBookHashTable:")?;
    for slot in book.slots() {
        if *slot == EMPTY_SLOT {
            writeln!(out, "  .word $FFFF")?;
        } else {
            writeln!(out, "  .word {slot}")?;
        }
    }
    writeln!(out)?;

    writeln!(out, "// Entries ({n} * {ENTRY_SIZE} = {} bytes)", n * ENTRY_SIZE)?;
    writeln!(out, "// Format: HashHi, From (0x88), To (0x88), Next")?;
    writeln!(out, "GeneratedBookEntries:")?;
    for packed in book.entries() {
        let e = packed.entry;
        write!(
            out,
            "  .byte ${:02x}, ${:02x}, ${:02x}, ",
            e.hash_hi,
            e.from.to_0x88(),
            e.to.to_0x88()
        )?;
        if packed.next == CHAIN_END {
            writeln!(out, "GEN_BOOK_CHAIN_END")?;
        } else {
            writeln!(out, "{}", packed.next)?;
        }
    }
    writeln!(out)?;
    writeln!(out, "GeneratedBookEnd:")?;
    Ok(())
}
