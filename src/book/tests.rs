use super::*;

fn sq(name: &str) -> Square {
    Square::parse(name).unwrap()
}

fn three_colliding() -> Vec<BookFact> {
    vec![
        BookFact::new(5, sq("e2"), sq("e4")),
        BookFact::new(5, sq("d2"), sq("d4")),
        BookFact::new(261, sq("g1"), sq("f3")),
    ]
}

#[test]
fn colliding_facts_share_one_chain_in_insertion_order() {
    let book = compile(&three_colliding(), 256, ChainOrder::FirstIsHead).unwrap();
    assert_eq!(book.chain(5), vec![0, 1, 2]);
    assert_eq!(book.entries()[0].entry.from, sq("e2"));
    assert_eq!(book.entries()[1].entry.from, sq("d2"));
    assert_eq!(book.entries()[2].entry.from, sq("g1"));
    assert_eq!(book.entries()[0].next, 1);
    assert_eq!(book.entries()[1].next, 2);
    assert_eq!(book.entries()[2].next, CHAIN_END);
    for (bucket, slot) in book.slots().iter().enumerate() {
        if bucket == 5 {
            assert_eq!(*slot, 0);
        } else {
            assert_eq!(*slot, EMPTY_SLOT);
        }
    }
}

#[test]
fn last_is_head_reverses_each_chain() {
    let book = compile(&three_colliding(), 256, ChainOrder::LastIsHead).unwrap();
    assert_eq!(book.chain(5), vec![0, 1, 2]);
    assert_eq!(book.entries()[0].entry.from, sq("g1"));
    assert_eq!(book.entries()[2].entry.from, sq("e2"));
    assert_eq!(book.entries()[2].next, CHAIN_END);
}

#[test]
fn buckets_pack_in_slot_order() {
    let facts = vec![
        BookFact::new(0x0203, sq("e2"), sq("e4")),
        BookFact::new(0x0101, sq("d2"), sq("d4")),
        BookFact::new(0x0403, sq("c2"), sq("c4")),
    ];
    let book = compile(&facts, 256, ChainOrder::FirstIsHead).unwrap();
    assert_eq!(book.slots()[1], 0);
    assert_eq!(book.slots()[3], 1);
    assert_eq!(book.chain(3), vec![1, 2]);
    assert_eq!(book.entries()[0].next, CHAIN_END);
}

#[test]
fn probe_matches_high_byte() {
    let book = compile(&three_colliding(), 256, ChainOrder::FirstIsHead).unwrap();
    let hits = book.probe(5);
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].to, sq("e4"));
    assert_eq!(book.probe(261).len(), 1);
    assert!(book.probe(6).is_empty());
}

#[test]
fn byte_layout() {
    let book = compile(&three_colliding(), 256, ChainOrder::FirstIsHead).unwrap();
    let bytes = book.to_bytes();
    assert_eq!(bytes.len(), 8 + 2 * 256 + 4 * 3);
    assert_eq!(bytes.len(), book.byte_size());
    assert_eq!(&bytes[0..8], &[0x0c, 0xb0, 0x01, 3, 0, 0x00, 0x01, 0x00]);
    // slot 4 empty, slot 5 -> entry 0
    assert_eq!(&bytes[8 + 8..8 + 12], &[0xff, 0xff, 0x00, 0x00]);
    let entries = &bytes[8 + 512..];
    assert_eq!(&entries[0..4], &[0x00, 0x64, 0x44, 1]);
    assert_eq!(&entries[8..12], &[0x01, 0x76, 0x55, CHAIN_END]);
}

#[test]
fn identical_input_gives_identical_bytes() {
    let a = compile(&three_colliding(), 64, ChainOrder::LastIsHead).unwrap();
    let b = compile(&three_colliding(), 64, ChainOrder::LastIsHead).unwrap();
    assert_eq!(a.to_bytes(), b.to_bytes());
}

#[test]
fn empty_book_is_all_sentinels() {
    let book = compile(&[], 16, ChainOrder::FirstIsHead).unwrap();
    assert!(book.is_empty());
    assert!(book.slots().iter().all(|s| *s == EMPTY_SLOT));
    assert_eq!(book.to_bytes().len(), 8 + 32);
}

#[test]
fn bad_table_sizes() {
    assert_eq!(
        compile(&three_colliding(), 0, ChainOrder::FirstIsHead),
        Err(CompileError::BadTableSize(0))
    );
    assert_eq!(
        compile(&three_colliding(), 70_000, ChainOrder::FirstIsHead),
        Err(CompileError::BadTableSize(70_000))
    );
}

#[test]
fn links_past_the_sentinel_halt() {
    // one bucket, 300 entries: the link to entry 255 cannot be written
    let facts: Vec<BookFact> = (0..300).map(|_| BookFact::new(7, sq("a2"), sq("a3"))).collect();
    assert_eq!(
        compile(&facts, 256, ChainOrder::FirstIsHead),
        Err(CompileError::LinkOverflow { index: 255 })
    );

    // spread over many buckets the last entries can sit past 255 as long
    // as nothing links to them
    let spread: Vec<BookFact> = (0..300u16).map(|h| BookFact::new(h, sq("a2"), sq("a3"))).collect();
    let book = compile(&spread, 512, ChainOrder::FirstIsHead).unwrap();
    assert_eq!(book.len(), 300);
    assert!(book.entries().iter().all(|e| e.next == CHAIN_END));
}

#[test]
fn budget_check() {
    let book = compile(&three_colliding(), 256, ChainOrder::FirstIsHead).unwrap();
    assert!(book.check_budget(532).is_ok());
    assert_eq!(
        book.check_budget(531),
        Err(CompileError::OverBudget { size: 532, budget: 531 })
    );
}
