// src/walker/mod.rs
//
// Producers of book facts: replaying fixed opening lines, or walking a
// move table breadth-first.

pub mod graph;
pub mod lines;
pub mod openings;
pub mod polyglot;
