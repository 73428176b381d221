// src/walker/graph.rs

use crate::board::{Kind, Position, Square};
use crate::book::BookFact;
use crate::constants::{EXPAND_CHUNK, PROGRESS_EVERY};
use crate::zobrist::RandomTables;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

/// A move offered by a [`MoveTable`], already known to be legal, together
/// with the table's own state after playing it.
#[derive(Clone, Debug)]
pub struct Candidate<N> {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Kind>,
    pub next: N,
}

/// Source of book moves for the graph walk.
///
/// Implementations keep whatever position model they need to look moves up
/// (the walker never looks inside `Node`) and return candidates best first.
pub trait MoveTable: Sync {
    type Node: Clone + Send + Sync;

    fn root(&self) -> Self::Node;

    /// Legal book moves at `node`, by descending weight. Ties keep the
    /// table's own order. Moves the table cannot decode are left out.
    fn candidates(&self, node: &Self::Node) -> Vec<Candidate<Self::Node>>;
}

#[derive(Clone, Copy, Debug)]
pub struct GraphLimits {
    pub max_ply: u32,
    pub max_entries: usize,
    pub max_moves_per_position: usize,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct WalkStats {
    pub nodes_expanded: usize,
    pub nodes_queued: usize,
    pub unique_positions: usize,
    pub multi_move_positions: usize,
}

#[derive(Clone, Debug, Default)]
pub struct GraphOutcome {
    pub facts: Vec<BookFact>,
    pub stats: WalkStats,
}

struct Frontier<N> {
    node: N,
    position: Position,
    ply: u32,
}

struct Expansion<N> {
    hash: u16,
    children: Vec<(Square, Square, Frontier<N>)>,
}

fn expand<T: MoveTable>(table: &T, tables: &RandomTables, at: &Frontier<T::Node>) -> Option<Expansion<T::Node>> {
    let candidates = table.candidates(&at.node);
    if candidates.is_empty() {
        return None;
    }

    let children = candidates
        .into_iter()
        .filter_map(|c| match at.position.apply(c.from, c.to, c.promotion) {
            Ok(position) => Some((
                c.from,
                c.to,
                Frontier {
                    node: c.next,
                    position,
                    ply: at.ply + 1,
                },
            )),
            Err(e) => {
                debug!(from = %c.from, to = %c.to, "book move skipped: {e}");
                None
            }
        })
        .collect();

    Some(Expansion {
        hash: tables.hash(&at.position),
        children,
    })
}

/// Breadth-first walk from the start position.
///
/// Every candidate is queued for the next ply. It is also recorded unless
/// its (hash, from, to) is already in the book or its position already
/// holds `max_moves_per_position` moves. Stops when the queue drains or
/// `max_entries` facts exist; positions at `max_ply` are not expanded.
///
/// Each ply is expanded in parallel chunks and committed in queue order,
/// so the result is the same as a one-node-at-a-time walk.
pub fn walk<T: MoveTable>(table: &T, tables: &RandomTables, limits: &GraphLimits) -> GraphOutcome {
    let mut facts = Vec::new();
    let mut stats = WalkStats::default();
    let mut recorded: HashSet<(u16, Square, Square)> = HashSet::new();
    let mut per_hash: HashMap<u16, usize> = HashMap::new();

    let mut layer = vec![Frontier {
        node: table.root(),
        position: Position::startpos(),
        ply: 0,
    }];

    'walk: while !layer.is_empty() && facts.len() < limits.max_entries {
        let mut next_layer = Vec::new();

        for chunk in layer.chunks(EXPAND_CHUNK) {
            let expansions: Vec<Option<Expansion<T::Node>>> = chunk
                .par_iter()
                .map(|at| {
                    if at.ply >= limits.max_ply {
                        None
                    } else {
                        expand(table, tables, at)
                    }
                })
                .collect();

            for expansion in expansions.into_iter().flatten() {
                stats.nodes_expanded += 1;
                let hash = expansion.hash;

                for (from, to, child) in expansion.children {
                    let stored = per_hash.entry(hash).or_default();
                    if *stored >= limits.max_moves_per_position || !recorded.insert((hash, from, to)) {
                        next_layer.push(child);
                        stats.nodes_queued += 1;
                        continue;
                    }

                    *stored += 1;
                    facts.push(BookFact::new(hash, from, to));
                    if facts.len() % PROGRESS_EVERY == 0 {
                        debug!("added {} entries", facts.len());
                    }
                    if facts.len() >= limits.max_entries {
                        break 'walk;
                    }

                    next_layer.push(child);
                    stats.nodes_queued += 1;
                }
            }
        }

        layer = next_layer;
    }

    stats.unique_positions = per_hash.values().filter(|n| **n > 0).count();
    stats.multi_move_positions = per_hash.values().filter(|n| **n > 1).count();
    info!(
        entries = facts.len(),
        positions = stats.unique_positions,
        multi_move = stats.multi_move_positions,
        "BFS complete"
    );

    GraphOutcome { facts, stats }
}
