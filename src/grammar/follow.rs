/*
    This module computes FOLLOW sets
*/

use std::collections::{BTreeMap, BTreeSet};
use std::iter;

use log::{debug, trace};

use super::{FirstSets, Grammar, Symbol, SymbolSet, EPSILON};

/// Which occurrences of a symbol inside one rule body contribute to its
/// FOLLOW set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Occurrences {
    /// Only the leftmost occurrence in each body.
    #[default]
    First,
    /// Every occurrence in each body.
    All,
}

/// FOLLOW sets of every symbol in a grammar.
pub struct FollowSets {
    /// Mapping from symbols to FOLLOW sets.
    map: BTreeMap<Symbol, SymbolSet>,
}

impl FollowSets {
    /// Compute all FOLLOW sets of the grammar.
    ///
    /// The start symbol is followed by the empty symbol. For a rule
    /// `H = α X β` where `H` is not `X`, FOLLOW(X) gains FIRST(β) without the
    /// empty symbol, and gains FOLLOW(H) when β is empty or can vanish. The
    /// second part is a dependency between FOLLOW sets, which is propagated
    /// until nothing changes.
    pub fn new(grammar: &Grammar, first_sets: &FirstSets, occurrences: Occurrences) -> Self {
        let mut map: BTreeMap<Symbol, SymbolSet> = BTreeMap::new();
        // Symbol -> heads whose FOLLOW set flows into it
        let mut inherits: BTreeMap<Symbol, BTreeSet<Symbol>> = BTreeMap::new();

        let rule_symbols = grammar
            .rules
            .iter()
            .flat_map(|rule| iter::once(&rule.head).chain(rule.body.iter()));
        for sym in grammar.symbols().iter().chain(rule_symbols) {
            map.entry(sym.clone()).or_default();
        }
        map.entry(grammar.start.clone())
            .or_default()
            .insert(EPSILON.to_string());

        for rule in &grammar.rules {
            for (pos, sym) in rule.body.iter().enumerate() {
                if *sym == rule.head {
                    continue;
                }
                if occurrences == Occurrences::First && rule.body[..pos].contains(sym) {
                    continue;
                }

                let after = &rule.body[pos + 1..];
                let mut first_of_after = first_sets.first(after);
                let first_of_after_had_empty = first_of_after.remove(EPSILON);
                if let Some(follow_set) = map.get_mut(sym) {
                    follow_set.append(&mut first_of_after);
                }

                if after.is_empty() || first_of_after_had_empty {
                    inherits
                        .entry(sym.clone())
                        .or_default()
                        .insert(rule.head.clone());
                }
            }
        }

        let mut passes = 0;
        let mut changed = true;
        while changed {
            changed = false;
            passes += 1;
            for (sym, heads) in &inherits {
                let mut inherited: SymbolSet = heads
                    .iter()
                    .filter_map(|head| map.get(head))
                    .flatten()
                    .cloned()
                    .collect();
                if let Some(follow_set) = map.get_mut(sym) {
                    let prev_cardinality = follow_set.len();
                    follow_set.append(&mut inherited);
                    if follow_set.len() != prev_cardinality {
                        trace!("FOLLOW({}) grew to {} symbols", sym, follow_set.len());
                        changed = true;
                    }
                }
            }
        }
        debug!("FOLLOW sets settled after {} passes over {} dependencies", passes, inherits.len());

        FollowSets { map }
    }

    /// Returns the FOLLOW set of every symbol used by the grammar.
    pub fn follow_sets(&self) -> &BTreeMap<Symbol, SymbolSet> {
        &self.map
    }

    /// Returns the FOLLOW set of `symbol`. A symbol the grammar never uses is
    /// followed by nothing. The start symbol always has an entry.
    pub fn follow(&self, symbol: &str) -> SymbolSet {
        self.map.get(symbol).cloned().unwrap_or_default()
    }
}
