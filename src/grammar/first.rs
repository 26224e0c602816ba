/*
    This module computes FIRST sets
*/

use std::collections::BTreeMap;

use log::{debug, trace};

use super::{Grammar, Symbol, SymbolSet, EPSILON};

/// FIRST sets of every nonterminal in a grammar.
///
/// For a rule `N = X1 X2 ... Xk`, FIRST(N) gains FIRST(Xi) without the empty
/// symbol for each `Xi` whose predecessors can all vanish, and gains the
/// empty symbol itself when every `Xi` can vanish. Occurrences of `N` in its
/// own body are skipped, so `N = N a` contributes FIRST(a).
///
/// The sets are the least solution of these equations, found by applying
/// every rule until a whole pass adds nothing. This terminates on grammars
/// with cycles through several nonterminals.
pub struct FirstSets<'a> {
    grammar: &'a Grammar,
    map: BTreeMap<Symbol, SymbolSet>,
}

impl<'a> FirstSets<'a> {
    /// Compute all FIRST sets of the grammar.
    pub fn new(grammar: &'a Grammar) -> Self {
        let mut this = FirstSets {
            grammar,
            map: BTreeMap::new(),
        };

        for non_terminal in &grammar.non_terminals {
            this.map.insert(non_terminal.clone(), SymbolSet::new());
        }
        for rule in &grammar.rules {
            this.map.entry(rule.head.clone()).or_default();
        }

        let mut lookahead = SymbolSet::new();
        let mut passes = 0;
        let mut changed = true;
        while changed {
            changed = false;
            passes += 1;
            for rule in &grammar.rules {
                let body = rule.body.iter().filter(|&sym| *sym != rule.head);
                if this.first_set_collect(body, &mut lookahead) {
                    lookahead.insert(EPSILON.to_string());
                }

                // Every head got an entry above
                if let Some(first_set) = this.map.get_mut(&rule.head) {
                    let prev_cardinality = first_set.len();
                    first_set.append(&mut lookahead);
                    if first_set.len() != prev_cardinality {
                        trace!("FIRST({}) grew to {} symbols", rule.head, first_set.len());
                        changed = true;
                    }
                }
                lookahead.clear();
            }
        }
        debug!("FIRST sets settled after {} passes over {} rules", passes, grammar.rules.len());

        this
    }

    /// Returns the FIRST set of every nonterminal.
    pub fn first_sets(&self) -> &BTreeMap<Symbol, SymbolSet> {
        &self.map
    }

    /// Calculates the FIRST set of a string of symbols.
    ///
    /// The empty string gives the empty set rather than `{ε}`.
    pub fn first(&self, sequence: &[Symbol]) -> SymbolSet {
        let mut result = SymbolSet::new();
        if sequence.is_empty() {
            return result;
        }
        if self.first_set_collect(sequence, &mut result) {
            result.insert(EPSILON.to_string());
        }
        result
    }

    /// Adds the non-empty FIRST symbols of `sequence` to `lookahead`, scanning
    /// until a symbol that cannot vanish. Returns true if every symbol could.
    fn first_set_collect<'s, I>(&self, sequence: I, lookahead: &mut SymbolSet) -> bool
    where
        I: IntoIterator<Item = &'s Symbol>,
    {
        for sym in sequence {
            let nullable = if sym == EPSILON {
                true
            } else if self.grammar.has_terminal(sym) {
                lookahead.insert(sym.clone());
                false
            } else {
                match self.map.get(sym) {
                    // Not a terminal and never a head: derives nothing
                    None => false,
                    Some(set) => {
                        lookahead.extend(set.iter().filter(|&s| s != EPSILON).cloned());
                        set.contains(EPSILON)
                    }
                }
            };
            if !nullable {
                return false;
            }
        }
        true
    }
}
