/*
    This module is for storing grammars and querying their FIRST and FOLLOW sets
*/

mod first;
mod follow;

use std::collections::BTreeSet;

pub use first::FirstSets;
pub use follow::{FollowSets, Occurrences};

// The base unit in a grammar rule. Terminals and nonterminals are told apart
// by the grammar's declared sets, not by the symbol itself.
pub type Symbol = String;

// The empty derivation
pub const EPSILON: &str = "";

pub type SymbolSet = BTreeSet<Symbol>;

// The body of a rule
pub type SymbolSequence = Vec<Symbol>;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rule {
    pub head: Symbol,
    pub body: SymbolSequence,
}

impl Rule {
    pub fn new<H, I, S>(head: H, body: I) -> Self
    where
        H: Into<Symbol>,
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        Rule {
            head: head.into(),
            body: body.into_iter().map(Into::into).collect(),
        }
    }
}

pub type RuleSet = BTreeSet<Rule>;

/// A context-free grammar where every rule has a single nonterminal as its
/// head.
///
/// The grammar is expected to satisfy a few invariants that are not checked
/// here: terminals and nonterminals are disjoint, neither contains the empty
/// symbol, rule heads and the start symbol are nonterminals, and bodies only
/// use declared symbols or [`EPSILON`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grammar {
    pub non_terminals: SymbolSet,
    pub terminals: SymbolSet,
    pub rules: RuleSet,
    pub start: Symbol,
}

impl Grammar {
    pub fn new<N, T, S>(non_terminals: N, terminals: T, start: impl Into<Symbol>) -> Self
    where
        N: IntoIterator<Item = S>,
        T: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        Grammar {
            non_terminals: non_terminals.into_iter().map(Into::into).collect(),
            terminals: terminals.into_iter().map(Into::into).collect(),
            rules: RuleSet::new(),
            start: start.into(),
        }
    }

    pub fn add_rule<H, I, S>(&mut self, head: H, body: I) -> &mut Self
    where
        H: Into<Symbol>,
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        self.rules.insert(Rule::new(head, body));
        self
    }

    pub fn has_terminal(&self, symbol: &str) -> bool {
        self.terminals.contains(symbol)
    }

    pub fn has_non_terminal(&self, symbol: &str) -> bool {
        self.non_terminals.contains(symbol)
    }

    // Every declared symbol, nonterminals and terminals together
    pub fn symbols(&self) -> SymbolSet {
        self.non_terminals.union(&self.terminals).cloned().collect()
    }

    /// Finds the set of terminals that can begin a string derived from
    /// `sequence`. The result holds [`EPSILON`] if the whole sequence can
    /// vanish. An empty sequence gives an empty set.
    pub fn first(&self, sequence: &[Symbol]) -> SymbolSet {
        FirstSets::new(self).first(sequence)
    }

    /// Finds the set of terminals that can come right after `non_terminal`.
    /// The start symbol is also followed by [`EPSILON`], marking the end of
    /// input.
    pub fn follow(&self, non_terminal: &str) -> SymbolSet {
        self.follow_with(non_terminal, Occurrences::First)
    }

    pub fn follow_with(&self, non_terminal: &str, occurrences: Occurrences) -> SymbolSet {
        let first_sets = FirstSets::new(self);
        FollowSets::new(self, &first_sets, occurrences).follow(non_terminal)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub fn set(symbols: &[&str]) -> SymbolSet {
        symbols.iter().map(|s| s.to_string()).collect()
    }

    pub fn seq(symbols: &[&str]) -> SymbolSequence {
        symbols.iter().map(|s| s.to_string()).collect()
    }

    // E = T + E | T
    // T = id
    pub fn expression_grammar() -> Grammar {
        let mut grammar = Grammar::new(["E", "T"], ["+", "id"], "E");
        grammar
            .add_rule("E", ["T", "+", "E"])
            .add_rule("E", ["T"])
            .add_rule("T", ["id"]);
        grammar
    }

    // S = A b
    // A = | a
    pub fn optional_grammar() -> Grammar {
        let mut grammar = Grammar::new(["S", "A"], ["a", "b"], "S");
        grammar
            .add_rule("S", ["A", "b"])
            .add_rule("A", Vec::<&str>::new())
            .add_rule("A", ["a"]);
        grammar
    }

    #[test]
    fn membership() {
        let grammar = expression_grammar();

        assert!(grammar.has_terminal("+"));
        assert!(grammar.has_terminal("id"));
        assert!(!grammar.has_terminal("E"));
        assert!(!grammar.has_terminal(EPSILON));

        assert!(grammar.has_non_terminal("E"));
        assert!(grammar.has_non_terminal("T"));
        assert!(!grammar.has_non_terminal("id"));
        assert!(!grammar.has_non_terminal("F"));
    }

    #[test]
    fn duplicate_rules_collapse() {
        let mut grammar = Grammar::new(["S"], ["a"], "S");
        grammar.add_rule("S", ["a"]).add_rule("S", ["a"]);

        assert_eq!(grammar.rules.len(), 1);
    }

    #[test]
    fn symbols_are_sorted_union() {
        let grammar = expression_grammar();

        assert_eq!(
            grammar.symbols().into_iter().collect::<Vec<_>>(),
            seq(&["+", "E", "T", "id"])
        );
    }

    #[test]
    fn expression_scenario() {
        let grammar = expression_grammar();

        assert_eq!(grammar.first(&seq(&["E"])), set(&["id"]));
        assert_eq!(grammar.first(&seq(&["T"])), set(&["id"]));
        assert_eq!(grammar.follow("E"), set(&[EPSILON]));
        assert_eq!(grammar.follow("T"), set(&["+", EPSILON]));
    }

    #[test]
    fn epsilon_propagation_scenario() {
        let grammar = optional_grammar();

        assert_eq!(grammar.first(&seq(&["A"])), set(&[EPSILON, "a"]));
        assert_eq!(grammar.first(&seq(&["A", "b"])), set(&["a", "b"]));
        assert_eq!(grammar.follow("A"), set(&["b"]));
    }

    #[test]
    fn start_symbol_trailing_scenario() {
        let mut grammar = Grammar::new(["S", "A"], ["a"], "S");
        grammar.add_rule("S", ["A"]).add_rule("A", ["a"]);

        assert_eq!(grammar.follow("A"), set(&[EPSILON]));
    }

    #[test]
    fn first_of_terminals_is_themselves() {
        let grammar = expression_grammar();

        for terminal in &grammar.terminals {
            assert_eq!(grammar.first(&[terminal.clone()]), set(&[terminal.as_str()]));
        }
    }

    #[test]
    fn first_of_empty_sequence_is_empty() {
        assert_eq!(expression_grammar().first(&[]), SymbolSet::new());
        assert_eq!(optional_grammar().first(&[]), SymbolSet::new());
    }

    #[test]
    fn start_is_always_followed_by_epsilon() {
        let grammar = Grammar::new(["S"], Vec::<&str>::new(), "S");
        assert_eq!(grammar.follow("S"), set(&[EPSILON]));

        assert!(expression_grammar().follow("E").contains(EPSILON));
    }

    #[test]
    fn queries_do_not_change_the_grammar() {
        let grammar = optional_grammar();
        let before = grammar.clone();

        let first = grammar.first(&seq(&["S"]));
        let follow = grammar.follow("A");

        assert_eq!(grammar.first(&seq(&["S"])), first);
        assert_eq!(grammar.follow("A"), follow);
        assert_eq!(grammar, before);
    }

    #[test]
    fn adding_rules_only_grows_sets() {
        let before = expression_grammar();
        let mut after = before.clone();
        after.terminals.insert("(".to_string());
        after.terminals.insert(")".to_string());
        after.add_rule("T", ["(", "E", ")"]).add_rule("T", Vec::<&str>::new());

        for symbol in before.symbols() {
            let first = before.first(&[symbol.clone()]);
            let follow = before.follow(&symbol);
            assert!(after.first(&[symbol.clone()]).is_superset(&first), "FIRST({})", symbol);
            assert!(after.follow(&symbol).is_superset(&follow), "FOLLOW({})", symbol);
        }
    }
}
