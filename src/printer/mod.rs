/*
    This module writes grammars and their parts back to text, in the form the
    parser reads
*/

use std::fmt::Display;

use itertools::Itertools;

use crate::grammar::*;
use crate::parser::{EQUALS, ESCAPE, QUOTE};

pub fn quote(symbol: &str) -> String {
    let mut quoted = String::with_capacity(symbol.len() + 2);
    quoted.push(QUOTE);
    for c in symbol.chars() {
        if c == QUOTE || c == ESCAPE {
            quoted.push(ESCAPE);
        }
        quoted.push(c);
    }
    quoted.push(QUOTE);
    quoted
}

// A bare symbol has to read back as itself
fn needs_quotes(symbol: &str) -> bool {
    symbol.is_empty() || symbol.starts_with(QUOTE) || symbol.contains(char::is_whitespace)
}

/// Terminals and the empty symbol are always quoted. Nonterminals are quoted
/// only when they would not read back otherwise.
pub fn symbol(grammar: &Grammar, symbol: &str) -> String {
    if symbol == EPSILON || grammar.has_terminal(symbol) || needs_quotes(symbol) {
        quote(symbol)
    } else {
        symbol.to_string()
    }
}

pub fn sequence(grammar: &Grammar, sequence: &[Symbol]) -> String {
    sequence.iter().map(|s| symbol(grammar, s)).join(" ")
}

pub fn symbol_set(grammar: &Grammar, set: &SymbolSet) -> String {
    set.iter().map(|s| symbol(grammar, s)).join(" ")
}

// An empty body is written as `HEAD =`, which reads back as an empty body
pub fn rule(grammar: &Grammar, rule: &Rule) -> String {
    let head = format!("{} {}", symbol(grammar, &rule.head), EQUALS);
    if rule.body.is_empty() {
        head
    } else {
        format!("{} {}", head, sequence(grammar, &rule.body))
    }
}

pub fn rule_set(grammar: &Grammar, rules: &RuleSet) -> String {
    rules.iter().map(|r| rule(grammar, r)).join("\n")
}

pub fn grammar(grammar: &Grammar) -> String {
    [
        symbol_set(grammar, &grammar.non_terminals),
        symbol_set(grammar, &grammar.terminals),
        rule_set(grammar, &grammar.rules),
        symbol(grammar, &grammar.start),
    ]
    .join("\n\n")
}

impl Display for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", grammar(self))
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::grammar::tests::{expression_grammar, optional_grammar, seq, set};
    use crate::parser::parse_str;
    use test_case::test_case;

    #[test_case("id" => "\"id\"" ; "terminal")]
    #[test_case("E" => "E" ; "nonterminal")]
    #[test_case("" => "\"\"" ; "epsilon")]
    #[test_case("long name" => "\"long name\"" ; "nonterminal with space")]
    #[test_case("\"x" => "\"\\\"x\"" ; "nonterminal starting with quote")]
    #[test_case("un\"declared" => "un\"declared" ; "inner quote stays bare")]
    fn symbols(text: &str) -> String {
        symbol(&expression_grammar(), text)
    }

    #[test]
    fn quote_escapes() {
        assert_eq!(quote("a \"b\" \\c"), "\"a \\\"b\\\" \\\\c\"");
    }

    #[test]
    fn sequences_and_sets() {
        let grammar = expression_grammar();

        assert_eq!(sequence(&grammar, &seq(&["T", "+", "E"])), "T \"+\" E");
        assert_eq!(sequence(&grammar, &[]), "");
        assert_eq!(sequence(&grammar, &seq(&[EPSILON])), "\"\"");
        assert_eq!(symbol_set(&grammar, &set(&["id", "+", EPSILON])), "\"\" \"+\" \"id\"");
        assert_eq!(symbol_set(&grammar, &SymbolSet::new()), "");
    }

    #[test]
    fn rules() {
        let grammar = optional_grammar();

        assert_eq!(rule(&grammar, &Rule::new("S", ["A", "b"])), "S = A \"b\"");
        assert_eq!(rule(&grammar, &Rule::new("A", Vec::<&str>::new())), "A =");
        assert_eq!(rule(&grammar, &Rule::new("A", [EPSILON])), "A = \"\"");
        assert_eq!(
            rule_set(&grammar, &grammar.rules),
            "A =\nA = \"a\"\nS = A \"b\""
        );
    }

    #[test]
    fn whole_grammar() {
        let expected = "E T\n\n\"+\" \"id\"\n\nE = T\nE = T \"+\" E\nT = \"id\"\n\nE";

        assert_eq!(expression_grammar().to_string(), expected);
    }

    #[test]
    fn printed_grammar_reads_back() {
        let mut grammar = Grammar::new(["S", "noun phrase"], ["big dog", "\"", "a\\b"], "S");
        grammar
            .add_rule("S", ["noun phrase", "\"", "a\\b"])
            .add_rule("noun phrase", ["big dog"])
            .add_rule("noun phrase", [EPSILON]);

        let text = grammar.to_string();
        let parsed = parse_str(&text, Path::new("printed")).unwrap();

        assert_eq!(parsed, grammar);
        assert_eq!(parse_str(&expression_grammar().to_string(), Path::new("printed")), Ok(expression_grammar()));
    }

    #[test]
    fn empty_body_reads_back_empty() {
        let grammar = optional_grammar();
        let text = grammar.to_string();

        assert!(text.contains("\nA =\n"));
        assert_eq!(parse_str(&text, Path::new("printed")), Ok(grammar));
    }

    #[test]
    fn empty_sections_do_not_read_back() {
        // An empty set prints as a blank line, which the reader skips
        let grammar = Grammar::new(["S"], Vec::<&str>::new(), "S");
        let text = grammar.to_string();

        assert_eq!(text, "S\n\n\n\n\n\nS");
        let errors = parse_str(&text, Path::new("printed")).unwrap_err();
        assert_eq!(errors[0].error, crate::parser::ParseErrorType::MissingStart);
    }
}
