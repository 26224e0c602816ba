/*
    This module builds the FIRST/FOLLOW report for a grammar
*/

use std::io::Write;

use log::{debug, warn};

use crate::grammar::*;
use crate::printer;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportOptions {
    pub occurrences: Occurrences,
    // Only report these symbols instead of every declared one
    pub symbols: Option<SymbolSet>,
}

fn set_line(grammar: &Grammar, name: &str, sym: &str, set: &SymbolSet) -> String {
    let label = format!("{}({}):", name, printer::symbol(grammar, sym));
    if set.is_empty() {
        label
    } else {
        format!("{} {}", label, printer::symbol_set(grammar, set))
    }
}

// The grammar, a blank line, then the FIRST set and the FOLLOW set of every
// reported symbol
pub fn report(grammar: &Grammar, options: &ReportOptions) -> String {
    let symbols = match &options.symbols {
        Some(symbols) => {
            for sym in symbols {
                if !grammar.has_terminal(sym) && !grammar.has_non_terminal(sym) {
                    warn!("`{}` is not declared in the grammar", sym);
                }
            }
            symbols.clone()
        }
        None => grammar.symbols(),
    };
    debug!("Reporting on {} symbols", symbols.len());

    let first_sets = FirstSets::new(grammar);
    let follow_sets = FollowSets::new(grammar, &first_sets, options.occurrences);

    let mut text = printer::grammar(grammar);
    text.push_str("\n\n");
    for sym in &symbols {
        let first = first_sets.first(std::slice::from_ref(sym));
        text.push_str(&set_line(grammar, "FIRST", sym, &first));
        text.push('\n');
    }
    for sym in &symbols {
        let follow = follow_sets.follow(sym);
        text.push_str(&set_line(grammar, "FOLLOW", sym, &follow));
        text.push('\n');
    }
    text
}

pub fn write_report(out: &mut impl Write, grammar: &Grammar, options: &ReportOptions) -> std::io::Result<()> {
    out.write_all(report(grammar, options).as_bytes())?;
    out.flush()
}
