use std::path::PathBuf;

use clap::Parser;

use crate::grammar::{Occurrences, SymbolSet};
use crate::report::ReportOptions;

#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// File containing the grammar (default: standard input)
    pub file: Option<PathBuf>,

    /// Let every occurrence of a symbol in a rule body contribute to its
    /// FOLLOW set, not only the first one
    #[arg(long)]
    pub all_occurrences: bool,

    /// Only report these symbols (default: every declared symbol)
    #[arg(short, long = "symbol", value_name = "SYMBOL")]
    pub symbols: Vec<String>,
}

impl Cli {
    // `-` also means standard input
    pub fn input_file(&self) -> Option<&PathBuf> {
        self.file.as_ref().filter(|path| path.as_os_str() != "-")
    }

    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            occurrences: if self.all_occurrences {
                Occurrences::All
            } else {
                Occurrences::First
            },
            symbols: if self.symbols.is_empty() {
                None
            } else {
                Some(self.symbols.iter().cloned().collect::<SymbolSet>())
            },
        }
    }
}
