//! FIRST and FOLLOW sets of context-free grammars, with a reader and printer
//! for the line-oriented grammar text format.

pub mod cli;
pub mod error_handling;
pub mod grammar;
pub mod parser;
pub mod printer;
pub mod report;

pub use grammar::{FirstSets, FollowSets, Grammar, Occurrences, Rule, Symbol, SymbolSet, EPSILON};
