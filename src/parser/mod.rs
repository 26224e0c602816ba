/*
    This module reads grammars from their text description:

        <nonterminals>
        <terminals>
        <head> = <body>
        ...
        <blank line>
        <start>

    Symbols are separated by whitespace and may be quoted with `"`, where `\`
    escapes the next character. `""` is the empty symbol.
*/

mod lexer;

use std::fmt::Display;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::info;

use crate::error_handling::*;
use crate::grammar::*;

pub use lexer::{lex_line, ESCAPE, QUOTE};

pub const EQUALS: &str = "=";

#[derive(Debug)]
pub enum ParseErrorType {
    // The input ended before the nonterminal line
    MissingNonTerminals,
    // The input ended before the terminal line
    MissingTerminals,
    // A rule line starts with `=`
    MissingHead,
    // A rule line does not have `=` after its head
    MissingEquals,
    // There is an unclosed quote
    UnmatchedQuote,
    // The input ended before the start symbol
    MissingStart,
    // There was an issue with reading a file
    FileError(std::io::Error),
}

impl ErrorType for ParseErrorType {}

impl PartialEq for ParseErrorType {
    fn eq(&self, other: &Self) -> bool {
        if let (ParseErrorType::FileError(a), ParseErrorType::FileError(b)) = (self, other) {
            return a.kind() == b.kind();
        }
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl Display for ParseErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseErrorType::MissingNonTerminals => write!(f, "Expected a line of nonterminals"),
            ParseErrorType::MissingTerminals => write!(f, "Expected a line of terminals"),
            ParseErrorType::MissingHead => write!(f, "Expected a nonterminal before `=`"),
            ParseErrorType::MissingEquals => write!(f, "Expected `=` after the rule head"),
            ParseErrorType::UnmatchedQuote => write!(f, "Unmatched quotes"),
            ParseErrorType::MissingStart => write!(f, "Expected a start symbol after the rules"),
            ParseErrorType::FileError(e) => write!(f, "File error: {}", e),
        }
    }
}

pub type ParseError = Error<ParseErrorType>;
pub type ParseErrors = Errors<ParseErrorType>;

fn io_error(error: std::io::Error, file: &Path) -> ParseError {
    ParseError {
        location: Location::whole(file),
        error: ParseErrorType::FileError(error),
    }
}

pub type Result<T> = std::result::Result<T, ParseErrorType>;
pub type LineResult<T> = std::result::Result<T, ParseError>;
pub type FileResult<T> = std::result::Result<T, ParseErrors>;

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

fn parse_rule(symbols: Vec<Symbol>) -> Result<Rule> {
    let mut symbols = symbols.into_iter();

    let head = match symbols.next() {
        Some(head) if head != EQUALS => head,
        _ => return Err(ParseErrorType::MissingHead),
    };

    if symbols.next().as_deref() != Some(EQUALS) {
        return Err(ParseErrorType::MissingEquals);
    }

    Ok(Rule {
        head,
        body: symbols.collect(),
    })
}

fn parse_lex_line(line: &str, location: Location) -> LineResult<Rule> {
    lexer::lex_line(line)
        .and_then(parse_rule)
        .map_err(|error| ParseError { location, error })
}

fn parse_symbol_set(line: &str, location: Location) -> LineResult<SymbolSet> {
    lexer::lex_line(line)
        .map(|symbols| symbols.into_iter().collect())
        .map_err(|error| ParseError { location, error })
}

// Numbered lines, one-indexed
fn numbered_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines().enumerate().map(|(num, line)| (num + 1, line))
}

fn next_line<'a>(lines: &mut impl Iterator<Item = (usize, &'a str)>) -> Option<(usize, &'a str)> {
    lines.find(|(_, line)| !is_blank(line))
}

fn parse_set_line<'a>(
    lines: &mut impl Iterator<Item = (usize, &'a str)>,
    path: &Path,
    missing: ParseErrorType,
) -> LineResult<SymbolSet> {
    match next_line(lines) {
        Some((num, line)) => parse_symbol_set(line, Location::new(path, num)),
        None => Err(ParseError {
            location: Location::whole(path),
            error: missing,
        }),
    }
}

// Reads rule lines up to the next blank line. Every malformed line is
// reported, not only the first.
fn parse_rule_block<'a>(
    lines: &mut impl Iterator<Item = (usize, &'a str)>,
    path: &Path,
) -> FileResult<RuleSet> {
    let mut rules = RuleSet::new();
    let mut errors = ParseErrors::new();

    let Some(first) = next_line(lines) else {
        return Ok(rules);
    };
    let block = std::iter::once(first).chain(lines.by_ref().take_while(|(_, line)| !is_blank(line)));

    for (num, line) in block {
        match parse_lex_line(line, Location::new(path, num)) {
            Ok(rule) => {
                rules.insert(rule);
            }
            Err(error) => errors.push(error),
        }
    }

    if errors.is_empty() {
        Ok(rules)
    } else {
        Err(errors)
    }
}

fn parse_start<'a>(lines: &mut impl Iterator<Item = (usize, &'a str)>, path: &Path) -> LineResult<Symbol> {
    let (num, line) = next_line(lines).ok_or_else(|| ParseError {
        location: Location::whole(path),
        error: ParseErrorType::MissingStart,
    })?;
    let location = Location::new(path, num);

    match lexer::lex_line(line) {
        Ok(symbols) => symbols.into_iter().next().ok_or(ParseError {
            location,
            error: ParseErrorType::MissingStart,
        }),
        Err(error) => Err(ParseError { location, error }),
    }
}

/// Reads a grammar from its text description. `path` is only used to locate
/// errors.
pub fn parse_str(text: &str, path: &Path) -> FileResult<Grammar> {
    let mut lines = numbered_lines(text);

    let non_terminals = parse_set_line(&mut lines, path, ParseErrorType::MissingNonTerminals)
        .map_err(|e| vec![e])?;
    let terminals = parse_set_line(&mut lines, path, ParseErrorType::MissingTerminals)
        .map_err(|e| vec![e])?;

    let mut errors = ParseErrors::new();
    let rules = parse_rule_block(&mut lines, path).unwrap_or_else(|rule_errors| {
        errors.extend(rule_errors);
        RuleSet::new()
    });
    let start = parse_start(&mut lines, path).unwrap_or_else(|error| {
        errors.push(error);
        Symbol::new()
    });

    if !errors.is_empty() {
        return Err(errors);
    }

    info!(
        "Loaded grammar from {}: {} nonterminals, {} terminals, {} rules",
        path.display(),
        non_terminals.len(),
        terminals.len(),
        rules.len()
    );

    Ok(Grammar {
        non_terminals,
        terminals,
        rules,
        start,
    })
}

pub fn parse_reader(mut reader: impl Read, path: &Path) -> FileResult<Grammar> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|e| vec![io_error(e, path)])?;
    parse_str(&text, path)
}

pub fn parse_file(path: &Path) -> FileResult<Grammar> {
    let file = File::open(path).map_err(|e| vec![io_error(e, path)])?;
    parse_reader(file, path)
}
