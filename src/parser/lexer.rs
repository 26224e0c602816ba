use itertools::{Itertools, PeekingNext};

use super::{ParseErrorType, Result};
use crate::grammar::Symbol;

pub const QUOTE: char = '"';
pub const ESCAPE: char = '\\';

// Reads a quoted symbol. The escape character makes the next character
// literal, so `\"` and `\\` can appear inside.
pub fn lex_quoted(line: &mut impl Iterator<Item = char>) -> Result<Symbol> {
    line.next(); // Consume open quote
    let mut symbol = Symbol::new();

    loop {
        match line.next() {
            Some(QUOTE) => return Ok(symbol),
            Some(ESCAPE) => match line.next() {
                Some(c) => symbol.push(c),
                None => return Err(ParseErrorType::UnmatchedQuote),
            },
            Some(c) => symbol.push(c),
            None => return Err(ParseErrorType::UnmatchedQuote),
        }
    }
}

// Reads everything up to the next whitespace
pub fn lex_bare(line: &mut impl PeekingNext<Item = char>) -> Result<Symbol> {
    Ok(line.peeking_take_while(|c| !c.is_whitespace()).collect())
}

pub fn lex_line(line: &str) -> Result<Vec<Symbol>> {
    let mut symbols = Vec::new();

    let mut line_chars = line.chars().peekable();

    while let Some(c) = line_chars.peek() {
        if *c == QUOTE {
            symbols.push(lex_quoted(&mut line_chars)?);
        } else if !c.is_whitespace() {
            symbols.push(lex_bare(&mut line_chars)?);
        } else {
            line_chars.next();
        }
    }

    Ok(symbols)
}
