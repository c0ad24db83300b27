//! Recognizers for math delimiters.

use nom::{
    bytes::complete::{tag, take_till1, take_until},
    character::complete::char,
    IResult,
};

/// A math token recognized at the start of the input.
#[derive(Debug, Clone, PartialEq)]
pub enum Token<'a> {
    InlineMath(&'a str),  // $...$
    DisplayMath(&'a str), // $$...$$
}

impl<'a> Token<'a> {
    /// The formula between the delimiters, untrimmed.
    pub fn content(&self) -> &'a str {
        match self {
            Token::InlineMath(content) | Token::DisplayMath(content) => content,
        }
    }
}

/// Parse inline math (`$...$`).
///
/// The formula must be non-empty and may contain neither a newline nor a `$`,
/// so a leftover `$$` never reads as an empty inline span.
pub fn inline_math(input: &str) -> IResult<&str, Token> {
    let (input, _) = char('$')(input)?;
    let (input, content) = take_till1(|c: char| c == '$' || c == '\n')(input)?;
    let (input, _) = char('$')(input)?;
    Ok((input, Token::InlineMath(content)))
}

/// Parse display math (`$$...$$`), stopping at the first closing `$$`.
///
/// The formula may span lines and may be empty.
pub fn display_math(input: &str) -> IResult<&str, Token> {
    let (input, _) = tag("$$")(input)?;
    let (input, content) = take_until("$$")(input)?;
    let (input, _) = tag("$$")(input)?;
    Ok((input, Token::DisplayMath(content)))
}
