//! Logos-based classifier for attribute values.
//!
//! Each value run (the text between `NAME=` and the next separator) is fed to
//! a lexer generated by [logos](https://docs.rs/logos). A run is valid only if
//! a single token spans all of it. When several patterns match the full run,
//! the `priority` values below pick the winner, which gives the fixed kind
//! order: integer, hex, float, signed float, quoted, resolution, enumerated.

use crate::value::AttributeValue;
use logos::{Lexer, Logos};

/// Token types recognized in a value run.
#[derive(Logos, Debug, Clone, PartialEq)]
pub enum ValueToken<'src> {
    /// Decimal integer (e.g., `1280000`). A 20-digit run that overflows
    /// `u64` is rejected by the callback rather than reclassified.
    #[regex(r"[0-9]{1,20}", |lex| lex.slice().parse::<u64>().ok(), priority = 70)]
    Integer(u64),

    /// Hexadecimal sequence (e.g., `0x1A2B`). Uppercase digits only.
    #[regex(r"0[xX][0-9A-F]*", decode_hex, priority = 60)]
    Hex(Vec<u8>),

    /// Unsigned decimal float (e.g., `9.009`)
    #[regex(r"[0-9]+(\.[0-9]+)?", |lex| lex.slice().parse::<f64>().ok(), priority = 50)]
    Float(f64),

    /// Signed decimal float (e.g., `-3.5`)
    #[regex(r"-?[0-9]+(\.[0-9]+)?", |lex| lex.slice().parse::<f64>().ok(), priority = 40)]
    SignedFloat(f64),

    /// Quoted string; the callback strips the quotes.
    #[regex(r#""[^"\r\n]*""#, strip_quotes, priority = 30)]
    Quoted(&'src str),

    /// Decimal resolution (e.g., `1920x1080`)
    /// Higher priority than Enumerated so `720x480` is never a bare token
    #[regex(r"[0-9]+x[0-9]+", parse_resolution, priority = 20)]
    Resolution((u64, u64)),

    /// Enumerated string (lowest priority catch-all)
    #[regex(r#"[^\s",]+"#, priority = 10)]
    Enumerated(&'src str),
}

fn decode_hex<'src>(lex: &mut Lexer<'src, ValueToken<'src>>) -> Option<Vec<u8>> {
    let digits = &lex.slice()[2..];
    if digits.len() % 2 == 1 {
        hex::decode(format!("0{}", digits)).ok()
    } else {
        hex::decode(digits).ok()
    }
}

fn strip_quotes<'src>(lex: &mut Lexer<'src, ValueToken<'src>>) -> &'src str {
    let slice = lex.slice();
    &slice[1..slice.len() - 1]
}

fn parse_resolution<'src>(lex: &mut Lexer<'src, ValueToken<'src>>) -> Option<(u64, u64)> {
    let (w, h) = lex.slice().split_once('x')?;
    Some((w.parse().ok()?, h.parse().ok()?))
}

impl ValueToken<'_> {
    /// Convert into an owned attribute value.
    pub fn into_value(self) -> AttributeValue {
        match self {
            ValueToken::Integer(n) => AttributeValue::Integer(n),
            ValueToken::Hex(data) => AttributeValue::Bytes(data),
            ValueToken::Float(f) => AttributeValue::Float(f),
            ValueToken::SignedFloat(f) => AttributeValue::SignedFloat(f),
            ValueToken::Quoted(s) => AttributeValue::String(s.to_string()),
            ValueToken::Resolution((w, h)) => AttributeValue::Resolution(w, h),
            ValueToken::Enumerated(s) => AttributeValue::Enum(s.to_string()),
        }
    }
}

/// Classify a complete value run.
///
/// Returns `None` when no single token covers the whole run. An empty run is
/// an empty enumerated string.
pub fn classify(run: &str) -> Option<AttributeValue> {
    if run.is_empty() {
        return Some(AttributeValue::Enum(String::new()));
    }

    let mut lexer = ValueToken::lexer(run);
    let token = lexer.next()?.ok()?;
    if lexer.span().end != run.len() {
        return None;
    }

    Some(token.into_value())
}
