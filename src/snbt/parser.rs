//! The SNBT reader, built on nom. The grammar itself is small; the work is
//! in classifying bare words, which stay ambiguous until the whole token
//! has been seen: `12` is an int, `12b` a byte, `12.` a double, `12px` a
//! string.

use nom::branch::alt;
use nom::bytes::complete::take_while1;
use nom::character::complete::{char, digit0, digit1, multispace0, one_of};
use nom::combinator::{all_consuming, cut, eof, map, opt, recognize};
use nom::error::{context, ContextError, ErrorKind, ParseError, VerboseError, VerboseErrorKind};
use nom::multi::separated_list0;
use nom::sequence::{pair, preceded, terminated, tuple};
use nom::IResult;

use super::is_ident_char;
use crate::error::{Error, Result};
use crate::value::Compound;
use crate::Value;

type PResult<'a, O> = IResult<&'a str, O, VerboseError<&'a str>>;

pub(crate) fn parse_root(input: &str) -> Result<Value> {
    match terminated(value_tag, context("end of input", preceded(multispace0, eof)))(input) {
        Ok((_, value)) => Ok(value),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(convert(input, e)),
        Err(nom::Err::Incomplete(_)) => Err(Error::Snbt {
            message: "unexpected end of input".to_owned(),
            offset: input.len(),
        }),
    }
}

/// Squash a nom error trace into the crate error type: the nearest context
/// label, at the byte offset where the innermost parser stopped.
fn convert(input: &str, e: VerboseError<&str>) -> Error {
    let (remaining, innermost) = match e.errors.first() {
        Some((rem, kind)) => (*rem, kind.clone()),
        None => (input, VerboseErrorKind::Nom(ErrorKind::Fail)),
    };
    let offset = input.len() - remaining.len();
    let message = e
        .errors
        .iter()
        .find_map(|(_, kind)| match kind {
            VerboseErrorKind::Context(c) => Some(format!("expected {}", c)),
            _ => None,
        })
        .unwrap_or_else(|| match innermost {
            VerboseErrorKind::Char(c) => format!("expected '{}'", c),
            VerboseErrorKind::Context(c) => format!("expected {}", c),
            VerboseErrorKind::Nom(kind) => format!("cannot parse {}", kind.description()),
        });
    Error::Snbt { message, offset }
}

fn value_tag(input: &str) -> PResult<Value> {
    preceded(
        multispace0,
        context(
            "a value",
            alt((
                compound,
                list_or_array,
                map(quoted_string, Value::String),
                unquoted,
            )),
        ),
    )(input)
}

fn compound(input: &str) -> PResult<Value> {
    let (input, _) = char('{')(input)?;
    let (input, entries) = separated_list0(comma, entry)(input)?;
    let (input, _) = cut(context(
        "closing '}' of a compound",
        preceded(multispace0, char('}')),
    ))(input)?;

    let mut map = Compound::new();
    for (key, value) in entries {
        map.insert(key, value);
    }
    Ok((input, Value::Compound(map)))
}

fn entry(input: &str) -> PResult<(String, Value)> {
    let (input, key) = preceded(multispace0, key)(input)?;
    let (input, _) = cut(context(
        "':' after a compound key",
        preceded(multispace0, char(':')),
    ))(input)?;
    let (input, value) = cut(value_tag)(input)?;
    Ok((input, (key, value)))
}

fn key(input: &str) -> PResult<String> {
    alt((
        quoted_string,
        map(take_while1(is_ident_char), str::to_owned),
    ))(input)
}

fn comma(input: &str) -> PResult<char> {
    preceded(multispace0, char(','))(input)
}

fn list_or_array(input: &str) -> PResult<Value> {
    let (input, _) = char('[')(input)?;

    // A typed array needs its `B;` / `I;` / `L;` immediately after the
    // bracket; `[ B;` is a list.
    if let Ok((rest, kind)) = array_prefix(input) {
        return typed_array(rest, kind);
    }

    let start = input;
    let (input, items) = separated_list0(comma, value_tag)(input)?;
    let (input, _) = cut(context(
        "closing ']' of a list",
        preceded(multispace0, char(']')),
    ))(input)?;

    if let Some(first) = items.first() {
        if items.iter().any(|item| item.tag() != first.tag()) {
            return Err(nom::Err::Failure(VerboseError::add_context(
                start,
                "list elements of a single type",
                VerboseError::from_error_kind(start, ErrorKind::Verify),
            )));
        }
    }
    Ok((input, Value::List(items)))
}

fn array_prefix(input: &str) -> PResult<char> {
    terminated(one_of("BIL"), char(';'))(input)
}

fn typed_array(input: &str, kind: char) -> PResult<Value> {
    let start = input;
    let (input, items) = separated_list0(comma, value_tag)(input)?;
    let (input, _) = cut(context(
        "closing ']' of an array",
        preceded(multispace0, char(']')),
    ))(input)?;

    let mismatch = || {
        nom::Err::Failure(VerboseError::add_context(
            start,
            "array elements of the declared type",
            VerboseError::from_error_kind(start, ErrorKind::Verify),
        ))
    };

    let value = match kind {
        'B' => {
            let mut out = Vec::with_capacity(items.len());
            for item in &items {
                match item {
                    Value::Byte(b) => out.push(*b),
                    _ => return Err(mismatch()),
                }
            }
            Value::ByteArray(out)
        }
        'I' => {
            let mut out = Vec::with_capacity(items.len());
            for item in &items {
                match item {
                    Value::Int(i) => out.push(*i),
                    _ => return Err(mismatch()),
                }
            }
            Value::IntArray(out)
        }
        _ => {
            let mut out = Vec::with_capacity(items.len());
            for item in &items {
                match item {
                    Value::Long(l) => out.push(*l),
                    _ => return Err(mismatch()),
                }
            }
            Value::LongArray(out)
        }
    };
    Ok((input, value))
}

/// A string in either quote style. Within the chosen quote, `\\` and the
/// escaped quote itself are the only legal escapes.
fn quoted_string(input: &str) -> PResult<String> {
    alt((double_quoted, single_quoted))(input)
}

fn double_quoted(input: &str) -> PResult<String> {
    quoted(input, '"')
}

fn single_quoted(input: &str) -> PResult<String> {
    quoted(input, '\'')
}

fn quoted(input: &str, quote: char) -> PResult<String> {
    let (rest, _) = char(quote)(input)?;
    let mut out = String::new();
    let mut chars = rest.char_indices();
    while let Some((i, c)) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some((_, esc)) if esc == quote || esc == '\\' => out.push(esc),
                _ => {
                    return Err(nom::Err::Failure(VerboseError::add_context(
                        &rest[i..],
                        "a valid escape sequence",
                        VerboseError::from_error_kind(&rest[i..], ErrorKind::Escaped),
                    )))
                }
            }
        } else if c == quote {
            return Ok((&rest[i + c.len_utf8()..], out));
        } else {
            out.push(c);
        }
    }
    Err(nom::Err::Failure(VerboseError::add_context(
        input,
        "a closing quote",
        VerboseError::from_error_kind(input, ErrorKind::Eof),
    )))
}

fn unquoted(input: &str) -> PResult<Value> {
    let (rest, token) = take_while1(is_ident_char)(input)?;
    Ok((rest, classify(token)))
}

/// Sort a bare word into a value, trying the patterns in order: integer,
/// float, boolean, string. Integer literals normalize into their declared
/// width by two's-complement truncation.
fn classify(token: &str) -> Value {
    if let Ok((_, (digits, suffix))) = all_consuming(int_token)(token) {
        if let Ok(wide) = digits.parse::<i128>() {
            return match suffix {
                Some('b' | 'B') => Value::Byte(wide as i8),
                Some('s' | 'S') => Value::Short(wide as i16),
                Some('l' | 'L') => Value::Long(wide as i64),
                _ => Value::Int(wide as i32),
            };
        }
    } else if let Ok((_, (digits, suffix))) = all_consuming(float_token)(token) {
        match suffix {
            Some('f' | 'F') => {
                if let Ok(v) = digits.parse::<f32>() {
                    return Value::Float(v);
                }
            }
            _ => {
                if let Ok(v) = digits.parse::<f64>() {
                    return Value::Double(v);
                }
            }
        }
    }

    match token {
        "true" => Value::Byte(1),
        "false" => Value::Byte(0),
        _ => Value::String(token.to_owned()),
    }
}

/// `[+-]?(0|[1-9][0-9]*)` with an optional width suffix.
fn int_token(input: &str) -> PResult<(&str, Option<char>)> {
    pair(
        recognize(pair(
            opt(one_of("+-")),
            alt((
                recognize(pair(one_of("123456789"), digit0)),
                recognize(char('0')),
            )),
        )),
        opt(one_of("bslBSL")),
    )(input)
}

/// `[+-]?([0-9]+\.?|[0-9]*\.[0-9]+)([eE][+-]?[0-9]+)?` with an optional
/// width suffix. The fraction-bearing alternative has to come first or
/// `1.5` would stop after `1.`.
fn float_token(input: &str) -> PResult<(&str, Option<char>)> {
    pair(
        recognize(tuple((
            opt(one_of("+-")),
            alt((
                recognize(tuple((digit0, char('.'), digit1))),
                recognize(pair(digit1, opt(char('.')))),
            )),
            opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
        ))),
        opt(one_of("dfDF")),
    )(input)
}
