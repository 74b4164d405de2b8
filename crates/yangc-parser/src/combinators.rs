//! Lexical building blocks for the statement grammar

use yangc_ast::Keyword;
use winnow::ascii::multispace1;
use winnow::combinator::{alt, cut_err, delimited, opt, preceded, repeat};
use winnow::error::{ContextError, ErrMode, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::stream::LocatingSlice;
use winnow::token::{any, one_of, take_till, take_until, take_while};

/// Parser input: the source text with byte offsets tracked for spans
pub(crate) type Input<'a> = LocatingSlice<&'a str>;

pub(crate) type PResult<T> = Result<T, ErrMode<ContextError>>;

/// Skip whitespace and comments
pub(crate) fn sep(input: &mut Input<'_>) -> PResult<()> {
    repeat(0.., alt((multispace1.void(), line_comment, block_comment))).parse_next(input)
}

fn line_comment(input: &mut Input<'_>) -> PResult<()> {
    ("//", take_till(0.., '\n')).void().parse_next(input)
}

fn block_comment(input: &mut Input<'_>) -> PResult<()> {
    (
        "/*",
        cut_err((take_until(0.., "*/"), "*/"))
            .context(StrContext::Label("comment"))
            .context(StrContext::Expected(StrContextValue::StringLiteral("*/"))),
    )
        .void()
        .parse_next(input)
}

fn identifier<'a>(input: &mut Input<'a>) -> PResult<&'a str> {
    (
        one_of(|c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(0.., |c: char| {
            c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')
        }),
    )
        .take()
        .parse_next(input)
}

/// `identifier` or `prefix:identifier`
pub(crate) fn keyword(input: &mut Input<'_>) -> PResult<Keyword> {
    (identifier, opt(preceded(':', cut_err(identifier))))
        .map(|(first, second)| match second {
            Some(name) => Keyword::prefixed(first, name),
            None => Keyword::new(first),
        })
        .parse_next(input)
}

/// A statement argument: a quoted string (optionally `+`-concatenated) or
/// an unquoted token
pub(crate) fn argument(input: &mut Input<'_>) -> PResult<String> {
    alt((concatenated, unquoted.map(str::to_owned))).parse_next(input)
}

fn concatenated(input: &mut Input<'_>) -> PResult<String> {
    let mut value = quoted.parse_next(input)?;
    let rest: Vec<String> = repeat(
        0..,
        preceded(
            (sep, '+', sep),
            cut_err(quoted).context(StrContext::Expected(StrContextValue::Description(
                "quoted string after '+'",
            ))),
        ),
    )
    .parse_next(input)?;
    for part in rest {
        value.push_str(&part);
    }
    Ok(value)
}

fn quoted(input: &mut Input<'_>) -> PResult<String> {
    alt((single_quoted, double_quoted)).parse_next(input)
}

/// Single-quoted strings are taken verbatim
fn single_quoted(input: &mut Input<'_>) -> PResult<String> {
    delimited(
        '\'',
        take_till(0.., '\''),
        cut_err('\'').context(StrContext::Label("string literal")),
    )
    .map(str::to_owned)
    .parse_next(input)
}

fn double_quoted(input: &mut Input<'_>) -> PResult<String> {
    '"'.parse_next(input)?;
    let mut out = String::new();
    loop {
        let chunk = take_till(0.., ['"', '\\']).parse_next(input)?;
        out.push_str(chunk);
        let terminator = cut_err(any)
            .context(StrContext::Label("string literal"))
            .parse_next(input)?;
        if terminator == '"' {
            return Ok(out);
        }
        match cut_err(any)
            .context(StrContext::Label("escape sequence"))
            .parse_next(input)?
        {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            '"' => out.push('"'),
            '\\' => out.push('\\'),
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }
}

fn unquoted<'a>(input: &mut Input<'a>) -> PResult<&'a str> {
    take_while(1.., |c: char| {
        !c.is_whitespace() && !matches!(c, ';' | '{' | '}' | '"' | '\'')
    })
    .parse_next(input)
}
