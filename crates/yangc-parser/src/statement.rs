//! Statement tree parser using winnow

use crate::combinators::{argument, keyword, sep, Input, PResult};
use yangc_ast::Statement;
use yangc_diagnostics::{
    ErrorCode, LineIndex, Locator, Result, SourceLocation, Span, YangError, YANG0001, YANG0002,
    YANG0004, YANG0005, YANG0006,
};
use winnow::combinator::{alt, cut_err, eof, opt, repeat, terminated};
use winnow::error::{ContextError, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::stream::LocatingSlice;

/// Parse YANG source text into its top-level statements.
///
/// `file` is only used to build locators for the produced statements and
/// for the returned syntax error.
pub fn parse(source: &str, file: &str) -> Result<Vec<Statement>> {
    let index = LineIndex::new(source);
    let mut statements = terminated(statements, (sep, eof))
        .parse(LocatingSlice::new(source))
        .map_err(|e| {
            let offset = e.offset();
            let location = index.location(Span::point(offset));
            let code = classify(e.inner(), offset >= source.len());
            let message = match code {
                YANG0004 => "unterminated string literal".to_string(),
                YANG0005 => "unterminated comment".to_string(),
                YANG0002 => "unexpected end of input".to_string(),
                _ => describe(source, offset, &e.inner().to_string()),
            };
            YangError::parse(code, message, Locator::source(file, location))
        })?;

    for stmt in &mut statements {
        locate(stmt, &index);
    }
    log::trace!("parsed {} top-level statements from {}", statements.len(), file);
    Ok(statements)
}

/// Pick an error code from the innermost labelled construct
fn classify(error: &ContextError, at_end: bool) -> ErrorCode {
    let label = error.context().find_map(|c| match c {
        StrContext::Label(label) => Some(*label),
        _ => None,
    });
    match label {
        Some("string literal") => YANG0004,
        Some("comment") => YANG0005,
        _ if at_end => YANG0002,
        Some("statement end") => YANG0006,
        _ => YANG0001,
    }
}

fn describe(source: &str, offset: usize, context: &str) -> String {
    let found = source[offset..].chars().next().unwrap_or(' ');
    let context = context.replace('\n', ", ");
    if context.is_empty() {
        format!("unexpected '{found}'")
    } else {
        format!("unexpected '{found}': {context}")
    }
}

/// Fill in line/column numbers from the byte offsets recorded while parsing
fn locate(stmt: &mut Statement, index: &LineIndex) {
    stmt.location = index.location(stmt.location.span());
    for child in &mut stmt.children {
        locate(child, index);
    }
}

fn statements(input: &mut Input<'_>) -> PResult<Vec<Statement>> {
    sep.parse_next(input)?;
    repeat(0.., terminated(statement, sep)).parse_next(input)
}

fn statement(input: &mut Input<'_>) -> PResult<Statement> {
    statement_body
        .with_span()
        .map(|(mut stmt, range)| {
            stmt.location = SourceLocation::new(0, 0, range.start, range.len());
            stmt
        })
        .parse_next(input)
}

fn statement_body(input: &mut Input<'_>) -> PResult<Statement> {
    let keyword = keyword.parse_next(input)?;
    sep.parse_next(input)?;
    let argument = opt(argument).parse_next(input)?;
    sep.parse_next(input)?;
    let children = cut_err(alt((';'.value(Vec::new()), block)))
        .context(StrContext::Expected(StrContextValue::CharLiteral(';')))
        .context(StrContext::Expected(StrContextValue::CharLiteral('{')))
        .context(StrContext::Label("statement end"))
        .parse_next(input)?;

    Ok(Statement {
        keyword,
        argument,
        location: SourceLocation::default(),
        children,
    })
}

fn block(input: &mut Input<'_>) -> PResult<Vec<Statement>> {
    '{'.parse_next(input)?;
    let children = statements.parse_next(input)?;
    cut_err('}')
        .context(StrContext::Expected(StrContextValue::CharLiteral('}')))
        .parse_next(input)?;
    Ok(children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_simple_statement() {
        let stmts = parse("leaf x { type int8; }", "t.yang").unwrap();
        assert_eq!(stmts.len(), 1);
        let leaf = &stmts[0];
        assert_eq!(leaf.keyword.to_string(), "leaf");
        assert_eq!(leaf.arg(), "x");
        assert_eq!(leaf.children.len(), 1);
        assert_eq!(leaf.children[0].arg(), "int8");
        assert_eq!(leaf.location.span(), Span::new(0, 21));
    }

    #[test]
    fn test_locations_are_line_based() {
        let source = "module m {\n  prefix p;\n  leaf x {\n    type string;\n  }\n}\n";
        let stmts = parse(source, "m.yang").unwrap();
        let leaf = &stmts[0].children[1];
        assert_eq!((leaf.location.line, leaf.location.column), (3, 3));
        let ty = &leaf.children[0];
        assert_eq!((ty.location.line, ty.location.column), (4, 5));
    }

    #[test]
    fn test_missing_terminator() {
        let err = parse("leaf x { type int8 }", "t.yang").unwrap_err();
        assert_eq!(err.code(), YANG0006);
        assert_eq!(err.locator().to_string(), "t.yang:1:20");
    }

    #[test]
    fn test_unexpected_eof() {
        let err = parse("module m {\n  prefix p;\n", "m.yang").unwrap_err();
        assert_eq!(err.code(), YANG0002);
        assert!(err.to_string().starts_with("m.yang:3:1: "));
    }

    #[test]
    fn test_stray_close_brace() {
        let err = parse("leaf x;\n}", "t.yang").unwrap_err();
        assert_eq!(err.code(), YANG0001);
        assert_eq!(err.locator().to_string(), "t.yang:2:1");
    }

    #[test]
    fn test_unterminated_constructs() {
        let err = parse("leaf x 'open;", "t.yang").unwrap_err();
        assert_eq!(err.code(), YANG0004);
        assert_eq!(err.to_string(), "t.yang:1:14: unterminated string literal");

        let err = parse("leaf x; /* open", "t.yang").unwrap_err();
        assert_eq!(err.code(), YANG0005);
    }
}
