use indexmap::IndexMap;
use nom::{
    bytes::complete::take_till,
    character::complete::char,
    combinator::{consumed, opt},
    multi::separated_list0,
    sequence::{pair, preceded},
    IResult,
};
use tracing::{span, trace, Level};

use super::{AttributeError, AttributeValue, Result};

/// A single space-delimited token, split on its first `=`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Token<'a> {
    raw: &'a str,
    name: &'a str,
    value: Option<&'a str>,
}

/// Everything up to the first `=` or the end of the token
fn name_parser(input: &str) -> IResult<&str, &str> {
    take_till(|c| c == '=' || c == ' ')(input)
}

/// Parse `=value`, returning `value`. Any further `=` belongs to the value.
fn value_parser(input: &str) -> IResult<&str, &str> {
    preceded(char('='), take_till(|c| c == ' '))(input)
}

fn token_parser(input: &str) -> IResult<&str, Token> {
    let (remaining, (raw, (name, value))) = consumed(pair(name_parser, opt(value_parser)))(input)?;
    Ok((remaining, Token { raw, name, value }))
}

/// Split on single spaces. Repeated spaces produce empty tokens.
fn all_token_parser(input: &str) -> IResult<&str, Vec<Token>> {
    separated_list0(char(' '), token_parser)(input)
}

fn strip_quotes(value: &str) -> &str {
    value.trim_matches(|c| c == '\'' || c == '"')
}

/// `take_till` accepts empty input and every separator consumes a space, so
/// the token list always covers the whole text.
fn tokens(text: &str) -> Vec<Token> {
    all_token_parser(text).map(|(_, tokens)| tokens).unwrap_or_default()
}

/// Parse an attribute string, treating bare names as flags and skipping
/// empty tokens. Never fails.
pub(crate) fn parse_lenient(text: &str) -> IndexMap<String, AttributeValue> {
    let span = span!(Level::DEBUG, "Parsing attributes", "{}", text);
    let _enter = span.enter();
    let tokens = tokens(text);
    let mut attrs = IndexMap::with_capacity(tokens.len());
    for token in tokens {
        match token {
            Token { name: "", raw, .. } => trace!("Skipping token {:?} without a name", raw),
            Token { name, value: None, .. } => {
                attrs.insert(name.to_string(), AttributeValue::Flag(true));
            }
            Token { name, value: Some(value), .. } => {
                attrs.insert(name.to_string(), AttributeValue::Text(strip_quotes(value).to_string()));
            }
        }
    }
    attrs
}

/// Parse an attribute string in which every token must be `name=value`
pub(crate) fn parse_strict(text: &str) -> Result<IndexMap<String, AttributeValue>> {
    let span = span!(Level::DEBUG, "Parsing attributes strictly", "{}", text);
    let _enter = span.enter();
    if text.is_empty() {
        return Ok(IndexMap::new());
    }
    let tokens = tokens(text);
    let mut attrs = IndexMap::with_capacity(tokens.len());
    for (index, token) in tokens.into_iter().enumerate() {
        match token {
            Token { name, value: Some(value), .. } if !name.is_empty() => {
                attrs.insert(name.to_string(), AttributeValue::Text(strip_quotes(value).to_string()));
            }
            Token { raw, .. } => {
                return Err(AttributeError::MalformedToken {
                    token: raw.to_string(),
                    index,
                })
            }
        }
    }
    Ok(attrs)
}

#[cfg(test)]
#[test]
fn test_token_parse() {
    assert_eq!(
        token_parser("class=\"btn\" id=x"),
        Ok((
            " id=x",
            Token {
                raw: "class=\"btn\"",
                name: "class",
                value: Some("\"btn\""),
            }
        ))
    );
    assert_eq!(
        token_parser("disabled"),
        Ok((
            "",
            Token {
                raw: "disabled",
                name: "disabled",
                value: None,
            }
        ))
    );
    // Only the first `=` separates name from value
    assert_eq!(
        token_parser("href=/?a=b"),
        Ok((
            "",
            Token {
                raw: "href=/?a=b",
                name: "href",
                value: Some("/?a=b"),
            }
        ))
    );
}

#[cfg(test)]
#[test]
fn test_all_token_parse() {
    let (rest, tokens) = all_token_parser("a=1  b").unwrap();
    assert_eq!(rest, "");
    let raw: Vec<&str> = tokens.iter().map(|t| t.raw).collect();
    assert_eq!(raw, vec!["a=1", "", "b"]);
}

#[cfg(test)]
#[test]
fn test_tokens_cover_input() {
    for text in ["", " ", "a", "a=", "=", "==", "a==b", "  a  b  ", "'\"", "a=1 b c=\"d e\""] {
        let (rest, tokens) = all_token_parser(text).unwrap();
        assert_eq!(rest, "", "input {:?}", text);
        let joined: Vec<&str> = tokens.iter().map(|t| t.raw).collect();
        assert_eq!(joined.join(" "), text);
        assert_eq!(self::tokens(text), tokens);
    }
}

#[cfg(test)]
#[test]
fn test_strip_quotes() {
    assert_eq!(strip_quotes("\"btn\""), "btn");
    assert_eq!(strip_quotes("'btn'"), "btn");
    // Quotes are stripped independently from either end
    assert_eq!(strip_quotes("'btn\""), "btn");
    assert_eq!(strip_quotes("\"btn"), "btn");
    assert_eq!(strip_quotes("bt'n"), "bt'n");
    assert_eq!(strip_quotes("\"\""), "");
}

#[cfg(test)]
#[test]
fn test_parse_lenient() {
    let attrs = parse_lenient(r#"id="app" disabled data-x='1' width=100"#);
    let target = IndexMap::from([
        ("id".to_string(), AttributeValue::Text("app".to_string())),
        ("disabled".to_string(), AttributeValue::Flag(true)),
        ("data-x".to_string(), AttributeValue::Text("1".to_string())),
        ("width".to_string(), AttributeValue::Text("100".to_string())),
    ]);
    assert_eq!(attrs, target);
    let names: Vec<&str> = attrs.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["id", "disabled", "data-x", "width"]);

    assert!(parse_lenient("").is_empty());
    assert_eq!(parse_lenient("  a=1   =2 ").len(), 1);
    // Later duplicates overwrite earlier ones
    assert_eq!(
        parse_lenient("a=1 a=2").get("a"),
        Some(&AttributeValue::Text("2".to_string()))
    );
}

#[cfg(test)]
#[test]
fn test_parse_strict() {
    let attrs = parse_strict(r#"id="app" data-x="1""#).unwrap();
    assert_eq!(attrs.len(), 2);
    assert_eq!(parse_strict(""), Ok(IndexMap::new()));
    assert_eq!(
        parse_strict(r#"id="app" disabled"#),
        Err(AttributeError::MalformedToken {
            token: "disabled".to_string(),
            index: 1,
        })
    );
    assert_eq!(
        parse_strict("a=1  b=2"),
        Err(AttributeError::MalformedToken {
            token: "".to_string(),
            index: 1,
        })
    );
    assert!(parse_strict("=1").is_err());
}
