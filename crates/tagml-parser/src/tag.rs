//! Tag and property builder.
//!
//! Decodes the literal text between one `<`/`>` pair into a type name,
//! a list of [`Property`] values and a self-closing flag. Tokenization is
//! quote-aware: whitespace inside a quoted attribute value never splits a
//! token, and whitespace is permitted around the `=`.

use crate::node::Property;
use crate::ParseError;
use tagml_lexer::scan::{self, CaretMode};

/// The decoded head of one tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagHeader {
    /// Type name, original case preserved. Begins with `/` for a
    /// closing tag.
    pub name: String,
    pub properties: Vec<Property>,
    pub self_closing: bool,
}

/// Decode a tag literal (carets excluded, trailing `/` permitted).
///
/// Valid inputs look like:
///
/// ```text
/// Essay type="term" author='George Winston'
/// Piano color="black" /
/// Toaster
/// Dishwasher speed='64E25565 RPM'/
/// /Essay
/// ```
pub fn parse_tag(inner: &str) -> Result<TagHeader, ParseError> {
    let (body, self_closing) = split_self_closing(inner);

    let mut tokens = tokenize(body)?.into_iter();
    let name = tokens
        .next()
        .ok_or_else(|| ParseError::EmptyTag(inner.to_string()))?;

    let mut properties = Vec::new();
    for token in tokens {
        if token == "/" {
            continue;
        }
        properties.push(parse_property(&token)?);
    }

    Ok(TagHeader {
        name,
        properties,
        self_closing,
    })
}

/// Detect and strip a trailing unescaped `/`.
///
/// Quotes inside the tag are balanced by the time it reaches us, so the
/// last non-whitespace character sits outside any quoted region.
fn split_self_closing(inner: &str) -> (&str, bool) {
    let trimmed = inner.trim_end_matches(|c: char| c.is_ascii_whitespace());
    if trimmed.ends_with('/') && !scan::is_escaped(trimmed, trimmed.len() - 1) {
        (&trimmed[..trimmed.len() - 1], true)
    } else {
        (inner, false)
    }
}

/// Split the tag body into a type-name token and attribute tokens.
///
/// The first token is taken verbatim up to the first unquoted whitespace.
/// Every later token extends past the next unescaped `=` and its value
/// (possibly quoted, possibly padded with spaces) to the next unquoted
/// whitespace, so `name = "a value"` stays one token.
fn tokenize(body: &str) -> Result<Vec<String>, ParseError> {
    let mut tokens = Vec::new();

    let mut i = scan::next_non_space(body, 0);
    while i < body.len() {
        let end = if tokens.is_empty() {
            scan::next_space(body, i).unwrap_or(body.len())
        } else {
            let value_start = match scan::find_unquoted(body, '=', i, CaretMode::Ignore)? {
                Some(eq) => scan::next_non_space(body, eq + 1),
                None => i,
            };
            scan::next_space(body, value_start).unwrap_or(body.len())
        };

        tokens.push(body[i..end].to_string());
        i = scan::next_non_space(body, end);
    }

    Ok(tokens)
}

/// Parse one `name=value` token into a [`Property`].
///
/// The value may be wrapped in matching single or double quotes, which
/// are stripped; escaping backslashes are removed afterwards.
pub fn parse_property(token: &str) -> Result<Property, ParseError> {
    let Some(eq) = token.find('=') else {
        return Err(ParseError::MalformedProperty(token.to_string()));
    };

    let name = token[..eq].trim();
    let value = strip_quotes(token[eq + 1..].trim(), token)?;

    Ok(Property::new(name, unescape(value)))
}

/// Strip matching wrapping quotes from a value.
fn strip_quotes<'a>(value: &'a str, token: &str) -> Result<&'a str, ParseError> {
    let bytes = value.as_bytes();
    match bytes.first() {
        Some(&quote @ (b'"' | b'\'')) => {
            if bytes.len() >= 2 && bytes[bytes.len() - 1] == quote {
                Ok(&value[1..value.len() - 1])
            } else {
                Err(ParseError::MalformedPropertyValue(token.to_string()))
            }
        }
        _ => Ok(value),
    }
}

/// Remove escaping backslashes: a backslash is deleted unless it is
/// itself escaped by a preceding backslash.
fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut escaped = false;

    for c in value.chars() {
        if c == '\\' && !escaped {
            escaped = true;
            continue;
        }
        out.push(c);
        escaped = false;
    }

    out
}
