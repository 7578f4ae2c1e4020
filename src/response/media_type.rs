//! Media type parsing for success response headers.
//!
//! ```text
//! media-type = type "/" subtype *( OWS ";" OWS parameter )
//! parameter  = token "=" ( token / quoted-string )
//! ```
//!
//! Type, subtype and parameter names are case-insensitive and come back
//! lowercased. Parameter values are kept as written.

use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MediaTypeError {
    #[error("empty media type")]
    Empty,
    #[error("invalid media type")]
    InvalidMediaType,
    #[error("invalid media type parameter")]
    InvalidParameter,
    #[error("duplicate media type parameter {0:?}")]
    DuplicateParameter(String),
    #[error("unterminated quoted string")]
    UnterminatedQuote,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaType {
    essence: String,
    params: HashMap<String, String>,
}

impl MediaType {
    pub fn parse(input: &str) -> Result<Self, MediaTypeError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(MediaTypeError::Empty);
        }

        let (essence, rest) = match input.find(';') {
            Some(pos) => (&input[..pos], Some(&input[pos + 1..])),
            None => (input, None),
        };
        let essence = parse_essence(essence)?;
        let params = match rest {
            Some(rest) => parse_parameters(rest)?,
            None => HashMap::new(),
        };

        Ok(Self { essence, params })
    }

    /// `type/subtype`, lowercased.
    pub fn essence(&self) -> &str {
        &self.essence
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn params(&self) -> &HashMap<String, String> {
        &self.params
    }

    pub fn into_parts(self) -> (String, HashMap<String, String>) {
        (self.essence, self.params)
    }
}

fn parse_essence(input: &str) -> Result<String, MediaTypeError> {
    let input = input.trim();
    let (kind, subtype) = input
        .split_once('/')
        .ok_or(MediaTypeError::InvalidMediaType)?;

    if !is_token(kind) || !is_token(subtype) {
        return Err(MediaTypeError::InvalidMediaType);
    }

    Ok(format!(
        "{}/{}",
        kind.to_ascii_lowercase(),
        subtype.to_ascii_lowercase()
    ))
}

fn parse_parameters(mut rest: &str) -> Result<HashMap<String, String>, MediaTypeError> {
    let mut params = HashMap::new();

    loop {
        rest = rest.trim_start();
        // trailing ";" is tolerated
        if rest.is_empty() {
            break;
        }

        let eq = rest.find('=').ok_or(MediaTypeError::InvalidParameter)?;
        let name = rest[..eq].trim();
        if !is_token(name) {
            return Err(MediaTypeError::InvalidParameter);
        }

        let after_eq = rest[eq + 1..].trim_start();
        let (value, remaining) = match after_eq.strip_prefix('"') {
            Some(quoted) => parse_quoted(quoted)?,
            None => parse_token_value(after_eq)?,
        };

        let name = name.to_ascii_lowercase();
        if params.contains_key(&name) {
            return Err(MediaTypeError::DuplicateParameter(name));
        }
        params.insert(name, value);

        let remaining = remaining.trim_start();
        match remaining.strip_prefix(';') {
            Some(next) => rest = next,
            None if remaining.is_empty() => break,
            None => return Err(MediaTypeError::InvalidParameter),
        }
    }

    Ok(params)
}

fn parse_quoted(input: &str) -> Result<(String, &str), MediaTypeError> {
    let mut value = String::new();
    let mut escaped = false;

    for (i, c) in input.char_indices() {
        if escaped {
            value.push(c);
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '"' {
            return Ok((value, &input[i + 1..]));
        } else {
            value.push(c);
        }
    }

    Err(MediaTypeError::UnterminatedQuote)
}

fn parse_token_value(input: &str) -> Result<(String, &str), MediaTypeError> {
    let end = input
        .find(|c: char| c == ';' || c.is_whitespace())
        .unwrap_or(input.len());
    let value = &input[..end];

    if !is_token(value) {
        return Err(MediaTypeError::InvalidParameter);
    }

    Ok((value.to_owned(), &input[end..]))
}

fn is_token(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(is_token_char)
}

fn is_token_char(b: u8) -> bool {
    matches!(b,
        b'!' | b'#' | b'$' | b'%' | b'&' | b'\'' | b'*' | b'+' | b'-' | b'.' |
        b'0'..=b'9' | b'A'..=b'Z' | b'^' | b'_' | b'`' | b'a'..=b'z' | b'|' | b'~'
    )
}
