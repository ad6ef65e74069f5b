//! Placeholder parsing and substitution for configuration templates.
//!
//! # Placeholder Formats
//!
//! - `$${name}` - a context variable such as `fqdn`, `port` or `config_dir`
//! - `$${options:key}` - an entry of the free-form `options` table
//!
//! Single `$` characters pass through unchanged, so `$HOME` or `$1` in shell
//! snippets and `$decideOnStartup` in splunk `.conf` files need no escaping.
//! Use `$$${` to produce a literal `$${`.
//!
//! # Example
//!
//! ```
//! use splunk_lib::template::{parse, Placeholder, Segment};
//!
//! let segments = parse("host = $${fqdn}\n").unwrap();
//! assert_eq!(segments, vec![
//!     Segment::Literal("host = ".to_string()),
//!     Segment::Placeholder(Placeholder::Var("fqdn".to_string())),
//!     Segment::Literal("\n".to_string()),
//! ]);
//! ```

use std::borrow::Cow;

use thiserror::Error;

/// A parsed placeholder reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placeholder {
  /// `$${name}` - context variable
  Var(String),

  /// `$${options:key}` - user option
  Option(String),
}

/// A segment of parsed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
  Literal(String),
  Placeholder(Placeholder),
}

/// Errors that can occur during placeholder parsing or resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaceholderError {
  #[error("unclosed placeholder at position {0}")]
  Unclosed(usize),

  #[error("unknown placeholder type: {0}")]
  UnknownType(String),

  #[error("malformed placeholder: {0}")]
  Malformed(String),

  #[error("unknown variable '{0}'")]
  UnknownVariable(String),

  #[error("option '{0}' is not set")]
  UnresolvedOption(String),

  #[error("option '{0}' is a table and cannot be rendered inline")]
  NonScalarOption(String),
}

/// Resolves placeholder values during substitution.
pub trait Resolver {
  fn resolve_var(&self, name: &str) -> Result<Cow<'_, str>, PlaceholderError>;

  fn resolve_option(&self, key: &str) -> Result<Cow<'_, str>, PlaceholderError>;
}

/// Parse a string containing placeholders into segments.
///
/// # Errors
///
/// Returns an error if a placeholder is unclosed, empty or of an unknown type.
pub fn parse(input: &str) -> Result<Vec<Segment>, PlaceholderError> {
  let mut segments = Vec::new();
  let mut literal = String::new();
  let mut chars = input.char_indices().peekable();

  while let Some((pos, ch)) = chars.next() {
    if ch != '$' {
      literal.push(ch);
      continue;
    }

    // Lone `$` is literal text
    if !matches!(chars.peek(), Some((_, '$'))) {
      literal.push('$');
      continue;
    }
    chars.next();

    match chars.peek() {
      Some((_, '$')) => {
        chars.next();
        if matches!(chars.peek(), Some((_, '{'))) {
          // Escaped: $$${ -> $${
          chars.next();
          literal.push_str("$${");
        } else {
          literal.push_str("$$$");
        }
      }
      Some((_, '{')) => {
        chars.next();

        if !literal.is_empty() {
          segments.push(Segment::Literal(std::mem::take(&mut literal)));
        }

        let mut content = String::new();
        let mut found_close = false;
        for (_, c) in chars.by_ref() {
          if c == '}' {
            found_close = true;
            break;
          }
          content.push(c);
        }

        if !found_close {
          return Err(PlaceholderError::Unclosed(pos));
        }

        segments.push(Segment::Placeholder(parse_placeholder_content(&content)?));
      }
      _ => literal.push_str("$$"),
    }
  }

  if !literal.is_empty() {
    segments.push(Segment::Literal(literal));
  }

  Ok(segments)
}

/// Parse the content between `$${` and `}`.
fn parse_placeholder_content(content: &str) -> Result<Placeholder, PlaceholderError> {
  let content = content.trim();
  if content.is_empty() {
    return Err(PlaceholderError::Malformed("empty placeholder".to_string()));
  }

  match content.split_once(':') {
    None => Ok(Placeholder::Var(content.to_string())),
    Some(("options", key)) if !key.is_empty() => Ok(Placeholder::Option(key.to_string())),
    Some(("options", _)) => Err(PlaceholderError::Malformed(format!("missing option key in '{content}'"))),
    Some((kind, _)) => Err(PlaceholderError::UnknownType(kind.to_string())),
  }
}

/// Substitute placeholders in pre-parsed segments.
pub fn substitute_segments(segments: &[Segment], resolver: &impl Resolver) -> Result<String, PlaceholderError> {
  let mut result = String::new();

  for segment in segments {
    match segment {
      Segment::Literal(s) => result.push_str(s),
      Segment::Placeholder(Placeholder::Var(name)) => result.push_str(&resolver.resolve_var(name)?),
      Segment::Placeholder(Placeholder::Option(key)) => result.push_str(&resolver.resolve_option(key)?),
    }
  }

  Ok(result)
}

/// Parse and substitute in one step.
pub fn substitute(input: &str, resolver: &impl Resolver) -> Result<String, PlaceholderError> {
  let segments = parse(input)?;
  substitute_segments(&segments, resolver)
}
