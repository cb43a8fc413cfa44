//! Identifier and string-literal quoting.
//!
//! User-supplied text (replacement strings, delimiters, CASE results) is only
//! ever embedded through [`quote_literal`]; column and relation names only
//! through [`quote_identifier`].

use super::{DialectSyntax, IdentifierQuote, LiteralEscape};

/// Quote an identifier per the dialect's identifier rule.
///
/// # Example
///
/// ```
/// use transform_forge::dialect::{Dialect, quote_identifier};
///
/// assert_eq!(quote_identifier("email", Dialect::Ansi.syntax()), "\"email\"");
/// assert_eq!(quote_identifier("a]b", Dialect::Tsql.syntax()), "[a]]b]");
/// ```
pub fn quote_identifier(name: &str, syntax: &DialectSyntax) -> String {
    match syntax.identifier_quote {
        IdentifierQuote::DoubleQuote => format!("\"{}\"", name.replace('"', "\"\"")),
        IdentifierQuote::Backtick => format!("`{}`", name.replace('`', "``")),
        IdentifierQuote::Bracket => format!("[{}]", name.replace(']', "]]"))
    }
}

/// Render text as a single-quoted string literal.
///
/// # Example
///
/// ```
/// use transform_forge::dialect::{Dialect, quote_literal};
///
/// assert_eq!(quote_literal("it's", Dialect::Postgresql.syntax()), "'it''s'");
/// assert_eq!(quote_literal("it's", Dialect::BigquerySql.syntax()), r"'it\'s'");
/// assert_eq!(quote_literal(r"a\b", Dialect::Mysql.syntax()), r"'a\\b'");
/// ```
pub fn quote_literal(value: &str, syntax: &DialectSyntax) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    match syntax.literal_escape {
        LiteralEscape::Doubled => {
            for c in value.chars() {
                if c == '\'' {
                    out.push('\'');
                }
                out.push(c);
            }
        }
        LiteralEscape::DoubledWithBackslash => {
            for c in value.chars() {
                match c {
                    '\'' => out.push_str("''"),
                    '\\' => out.push_str("\\\\"),
                    _ => out.push(c)
                }
            }
        }
        LiteralEscape::Backslash => {
            for c in value.chars() {
                match c {
                    '\'' => out.push_str("\\'"),
                    '\\' => out.push_str("\\\\"),
                    '\n' => out.push_str("\\n"),
                    '\r' => out.push_str("\\r"),
                    _ => out.push(c)
                }
            }
        }
    }
    out.push('\'');
    out
}
