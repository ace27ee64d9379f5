//! `{name}` placeholder substitution for URL and body templates

use ark_domain::Arguments;
use ark_domain::tool::entities::value_to_text;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use regex::{Captures, Regex};
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^}]+)\}").expect("placeholder pattern is a valid literal"));

/// Everything but RFC 3986 unreserved characters gets escaped, so a space
/// becomes `%20` rather than `+`.
const VALUE_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// How substituted values are written into the template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Substitution {
    /// Percent-encode values (URL context)
    Escaped,
    /// Insert values verbatim (body context)
    Raw,
}

/// Replace `{name}` placeholders with argument values.
///
/// Values are string-coerced (strings unquoted, other JSON in its text
/// form). Placeholders without a matching argument are left untouched, and
/// an empty argument map returns the template unchanged.
pub fn substitute(template: &str, arguments: &Arguments, mode: Substitution) -> String {
    if arguments.is_empty() {
        return template.to_string();
    }

    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| {
            match arguments.get(&caps[1]) {
                Some(value) => {
                    let text = value_to_text(value);
                    match mode {
                        Substitution::Escaped => utf8_percent_encode(&text, VALUE_ESCAPE).to_string(),
                        Substitution::Raw => text,
                    }
                }
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

pub fn substitute_url(template: &str, arguments: &Arguments) -> String {
    substitute(template, arguments, Substitution::Escaped)
}

pub fn substitute_body(template: &str, arguments: &Arguments) -> String {
    substitute(template, arguments, Substitution::Raw)
}
