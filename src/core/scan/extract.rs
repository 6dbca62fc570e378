//! Literal key extraction from source text.
//!
//! A key is the first argument of a call to one of the configured function
//! names, when that argument is a plain string literal:
//!
//! ```text
//! t('Save')          -> "Save"
//! t("It's done", {}) -> "It's done"
//! t(`Hello`)         -> "Hello"
//! t(`Hi ${name}`)    -> skipped (interpolated)
//! t(label)           -> skipped (not a literal)
//! i18n.t('x')        -> skipped unless "i18n.t" is configured
//! ```

use regex::Regex;

/// Extracts literal keys for a fixed set of function names.
#[derive(Debug, Clone)]
pub struct KeyExtractor {
    pattern: Regex,
}

impl KeyExtractor {
    pub fn new(function_names: &[String]) -> Result<Self, regex::Error> {
        let names = function_names
            .iter()
            .map(|name| regex::escape(name))
            .collect::<Vec<_>>()
            .join("|");

        let single = r"'((?:[^'\\\n]|\\.)*)'";
        let double = r#""((?:[^"\\\n]|\\.)*)""#;
        let template = r"`((?:[^`\\$]|\\.|\$+(?:[^{`\\$]|\\.))*\$*)`";

        let pattern = Regex::new(&format!(
            r"(?:{names})\(\s*(?:{single}|{double}|{template})\s*[,)]"
        ))?;

        Ok(Self { pattern })
    }

    /// Every non-empty literal key in `source`, in order of appearance.
    pub fn extract(&self, source: &str) -> Vec<String> {
        self.pattern
            .captures_iter(source)
            .filter(|caps| {
                caps.get(0)
                    .is_some_and(|m| !is_continuation(source[..m.start()].chars().next_back()))
            })
            .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3)))
            .map(|m| unescape(m.as_str()))
            .filter(|key| !key.is_empty())
            .collect()
    }
}

/// Convenience wrapper building a one-off [`KeyExtractor`].
pub fn extract_keys(source: &str, function_names: &[String]) -> Result<Vec<String>, regex::Error> {
    Ok(KeyExtractor::new(function_names)?.extract(source))
}

/// True when the character before a match makes it part of a longer name,
/// e.g. `format(` or `obj.t(`.
fn is_continuation(previous: Option<char>) -> bool {
    previous.is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '$' || c == '.')
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(escaped @ ('\\' | '\'' | '"' | '`')) => out.push(escaped),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
