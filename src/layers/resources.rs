//! Resource filtering
//!
//! Filtered resource trees pass each text file through a [`ResourceFilter`] before it is
//! added to the archive. Files that are not valid UTF-8 are copied verbatim.

use std::collections::BTreeMap;

/// Text substitution step applied to filtered resources
pub trait ResourceFilter {
    /// Return the filtered text of the resource at `relative_path`
    fn filter(&self, relative_path: &str, text: &str) -> String;
}

/// Replaces `${key}` and `@key@` tokens with property values.
///
/// Tokens naming unknown properties are left as they are.
#[derive(Debug, Clone, Default)]
pub struct PropertyFilter {
    properties: BTreeMap<String, String>,
}

impl PropertyFilter {
    pub fn new(properties: BTreeMap<String, String>) -> Self {
        Self { properties }
    }

    fn substitute(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;

        while let Some(pos) = rest.find(['$', '@']) {
            out.push_str(&rest[..pos]);
            let tail = &rest[pos..];
            match self.token_at(tail) {
                Some((value, consumed)) => {
                    out.push_str(value);
                    rest = &tail[consumed..];
                }
                None => {
                    // '$' and '@' are single-byte
                    out.push_str(&tail[..1]);
                    rest = &tail[1..];
                }
            }
        }

        out.push_str(rest);
        out
    }

    /// Resolve a token at the start of `tail`, returning its value and byte length
    fn token_at(&self, tail: &str) -> Option<(&str, usize)> {
        if let Some(body) = tail.strip_prefix("${") {
            let end = body.find('}')?;
            let value = self.properties.get(&body[..end])?;
            return Some((value.as_str(), end + 3));
        }

        let body = tail.strip_prefix('@')?;
        let end = body.find('@')?;
        let key = &body[..end];
        if key.is_empty() || key.contains(char::is_whitespace) {
            return None;
        }
        let value = self.properties.get(key)?;
        Some((value.as_str(), end + 2))
    }
}

impl ResourceFilter for PropertyFilter {
    fn filter(&self, _relative_path: &str, text: &str) -> String {
        self.substitute(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter() -> PropertyFilter {
        PropertyFilter::new(BTreeMap::from([
            ("version".to_string(), "1.2.0".to_string()),
            ("env".to_string(), "prod".to_string()),
        ]))
    }

    macro_rules! test_substitution {
        ($test_name:ident, $input:expr, $expected:expr) => {
            #[test]
            fn $test_name() {
                assert_eq!(filter().filter("app.properties", $input), $expected);
            }
        };
    }

    test_substitution!(test_dollar_token, "v=${version}", "v=1.2.0");
    test_substitution!(test_at_token, "env=@env@", "env=prod");
    test_substitution!(test_multiple_tokens, "${env}-${version}@env@", "prod-1.2.0prod");
    test_substitution!(test_unknown_token_kept, "x=${missing}", "x=${missing}");
    test_substitution!(test_unclosed_token_kept, "x=${version", "x=${version");
    test_substitution!(test_email_untouched, "mail me@example.com", "mail me@example.com");
    test_substitution!(test_lone_markers, "cost $5 @ noon", "cost $5 @ noon");
    test_substitution!(test_non_ascii_text, "héllo ${env} ✓", "héllo prod ✓");
    test_substitution!(test_no_tokens, "plain text", "plain text");
}
