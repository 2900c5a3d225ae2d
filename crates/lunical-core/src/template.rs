//! Placeholder substitution for event titles and descriptions.

use std::sync::OnceLock;

use regex::{Captures, Regex};

static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();

fn placeholder_regex() -> &'static Regex {
    PLACEHOLDER.get_or_init(|| Regex::new(r"\{(\w+)\}").expect("placeholder pattern is valid"))
}

/// Substitutes `{identifier}` placeholders in `template` with the matching
/// field value. Unknown placeholders are left verbatim; this never fails.
pub fn render(template: &str, fields: &[(&str, String)]) -> String {
    placeholder_regex()
        .replace_all(template, |caps: &Captures<'_>| {
            let key = &caps[1];
            fields
                .iter()
                .find(|(name, _)| *name == key)
                .map_or_else(|| caps[0].to_string(), |(_, value)| value.clone())
        })
        .into_owned()
}
