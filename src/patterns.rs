//! Matchers that find icon references in source text.
//!
//! Four surface syntaxes are recognized, in this order:
//!
//! 1. `<icon ... icon="X">` on elements named after the configured tag
//! 2. `icon="X"` on any element
//! 3. `icon: "X"` / `icon: 'X'` object properties
//! 4. `icon: X` bare-word object properties ending a line
//!
//! The attribute forms skip `:icon="..."` (bound or namespaced
//! attributes). Matchers overlap on purpose; duplicates are removed by
//! the accumulator, not here.

use regex::Regex;

use crate::error::{Result, WaltzError};

/// Placeholder replaced by the escaped tag name in a matcher template.
const TAG_PLACEHOLDER: &str = "{tag}";

/// A matcher described as data: a name and a regex template whose first
/// capture group is the icon reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatcherSpec {
    pub name: &'static str,
    pub template: &'static str,
}

/// The built-in matchers, in application order.
pub const BUILTIN_MATCHERS: &[MatcherSpec] = &[
    MatcherSpec {
        name: "tag-attribute",
        template: r#"(?mR)<{tag}[^>]*[^:]icon="([^"]+)""#,
    },
    MatcherSpec {
        name: "attribute",
        template: r#"(?mR)<[^>]*[^:]icon="([^"]+)""#,
    },
    MatcherSpec {
        name: "quoted-property",
        template: r#"(?mR)icon: ?['"]([^'"]+)['"]"#,
    },
    MatcherSpec {
        name: "bare-property",
        template: r#"(?mR)icon: ?([A-Za-z0-9_:-]+)$"#,
    },
];

/// One compiled matcher.
#[derive(Debug, Clone)]
pub struct Matcher {
    name: &'static str,
    regex: Regex,
}

impl Matcher {
    /// Compile a matcher for the given tag name.
    pub fn compile(spec: &MatcherSpec, tag: &str) -> Result<Self> {
        let source = spec.template.replace(TAG_PLACEHOLDER, &regex::escape(tag));
        let regex = Regex::new(&source).map_err(|e| WaltzError::Pattern {
            message: format!("matcher '{}' failed to compile: {}", spec.name, e),
            help: None,
        })?;

        Ok(Self {
            name: spec.name,
            regex,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Every captured reference in `text`, left to right.
    pub fn captures<'t>(&self, text: &'t str) -> impl Iterator<Item = &'t str> + use<'_, 't> {
        self.regex
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

/// Ordered list of matchers for one configuration.
#[derive(Debug, Clone)]
pub struct PatternSet {
    matchers: Vec<Matcher>,
}

impl PatternSet {
    /// Build the built-in pattern set for a tag name.
    pub fn for_tag(tag: &str) -> Result<Self> {
        Self::from_specs(tag, BUILTIN_MATCHERS)
    }

    /// Build a pattern set from an explicit list of specs.
    pub fn from_specs(tag: &str, specs: &[MatcherSpec]) -> Result<Self> {
        validate_tag(tag)?;

        let matchers = specs
            .iter()
            .map(|spec| Matcher::compile(spec, tag))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { matchers })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Matcher> {
        self.matchers.iter()
    }

    /// All references found in `text`, matcher by matcher. Duplicates are
    /// kept.
    pub fn find_all<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.matchers
            .iter()
            .flat_map(|matcher| matcher.captures(text))
            .collect()
    }
}

fn validate_tag(tag: &str) -> Result<()> {
    if tag.is_empty() || tag.chars().any(|c| c.is_whitespace() || c == '<' || c == '>') {
        return Err(WaltzError::Pattern {
            message: format!("invalid tag name '{}'", tag),
            help: Some("Use a plain element name such as 'icon'".to_string()),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set() -> PatternSet {
        PatternSet::for_tag("icon").unwrap()
    }

    fn matcher(name: &str) -> Matcher {
        set().iter().find(|m| m.name() == name).unwrap().clone()
    }

    #[test]
    fn test_builtin_order() {
        let names: Vec<&str> = set().iter().map(|m| m.name()).collect();
        assert_eq!(
            names,
            vec!["tag-attribute", "attribute", "quoted-property", "bare-property"]
        );
    }

    #[test]
    fn test_tag_attribute_requires_tag() {
        let m = matcher("tag-attribute");
        let found: Vec<&str> = m
            .captures(r#"<icon icon="home" /> <button icon="star">"#)
            .collect();
        assert_eq!(found, vec!["home"]);
    }

    #[test]
    fn test_tag_attribute_skips_bound_form() {
        let m = matcher("tag-attribute");
        let found: Vec<&str> = m
            .captures(r#"<icon :icon="x" /> <icon v-bind:icon="y" />"#)
            .collect();
        assert!(found.is_empty());
    }

    #[test]
    fn test_custom_tag() {
        let set = PatternSet::for_tag("w-icon").unwrap();
        let m = set.iter().next().unwrap();
        let found: Vec<&str> = m
            .captures(r#"<w-icon icon="home" /> <icon icon="star" />"#)
            .collect();
        assert_eq!(found, vec!["home"]);
    }

    #[test]
    fn test_attribute_any_element() {
        let m = matcher("attribute");
        let found: Vec<&str> = m
            .captures("<button icon=\"solid:star\">\n<div class=\"x\" icon=\"home\"></div>")
            .collect();
        assert_eq!(found, vec!["solid:star", "home"]);
    }

    #[test]
    fn test_attribute_skips_bound_form() {
        let m = matcher("attribute");
        let found: Vec<&str> = m
            .captures(r#"<icon :icon="dynamicName" /> <icon v-bind:icon="other" />"#)
            .collect();
        assert!(found.is_empty());
    }

    #[test]
    fn test_quoted_property() {
        let m = matcher("quoted-property");
        let found: Vec<&str> = m
            .captures("{ icon: 'home' }\n{ icon:\"solid:star\" }")
            .collect();
        assert_eq!(found, vec!["home", "solid:star"]);
    }

    #[test]
    fn test_bare_property_must_end_line() {
        let m = matcher("bare-property");
        let found: Vec<&str> = m
            .captures("icon: home\nicon: solid:star-2\r\nicon: trailing, other\n")
            .collect();
        assert_eq!(found, vec!["home", "solid:star-2"]);
    }

    #[test]
    fn test_find_all_keeps_overlap() {
        let found = set().find_all(r#"<icon icon="home" />"#);
        assert_eq!(found, vec!["home", "home"]);
    }

    #[test]
    fn test_tag_is_escaped() {
        let set = PatternSet::for_tag("x.icon").unwrap();
        let found: Vec<&str> = set
            .iter()
            .next()
            .unwrap()
            .captures(r#"<xyicon icon="nope" /><x.icon icon="yes" />"#)
            .collect();
        assert_eq!(found, vec!["yes"]);
    }

    #[test]
    fn test_invalid_tag_rejected() {
        assert!(PatternSet::for_tag("").is_err());
        assert!(PatternSet::for_tag("my icon").is_err());
    }

    #[test]
    fn test_extra_spec_is_data_only() {
        const EXTRA: &[MatcherSpec] = &[MatcherSpec {
            name: "data-icon",
            template: r#"data-icon="([^"]+)""#,
        }];
        let set = PatternSet::from_specs("icon", EXTRA).unwrap();
        assert_eq!(set.find_all(r#"<i data-icon="gear">"#), vec!["gear"]);
    }
}
