//! Dependency filter rules
//!
//! A rule pairs a (group, name) selector with an inclusion or exclusion tag. Each selector
//! component is either a literal or the wildcard `*`.

use std::fmt;

use crate::error::Result;
use crate::error::config::invalid_selector;

use super::artifact::ArtifactId;

const WILDCARD: &str = "*";

/// One component of a selector
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SelectorPart {
    Any,
    Literal(String),
}

impl SelectorPart {
    fn parse(raw: &str, selector: &str, component: &str) -> Result<Self> {
        let value = raw.trim();
        if value.is_empty() {
            return Err(invalid_selector(selector, format!("{component} is empty")));
        }
        if value == WILDCARD {
            return Ok(Self::Any);
        }
        if value.contains('*') {
            return Err(invalid_selector(
                selector,
                format!("{component} mixes '*' with other characters"),
            ));
        }
        if value.chars().any(|c| c.is_whitespace() || c == ':') {
            return Err(invalid_selector(
                selector,
                format!("{component} contains whitespace or ':'"),
            ));
        }
        Ok(Self::Literal(value.to_string()))
    }

    fn matches(&self, value: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Literal(literal) => literal == value,
        }
    }
}

impl fmt::Display for SelectorPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str(WILDCARD),
            Self::Literal(value) => f.write_str(value),
        }
    }
}

/// A (group, name) pattern
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Selector {
    group: SelectorPart,
    name: SelectorPart,
}

impl Selector {
    /// Parse a selector from its group and name components
    pub fn parse(group: &str, name: &str) -> Result<Self> {
        let display = format!("{group}:{name}");
        Ok(Self {
            group: SelectorPart::parse(group, &display, "group")?,
            name: SelectorPart::parse(name, &display, "name")?,
        })
    }

    pub fn matches(&self, id: &ArtifactId) -> bool {
        self.group.matches(&id.group) && self.name.matches(&id.name)
    }

    /// `*:*` matches every artifact
    pub fn is_match_all(&self) -> bool {
        self.group == SelectorPart::Any && self.name == SelectorPart::Any
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Inclusion,
    Exclusion,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterRule {
    pub kind: RuleKind,
    pub selector: Selector,
}

impl FilterRule {
    pub fn inclusion(selector: Selector) -> Self {
        Self {
            kind: RuleKind::Inclusion,
            selector,
        }
    }

    pub fn exclusion(selector: Selector) -> Self {
        Self {
            kind: RuleKind::Exclusion,
            selector,
        }
    }
}

/// The rule set for one run, split by kind
#[derive(Debug, Clone, Default)]
pub struct FilterRules {
    inclusions: Vec<Selector>,
    exclusions: Vec<Selector>,
}

impl FilterRules {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_inclusion(mut self, selector: Selector) -> Self {
        self.inclusions.push(selector);
        self
    }

    #[must_use]
    pub fn with_exclusion(mut self, selector: Selector) -> Self {
        self.exclusions.push(selector);
        self
    }

    pub fn inclusions(&self) -> &[Selector] {
        &self.inclusions
    }

    pub fn exclusions(&self) -> &[Selector] {
        &self.exclusions
    }

    pub fn is_empty(&self) -> bool {
        self.inclusions.is_empty() && self.exclusions.is_empty()
    }

    /// Smallest exclusion selector matching `id`, independent of declaration order
    pub fn matching_exclusion(&self, id: &ArtifactId) -> Option<&Selector> {
        self.exclusions.iter().filter(|s| s.matches(id)).min()
    }

    /// Smallest inclusion selector matching `id`, independent of declaration order
    pub fn matching_inclusion(&self, id: &ArtifactId) -> Option<&Selector> {
        self.inclusions.iter().filter(|s| s.matches(id)).min()
    }
}

impl FromIterator<FilterRule> for FilterRules {
    fn from_iter<I: IntoIterator<Item = FilterRule>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |rules, rule| match rule.kind {
                RuleKind::Inclusion => rules.with_inclusion(rule.selector),
                RuleKind::Exclusion => rules.with_exclusion(rule.selector),
            })
    }
}
