//! Artifact filter
//!
//! Reduces the resolved candidate set to the artifacts embedded as libraries. Precedence is
//! fixed and independent of rule declaration order:
//!
//! 1. an explicit exclusion always excludes,
//! 2. otherwise an explicit inclusion always includes,
//! 3. otherwise an artifact whose group belongs to a default-excluded platform prefix is
//!    excluded,
//! 4. everything else is included.

use std::collections::BTreeSet;
use std::fmt;

use crate::domain::{Artifact, ArtifactId, FilterRules};

/// Groups owned by the packaging platform itself, excluded unless the policy is disabled
pub const DEFAULT_PLATFORM_GROUP_PREFIXES: &[&str] =
    &["org.mule", "com.mulesource.muleesb", "com.mulesoft.muleesb"];

/// Why an artifact was included or excluded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reason {
    ExplicitExclusion(String),
    ExplicitInclusion(String),
    PlatformGroup(String),
    Default,
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExplicitExclusion(selector) => write!(f, "excluded by rule {selector}"),
            Self::ExplicitInclusion(selector) => write!(f, "included by rule {selector}"),
            Self::PlatformGroup(prefix) => write!(f, "platform group {prefix}"),
            Self::Default => f.write_str("no matching rule"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Included(Reason),
    Excluded(Reason),
}

impl Verdict {
    pub fn is_included(&self) -> bool {
        matches!(self, Self::Included(_))
    }

    pub fn reason(&self) -> &Reason {
        match self {
            Self::Included(reason) | Self::Excluded(reason) => reason,
        }
    }
}

/// Whether `group` belongs to `prefix` (equal, or a dotted sub-group of it)
pub fn group_matches_prefix(group: &str, prefix: &str) -> bool {
    group
        .strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('.'))
}

/// Rule set plus default-exclude policy for one run
#[derive(Debug, Clone, Default)]
pub struct ArtifactFilter {
    rules: FilterRules,
    default_exclude_group_prefixes: BTreeSet<String>,
}

impl ArtifactFilter {
    /// An empty prefix set disables the default-exclude policy
    pub fn new(rules: FilterRules, default_exclude_group_prefixes: BTreeSet<String>) -> Self {
        Self {
            rules,
            default_exclude_group_prefixes,
        }
    }

    pub fn rules(&self) -> &FilterRules {
        &self.rules
    }

    pub fn verdict(&self, id: &ArtifactId) -> Verdict {
        if let Some(selector) = self.rules.matching_exclusion(id) {
            return Verdict::Excluded(Reason::ExplicitExclusion(selector.to_string()));
        }
        if let Some(selector) = self.rules.matching_inclusion(id) {
            return Verdict::Included(Reason::ExplicitInclusion(selector.to_string()));
        }
        if let Some(prefix) = self
            .default_exclude_group_prefixes
            .iter()
            .find(|prefix| group_matches_prefix(&id.group, prefix))
        {
            return Verdict::Excluded(Reason::PlatformGroup(prefix.clone()));
        }
        Verdict::Included(Reason::Default)
    }

    /// Verdict for every distinct candidate, in identity order
    pub fn explain<'a, I>(&self, candidates: I) -> Vec<(ArtifactId, Verdict)>
    where
        I: IntoIterator<Item = &'a Artifact>,
    {
        let ids: BTreeSet<&ArtifactId> = candidates.into_iter().map(Artifact::id).collect();
        ids.into_iter()
            .map(|id| (id.clone(), self.verdict(id)))
            .collect()
    }

    pub fn select<'a, I>(&self, candidates: I) -> BTreeSet<Artifact>
    where
        I: IntoIterator<Item = &'a Artifact>,
    {
        candidates
            .into_iter()
            .filter(|artifact| self.verdict(artifact.id()).is_included())
            .cloned()
            .collect()
    }
}

/// Select the artifacts to embed from `candidates`
pub fn select<'a, I>(
    candidates: I,
    rules: &FilterRules,
    default_exclude_group_prefixes: &BTreeSet<String>,
) -> BTreeSet<Artifact>
where
    I: IntoIterator<Item = &'a Artifact>,
{
    ArtifactFilter::new(rules.clone(), default_exclude_group_prefixes.clone()).select(candidates)
}
