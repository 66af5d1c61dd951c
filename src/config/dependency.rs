//! Dependency and selector declarations in plugpack.yaml

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::artifact::DEFAULT_ARTIFACT_EXTENSION;
use crate::domain::{Artifact, ArtifactId, Selector};
use crate::error::Result;
use crate::error::config::invalid;

/// A resolved dependency declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DependencyConfig {
    pub group: String,
    pub name: String,
    pub version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<String>,

    #[serde(default = "default_extension")]
    pub extension: String,

    /// Resolved artifact file, relative to the project directory
    pub path: PathBuf,
}

fn default_extension() -> String {
    DEFAULT_ARTIFACT_EXTENSION.to_string()
}

impl DependencyConfig {
    pub fn new(
        group: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
        path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
            version: version.into(),
            classifier: None,
            extension: default_extension(),
            path: path.into(),
        }
    }

    pub fn id(&self) -> ArtifactId {
        ArtifactId {
            group: self.group.clone(),
            name: self.name.clone(),
            version: self.version.clone(),
            classifier: self.classifier.clone(),
            extension: self.extension.clone(),
        }
    }

    /// Artifact with its path resolved against `project_dir`
    pub fn to_artifact(&self, project_dir: &Path) -> Artifact {
        Artifact::from_file(self.id(), super::resolve(project_dir, &self.path))
    }

    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("group", self.group.as_str()),
            ("name", self.name.as_str()),
            ("version", self.version.as_str()),
            ("extension", self.extension.as_str()),
        ];
        for (field, value) in fields {
            if value.trim().is_empty() {
                return Err(invalid(format!(
                    "dependency {}:{} has an empty {field}",
                    self.group, self.name
                )));
            }
        }
        let file_name = self.id().library_file_name();
        if file_name.contains('/') || file_name.contains('\\') {
            return Err(invalid(format!(
                "dependency {} produces a library name with a path separator: {file_name}",
                self.id()
            )));
        }
        if self.path.as_os_str().is_empty() {
            return Err(invalid(format!("dependency {} has no path", self.id())));
        }
        Ok(())
    }
}

/// A (group, name) pair as written in the inclusions/exclusions lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SelectorConfig {
    pub group: String,
    pub name: String,
}

impl SelectorConfig {
    pub fn new(group: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
        }
    }

    pub fn to_selector(&self) -> Result<Selector> {
        Selector::parse(&self.group, &self.name)
    }
}
