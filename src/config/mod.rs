//! Packaging configuration (`plugpack.yaml`)
//!
//! This module handles:
//! - Parsing and validating the configuration file
//! - Applying command line overrides
//! - Turning the configuration into [`AssemblyInputs`] for the assembler
//!
//! All validation happens before any file is read or written, so a bad rule or a
//! conflicting option never leaves a half-built archive behind.

pub mod dependency;

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::assembler::destination::DEFAULT_ARCHIVE_EXTENSION;
use crate::assembler::{AssemblyInputs, DestinationName};
use crate::domain::{Artifact, ContentSource, FilterRules, PathFilter};
use crate::error::config::{conflicting_options, invalid, not_found, parse_failed, read_failed};
use crate::error::Result;
use crate::filter::{ArtifactFilter, DEFAULT_PLATFORM_GROUP_PREFIXES};
use crate::layers::{ClassesMode, CompiledOutput, PropertyFilter};

pub use dependency::{DependencyConfig, SelectorConfig};

/// Default configuration file name in the project directory
pub const CONFIG_FILE_NAME: &str = "plugpack.yaml";

/// Name of the content source built from the resources directory
pub const RESOURCES_SOURCE_NAME: &str = "resources";

/// Packaging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackagerConfig {
    /// Base name of the produced archive (and of the classes jar)
    pub final_name: String,

    #[serde(default = "default_extension")]
    pub extension: String,

    #[serde(default = "default_output_directory")]
    pub output_directory: PathBuf,

    /// Files placed at the archive root
    #[serde(default = "default_resources_directory")]
    pub resources_directory: PathBuf,

    #[serde(default = "default_classes_directory")]
    pub classes_directory: PathBuf,

    /// Pack compiled output into a jar under `lib/` instead of loose files under `classes/`
    #[serde(default)]
    pub archive_classes: bool,

    /// Substitute properties in resource files
    #[serde(default)]
    pub filter_resources: bool,

    /// Drop artifacts whose group belongs to the platform itself
    #[serde(default = "default_true")]
    pub exclude_platform_dependencies: bool,

    #[serde(default = "default_platform_group_prefixes")]
    pub platform_group_prefixes: Vec<String>,

    #[serde(default)]
    pub resource_includes: Vec<String>,

    #[serde(default)]
    pub resource_excludes: Vec<String>,

    #[serde(default, deserialize_with = "deserialize_properties")]
    pub properties: BTreeMap<String, String>,

    #[serde(default)]
    pub inclusions: Vec<SelectorConfig>,

    #[serde(default)]
    pub exclusions: Vec<SelectorConfig>,

    /// Resolved dependency candidates
    #[serde(default)]
    pub dependencies: Vec<DependencyConfig>,
}

fn default_extension() -> String {
    DEFAULT_ARCHIVE_EXTENSION.to_string()
}

fn default_output_directory() -> PathBuf {
    PathBuf::from("target")
}

fn default_resources_directory() -> PathBuf {
    PathBuf::from("src/main/app")
}

fn default_classes_directory() -> PathBuf {
    PathBuf::from("target/classes")
}

fn default_true() -> bool {
    true
}

fn default_platform_group_prefixes() -> Vec<String> {
    DEFAULT_PLATFORM_GROUP_PREFIXES
        .iter()
        .map(ToString::to_string)
        .collect()
}

/// Accept any scalar as a property value (`version: 1.0` is a float in YAML)
fn deserialize_properties<'de, D>(deserializer: D) -> std::result::Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, serde_yaml::Value>::deserialize(deserializer)?;
    raw.into_iter()
        .map(|(key, value)| {
            let text = match value {
                serde_yaml::Value::String(s) => s,
                serde_yaml::Value::Number(n) => n.to_string(),
                serde_yaml::Value::Bool(b) => b.to_string(),
                _ => {
                    return Err(D::Error::custom(format!(
                        "property '{key}' must be a string, number or boolean"
                    )));
                }
            };
            Ok((key, text))
        })
        .collect()
}

/// Resolve `path` against `project_dir` unless it is absolute
pub(crate) fn resolve(project_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_dir.join(path)
    }
}

/// Command line values that take precedence over the file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub archive_classes: Option<bool>,
    pub filter_resources: Option<bool>,
    pub exclude_platform_dependencies: Option<bool>,
    pub output_directory: Option<PathBuf>,
}

impl PackagerConfig {
    /// Minimal configuration with defaults for everything but the archive name
    pub fn new(final_name: impl Into<String>) -> Self {
        Self {
            final_name: final_name.into(),
            extension: default_extension(),
            output_directory: default_output_directory(),
            resources_directory: default_resources_directory(),
            classes_directory: default_classes_directory(),
            archive_classes: false,
            filter_resources: false,
            exclude_platform_dependencies: true,
            platform_group_prefixes: default_platform_group_prefixes(),
            resource_includes: Vec::new(),
            resource_excludes: Vec::new(),
            properties: BTreeMap::new(),
            inclusions: Vec::new(),
            exclusions: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    /// Load and validate a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(not_found(path.display().to_string()));
        }
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| read_failed(path.display().to_string(), e.to_string()))?;
        let config: Self = serde_yaml::from_str(&yaml)
            .map_err(|e| parse_failed(path.display().to_string(), e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn apply(&mut self, overrides: &ConfigOverrides) {
        if let Some(archive_classes) = overrides.archive_classes {
            self.archive_classes = archive_classes;
        }
        if let Some(filter_resources) = overrides.filter_resources {
            self.filter_resources = filter_resources;
        }
        if let Some(exclude) = overrides.exclude_platform_dependencies {
            self.exclude_platform_dependencies = exclude;
        }
        if let Some(output_directory) = &overrides.output_directory {
            self.output_directory.clone_from(output_directory);
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        validate_file_stem("final_name", &self.final_name)?;
        validate_file_stem("extension", self.extension.trim_start_matches('.'))?;

        let rules = self.filter_rules()?;
        if let Some(selector) = rules.exclusions().iter().find(|s| s.is_match_all()) {
            warn!("Exclusion rule {selector} excludes every dependency");
        }

        for dependency in &self.dependencies {
            dependency.validate()?;
        }
        for prefix in &self.platform_group_prefixes {
            if prefix.trim().is_empty() {
                return Err(invalid("platform_group_prefixes contains an empty prefix"));
            }
        }

        self.resource_filter_globs()?;

        if self.archive_classes {
            let name = self.destination_name();
            if name.file_name() == name.classes_archive().file_name() {
                return Err(conflicting_options(format!(
                    "archive_classes with extension '{}' would write the classes jar over the archive",
                    name.extension
                )));
            }
            if self.output_directory.starts_with(&self.classes_directory) {
                return Err(conflicting_options(
                    "archive_classes needs an output_directory outside classes_directory",
                ));
            }
        }

        Ok(())
    }

    pub fn filter_rules(&self) -> Result<FilterRules> {
        let mut rules = FilterRules::new();
        for inclusion in &self.inclusions {
            rules = rules.with_inclusion(inclusion.to_selector()?);
        }
        for exclusion in &self.exclusions {
            rules = rules.with_exclusion(exclusion.to_selector()?);
        }
        Ok(rules)
    }

    /// Filter built from the rules and the platform policy
    pub fn artifact_filter(&self) -> Result<ArtifactFilter> {
        let prefixes: BTreeSet<String> = if self.exclude_platform_dependencies {
            self.platform_group_prefixes
                .iter()
                .map(|prefix| prefix.trim().to_string())
                .collect()
        } else {
            BTreeSet::new()
        };
        Ok(ArtifactFilter::new(self.filter_rules()?, prefixes))
    }

    pub fn destination_name(&self) -> DestinationName {
        DestinationName::new(self.final_name.clone(), self.extension.clone())
    }

    pub fn destination(&self, project_dir: &Path) -> PathBuf {
        self.destination_name()
            .path_in(&resolve(project_dir, &self.output_directory))
    }

    pub fn classes_archive(&self, project_dir: &Path) -> PathBuf {
        self.destination_name()
            .classes_archive()
            .path_in(&resolve(project_dir, &self.output_directory))
    }

    pub fn candidates(&self, project_dir: &Path) -> Vec<Artifact> {
        self.dependencies
            .iter()
            .map(|dependency| dependency.to_artifact(project_dir))
            .collect()
    }

    pub fn resource_source(&self, project_dir: &Path) -> Result<ContentSource> {
        Ok(ContentSource::directory(
            RESOURCES_SOURCE_NAME,
            resolve(project_dir, &self.resources_directory),
        )
        .with_filter(self.resource_filter_globs()?)
        .filtered(self.filter_resources))
    }

    pub fn compiled_output(&self, project_dir: &Path) -> CompiledOutput {
        CompiledOutput {
            directory: resolve(project_dir, &self.classes_directory),
            mode: if self.archive_classes {
                ClassesMode::Archived
            } else {
                ClassesMode::Loose
            },
            jar_path: self.classes_archive(project_dir),
        }
    }

    pub fn property_filter(&self) -> PropertyFilter {
        PropertyFilter::new(self.properties.clone())
    }

    /// Validate, then build the inputs of one assembly run
    pub fn assembly_inputs(&self, project_dir: &Path) -> Result<AssemblyInputs> {
        self.validate()?;
        Ok(AssemblyInputs {
            sources: vec![self.resource_source(project_dir)?],
            compiled: Some(self.compiled_output(project_dir)),
            candidates: self.candidates(project_dir),
            filter: self.artifact_filter()?,
            destination: self.destination(project_dir),
        })
    }

    fn resource_filter_globs(&self) -> Result<PathFilter> {
        PathFilter::new(&self.resource_includes, &self.resource_excludes)
    }
}

fn validate_file_stem(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(format!("{field} must not be empty")));
    }
    if value.contains('/') || value.contains('\\') {
        return Err(invalid(format!(
            "{field} must not contain path separators: {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests;
