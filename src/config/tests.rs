//! Tests for the packaging configuration

use std::path::{Path, PathBuf};

use super::*;
use crate::error::PackagerError;
use crate::layers::ClassesMode;

const FULL_CONFIG: &str = r"
final_name: my-plugin-1.0
extension: zip
output_directory: build
resources_directory: app
classes_directory: build/classes
archive_classes: true
filter_resources: true
exclude_platform_dependencies: true
resource_excludes:
  - '**/*.bak'
properties:
  version: 1.0
  name: demo
  enabled: true
inclusions:
  - group: org.mule.modules
    name: mule-module-extra
exclusions:
  - group: com.example
    name: '*'
dependencies:
  - group: org.acme
    name: acme-util
    version: '2.1'
    path: repo/acme-util-2.1.jar
  - group: org.acme
    name: acme-native
    version: '2.1'
    classifier: linux
    extension: so
    path: /opt/repo/acme-native.so
";

#[test]
fn test_minimal_config_uses_defaults() {
    let config = PackagerConfig::from_yaml("final_name: app").unwrap();
    assert_eq!(config, PackagerConfig::new("app"));
    assert_eq!(config.extension, "zip");
    assert_eq!(config.output_directory, PathBuf::from("target"));
    assert_eq!(config.resources_directory, PathBuf::from("src/main/app"));
    assert_eq!(config.classes_directory, PathBuf::from("target/classes"));
    assert!(!config.archive_classes);
    assert!(!config.filter_resources);
    assert!(config.exclude_platform_dependencies);
    assert_eq!(
        config.platform_group_prefixes,
        vec!["org.mule", "com.mulesource.muleesb", "com.mulesoft.muleesb"]
    );
}

#[test]
fn test_full_config() {
    let config = PackagerConfig::from_yaml(FULL_CONFIG).unwrap();
    assert_eq!(config.final_name, "my-plugin-1.0");
    assert!(config.archive_classes);
    assert_eq!(config.properties["version"], "1.0");
    assert_eq!(config.properties["enabled"], "true");
    assert_eq!(config.inclusions.len(), 1);
    assert_eq!(config.dependencies[1].classifier.as_deref(), Some("linux"));
    assert_eq!(config.dependencies[0].extension, "jar");
}

#[test]
fn test_unknown_field_is_rejected() {
    let err = PackagerConfig::from_yaml("final_name: app\nbogus: 1").unwrap_err();
    assert!(matches!(err, PackagerError::ConfigParseFailed { .. }));
}

#[test]
fn test_nested_property_is_rejected() {
    let yaml = "final_name: app\nproperties:\n  nested:\n    a: b\n";
    assert!(PackagerConfig::from_yaml(yaml).is_err());
}

#[test]
fn test_empty_final_name_is_invalid() {
    let err = PackagerConfig::from_yaml("final_name: ' '").unwrap_err();
    assert!(matches!(err, PackagerError::ConfigInvalid { .. }));
}

#[test]
fn test_final_name_with_separator_is_invalid() {
    let err = PackagerConfig::from_yaml("final_name: a/b").unwrap_err();
    assert!(matches!(err, PackagerError::ConfigInvalid { .. }));
}

#[test]
fn test_invalid_selector_is_reported() {
    let yaml = "final_name: app\nexclusions:\n  - group: 'org.*'\n    name: x\n";
    let err = PackagerConfig::from_yaml(yaml).unwrap_err();
    assert!(matches!(err, PackagerError::InvalidSelector { .. }));
}

#[test]
fn test_archived_classes_with_jar_extension_conflicts() {
    let yaml = "final_name: app\nextension: jar\narchive_classes: true\n";
    let err = PackagerConfig::from_yaml(yaml).unwrap_err();
    assert!(matches!(err, PackagerError::ConflictingOptions { .. }));
}

#[test]
fn test_loose_classes_with_jar_extension_is_fine() {
    let yaml = "final_name: app\nextension: jar\n";
    assert!(PackagerConfig::from_yaml(yaml).is_ok());
}

#[test]
fn test_output_inside_classes_conflicts_when_archived() {
    let mut config = PackagerConfig::new("app");
    config.archive_classes = true;
    config.output_directory = PathBuf::from("target/classes/out");
    let err = config.validate().unwrap_err();
    assert!(matches!(err, PackagerError::ConflictingOptions { .. }));
}

#[test]
fn test_dependency_without_version_is_invalid() {
    let mut config = PackagerConfig::new("app");
    config
        .dependencies
        .push(DependencyConfig::new("org.acme", "util", "", "util.jar"));
    let err = config.validate().unwrap_err();
    assert!(matches!(err, PackagerError::ConfigInvalid { .. }));
}

#[test]
fn test_bad_resource_glob_is_invalid() {
    let mut config = PackagerConfig::new("app");
    config.resource_includes.push("[".to_string());
    assert!(config.validate().is_err());
}

#[test]
fn test_load_missing_file() {
    let err = PackagerConfig::load(Path::new("/nonexistent/plugpack.yaml")).unwrap_err();
    assert!(matches!(err, PackagerError::ConfigNotFound { .. }));
}

#[test]
fn test_load_reports_path_on_parse_failure() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, "final_name: [unclosed").unwrap();

    let err = PackagerConfig::load(&path).unwrap_err();
    match err {
        PackagerError::ConfigParseFailed { path: reported, .. } => {
            assert_eq!(reported, path.display().to_string());
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_apply_overrides() {
    let mut config = PackagerConfig::new("app");
    config.apply(&ConfigOverrides {
        archive_classes: Some(true),
        filter_resources: None,
        exclude_platform_dependencies: Some(false),
        output_directory: Some(PathBuf::from("out")),
    });
    assert!(config.archive_classes);
    assert!(!config.filter_resources);
    assert!(!config.exclude_platform_dependencies);
    assert_eq!(config.output_directory, PathBuf::from("out"));
}

#[test]
fn test_platform_prefixes_dropped_when_disabled() {
    let mut config = PackagerConfig::new("app");
    config.dependencies.push(DependencyConfig::new(
        "org.mule.modules",
        "mule-module-x",
        "3.0",
        "x.jar",
    ));
    let candidates = config.candidates(Path::new("/project"));

    assert!(config.artifact_filter().unwrap().select(&candidates).is_empty());

    config.exclude_platform_dependencies = false;
    assert_eq!(config.artifact_filter().unwrap().select(&candidates).len(), 1);
}

#[test]
fn test_assembly_inputs_resolve_paths() {
    let config = PackagerConfig::from_yaml(FULL_CONFIG).unwrap();
    let project = Path::new("/project");
    let inputs = config.assembly_inputs(project).unwrap();

    assert_eq!(
        inputs.destination,
        PathBuf::from("/project/build/my-plugin-1.0.zip")
    );
    assert_eq!(inputs.sources.len(), 1);
    assert_eq!(inputs.sources[0].name, RESOURCES_SOURCE_NAME);
    assert_eq!(inputs.sources[0].root.path(), Path::new("/project/app"));
    assert!(inputs.sources[0].filtered);
    assert!(!inputs.sources[0].filter.accepts("notes.bak"));

    let compiled = inputs.compiled.unwrap();
    assert_eq!(compiled.mode, ClassesMode::Archived);
    assert_eq!(compiled.directory, PathBuf::from("/project/build/classes"));
    assert_eq!(
        compiled.jar_path,
        PathBuf::from("/project/build/my-plugin-1.0.jar")
    );

    assert_eq!(inputs.candidates.len(), 2);
    assert_eq!(
        inputs.candidates[0].content(),
        &crate::domain::EntryContent::File(PathBuf::from("/project/repo/acme-util-2.1.jar"))
    );
    assert_eq!(
        inputs.candidates[1].content(),
        &crate::domain::EntryContent::File(PathBuf::from("/opt/repo/acme-native.so"))
    );
}

#[test]
fn test_to_yaml_parses_back() {
    let config = PackagerConfig::from_yaml(FULL_CONFIG).unwrap();
    let yaml = config.to_yaml().unwrap();
    assert_eq!(PackagerConfig::from_yaml(&yaml).unwrap(), config);
}
