//! Version command implementation

use crate::config::CONFIG_FILE_NAME;
use crate::error::Result;
use crate::filter::DEFAULT_PLATFORM_GROUP_PREFIXES;

/// Run version command
pub fn run() -> Result<()> {
    for line in version_info() {
        println!("{line}");
    }
    Ok(())
}

fn version_info() -> Vec<String> {
    vec![
        format!("plugpack {}", env!("CARGO_PKG_VERSION")),
        String::new(),
        "Build info:".to_string(),
        format!("  Minimum Rust version: {}", env!("CARGO_PKG_RUST_VERSION")),
        format!("  Profile: {}", build_profile()),
        String::new(),
        "Defaults:".to_string(),
        format!("  Config file: {CONFIG_FILE_NAME}"),
        format!(
            "  Platform groups: {}",
            DEFAULT_PLATFORM_GROUP_PREFIXES.join(", ")
        ),
    ]
}

fn build_profile() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    }
}
