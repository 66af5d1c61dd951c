//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::ConfigOverrides;

/// Plugpack - plugin archive packager
///
/// Packages a module's resources, compiled classes and filtered runtime dependencies into a
/// single deployable archive.
#[derive(Parser, Debug)]
#[command(
    name = "plugpack",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Plugin archive packager",
    long_about = "Plugpack assembles a deployable plugin archive from a resources directory, \
                  compiled classes (loose or as a jar) and the runtime dependencies that survive \
                  inclusion, exclusion and platform filtering.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  plugpack package\n    \
                  plugpack package --archive-classes --report target/report.json\n    \
                  plugpack select --all\n    \
                  plugpack -C ./my-module package --quiet"
)]
pub struct Cli {
    /// Project directory (defaults to current directory)
    #[arg(long, short = 'C', global = true, env = "PLUGPACK_PROJECT_DIR")]
    pub project_dir: Option<PathBuf>,

    /// Configuration file (defaults to plugpack.yaml in the project directory)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assemble the plugin archive
    Package(PackageArgs),

    /// Show which dependencies would be packaged
    Select(SelectArgs),

    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Flags shared by commands that read the dependency policy
#[derive(clap::Args, Debug, Default)]
pub struct PolicyArgs {
    /// Keep dependencies from platform groups (org.mule, ...)
    #[arg(long)]
    pub include_platform_dependencies: bool,
}

/// Arguments for the package command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Package using plugpack.yaml:\n    plugpack package\n\n\
                  Package compiled classes as a jar under lib/:\n    plugpack package --archive-classes\n\n\
                  Substitute properties in resources:\n    plugpack package --filter-resources\n\n\
                  Copy resources verbatim despite plugpack.yaml:\n    plugpack package --no-filter-resources\n\n\
                  Write the assembly record:\n    plugpack package --report target/plugpack.json\n\n\
                  Print the assembly record instead of a summary:\n    plugpack package --json")]
pub struct PackageArgs {
    /// Package compiled classes as a jar under lib/
    #[arg(long, conflicts_with = "loose_classes")]
    pub archive_classes: bool,

    /// Copy compiled classes under classes/
    #[arg(long)]
    pub loose_classes: bool,

    /// Substitute properties in resource files
    #[arg(long, conflicts_with = "no_filter_resources")]
    pub filter_resources: bool,

    /// Copy resource files verbatim
    #[arg(long)]
    pub no_filter_resources: bool,

    #[command(flatten)]
    pub policy: PolicyArgs,

    /// Output directory (overrides output_directory)
    #[arg(long, short = 'o', value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Write the assembly record as JSON to FILE
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Print the assembly record as JSON
    #[arg(long)]
    pub json: bool,

    /// Do not show progress
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

impl PackageArgs {
    /// Configuration values set on the command line
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            archive_classes: toggle(self.archive_classes, self.loose_classes),
            filter_resources: toggle(self.filter_resources, self.no_filter_resources),
            exclude_platform_dependencies: self.policy.overrides(),
            output_directory: self.output.clone(),
        }
    }
}

/// `Some(true)` for the "on" flag, `Some(false)` for the "off" flag, `None` for neither
fn toggle(on: bool, off: bool) -> Option<bool> {
    if on {
        Some(true)
    } else if off {
        Some(false)
    } else {
        None
    }
}

impl PolicyArgs {
    fn overrides(&self) -> Option<bool> {
        self.include_platform_dependencies.then_some(false)
    }
}

/// Arguments for the select command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  List packaged dependencies:\n    plugpack select\n\n\
                  Show every candidate with its verdict:\n    plugpack select --all")]
pub struct SelectArgs {
    /// Also show excluded dependencies and why
    #[arg(long, short = 'a')]
    pub all: bool,

    #[command(flatten)]
    pub policy: PolicyArgs,
}

impl SelectArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            exclude_platform_dependencies: self.policy.overrides(),
            ..ConfigOverrides::default()
        }
    }
}

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    plugpack completions --shell bash > ~/.bash_completion.d/plugpack\n\n\
                  Generate zsh completions:\n    plugpack completions --shell zsh > ~/.zfunc/_plugpack\n\n\
                  Generate fish completions:\n    plugpack completions --shell fish > ~/.config/fish/completions/plugpack.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    #[arg(long)]
    pub shell: String,
}
