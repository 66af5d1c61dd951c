//! Content sources: the layers merged into the output archive

use std::path::{Path, PathBuf};

use wax::{CandidatePath, Glob, Pattern};

use crate::error::Result;
use crate::error::config::invalid;

/// Root of a content source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceRoot {
    /// Every file below the directory becomes an entry
    Directory(PathBuf),
    /// The file itself becomes a single entry
    File(PathBuf),
}

impl SourceRoot {
    pub fn path(&self) -> &Path {
        match self {
            Self::Directory(path) | Self::File(path) => path,
        }
    }

    pub fn exists(&self) -> bool {
        match self {
            Self::Directory(path) => path.is_dir(),
            Self::File(path) => path.is_file(),
        }
    }
}

/// Include/exclude globs, matched against paths relative to the source root
#[derive(Debug, Clone, Default)]
pub struct PathFilter {
    includes: Vec<Glob<'static>>,
    excludes: Vec<Glob<'static>>,
}

impl PathFilter {
    /// Compile include and exclude patterns; an empty include list accepts everything
    pub fn new<I, E>(includes: I, excludes: E) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        Ok(Self {
            includes: compile_globs(includes)?,
            excludes: compile_globs(excludes)?,
        })
    }

    pub fn accepts(&self, relative_path: &str) -> bool {
        let candidate = CandidatePath::from(relative_path);
        let included = self.includes.is_empty()
            || self
                .includes
                .iter()
                .any(|glob| glob.matched(&candidate).is_some());
        included
            && !self
                .excludes
                .iter()
                .any(|glob| glob.matched(&candidate).is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.includes.is_empty() && self.excludes.is_empty()
    }
}

fn compile_globs<I>(patterns: I) -> Result<Vec<Glob<'static>>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    patterns
        .into_iter()
        .map(|pattern| {
            let pattern = pattern.as_ref();
            Glob::new(pattern)
                .map(Glob::into_owned)
                .map_err(|e| invalid(format!("invalid glob '{pattern}': {e}")))
        })
        .collect()
}

/// One named layer of content
#[derive(Debug, Clone)]
pub struct ContentSource {
    pub name: String,
    pub root: SourceRoot,
    /// Archive path prefix, either empty or ending in `/`
    pub prefix: String,
    pub filter: PathFilter,
    /// Pass text files through the resource filter
    pub filtered: bool,
}

impl ContentSource {
    pub fn directory(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::with_root(name, SourceRoot::Directory(path.into()))
    }

    pub fn file(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::with_root(name, SourceRoot::File(path.into()))
    }

    fn with_root(name: impl Into<String>, root: SourceRoot) -> Self {
        Self {
            name: name.into(),
            root,
            prefix: String::new(),
            filter: PathFilter::default(),
            filtered: false,
        }
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        let trimmed = prefix.trim_matches('/');
        self.prefix = if trimmed.is_empty() {
            String::new()
        } else {
            format!("{trimmed}/")
        };
        self
    }

    #[must_use]
    pub fn with_filter(mut self, filter: PathFilter) -> Self {
        self.filter = filter;
        self
    }

    #[must_use]
    pub fn filtered(mut self, filtered: bool) -> Self {
        self.filtered = filtered;
        self
    }
}
