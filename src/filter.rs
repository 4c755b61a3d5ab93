use crate::config::FilterConfig;
use crate::error::RunError;
use crate::walker::PathEntry;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::fmt;
use std::path::Component;

/// The rule that excluded an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exclusion {
    IgnoredDir(String),
    IgnoredFile(String),
    ExcludeGlob,
}

impl fmt::Display for Exclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exclusion::IgnoredDir(name) => write!(f, "ignored directory '{name}' in path"),
            Exclusion::IgnoredFile(name) => write!(f, "ignored file name '{name}'"),
            Exclusion::ExcludeGlob => write!(f, "matches an exclude pattern"),
        }
    }
}

/// Name- and glob-based exclusion. The size ceiling is applied by the loader
/// once the file is open.
pub struct FilterChain<'a> {
    config: &'a FilterConfig,
    excludes: GlobSet,
}

impl<'a> FilterChain<'a> {
    pub fn new(config: &'a FilterConfig) -> Result<Self, RunError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &config.exclude_globs {
            builder.add(Glob::new(pattern)?);
        }
        Ok(Self {
            config,
            excludes: builder.build()?,
        })
    }

    pub fn should_include(&self, entry: &PathEntry) -> bool {
        self.exclusion(entry).is_none()
    }

    pub fn exclusion(&self, entry: &PathEntry) -> Option<Exclusion> {
        // Every segment of the absolute path counts, the file name included.
        for component in entry.absolute_path.components() {
            if let Component::Normal(part) = component {
                let part = part.to_string_lossy();
                if self.config.is_ignored_dir_name(&part) {
                    return Some(Exclusion::IgnoredDir(part.to_lowercase()));
                }
            }
        }

        if let Some(name) = entry.absolute_path.file_name() {
            let name = name.to_string_lossy();
            if self.config.is_ignored_file_name(&name) {
                return Some(Exclusion::IgnoredFile(name.to_lowercase()));
            }
        }

        if self.excludes.is_match(&entry.display_path) {
            return Some(Exclusion::ExcludeGlob);
        }

        None
    }
}
