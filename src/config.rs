use std::collections::HashSet;

/// Directory names that exclude any path containing them, compared lower-cased.
pub const DEFAULT_IGNORED_DIR_NAMES: &[&str] = &[
    ".git",
    "node_modules",
    "__pycache__",
    ".vscode",
    ".idea",
    // Python virtual environments
    "venv",
    "env",
    ".env",
    // Build output
    "build",
    "dist",
    "target",
];

/// OS-generated metadata files, compared lower-cased.
pub const DEFAULT_IGNORED_FILE_NAMES: &[&str] = &[".ds_store", "thumbs.db"];

pub const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 1024 * 1024;

/// How file bytes are turned into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Decoding {
    /// Drop invalid UTF-8 sequences and keep the rest.
    #[default]
    Lossy,
    /// Reject files that are not valid UTF-8.
    Strict,
}

/// Everything that decides which files make it into the output.
#[derive(Debug, Clone)]
pub struct FilterConfig {
    pub ignored_dir_names: HashSet<String>,
    pub ignored_file_names: HashSet<String>,
    /// `None` disables the size ceiling.
    pub max_file_size_bytes: Option<u64>,
    /// Globs matched against display paths.
    pub exclude_globs: Vec<String>,
    pub respect_gitignore: bool,
    pub decoding: Decoding,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            ignored_dir_names: lowercase_set(DEFAULT_IGNORED_DIR_NAMES.iter().copied()),
            ignored_file_names: lowercase_set(DEFAULT_IGNORED_FILE_NAMES.iter().copied()),
            max_file_size_bytes: Some(DEFAULT_MAX_FILE_SIZE_BYTES),
            exclude_globs: Vec::new(),
            respect_gitignore: false,
            decoding: Decoding::Lossy,
        }
    }
}

impl FilterConfig {
    /// A config with no ignored names; the size ceiling and decoding keep their defaults.
    pub fn without_default_ignores() -> Self {
        Self {
            ignored_dir_names: HashSet::new(),
            ignored_file_names: HashSet::new(),
            ..Self::default()
        }
    }

    pub fn ignore_dirs<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.ignored_dir_names
            .extend(names.into_iter().map(|n| n.as_ref().to_lowercase()));
        self
    }

    pub fn ignore_files<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.ignored_file_names
            .extend(names.into_iter().map(|n| n.as_ref().to_lowercase()));
        self
    }

    pub fn is_ignored_dir_name(&self, name: &str) -> bool {
        self.ignored_dir_names.contains(&name.to_lowercase())
    }

    pub fn is_ignored_file_name(&self, name: &str) -> bool {
        self.ignored_file_names.contains(&name.to_lowercase())
    }
}

fn lowercase_set<'a>(names: impl Iterator<Item = &'a str>) -> HashSet<String> {
    names.map(str::to_lowercase).collect()
}
