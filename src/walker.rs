use crate::config::FilterConfig;
use ignore::{DirEntry, Walk, WalkBuilder};
use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

/// A file found under one of the roots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathEntry {
    pub absolute_path: PathBuf,
    /// Relative to the root it was found under (or the bare file name), always `/`-separated.
    pub display_path: String,
}

/// Lazily yields every regular file under the given roots, in root order and
/// then in whatever order the filesystem reports directory entries.
pub struct Enumerator {
    roots: std::vec::IntoIter<PathBuf>,
    current: Option<(PathBuf, Walk)>,
    pruned_dir_names: HashSet<String>,
    respect_gitignore: bool,
}

pub fn enumerate<I, P>(roots: I, config: &FilterConfig) -> Enumerator
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    Enumerator::new(roots, config)
}

impl Enumerator {
    pub fn new<I, P>(roots: I, config: &FilterConfig) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let roots: Vec<PathBuf> = roots.into_iter().map(Into::into).collect();
        Self {
            roots: roots.into_iter(),
            current: None,
            pruned_dir_names: config.ignored_dir_names.clone(),
            respect_gitignore: config.respect_gitignore,
        }
    }

    /// Returns the entry for a file root; directory roots become the current walk.
    fn start_root(&mut self, root: PathBuf) -> Option<PathEntry> {
        let root = resolve_root(&root);
        let metadata = match fs::metadata(&root) {
            Ok(metadata) => metadata,
            Err(err) => {
                warn!("'{}' is not a file or directory ({err}). Skipping.", root.display());
                return None;
            }
        };

        if metadata.is_file() {
            let display_path = root
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| root.to_string_lossy().into_owned());
            return Some(PathEntry {
                absolute_path: root,
                display_path,
            });
        }

        if metadata.is_dir() {
            debug!("Walking {}", root.display());
            let walk = self.walk(&root);
            self.current = Some((root, walk));
        } else {
            warn!("'{}' is not a file or directory. Skipping.", root.display());
        }
        None
    }

    fn walk(&self, root: &Path) -> Walk {
        let pruned = self.pruned_dir_names.clone();
        let mut builder = WalkBuilder::new(root);
        builder
            .standard_filters(false)
            .follow_links(false)
            .filter_entry(move |entry| entry.depth() == 0 || !is_pruned_dir(entry, &pruned));

        if self.respect_gitignore {
            builder
                .git_ignore(true)
                .git_exclude(true)
                .git_global(true)
                .ignore(true)
                .parents(true)
                .require_git(false);
        }

        builder.build()
    }
}

impl Iterator for Enumerator {
    type Item = PathEntry;

    fn next(&mut self) -> Option<PathEntry> {
        loop {
            if let Some((root, walk)) = self.current.as_mut() {
                match walk.next() {
                    Some(Ok(entry)) => {
                        if entry.depth() == 0 || !is_regular_file(&entry) {
                            continue;
                        }
                        let path = entry.into_path();
                        if let Some(display_path) = display_relative(&path, root) {
                            return Some(PathEntry {
                                absolute_path: path,
                                display_path,
                            });
                        }
                    }
                    Some(Err(err)) => warn!("Skipping unreadable entry: {err}"),
                    None => self.current = None,
                }
                continue;
            }

            let root = self.roots.next()?;
            if let Some(entry) = self.start_root(root) {
                return Some(entry);
            }
        }
    }
}

fn is_pruned_dir(entry: &DirEntry, pruned: &HashSet<String>) -> bool {
    entry.file_type().is_some_and(|ft| ft.is_dir())
        && pruned.contains(&entry.file_name().to_string_lossy().to_lowercase())
}

/// Regular files, and symlinks that resolve to one.
fn is_regular_file(entry: &DirEntry) -> bool {
    match entry.file_type() {
        Some(ft) if ft.is_file() => true,
        Some(ft) if ft.is_symlink() => entry.path().is_file(),
        _ => false,
    }
}

/// Absolute form of `path` with `.` and `..` removed lexically, without touching symlinks.
pub fn resolve_root(path: &Path) -> PathBuf {
    match std::path::absolute(path) {
        Ok(absolute) => normalize_lexically(&absolute),
        Err(_) => normalize_lexically(path),
    }
}

pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                // `..` at the filesystem root stays at the root.
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// `path` relative to `root`, joined with `/` whatever the platform separator.
pub fn display_relative(path: &Path, root: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let components: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if components.is_empty() {
        None
    } else {
        Some(components.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterChain;
    use tempfile::tempdir;
    use tracing_test::traced_test;

    fn create_file(path: &Path, contents: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }

    fn sorted_display_paths(entries: Enumerator) -> Vec<String> {
        let mut paths: Vec<String> = entries.map(|entry| entry.display_path).collect();
        paths.sort();
        paths
    }

    #[test]
    fn directory_root_yields_slash_separated_relative_paths() {
        let temp = tempdir().unwrap();
        create_file(&temp.path().join("src/lib.rs"), "lib");
        create_file(&temp.path().join("src/nested/deep/mod.rs"), "mod");
        create_file(&temp.path().join("README.md"), "readme");

        let entries = enumerate([temp.path()], &FilterConfig::default());

        assert_eq!(
            sorted_display_paths(entries),
            vec!["README.md", "src/lib.rs", "src/nested/deep/mod.rs"]
        );
    }

    #[test]
    fn file_root_uses_base_name() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("sub/notes.txt");
        create_file(&file, "hi");

        let entries: Vec<PathEntry> = enumerate([&file], &FilterConfig::default()).collect();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].display_path, "notes.txt");
        assert!(entries[0].absolute_path.is_absolute());
        assert_eq!(entries[0].absolute_path, file);
    }

    #[test]
    fn parent_components_in_a_root_are_resolved_before_filtering() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("build")).unwrap();
        create_file(&temp.path().join("proj/a.py"), "print(1)");
        let root = temp.path().join("build").join("..").join(".").join("proj");

        let config = FilterConfig::default();
        let entries: Vec<PathEntry> = enumerate([&root], &config).collect();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].absolute_path, temp.path().join("proj").join("a.py"));
        assert_eq!(entries[0].display_path, "a.py");
        let chain = FilterChain::new(&config).unwrap();
        assert!(chain.should_include(&entries[0]));
    }

    #[test]
    fn relative_roots_resolve_against_the_working_directory() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(resolve_root(Path::new(".")), normalize_lexically(&cwd));
        assert!(resolve_root(Path::new("../x")).is_absolute());
    }

    #[test]
    fn normalize_lexically_drops_dot_and_pops_dot_dot() {
        assert_eq!(
            normalize_lexically(Path::new("/x/build/../proj/./src")),
            PathBuf::from("/x/proj/src")
        );
        assert_eq!(normalize_lexically(Path::new("/../a")), PathBuf::from("/a"));
        assert_eq!(normalize_lexically(Path::new("../a/../../b")), PathBuf::from("../../b"));
        assert_eq!(normalize_lexically(Path::new("a/./b/..")), PathBuf::from("a"));
    }

    #[test]
    fn roots_are_processed_in_the_given_order() {
        let temp = tempdir().unwrap();
        let second = temp.path().join("second.txt");
        let first = temp.path().join("first.txt");
        create_file(&second, "2");
        create_file(&first, "1");

        let paths: Vec<String> = enumerate([&second, &first], &FilterConfig::default())
            .map(|entry| entry.display_path)
            .collect();

        assert_eq!(paths, vec!["second.txt", "first.txt"]);
    }

    #[test]
    #[traced_test]
    fn missing_root_is_skipped_with_a_warning() {
        let temp = tempdir().unwrap();
        let present = temp.path().join("present.txt");
        create_file(&present, "here");
        let missing = temp.path().join("missing.txt");

        let paths: Vec<String> = enumerate([&missing, &present], &FilterConfig::default())
            .map(|entry| entry.display_path)
            .collect();

        assert_eq!(paths, vec!["present.txt"]);
        assert!(logs_contain("is not a file or directory"));
        assert!(logs_contain("missing.txt"));
    }

    #[test]
    fn ignored_directories_are_pruned_but_hidden_files_are_kept() {
        let temp = tempdir().unwrap();
        create_file(&temp.path().join(".git/config"), "[core]");
        create_file(&temp.path().join("node_modules/pkg/index.js"), "x");
        create_file(&temp.path().join(".editorconfig"), "root = true");
        create_file(&temp.path().join("src/main.py"), "print(1)");

        let entries = enumerate([temp.path()], &FilterConfig::default());

        assert_eq!(
            sorted_display_paths(entries),
            vec![".editorconfig", "src/main.py"]
        );
    }

    #[test]
    fn gitignore_is_only_honoured_when_requested() {
        let temp = tempdir().unwrap();
        create_file(&temp.path().join(".gitignore"), "*.log\n");
        create_file(&temp.path().join("app.log"), "noise");
        create_file(&temp.path().join("app.rs"), "fn main() {}");

        let plain = enumerate([temp.path()], &FilterConfig::default());
        assert_eq!(
            sorted_display_paths(plain),
            vec![".gitignore", "app.log", "app.rs"]
        );

        let config = FilterConfig {
            respect_gitignore: true,
            ..FilterConfig::default()
        };
        let respecting = enumerate([temp.path()], &config);
        assert_eq!(sorted_display_paths(respecting), vec![".gitignore", "app.rs"]);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_files_are_yielded_and_broken_links_skipped() {
        let temp = tempdir().unwrap();
        let target = temp.path().join("real.txt");
        create_file(&target, "real");
        let root = temp.path().join("root");
        fs::create_dir_all(&root).unwrap();
        std::os::unix::fs::symlink(&target, root.join("link.txt")).unwrap();
        std::os::unix::fs::symlink(temp.path().join("nowhere"), root.join("broken.txt")).unwrap();

        let entries = enumerate([&root], &FilterConfig::default());

        assert_eq!(sorted_display_paths(entries), vec!["link.txt"]);
    }

    #[test]
    fn display_relative_joins_components_with_slashes() {
        let root = Path::new("/project");
        assert_eq!(
            display_relative(Path::new("/project/a/b/c.rs"), root),
            Some("a/b/c.rs".to_string())
        );
        assert_eq!(display_relative(Path::new("/project"), root), None);
        assert_eq!(display_relative(Path::new("/other/c.rs"), root), None);
    }
}
