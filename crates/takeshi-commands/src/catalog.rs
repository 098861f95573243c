//! Catalog loading — directory scan and static registration.

use crate::manifest::{load_manifest, CommandDefinition};
use std::path::{Path, PathBuf};
use takeshi_core::error::TakeshiError;
use takeshi_core::logger::Logger;
use tracing::debug;

/// File extensions recognized as command manifests.
pub const MANIFEST_EXTENSIONS: &[&str] = &["toml"];

/// Entries whose name starts with this marker are never loaded.
const EXCLUDE_MARKER: char = '_';

/// Command definitions sharing a top-level folder.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub name: String,
    pub commands: Vec<CommandDefinition>,
}

/// All known commands, grouped by category. Categories keep their
/// registration order (sorted by name when scanned from disk).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// Scan `root` and load every command manifest.
    ///
    /// Immediate subdirectories are categories. Each is walked recursively;
    /// manifests that fail to read or parse are reported through `logger`
    /// and skipped, as are unreadable folders and entries. Symbolic links
    /// to directories are not followed. Only an unreadable `root` is an error.
    pub fn load(root: &Path, logger: &dyn Logger) -> Result<Self, TakeshiError> {
        let entries = std::fs::read_dir(root)?;

        let mut dirs: Vec<PathBuf> = Vec::new();
        for entry in entries {
            match entry.and_then(|e| Ok((e.file_type()?, e.path()))) {
                Ok((kind, path)) if kind.is_dir() && !is_excluded(&path) => dirs.push(path),
                Ok(_) => {}
                Err(e) => logger.error(&format!("failed to read entry in {}: {e}", root.display())),
            }
        }
        dirs.sort();

        let mut categories = Vec::with_capacity(dirs.len());
        for dir in dirs {
            let name = dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            let mut commands = Vec::new();
            for file in manifest_files(&dir, logger) {
                match load_manifest(&file) {
                    Ok(def) => commands.push(def),
                    Err(e) => logger.error(&format!("failed to load {}: {e}", file.display())),
                }
            }
            debug!("catalog: category '{name}' has {} command(s)", commands.len());
            categories.push(Category { name, commands });
        }

        Ok(Self { categories })
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Total number of definitions across categories.
    pub fn len(&self) -> usize {
        self.categories.iter().map(|c| c.commands.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Builds a catalog in code, without touching the filesystem.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    categories: Vec<Category>,
}

impl CatalogBuilder {
    /// Append a definition to `category`, creating the category on first use.
    pub fn register(mut self, category: &str, definition: CommandDefinition) -> Self {
        match self.categories.iter_mut().find(|c| c.name == category) {
            Some(existing) => existing.commands.push(definition),
            None => self.categories.push(Category {
                name: category.to_string(),
                commands: vec![definition],
            }),
        }
        self
    }

    pub fn build(self) -> Catalog {
        Catalog {
            categories: self.categories,
        }
    }
}

fn is_excluded(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with(EXCLUDE_MARKER))
}

fn has_manifest_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| MANIFEST_EXTENSIONS.contains(&e))
}

/// Recursively collect manifest files under `dir`, sorted by path.
/// Directory symlinks are treated as plain entries and never descended into.
fn manifest_files(dir: &Path, logger: &dyn Logger) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            logger.error(&format!("failed to read {}: {e}", dir.display()));
            return Vec::new();
        }
    };

    let mut paths: Vec<(PathBuf, bool)> = Vec::new();
    for entry in entries {
        match entry.and_then(|e| Ok((e.path(), e.file_type()?.is_dir()))) {
            Ok(item) => paths.push(item),
            Err(e) => logger.error(&format!("failed to read entry in {}: {e}", dir.display())),
        }
    }
    paths.sort();

    let mut files = Vec::new();
    for (path, is_dir) in paths {
        if is_excluded(&path) {
            continue;
        }
        if is_dir {
            files.extend(manifest_files(&path, logger));
        } else if has_manifest_extension(&path) && path.is_file() {
            files.push(path);
        }
    }
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use takeshi_core::logger::{LogKind, MemoryLogger};

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn test_load_missing_root_is_error() {
        let logger = MemoryLogger::new();
        let result = Catalog::load(Path::new("/tmp/__takeshi_test_no_such_commands__"), &logger);
        assert!(matches!(result, Err(TakeshiError::Io(_))));
    }

    #[test]
    fn test_load_groups_by_category_and_recurses() {
        let tmp = std::env::temp_dir().join("__takeshi_test_catalog_groups__");
        let _ = std::fs::remove_dir_all(&tmp);
        write(&tmp, "member/ping.toml", r#"commands = ["ping"]"#);
        write(&tmp, "member/downloads/yt-mp3.toml", r#"commands = ["yt-mp3", "ytmp3"]"#);
        write(&tmp, "admin/ban.toml", r#"commands = ["ban", "banir"]"#);
        write(&tmp, "admin/_draft.toml", r#"commands = ["draft"]"#);
        write(&tmp, "admin/_wip/hidden.toml", r#"commands = ["hidden"]"#);
        write(&tmp, "admin/README.md", "not a command");
        write(&tmp, "_internal/x.toml", r#"commands = ["x"]"#);
        write(&tmp, "root-level.toml", r#"commands = ["ignored"]"#);

        let logger = MemoryLogger::new();
        let catalog = Catalog::load(&tmp, &logger).unwrap();

        let names: Vec<&str> = catalog.categories().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["admin", "member"]);
        assert_eq!(catalog.len(), 3);

        let member: Vec<&str> = catalog
            .category("member")
            .unwrap()
            .commands
            .iter()
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(member, vec!["yt-mp3", "ping"], "sorted by path: downloads/ < ping.toml");
        assert!(logger.lines().is_empty());
        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn test_broken_manifest_is_logged_and_skipped() {
        let tmp = std::env::temp_dir().join("__takeshi_test_catalog_broken__");
        let _ = std::fs::remove_dir_all(&tmp);
        write(&tmp, "fun/broken.toml", "commands = [");
        write(&tmp, "fun/ok.toml", r#"commands = ["ok"]"#);

        let logger = MemoryLogger::new();
        let catalog = Catalog::load(&tmp, &logger).unwrap();

        assert_eq!(catalog.len(), 1);
        let errors = logger.of_kind(LogKind::Error);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("broken.toml"));
        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn test_empty_category_is_kept() {
        let tmp = std::env::temp_dir().join("__takeshi_test_catalog_empty__");
        let _ = std::fs::remove_dir_all(&tmp);
        std::fs::create_dir_all(tmp.join("owner")).unwrap();

        let catalog = Catalog::load(&tmp, &MemoryLogger::new()).unwrap();
        assert_eq!(catalog.categories().len(), 1);
        assert!(catalog.is_empty());
        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[cfg(unix)]
    #[test]
    fn test_directory_symlinks_are_not_followed() {
        let tmp = std::env::temp_dir().join("__takeshi_test_catalog_symlink__");
        let _ = std::fs::remove_dir_all(&tmp);
        write(&tmp, "admin/ban.toml", r#"commands = ["ban"]"#);
        std::os::unix::fs::symlink("..", tmp.join("admin/loop")).unwrap();
        std::os::unix::fs::symlink(tmp.join("admin"), tmp.join("linked")).unwrap();

        let logger = MemoryLogger::new();
        let catalog = Catalog::load(&tmp, &logger).unwrap();

        let names: Vec<&str> = catalog.categories().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["admin"]);
        assert_eq!(catalog.len(), 1);
        assert!(logger.lines().is_empty());
        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_folder_is_logged() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = std::env::temp_dir().join("__takeshi_test_catalog_unreadable__");
        let _ = std::fs::remove_dir_all(&tmp);
        write(&tmp, "fun/ok.toml", r#"commands = ["ok"]"#);
        write(&tmp, "fun/locked/hidden.toml", r#"commands = ["hidden"]"#);
        let locked = tmp.join("fun/locked");
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000)).unwrap();

        let logger = MemoryLogger::new();
        let catalog = Catalog::load(&tmp, &logger).unwrap();
        let readable = std::fs::read_dir(&locked).is_ok();
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();

        if !readable {
            assert_eq!(catalog.len(), 1);
            let errors = logger.of_kind(LogKind::Error);
            assert_eq!(errors.len(), 1);
            assert!(errors[0].contains("locked"));
        }
        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn test_builder_keeps_registration_order() {
        let catalog = Catalog::builder()
            .register("member", CommandDefinition::new("ping", &["ping"]))
            .register("admin", CommandDefinition::new("ban", &["ban"]))
            .register("member", CommandDefinition::new("menu", &["menu"]))
            .build();
        let names: Vec<&str> = catalog.categories().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["member", "admin"]);
        assert_eq!(catalog.category("member").unwrap().commands.len(), 2);
    }
}
