use std::path::Path;

use crate::builder::Builder;
use crate::error::{Error, Result};
use crate::import::importable::{FileTreeItem, Importable};
use crate::import::scheduler::{ImportOutcome, Importer};

/// Resolves a filesystem path into a [`FileTreeItem`] tree, built eagerly
/// with a single recursive directory walk so later stages do no further I/O
/// beyond reading individual file contents. Children are sorted by filename
/// so traversal order is deterministic across platforms.
pub struct PathImporter {
    ignored_extensions: Vec<String>,
}

impl PathImporter {
    #[must_use]
    pub fn new() -> Self {
        Self { ignored_extensions: vec![] }
    }

    #[must_use]
    pub fn with_ignored_extensions(ignored_extensions: Vec<String>) -> Self {
        Self { ignored_extensions }
    }

    fn is_ignored(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|extension| extension.to_str())
            .is_some_and(|extension| self.ignored_extensions.iter().any(|ignored| ignored.eq_ignore_ascii_case(extension)))
    }

    fn build(&self, path: &Path) -> Result<FileTreeItem> {
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| Error::importer(format!("{}: not a valid utf-8 filename", path.display())))?
            .to_string();
        let metadata = std::fs::metadata(path).map_err(|error| Error::importer(format!("{}: {error}", path.display())))?;
        if !metadata.is_dir() {
            return Ok(FileTreeItem::File {
                path: path.to_path_buf(),
                name,
            });
        }
        let mut entries: Vec<_> = std::fs::read_dir(path)
            .map_err(|error| Error::importer(format!("{}: {error}", path.display())))?
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|child| !self.is_ignored(child))
            .collect();
        entries.sort();
        let children = entries.iter().map(|child| self.build(child)).collect::<Result<Vec<_>>>()?;
        Ok(FileTreeItem::Directory {
            path: path.to_path_buf(),
            name,
            children,
        })
    }
}

impl Default for PathImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Importer for PathImporter {
    fn handles(&self, item: &Importable) -> bool {
        matches!(item, Importable::Path { .. })
    }

    fn import(&self, item: &Importable, _builder: &mut Builder) -> Result<ImportOutcome> {
        let Importable::Path { path, context } = item else {
            return Ok(ImportOutcome::skipped());
        };
        let tree = self.build(path)?;
        Ok(ImportOutcome::consumed(vec![Importable::FsItem {
            item: tree,
            context: context.clone(),
        }]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::importable::ImportContext;
    use std::io::Write;

    #[test]
    fn builds_a_sorted_directory_tree() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.json"), "{}").unwrap();
        std::fs::write(dir.path().join("a.json"), "{}").unwrap();
        let importer = PathImporter::new();
        let mut builder = Builder::new();
        let outcome = importer
            .import(
                &Importable::Path {
                    path: dir.path().to_path_buf(),
                    context: ImportContext::new(),
                },
                &mut builder,
            )
            .unwrap();
        let Importable::FsItem {
            item: FileTreeItem::Directory { children, .. },
            ..
        } = &outcome.produced[0]
        else {
            panic!("expected a directory fsItem");
        };
        assert_eq!(children.iter().map(FileTreeItem::name).collect::<Vec<_>>(), vec!["a.json", "b.json"]);
    }

    #[test]
    fn skips_ignored_extensions() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::File::create(dir.path().join("notes.txt")).unwrap().write_all(b"x").unwrap();
        std::fs::write(dir.path().join("a.json"), "{}").unwrap();
        let importer = PathImporter::with_ignored_extensions(vec!["txt".to_string()]);
        let mut builder = Builder::new();
        let outcome = importer
            .import(
                &Importable::Path {
                    path: dir.path().to_path_buf(),
                    context: ImportContext::new(),
                },
                &mut builder,
            )
            .unwrap();
        let Importable::FsItem {
            item: FileTreeItem::Directory { children, .. },
            ..
        } = &outcome.produced[0]
        else {
            panic!("expected a directory fsItem");
        };
        assert_eq!(children.len(), 1);
    }
}
