//! The import pipeline (module H): turns a filesystem path or a JSON value
//! into loose candidates registered against a [`crate::builder::Builder`].
pub mod condition_token;
pub mod filename;
pub mod importable;
pub mod importers;
pub mod scheduler;

use std::path::Path;

pub use importable::{FileTreeItem, ImportContext, Importable};
pub use scheduler::{ImportDetail, ImportOutcome, Importer, Scheduler};

use crate::builder::Builder;
use crate::error::Result;

/// Import everything under `path` (a file or a directory tree) using the
/// default pipeline (`PathImporter -> FsItemImporter -> JsonImporter -> CollectionImporter`).
pub fn import_path(builder: &mut Builder, path: impl AsRef<Path>) -> Result<()> {
    Scheduler::default_pipeline().import(
        Importable::Path {
            path: path.as_ref().to_path_buf(),
            context: ImportContext::new(),
        },
        builder,
    )
}

/// Import a bare JSON value (a resource collection or resource tree) using
/// the default pipeline, skipping the filesystem stages entirely.
pub fn import_json(builder: &mut Builder, json: serde_json::Value) -> Result<()> {
    Scheduler::default_pipeline().import(Importable::Json { json, context: ImportContext::new() }, builder)
}
