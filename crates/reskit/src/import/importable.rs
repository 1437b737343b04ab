use std::path::PathBuf;

use resref::{ConditionIndex, ResourceId, ResourceName};
use serde_json::Value;

/// The accumulated addressing/gating state folded into every resource an
/// importable produces: a base id prepended to any id it declares, and a
/// list of conditions appended to any conditions it declares.
///
/// `base_id_committed` distinguishes two ways a context can come to name a
/// resource. A *committed* base id (set by [`Self::with_base_id`], e.g. from
/// a file's own name) identifies the resource outright: whatever JSON value
/// reaches it — object or not — becomes that resource's candidate value
/// verbatim. An *uncommitted* base id (set by [`Self::with_child_segment`],
/// used while a resource tree's own nested objects are being walked) only
/// names a path prefix so far; a resource tree importer keeps descending
/// into further nested objects until it reaches a non-object value, since a
/// bare JSON object under an uncommitted id is still ambiguous between "more
/// name segments" and "this resource's value happens to be an object".
#[derive(Debug, Clone, Default)]
pub struct ImportContext {
    pub base_id: Option<ResourceId>,
    pub base_id_committed: bool,
    pub conditions: Vec<ConditionIndex>,
}

impl ImportContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit `base_id` as the final target resource: see the type-level
    /// doc for what "committed" means.
    #[must_use]
    pub fn with_base_id(&self, base_id: ResourceId) -> Self {
        Self {
            base_id: Some(base_id),
            base_id_committed: true,
            conditions: self.conditions.clone(),
        }
    }

    /// Extend `base_id` by one more name segment without committing to it as
    /// a leaf — used while walking a resource tree's own nested objects, so
    /// descent continues as long as the value keeps being a JSON object.
    #[must_use]
    pub fn with_child_segment(&self, base_id: ResourceId) -> Self {
        Self {
            base_id: Some(base_id),
            base_id_committed: false,
            conditions: self.conditions.clone(),
        }
    }

    #[must_use]
    pub fn child_id(&self, name: &ResourceName) -> ResourceId {
        ResourceId::child(self.base_id.as_ref(), name)
    }

    pub fn push_condition(&mut self, condition: ConditionIndex) {
        self.conditions.push(condition);
    }
}

/// A node of the filesystem tree built once by [`super::importers::path::PathImporter`]
/// and walked by [`super::importers::fs_item::FsItemImporter`] without further I/O.
#[derive(Debug, Clone)]
pub enum FileTreeItem {
    File { path: PathBuf, name: String },
    Directory { path: PathBuf, name: String, children: Vec<FileTreeItem> },
}

impl FileTreeItem {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            FileTreeItem::File { name, .. } | FileTreeItem::Directory { name, .. } => name,
        }
    }
}

/// A tagged work item processed by the import scheduler.
#[derive(Debug, Clone)]
pub enum Importable {
    Path { path: PathBuf, context: ImportContext },
    FsItem { item: FileTreeItem, context: ImportContext },
    Json { json: Value, context: ImportContext },
    ResourceCollection { collection: Value, context: ImportContext },
    ResourceTree { tree: Value, context: ImportContext },
}

impl Importable {
    #[must_use]
    pub fn context(&self) -> &ImportContext {
        match self {
            Importable::Path { context, .. }
            | Importable::FsItem { context, .. }
            | Importable::Json { context, .. }
            | Importable::ResourceCollection { context, .. }
            | Importable::ResourceTree { context, .. } => context,
        }
    }
}
