use std::path::Path;

use resref::ResourceName;

use crate::builder::Builder;
use crate::error::{Error, Result};
use crate::import::condition_token;
use crate::import::filename;
use crate::import::importable::{FileTreeItem, Importable};
use crate::import::scheduler::{ImportOutcome, Importer};

/// Walks a [`FileTreeItem`] without further I/O beyond reading a matched
/// file's contents.
///
/// Directories thread their own name into each child's base id and hand
/// files down unchanged (the file's own name, not the directory's, encodes
/// its conditions). Files parse their filename-encoded conditions, derive
/// their resource name from the stripped basename relative to the context
/// they were handed, and read-and-parse `.json` files into a `json`
/// importable; non-JSON files are skipped.
pub struct FsItemImporter;

impl FsItemImporter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for FsItemImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Importer for FsItemImporter {
    fn handles(&self, item: &Importable) -> bool {
        matches!(item, Importable::FsItem { .. })
    }

    fn import(&self, item: &Importable, builder: &mut Builder) -> Result<ImportOutcome> {
        let Importable::FsItem { item: tree_item, context } = item else {
            return Ok(ImportOutcome::skipped());
        };
        match tree_item {
            FileTreeItem::Directory { children, .. } => {
                let mut produced = Vec::with_capacity(children.len());
                for child in children {
                    match child {
                        FileTreeItem::Directory { name, .. } => {
                            let resource_name = ResourceName::new(name.clone())?;
                            produced.push(Importable::FsItem {
                                item: child.clone(),
                                context: context.with_base_id(context.child_id(&resource_name)),
                            });
                        }
                        FileTreeItem::File { .. } => produced.push(Importable::FsItem {
                            item: child.clone(),
                            context: context.clone(),
                        }),
                    }
                }
                Ok(ImportOutcome::consumed(produced))
            }
            FileTreeItem::File { path, name } => {
                if Path::new(name).extension().and_then(|ext| ext.to_str()) != Some("json") {
                    return Ok(ImportOutcome::skipped());
                }
                let parsed = filename::parse_filename_conditions(name)?;
                let stem = parsed.basename.strip_suffix(".json").unwrap_or(&parsed.basename);
                let resource_name = ResourceName::new(stem)?;
                let mut file_context = context.with_base_id(context.child_id(&resource_name));
                for token in &parsed.tokens {
                    let condition_index = condition_token::parse(builder, token, None, None)?;
                    file_context.push_condition(condition_index);
                }
                let contents =
                    std::fs::read_to_string(path).map_err(|error| Error::importer(format!("{}: {error}", path.display())))?;
                let json: serde_json::Value = serde_json::from_str(&contents)
                    .map_err(|error| Error::importer(format!("{}: {error}", path.display())))?;
                Ok(ImportOutcome::consumed(vec![Importable::Json { json, context: file_context }]))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::importable::ImportContext;

    #[test]
    fn skips_non_json_files() {
        let importer = FsItemImporter::new();
        let mut builder = Builder::new();
        let outcome = importer
            .import(
                &Importable::FsItem {
                    item: FileTreeItem::File {
                        path: "notes.txt".into(),
                        name: "notes.txt".to_string(),
                    },
                    context: ImportContext::new(),
                },
                &mut builder,
            )
            .unwrap();
        assert!(outcome.produced.is_empty());
    }

    #[test]
    fn reads_and_strips_filename_encoded_conditions() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("welcome.language=fr.json");
        std::fs::write(&file_path, r#"{"msg":"Bonjour"}"#).unwrap();
        let importer = FsItemImporter::new();
        let mut builder = Builder::new();
        let type_index = builder
            .qualifiers()
            .qualifier_type_by_name(&resref::QualifierTypeName::new("language").unwrap())
            .unwrap();
        builder
            .add_qualifier(resref::QualifierName::new("language").unwrap(), type_index, resref::ConditionPriority::DEFAULT)
            .unwrap();
        let outcome = importer
            .import(
                &Importable::FsItem {
                    item: FileTreeItem::File {
                        path: file_path,
                        name: "welcome.language=fr.json".to_string(),
                    },
                    context: ImportContext::new(),
                },
                &mut builder,
            )
            .unwrap();
        let Importable::Json { json, context } = &outcome.produced[0] else {
            panic!("expected a json importable");
        };
        assert_eq!(json, &serde_json::json!({"msg": "Bonjour"}));
        assert_eq!(context.base_id.as_ref().unwrap().as_str(), "welcome");
        assert_eq!(context.conditions.len(), 1);
    }

    #[test]
    fn directory_extends_base_id_for_subdirectories_only() {
        let importer = FsItemImporter::new();
        let mut builder = Builder::new();
        let outcome = importer
            .import(
                &Importable::FsItem {
                    item: FileTreeItem::Directory {
                        path: "app".into(),
                        name: "app".to_string(),
                        children: vec![
                            FileTreeItem::Directory {
                                path: "app/ui".into(),
                                name: "ui".to_string(),
                                children: vec![],
                            },
                            FileTreeItem::File {
                                path: "app/welcome.json".into(),
                                name: "welcome.json".to_string(),
                            },
                        ],
                    },
                    context: ImportContext::new(),
                },
                &mut builder,
            )
            .unwrap();
        assert_eq!(outcome.produced.len(), 2);
        assert_eq!(outcome.produced[0].context().base_id.as_ref().unwrap().as_str(), "ui");
        assert!(outcome.produced[1].context().base_id.is_none());
    }
}
