use serde_json::Value;

use crate::builder::Builder;
use crate::error::Result;
use crate::import::importable::Importable;
use crate::import::scheduler::{ImportOutcome, Importer};

/// Classifies a bare JSON value: a resource collection (an object carrying
/// a `resources` array) is tried first, everything else falls back to a
/// resource tree.
pub struct JsonImporter;

impl JsonImporter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonImporter {
    fn default() -> Self {
        Self::new()
    }
}

fn is_resource_collection(json: &Value) -> bool {
    json.as_object()
        .is_some_and(|object| object.get("resources").is_some_and(Value::is_array))
}

impl Importer for JsonImporter {
    fn handles(&self, item: &Importable) -> bool {
        matches!(item, Importable::Json { .. })
    }

    fn import(&self, item: &Importable, _builder: &mut Builder) -> Result<ImportOutcome> {
        let Importable::Json { json, context } = item else {
            return Ok(ImportOutcome::skipped());
        };
        let produced = if is_resource_collection(json) {
            Importable::ResourceCollection {
                collection: json.clone(),
                context: context.clone(),
            }
        } else {
            Importable::ResourceTree {
                tree: json.clone(),
                context: context.clone(),
            }
        };
        Ok(ImportOutcome::consumed(vec![produced]))
    }
}
