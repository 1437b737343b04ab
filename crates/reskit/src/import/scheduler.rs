use crate::builder::Builder;
use crate::error::{ErrorAggregator, Result};

use super::importable::Importable;

/// How far an [`Importer`] got with an item it claimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportDetail {
    /// Fully handled; no further importer sees this item.
    Consumed,
    /// Partially handled; later importers in the pipeline may still claim it.
    Processed,
    /// Declined; the item is not this importer's concern.
    Skipped,
}

/// What an [`Importer::import`] call produced: zero or more follow-on
/// work items, and how completely it handled the one it was given.
/// A hard failure (parse error, I/O error, unknown qualifier) is reported
/// as `Err` rather than a `Failed` variant here — the scheduler's reaction
/// is the same either way: record the error and move on to the next item.
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub produced: Vec<Importable>,
    pub detail: ImportDetail,
}

impl ImportOutcome {
    #[must_use]
    pub fn consumed(produced: Vec<Importable>) -> Self {
        Self {
            produced,
            detail: ImportDetail::Consumed,
        }
    }

    #[must_use]
    pub fn processed(produced: Vec<Importable>) -> Self {
        Self {
            produced,
            detail: ImportDetail::Processed,
        }
    }

    #[must_use]
    pub fn skipped() -> Self {
        Self {
            produced: vec![],
            detail: ImportDetail::Skipped,
        }
    }
}

/// A stage in the import pipeline. Each importer declares the items it
/// handles and, given one, registers what it can with `builder` and/or
/// produces follow-on [`Importable`]s for later stages.
pub trait Importer {
    fn handles(&self, item: &Importable) -> bool;
    fn import(&self, item: &Importable, builder: &mut Builder) -> Result<ImportOutcome>;
}

/// Runs a fixed pipeline of [`Importer`]s over a LIFO work stack seeded by
/// one initial [`Importable`]. An item is offered to each importer in
/// order until one claims it (`Consumed`) or the pipeline is exhausted
/// (`Processed`/`Skipped` let later importers still see it). A failure
/// abandons the remaining importers for that item and moves on to the
/// next; failures accumulate and are reported together at the end.
pub struct Scheduler {
    importers: Vec<Box<dyn Importer>>,
}

impl Scheduler {
    #[must_use]
    pub fn new(importers: Vec<Box<dyn Importer>>) -> Self {
        Self { importers }
    }

    #[must_use]
    pub fn default_pipeline() -> Self {
        Self::new(vec![
            Box::new(super::importers::path::PathImporter::new()),
            Box::new(super::importers::fs_item::FsItemImporter::new()),
            Box::new(super::importers::json::JsonImporter::new()),
            Box::new(super::importers::collection::CollectionImporter::new()),
        ])
    }

    pub fn import(&self, initial: Importable, builder: &mut Builder) -> Result<()> {
        let mut stack = vec![initial];
        let mut errors = ErrorAggregator::new();
        while let Some(item) = stack.pop() {
            for importer in &self.importers {
                if !importer.handles(&item) {
                    continue;
                }
                match importer.import(&item, builder) {
                    Ok(outcome) => {
                        let consumed = matches!(outcome.detail, ImportDetail::Consumed);
                        stack.extend(outcome.produced);
                        if consumed {
                            break;
                        }
                    }
                    Err(error) => {
                        errors.push(error);
                        break;
                    }
                }
            }
        }
        errors.into_result()
    }
}
