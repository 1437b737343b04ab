//! # reskit
//!
//! Qualifiers, conditions, resources, and the builder/resolver pair that
//! together implement context-sensitive resource resolution on top of the
//! scalar and tree primitives in [`resref`].
//!
//! ## Building and resolving
//!
//! A [`Builder`] accumulates qualifiers, conditions, and loose candidates
//! under streaming declaration, then [`Builder::seal`] freezes it into an
//! immutable [`Snapshot`]. A [`Resolver`] binds a snapshot to a context and
//! selects/composes the right candidate for a resource:
//!
//! ```rust
//! use reskit::{Builder, LooseCandidate, Resolver};
//! use reskit::resources::{CandidateCompleteness, ResourceValueMergeMethod};
//! use reskit::context::MapContext;
//! use resref::{QualifierName, ResourceId};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let mut builder = Builder::new();
//! let type_index = builder
//!     .qualifiers()
//!     .qualifier_type_by_name(&resref::QualifierTypeName::new("language").unwrap())
//!     .unwrap();
//! builder
//!     .add_qualifier(QualifierName::new("language").unwrap(), type_index, resref::ConditionPriority::DEFAULT)
//!     .unwrap();
//! let qualifier_index = builder
//!     .qualifiers()
//!     .qualifier_by_name(&QualifierName::new("language").unwrap())
//!     .unwrap();
//! let fr = builder
//!     .add_condition(qualifier_index, "fr", resref::ConditionPriority::new(10), None)
//!     .unwrap();
//! let resource_id = ResourceId::new("welcome").unwrap();
//! builder
//!     .add_loose_candidate(LooseCandidate {
//!         resource_id: resource_id.clone(),
//!         resource_type_name: None,
//!         condition_indices: vec![],
//!         merge_method: ResourceValueMergeMethod::Replace,
//!         completeness: CandidateCompleteness::Full,
//!         instance_value: json!("Hello"),
//!     })
//!     .unwrap();
//! builder
//!     .add_loose_candidate(LooseCandidate {
//!         resource_id: resource_id.clone(),
//!         resource_type_name: None,
//!         condition_indices: vec![fr],
//!         merge_method: ResourceValueMergeMethod::Replace,
//!         completeness: CandidateCompleteness::Full,
//!         instance_value: json!("Bonjour"),
//!     })
//!     .unwrap();
//! let snapshot = Arc::new(builder.seal().unwrap());
//! let context = MapContext::validated(
//!     snapshot.qualifiers(),
//!     vec![(QualifierName::new("language").unwrap(), "fr".to_string())],
//! )
//! .unwrap();
//! let resolver = Resolver::new(snapshot, context);
//! assert_eq!(resolver.resolve(&resource_id).unwrap(), json!("Bonjour"));
//! ```
//!
//! ## Importing
//!
//! [`import::import_path`] and [`import::import_json`] run the default
//! import pipeline over a filesystem tree or a bare JSON value,
//! registering loose candidates against a [`Builder`] in place of hand
//! calling [`Builder::add_loose_candidate`] for every declaration.
pub mod builder;
pub mod conditions;
pub mod context;
pub mod error;
pub mod import;
pub mod options;
pub mod qualifiers;
pub mod resolver;
pub mod resources;
pub mod snapshot;

pub use builder::{Builder, CloneOptions, LooseCandidate};
pub use error::{Error, ErrorAggregator, Result};
pub use options::{ManagerOptions, ResolverOptions};
pub use resolver::Resolver;
pub use snapshot::Snapshot;
