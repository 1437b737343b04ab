pub mod collection;
pub mod fs_item;
pub mod json;
pub mod path;

pub use collection::CollectionImporter;
pub use fs_item::FsItemImporter;
pub use json::JsonImporter;
pub use path::PathImporter;
