pub mod builder;
pub mod context;
pub mod dom;
pub mod error;
pub mod field;
pub mod field_collection;
pub mod namespace;
pub mod namespace_collection;
pub mod node;
