pub mod component;
pub mod engine;
pub mod field_type;
