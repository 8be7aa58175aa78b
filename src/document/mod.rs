pub mod document_model;
pub mod error;
pub mod loader;
