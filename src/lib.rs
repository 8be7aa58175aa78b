//! Form field trees: nested namespaces, collections and fields bound to an
//! object graph, with DOM id/name derivation and type inference.

pub mod cli;
pub mod document;
pub mod infer;
pub mod model;
pub mod report;
pub mod structure;
pub mod theme;
pub mod trace;
pub mod value;
