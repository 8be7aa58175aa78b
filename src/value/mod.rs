pub mod resolve;
pub mod value_model;
