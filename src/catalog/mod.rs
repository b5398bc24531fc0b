pub mod catalog_model;
pub mod normalize;
