pub mod generator;
pub mod problem;
pub mod selector;
pub mod store;
