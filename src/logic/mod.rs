pub mod beds;
pub mod catalog;
pub mod display;
pub mod grid;
pub mod validation;
