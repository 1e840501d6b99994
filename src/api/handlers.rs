pub mod fields;
pub mod flowers;
pub mod session;
pub mod species;
