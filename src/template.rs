pub mod defaults;
pub mod model;
pub mod repository;
