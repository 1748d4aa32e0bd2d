pub mod stamp;
pub mod viewer;
