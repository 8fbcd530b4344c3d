pub mod interactions;
pub mod lifecycle;
