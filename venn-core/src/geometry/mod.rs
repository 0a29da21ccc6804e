pub mod circle;
pub mod layout;
pub mod r2;
