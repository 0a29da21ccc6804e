pub mod session;
pub mod target;
