pub mod antiforgery;
pub mod session;
