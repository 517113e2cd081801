pub mod antiforgery;
pub mod home;
pub mod project;
pub mod project_comment;
pub mod project_task;
