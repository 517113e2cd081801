//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - An entity struct implementing [`Entity`](crate::gateway::Entity) and `Serialize`
//! - A `Deserialize` + `Validate` input DTO for creates
//! - A `Deserialize` + `Validate` update DTO listing exactly the fields a
//!   client may change

pub mod project;
pub mod project_comment;
pub mod project_task;
