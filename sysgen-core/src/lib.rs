//! sysgen core library: entity types, slugging, the project aggregate and
//! its JSON store.
//!
//! - [`types`]: `Service`, `OneShot`, `Timer`
//! - [`slug`]: [`Slug`] and kebab-case derivation
//! - [`project`]: [`Project`] upserts, lookups, launcher resolution
//! - [`store`]: open / save / init of `system.json`
//! - [`error`]: [`ProjectError`]

pub mod error;
pub mod paths;
pub mod project;
pub mod slug;
pub mod store;
pub mod types;

pub use error::ProjectError;
pub use project::{validate_name, validate_value, Project, Upsert};
pub use slug::Slug;
pub use types::{Environment, Named, OneShot, Service, Timer};
