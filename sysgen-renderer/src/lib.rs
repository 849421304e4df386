//! # sysgen-renderer
//!
//! Tera-based rendering of a [`Project`](sysgen_core::Project) into systemd
//! unit files plus `install.sh` / `uninstall.sh`.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use sysgen_renderer::Renderer;
//!
//! fn show(project: &sysgen_core::Project) {
//!     if let Ok(renderer) = Renderer::for_project(project) {
//!         if let Ok(artifacts) = renderer.render_all(project) {
//!             for artifact in artifacts {
//!                 println!("{}: {} bytes", artifact.path().display(), artifact.content.len());
//!             }
//!         }
//!     }
//! }
//! ```

pub mod context;
pub mod engine;
pub mod error;
pub mod exec;
pub mod render;

pub use engine::{TemplateEngine, UnitKind};
pub use error::RenderError;
pub use render::{
    renders, Artifact, Installer, OneShotUnit, ProjectUnit, Render, Renderer, ServiceUnit,
    TimerUnit, Uninstaller,
};
