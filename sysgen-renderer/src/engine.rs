//! Tera rendering engine: [`UnitKind`] enum and [`TemplateEngine`].
//!
//! # Artifact mapping
//!
//! | Kind        | Template                 | Output file              | Mode |
//! |-------------|--------------------------|--------------------------|------|
//! | Project     | `project.service.tera`   | `<project>.service`      | 0644 |
//! | Installer   | `install.sh.tera`        | `install.sh`             | 0755 |
//! | Uninstaller | `uninstall.sh.tera`      | `uninstall.sh`           | 0755 |
//! | Service     | `service.service.tera`   | `<project>-<name>.service` | 0644 |
//! | OneShot     | `oneshot.service.tera`   | `<project>-<name>.service` | 0644 |
//! | Timer       | `timer.timer.tera`       | `<project>-<name>.timer` | 0644 |

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tera::Tera;

use crate::error::{io_err, RenderError};

// ---------------------------------------------------------------------------
// Embedded templates: baked into the binary at compile time via include_str!
// ---------------------------------------------------------------------------

const TPLS: &[(&str, &str)] = &[
    ("project.service.tera", include_str!("templates/project.service.tera")),
    ("service.service.tera", include_str!("templates/service.service.tera")),
    ("oneshot.service.tera", include_str!("templates/oneshot.service.tera")),
    ("timer.timer.tera", include_str!("templates/timer.timer.tera")),
    ("install.sh.tera", include_str!("templates/install.sh.tera")),
    ("uninstall.sh.tera", include_str!("templates/uninstall.sh.tera")),
];

// ---------------------------------------------------------------------------
// Template loading helpers
// ---------------------------------------------------------------------------

fn normalize_template_name(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/").to_lowercase()
}

fn collect_template_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), RenderError> {
    let entries = std::fs::read_dir(dir).map_err(|e| io_err(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        let path = entry.path();
        let meta = entry.metadata().map_err(|e| io_err(&path, e))?;
        if meta.is_dir() {
            collect_template_files(&path, out)?;
        } else if meta.is_file() {
            out.push(path);
        }
    }
    Ok(())
}

fn load_user_templates(dir: &Path) -> Result<Vec<(String, String)>, RenderError> {
    if !dir.exists() {
        return Ok(vec![]);
    }
    let mut files = Vec::new();
    collect_template_files(dir, &mut files)?;
    files.sort();
    let mut templates = Vec::new();
    for path in files {
        if path.extension().and_then(|s| s.to_str()) != Some("tera") {
            continue;
        }
        let rel = path.strip_prefix(dir).unwrap_or(path.as_path());
        let name = normalize_template_name(rel);
        let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
        tracing::debug!(template = %name, path = %path.display(), "template override loaded");
        templates.push((name, contents));
    }
    Ok(templates)
}

fn build_tera(user_template_dir: Option<&Path>) -> Result<Tera, RenderError> {
    let mut templates: HashMap<String, String> = HashMap::new();
    for (name, content) in TPLS {
        templates.insert((*name).to_string(), (*content).to_string());
    }
    if let Some(dir) = user_template_dir {
        for (name, content) in load_user_templates(dir)? {
            templates.insert(name, content);
        }
    }

    let mut tera = Tera::default();
    let items: Vec<(String, String)> = templates.into_iter().collect();
    tera.add_raw_templates(items)?;
    Ok(tera)
}

// ---------------------------------------------------------------------------
// UnitKind
// ---------------------------------------------------------------------------

/// Every kind of artifact produced for a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitKind {
    Project,
    Installer,
    Uninstaller,
    Service,
    OneShot,
    Timer,
}

impl UnitKind {
    /// All kinds in generation order.
    pub fn all() -> &'static [UnitKind] {
        &[
            UnitKind::Project,
            UnitKind::Installer,
            UnitKind::Uninstaller,
            UnitKind::Service,
            UnitKind::OneShot,
            UnitKind::Timer,
        ]
    }

    pub fn template_name(&self) -> &'static str {
        match self {
            UnitKind::Project     => "project.service.tera",
            UnitKind::Installer   => "install.sh.tera",
            UnitKind::Uninstaller => "uninstall.sh.tera",
            UnitKind::Service     => "service.service.tera",
            UnitKind::OneShot     => "oneshot.service.tera",
            UnitKind::Timer       => "timer.timer.tera",
        }
    }

    /// Output file name for a unit with the given slug.
    ///
    /// Scripts ignore the slug.
    pub fn file_name(&self, slug: &str) -> String {
        match self {
            UnitKind::Installer => "install.sh".to_string(),
            UnitKind::Uninstaller => "uninstall.sh".to_string(),
            UnitKind::Timer => format!("{slug}.timer"),
            UnitKind::Project | UnitKind::Service | UnitKind::OneShot => {
                format!("{slug}.service")
            }
        }
    }

    pub fn is_executable(&self) -> bool {
        matches!(self, UnitKind::Installer | UnitKind::Uninstaller)
    }

    pub fn label(&self) -> &'static str {
        match self {
            UnitKind::Project => "project",
            UnitKind::Installer => "installer",
            UnitKind::Uninstaller => "uninstaller",
            UnitKind::Service => "service",
            UnitKind::OneShot => "oneshot",
            UnitKind::Timer => "timer",
        }
    }
}

// ---------------------------------------------------------------------------
// TemplateEngine
// ---------------------------------------------------------------------------

/// Tera-based engine for rendering templates with optional user overrides.
///
/// `user_template_dir` may contain `.tera` files that override embedded
/// defaults of the same (lowercased, relative) name.
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    /// Construct a new [`TemplateEngine`], loading embedded templates plus any
    /// overrides found in `user_template_dir`.
    pub fn new(user_template_dir: Option<&Path>) -> Result<Self, RenderError> {
        let tera = build_tera(user_template_dir)?;
        Ok(TemplateEngine { tera })
    }

    /// Render template `name` with a serializable context.
    pub fn render<C: Serialize>(&self, name: &str, ctx: &C) -> Result<String, RenderError> {
        let tera_ctx = tera::Context::from_serialize(ctx)?;
        Ok(self.tera.render(name, &tera_ctx)?)
    }
}

impl std::fmt::Debug for TemplateEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.tera.get_template_names().collect();
        names.sort_unstable();
        f.debug_struct("TemplateEngine").field("templates", &names).finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
