//! The [`Render`] capability and its six implementors.
//!
//! [`renders`] lists every artifact of a project in generation order:
//! project unit, installer, uninstaller, then services, one-shots and timers
//! in collection order.

use std::path::{Path, PathBuf};

use sysgen_core::{OneShot, Project, Service, Timer};

use crate::context::{
    OneShotUnitCtx, ProjectUnitCtx, ScriptCtx, ServiceUnitCtx, TimerUnitCtx,
};
use crate::engine::{TemplateEngine, UnitKind};
use crate::error::RenderError;

/// A rendered file: content, destination directory, name and mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub kind: UnitKind,
    pub content: String,
    pub dir: PathBuf,
    pub file_name: String,
    pub executable: bool,
}

impl Artifact {
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }
}

/// Something that produces one [`Artifact`].
pub trait Render {
    fn kind(&self) -> UnitKind;

    fn render(&self, engine: &TemplateEngine) -> Result<Artifact, RenderError>;
}

fn artifact(kind: UnitKind, dir: &Path, slug: &str, content: String) -> Artifact {
    Artifact {
        kind,
        content,
        dir: dir.to_path_buf(),
        file_name: kind.file_name(slug),
        executable: kind.is_executable(),
    }
}

/// The no-op aggregate unit that groups the whole project.
#[derive(Debug, Clone, Copy)]
pub struct ProjectUnit<'a> {
    pub project: &'a Project,
}

impl Render for ProjectUnit<'_> {
    fn kind(&self) -> UnitKind {
        UnitKind::Project
    }

    fn render(&self, engine: &TemplateEngine) -> Result<Artifact, RenderError> {
        let kind = self.kind();
        let content = engine.render(kind.template_name(), &ProjectUnitCtx::new(self.project))?;
        Ok(artifact(
            kind,
            &self.project.generated_dir(),
            self.project.slug().as_str(),
            content,
        ))
    }
}

/// `install.sh`.
#[derive(Debug, Clone, Copy)]
pub struct Installer<'a> {
    pub project: &'a Project,
}

impl Render for Installer<'_> {
    fn kind(&self) -> UnitKind {
        UnitKind::Installer
    }

    fn render(&self, engine: &TemplateEngine) -> Result<Artifact, RenderError> {
        render_script(self.kind(), self.project, engine)
    }
}

/// `uninstall.sh`.
#[derive(Debug, Clone, Copy)]
pub struct Uninstaller<'a> {
    pub project: &'a Project,
}

impl Render for Uninstaller<'_> {
    fn kind(&self) -> UnitKind {
        UnitKind::Uninstaller
    }

    fn render(&self, engine: &TemplateEngine) -> Result<Artifact, RenderError> {
        render_script(self.kind(), self.project, engine)
    }
}

fn render_script(
    kind: UnitKind,
    project: &Project,
    engine: &TemplateEngine,
) -> Result<Artifact, RenderError> {
    let content = engine.render(kind.template_name(), &ScriptCtx::new(project))?;
    Ok(artifact(kind, &project.generated_dir(), "", content))
}

#[derive(Debug, Clone, Copy)]
pub struct ServiceUnit<'a> {
    pub project: &'a Project,
    pub service: &'a Service,
}

impl Render for ServiceUnit<'_> {
    fn kind(&self) -> UnitKind {
        UnitKind::Service
    }

    fn render(&self, engine: &TemplateEngine) -> Result<Artifact, RenderError> {
        let kind = self.kind();
        let ctx = ServiceUnitCtx::new(self.project, self.service);
        let content = engine.render(kind.template_name(), &ctx)?;
        Ok(artifact(kind, &self.project.generated_dir(), &ctx.service.slug, content))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OneShotUnit<'a> {
    pub project: &'a Project,
    pub oneshot: &'a OneShot,
}

impl Render for OneShotUnit<'_> {
    fn kind(&self) -> UnitKind {
        UnitKind::OneShot
    }

    fn render(&self, engine: &TemplateEngine) -> Result<Artifact, RenderError> {
        let kind = self.kind();
        let ctx = OneShotUnitCtx::new(self.project, self.oneshot);
        let content = engine.render(kind.template_name(), &ctx)?;
        Ok(artifact(kind, &self.project.generated_dir(), &ctx.oneshot.slug, content))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TimerUnit<'a> {
    pub project: &'a Project,
    pub timer: &'a Timer,
}

impl Render for TimerUnit<'_> {
    fn kind(&self) -> UnitKind {
        UnitKind::Timer
    }

    /// Fails with [`RenderError::Project`] if the launcher cannot be resolved.
    fn render(&self, engine: &TemplateEngine) -> Result<Artifact, RenderError> {
        let kind = self.kind();
        let ctx = TimerUnitCtx::new(self.project, self.timer)?;
        let content = engine.render(kind.template_name(), &ctx)?;
        Ok(artifact(kind, &self.project.generated_dir(), &ctx.timer.slug, content))
    }
}

/// Every renderable artifact of `project`, in generation order.
pub fn renders(project: &Project) -> Vec<Box<dyn Render + '_>> {
    let mut out: Vec<Box<dyn Render + '_>> = vec![
        Box::new(ProjectUnit { project }),
        Box::new(Installer { project }),
        Box::new(Uninstaller { project }),
    ];
    for service in &project.services {
        out.push(Box::new(ServiceUnit { project, service }));
    }
    for oneshot in &project.oneshots {
        out.push(Box::new(OneShotUnit { project, oneshot }));
    }
    for timer in &project.timers {
        out.push(Box::new(TimerUnit { project, timer }));
    }
    out
}

/// Tera-based renderer for a whole project.
///
/// Create once per project with [`Renderer::for_project`] so the project's
/// `templates/` overrides are honoured.
#[derive(Debug)]
pub struct Renderer {
    engine: TemplateEngine,
}

impl Renderer {
    /// A renderer using the embedded templates only.
    pub fn new() -> Result<Self, RenderError> {
        Ok(Renderer {
            engine: TemplateEngine::new(None)?,
        })
    }

    /// A renderer with overrides from `<project-dir>/templates/`.
    pub fn for_project(project: &Project) -> Result<Self, RenderError> {
        let overrides = project.templates_dir();
        Ok(Renderer {
            engine: TemplateEngine::new(Some(&overrides))?,
        })
    }

    /// Render every artifact of `project`, stopping at the first failure.
    ///
    /// The project is validated first, so a name or setting holding a line
    /// break never reaches a unit file or script.
    pub fn render_all(&self, project: &Project) -> Result<Vec<Artifact>, RenderError> {
        project.validate()?;
        renders(project)
            .iter()
            .map(|unit| unit.render(&self.engine))
            .collect()
    }
}
