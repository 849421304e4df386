//! Template contexts: serializable rendering payloads built from a [`Project`].
//!
//! Each unit kind gets its own top-level shape so templates read as
//! `{{ service.exec_start }}` or `{{ timer.launcher_slug }}`; every shape
//! carries `project`.

use serde::Serialize;

use sysgen_core::{paths, OneShot, Project, ProjectError, Service, Timer};

use crate::exec::{environment_assignments, exec_line, resolve_command};

/// Project identity shared by every template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectCtx {
    pub name: String,
    pub slug: String,
}

impl ProjectCtx {
    pub fn from_project(project: &Project) -> Self {
        Self {
            name: project.name.clone(),
            slug: project.slug().0,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectUnitCtx {
    pub project: ProjectCtx,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceCtx {
    pub name: String,
    pub slug: String,
    /// Resolved command plus quoted arguments.
    pub exec_start: String,
    /// Quoted `KEY=VALUE` assignments.
    pub environment: Vec<String>,
    pub restart: String,
    pub restart_sec: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceUnitCtx {
    pub project: ProjectCtx,
    pub service: ServiceCtx,
}

#[derive(Debug, Clone, Serialize)]
pub struct OneShotCtx {
    pub name: String,
    pub slug: String,
    pub exec_start: String,
    pub environment: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OneShotUnitCtx {
    pub project: ProjectCtx,
    pub oneshot: OneShotCtx,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimerCtx {
    pub name: String,
    pub slug: String,
    pub interval: String,
    pub launcher_slug: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimerUnitCtx {
    pub project: ProjectCtx,
    pub timer: TimerCtx,
}

/// Context for `install.sh` and `uninstall.sh`: slugs of every unit.
#[derive(Debug, Clone, Serialize)]
pub struct ScriptCtx {
    pub project: ProjectCtx,
    pub unit_dir: String,
    pub services: Vec<String>,
    pub oneshots: Vec<String>,
    pub timers: Vec<String>,
}

impl ProjectUnitCtx {
    pub fn new(project: &Project) -> Self {
        Self {
            project: ProjectCtx::from_project(project),
        }
    }
}

impl ServiceUnitCtx {
    /// Resolves the executable on the current `PATH`.
    pub fn new(project: &Project, service: &Service) -> Self {
        let command = resolve_command(&service.exec_start);
        Self {
            project: ProjectCtx::from_project(project),
            service: ServiceCtx {
                name: service.name.clone(),
                slug: service.slug(project).0,
                exec_start: exec_line(&command, &service.args),
                environment: environment_assignments(&service.environment),
                restart: service.restart.clone(),
                restart_sec: service.restart_sec,
            },
        }
    }
}

impl OneShotUnitCtx {
    pub fn new(project: &Project, oneshot: &OneShot) -> Self {
        let command = resolve_command(&oneshot.exec_start);
        Self {
            project: ProjectCtx::from_project(project),
            oneshot: OneShotCtx {
                name: oneshot.name.clone(),
                slug: oneshot.slug(project).0,
                exec_start: exec_line(&command, &oneshot.args),
                environment: environment_assignments(&oneshot.environment),
            },
        }
    }
}

impl TimerUnitCtx {
    /// Fails if the timer's launcher is not a one-shot of `project`.
    pub fn new(project: &Project, timer: &Timer) -> Result<Self, ProjectError> {
        let launcher = timer.launcher(project)?;
        Ok(Self {
            project: ProjectCtx::from_project(project),
            timer: TimerCtx {
                name: timer.name.clone(),
                slug: timer.slug(project).0,
                interval: timer.interval.clone(),
                launcher_slug: launcher.slug(project).0,
            },
        })
    }
}

impl ScriptCtx {
    pub fn new(project: &Project) -> Self {
        Self {
            project: ProjectCtx::from_project(project),
            unit_dir: paths::UNIT_INSTALL_DIR.to_owned(),
            services: project.services.iter().map(|s| s.slug(project).0).collect(),
            oneshots: project.oneshots.iter().map(|o| o.slug(project).0).collect(),
            timers: project.timers.iter().map(|t| t.slug(project).0).collect(),
        }
    }
}
