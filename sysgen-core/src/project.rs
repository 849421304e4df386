//! The [`Project`] aggregate: name-keyed entity collections, launcher
//! resolution and slug derivation.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ProjectError;
use crate::paths;
use crate::slug::Slug;
use crate::types::{Named, OneShot, Service, Timer};

/// Outcome of an upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    /// No entry had the name; the entity was appended.
    Inserted,
    /// An entry with the same name was replaced at its original position.
    Replaced,
}

/// A named group of services, one-shots and timers rendered as one unit set.
///
/// Collections keep insertion order and never hold two entries with the
/// same name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<Service>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub timers: Vec<Timer>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub oneshots: Vec<OneShot>,
    /// Project directory holding `system.json`; not persisted.
    #[serde(skip)]
    dir: PathBuf,
}

impl Project {
    /// An empty project stored in `dir`.
    ///
    /// Returns [`ProjectError::InvalidName`] if `name` has no slug.
    pub fn new(name: impl Into<String>, dir: impl Into<PathBuf>) -> Result<Self, ProjectError> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self {
            name,
            services: Vec::new(),
            timers: Vec::new(),
            oneshots: Vec::new(),
            dir: dir.into(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub(crate) fn set_dir(&mut self, dir: impl Into<PathBuf>) {
        self.dir = dir.into();
    }

    pub fn store_path(&self) -> PathBuf {
        paths::store_path(&self.dir)
    }

    pub fn generated_dir(&self) -> PathBuf {
        paths::generated_dir(&self.dir)
    }

    pub fn templates_dir(&self) -> PathBuf {
        paths::templates_dir(&self.dir)
    }

    /// Slug of the project unit (`<slug>.service`).
    pub fn slug(&self) -> Slug {
        Slug::of(&self.name)
    }

    /// Slug of an entity named `name` inside this project.
    pub fn entity_slug(&self, name: &str) -> Slug {
        self.slug().child(name)
    }

    // -----------------------------------------------------------------------
    // Upserts
    // -----------------------------------------------------------------------

    pub fn upsert_service(&mut self, service: Service) -> Upsert {
        upsert(&mut self.services, service)
    }

    pub fn upsert_oneshot(&mut self, oneshot: OneShot) -> Upsert {
        upsert(&mut self.oneshots, oneshot)
    }

    /// Inserts or replaces a timer without checking its launcher.
    ///
    /// Prefer [`Project::add_timer`], which validates the reference first.
    pub fn upsert_timer(&mut self, timer: Timer) -> Upsert {
        upsert(&mut self.timers, timer)
    }

    /// Create a timer for the one-shot `launcher` and upsert it.
    ///
    /// The timer is named `name`, or `<launcher>-timer-<interval>` when `None`.
    /// Fails with [`ProjectError::LauncherNotFound`] and leaves the timers
    /// untouched if no one-shot is called `launcher`, or with
    /// [`ProjectError::InvalidValue`] if `interval` is blank or spans lines.
    pub fn add_timer(
        &mut self,
        name: Option<String>,
        launcher: &str,
        interval: &str,
    ) -> Result<(Upsert, String), ProjectError> {
        if self.oneshot_by_name(launcher).is_none() {
            return Err(ProjectError::LauncherNotFound {
                launcher: launcher.to_owned(),
            });
        }
        validate_value("interval", interval)?;
        let name = name.unwrap_or_else(|| Timer::default_name(launcher, interval));
        validate_name(&name)?;
        let outcome = self.upsert_timer(Timer {
            name: name.clone(),
            launcher: launcher.to_owned(),
            interval: interval.to_owned(),
        });
        Ok((outcome, name))
    }

    // -----------------------------------------------------------------------
    // Lookups
    // -----------------------------------------------------------------------

    pub fn service_by_name(&self, name: &str) -> Option<&Service> {
        find(&self.services, name)
    }

    pub fn oneshot_by_name(&self, name: &str) -> Option<&OneShot> {
        find(&self.oneshots, name)
    }

    pub fn timer_by_name(&self, name: &str) -> Option<&Timer> {
        find(&self.timers, name)
    }

    /// Checks every name and unit setting that ends up in rendered text,
    /// then per-collection name uniqueness.
    ///
    /// Upserts do not validate, so this runs on load and before rendering.
    pub fn validate(&self) -> Result<(), ProjectError> {
        validate_name(&self.name)?;
        for service in &self.services {
            validate_name(&service.name)?;
            validate_value("restart", &service.restart)?;
        }
        for oneshot in &self.oneshots {
            validate_name(&oneshot.name)?;
        }
        for timer in &self.timers {
            validate_name(&timer.name)?;
            validate_value("interval", &timer.interval)?;
        }
        self.check_unique_names()
    }

    /// Checks the per-collection uniqueness invariant on loaded data.
    pub(crate) fn check_unique_names(&self) -> Result<(), ProjectError> {
        check_unique("service", &self.services)?;
        check_unique("oneshot", &self.oneshots)?;
        check_unique("timer", &self.timers)
    }
}

impl Service {
    pub fn slug(&self, project: &Project) -> Slug {
        project.entity_slug(&self.name)
    }
}

impl OneShot {
    pub fn slug(&self, project: &Project) -> Slug {
        project.entity_slug(&self.name)
    }
}

impl Timer {
    pub fn slug(&self, project: &Project) -> Slug {
        project.entity_slug(&self.name)
    }

    /// Resolve the launched one-shot in `project`.
    pub fn launcher<'p>(&self, project: &'p Project) -> Result<&'p OneShot, ProjectError> {
        project
            .oneshot_by_name(&self.launcher)
            .ok_or_else(|| ProjectError::LauncherNotFound {
                launcher: self.launcher.clone(),
            })
    }
}

/// Rejects names whose slug would be empty or that contain control
/// characters.
///
/// Names are written verbatim into `Description=` lines and script comments,
/// so a newline would start a new directive or shell command.
pub fn validate_name(name: &str) -> Result<(), ProjectError> {
    if Slug::of(name).is_empty() || name.chars().any(char::is_control) {
        return Err(ProjectError::InvalidName {
            name: name.to_owned(),
        });
    }
    Ok(())
}

/// Rejects unit setting values (`Restart=`, `OnUnitInactiveSec=`) that are
/// blank or contain control characters.
///
/// Inner spaces are kept: `1h 30min` is a valid time span.
pub fn validate_value(field: &'static str, value: &str) -> Result<(), ProjectError> {
    if value.trim().is_empty() || value.chars().any(char::is_control) {
        return Err(ProjectError::InvalidValue {
            field,
            value: value.to_owned(),
        });
    }
    Ok(())
}

fn upsert<T: Named>(items: &mut Vec<T>, item: T) -> Upsert {
    match items.iter().position(|existing| existing.name() == item.name()) {
        Some(i) => {
            items[i] = item;
            Upsert::Replaced
        }
        None => {
            items.push(item);
            Upsert::Inserted
        }
    }
}

fn find<'a, T: Named>(items: &'a [T], name: &str) -> Option<&'a T> {
    items.iter().find(|item| item.name() == name)
}

fn check_unique<T: Named>(kind: &'static str, items: &[T]) -> Result<(), ProjectError> {
    let mut seen = HashSet::new();
    for item in items {
        if !seen.insert(item.name()) {
            return Err(ProjectError::DuplicateName {
                kind,
                name: item.name().to_owned(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo() -> Project {
        Project::new("Demo", "/tmp/demo").expect("project")
    }

    #[test]
    fn upsert_twice_keeps_first_position_and_second_attributes() {
        let mut p = demo();
        assert_eq!(p.upsert_service(Service::new("web", "nginx")), Upsert::Inserted);
        p.upsert_service(Service::new("api", "api-server"));

        let mut replacement = Service::new("web", "caddy");
        replacement.restart = "on-failure".to_owned();
        assert_eq!(p.upsert_service(replacement), Upsert::Replaced);

        let names: Vec<&str> = p.services.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["web", "api"]);
        assert_eq!(p.services[0].exec_start, "caddy");
        assert_eq!(p.services[0].restart, "on-failure");
    }

    #[test]
    fn add_timer_with_missing_launcher_fails_without_side_effects() {
        let mut p = demo();
        let err = p.add_timer(None, "backup", "1d").unwrap_err();
        assert!(matches!(err, ProjectError::LauncherNotFound { ref launcher } if launcher == "backup"));
        assert!(p.timers.is_empty());
    }

    #[test]
    fn add_timer_defaults_name_and_resolves_launcher() {
        let mut p = demo();
        p.upsert_oneshot(OneShot::new("backup", "/usr/bin/rsync"));
        let (outcome, name) = p.add_timer(None, "backup", "1d").expect("timer");
        assert_eq!(outcome, Upsert::Inserted);
        assert_eq!(name, "backup-timer-1d");

        let timer = p.timer_by_name("backup-timer-1d").expect("stored");
        let launcher = timer.launcher(&p).expect("launcher");
        assert_eq!(launcher.slug(&p).as_str(), "demo-backup");
        assert_eq!(timer.slug(&p).as_str(), "demo-backup-timer-1d");
    }

    #[test]
    fn add_timer_custom_name_replaces_existing() {
        let mut p = demo();
        p.upsert_oneshot(OneShot::new("backup", "rsync"));
        p.add_timer(Some("nightly".to_owned()), "backup", "1d").expect("first");
        let (outcome, _) = p
            .add_timer(Some("nightly".to_owned()), "backup", "12h")
            .expect("second");
        assert_eq!(outcome, Upsert::Replaced);
        assert_eq!(p.timers.len(), 1);
        assert_eq!(p.timers[0].interval, "12h");
    }

    #[test]
    fn dangling_launcher_fails_resolution() {
        let mut p = demo();
        p.upsert_timer(Timer {
            name: "orphan".to_owned(),
            launcher: "ghost".to_owned(),
            interval: "1h".to_owned(),
        });
        let err = p.timers[0].launcher(&p).unwrap_err();
        assert!(matches!(err, ProjectError::LauncherNotFound { .. }));
    }

    #[test]
    fn invalid_project_name_is_rejected() {
        let err = Project::new("  !! ", "/tmp/x").unwrap_err();
        assert!(matches!(err, ProjectError::InvalidName { .. }));
    }

    #[test]
    fn names_with_control_characters_are_rejected() {
        let err = Project::new("Demo\ntouch /tmp/owned", "/tmp/x").unwrap_err();
        assert!(matches!(err, ProjectError::InvalidName { .. }));
        assert!(validate_name("web\nExecStartPre=/bin/evil").is_err());
        assert!(validate_name("tab\tname").is_err());
        assert!(validate_name("My Web App").is_ok());
    }

    #[test]
    fn add_timer_rejects_interval_spanning_lines() {
        let mut p = demo();
        p.upsert_oneshot(OneShot::new("backup", "rsync"));
        let err = p.add_timer(None, "backup", "1d\nExecStart=/bin/sh").unwrap_err();
        assert!(matches!(err, ProjectError::InvalidValue { field: "interval", .. }), "got: {err}");
        assert!(p.add_timer(None, "backup", " ").is_err());
        assert!(p.timers.is_empty());

        let (_, name) = p.add_timer(None, "backup", "1h 30min").expect("spaced span");
        assert_eq!(p.timer_by_name(&name).map(|t| t.interval.as_str()), Some("1h 30min"));
    }

    #[test]
    fn validate_covers_upserted_entities() {
        let mut p = demo();
        p.upsert_service(Service::new("web", "nginx"));
        assert!(p.validate().is_ok());

        let mut bad = Service::new("api", "api-server");
        bad.restart = "always\nUser=root".to_owned();
        p.upsert_service(bad);
        let err = p.validate().unwrap_err();
        assert!(matches!(err, ProjectError::InvalidValue { field: "restart", .. }), "got: {err}");

        let mut p = demo();
        p.upsert_oneshot(OneShot::new("job\rnext", "true"));
        assert!(matches!(p.validate(), Err(ProjectError::InvalidName { .. })));
    }

    #[test]
    fn same_name_in_different_collections_is_allowed() {
        let mut p = demo();
        p.upsert_service(Service::new("worker", "w"));
        p.upsert_oneshot(OneShot::new("worker", "w"));
        assert!(p.check_unique_names().is_ok());
        assert!(p.service_by_name("worker").is_some());
        assert!(p.oneshot_by_name("worker").is_some());
    }

    #[test]
    fn duplicate_names_are_detected() {
        let mut p = demo();
        p.services.push(Service::new("web", "a"));
        p.services.push(Service::new("web", "b"));
        let err = p.check_unique_names().unwrap_err();
        assert!(matches!(err, ProjectError::DuplicateName { kind: "service", .. }));
    }
}
