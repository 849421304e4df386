//! Per-artifact status of `generated/` against a fresh render.
//!
//! States, in report order:
//! 1. one entry per rendered artifact, `Current` / `Modified` / `Missing`
//! 2. one `Orphan` entry per file the model no longer produces

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use sysgen_core::Project;

use crate::writer::{orphans, read_existing, render_checked};
use crate::SyncError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArtifactState {
    /// On-disk content equals the render.
    Current,
    /// On-disk content differs from the render.
    Modified,
    /// The render produces a file that is not on disk.
    Missing,
    /// A file on disk that the model no longer produces, e.g. after a rename.
    Orphan,
}

impl ArtifactState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactState::Current => "CURRENT",
            ArtifactState::Modified => "MODIFIED",
            ArtifactState::Missing => "MISSING",
            ArtifactState::Orphan => "ORPHAN",
        }
    }
}

impl fmt::Display for ArtifactState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactStatus {
    pub file_name: String,
    /// Artifact kind label, `None` for orphans.
    pub kind: Option<&'static str>,
    pub path: PathBuf,
    pub state: ArtifactState,
}

/// Classify every artifact of `project` against its `generated/` directory.
///
/// Nothing is written.
pub fn check(project: &Project) -> Result<Vec<ArtifactStatus>, SyncError> {
    let artifacts = render_checked(project)?;
    let mut statuses = Vec::with_capacity(artifacts.len());
    for artifact in &artifacts {
        let path = artifact.path();
        let state = match read_existing(&path)? {
            None => ArtifactState::Missing,
            Some(existing) if existing == artifact.content.as_bytes() => ArtifactState::Current,
            Some(_) => ArtifactState::Modified,
        };
        statuses.push(ArtifactStatus {
            file_name: artifact.file_name.clone(),
            kind: Some(artifact.kind.label()),
            path,
            state,
        });
    }
    for path in orphans(&project.generated_dir(), &artifacts)? {
        statuses.push(ArtifactStatus {
            file_name: path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
            kind: None,
            path,
            state: ArtifactState::Orphan,
        });
    }
    Ok(statuses)
}

/// `true` when every artifact is `Current` and there are no orphans.
pub fn is_clean(statuses: &[ArtifactStatus]) -> bool {
    statuses.iter().all(|s| s.state == ArtifactState::Current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use sysgen_core::{store, OneShot, Service};
    use tempfile::TempDir;

    use crate::generate;

    fn setup() -> (TempDir, Project) {
        let tmp = TempDir::new().expect("tempdir");
        let mut project = Project::new("Demo", tmp.path()).expect("project");
        project.upsert_service(Service::new("web", "/nonexistent/nginx"));
        project.upsert_oneshot(OneShot::new("backup", "/nonexistent/rsync"));
        store::save(&project).expect("save");
        (tmp, project)
    }

    fn state_of(statuses: &[ArtifactStatus], file_name: &str) -> ArtifactState {
        statuses
            .iter()
            .find(|s| s.file_name == file_name)
            .map(|s| s.state)
            .unwrap_or_else(|| panic!("no status for {file_name}"))
    }

    #[test]
    fn everything_missing_before_first_generate() {
        let (_tmp, project) = setup();
        let statuses = check(&project).expect("check");
        assert_eq!(statuses.len(), 5);
        assert!(statuses.iter().all(|s| s.state == ArtifactState::Missing));
        assert!(!is_clean(&statuses));
    }

    #[test]
    fn current_after_generate() {
        let (_tmp, project) = setup();
        generate(&project, false).expect("generate");
        let statuses = check(&project).expect("check");
        assert!(is_clean(&statuses), "{statuses:?}");
    }

    #[test]
    fn modified_missing_and_orphan_are_detected() {
        let (_tmp, project) = setup();
        generate(&project, false).expect("generate");
        let out = project.generated_dir();
        fs::write(out.join("demo-web.service"), "edited\n").expect("edit");
        fs::remove_file(out.join("uninstall.sh")).expect("remove");
        fs::write(out.join("demo-legacy.service"), "[Unit]\n").expect("orphan");

        let statuses = check(&project).expect("check");
        assert_eq!(state_of(&statuses, "demo-web.service"), ArtifactState::Modified);
        assert_eq!(state_of(&statuses, "uninstall.sh"), ArtifactState::Missing);
        assert_eq!(state_of(&statuses, "demo-legacy.service"), ArtifactState::Orphan);
        assert_eq!(state_of(&statuses, "demo.service"), ArtifactState::Current);
        assert_eq!(statuses.last().map(|s| s.kind), Some(None));
    }

    #[test]
    fn non_utf8_file_is_reported_modified() {
        let (_tmp, project) = setup();
        generate(&project, false).expect("generate");
        fs::write(project.generated_dir().join("demo-web.service"), [0xc3, 0x28, 0xff])
            .expect("write");

        let statuses = check(&project).expect("check");
        assert_eq!(state_of(&statuses, "demo-web.service"), ArtifactState::Modified);
    }

    #[test]
    fn rename_turns_old_units_into_orphans() {
        let (_tmp, mut project) = setup();
        generate(&project, false).expect("generate");
        project.name = "Renamed".to_string();

        let statuses = check(&project).expect("check");
        assert_eq!(state_of(&statuses, "renamed-web.service"), ArtifactState::Missing);
        assert_eq!(state_of(&statuses, "demo-web.service"), ArtifactState::Orphan);
        assert_eq!(state_of(&statuses, "install.sh"), ArtifactState::Modified);
    }

    #[test]
    fn states_serialize_upper_case() {
        let json = serde_json::to_string(&ArtifactState::Orphan).expect("json");
        assert_eq!(json, "\"ORPHAN\"");
    }
}
