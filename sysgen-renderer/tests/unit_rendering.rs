use sysgen_core::{OneShot, Project, Service, Timer};
use sysgen_renderer::{Artifact, RenderError, Renderer, UnitKind};

fn web_project() -> Project {
    let mut project = Project::new("Demo", "/srv/demo").expect("project");
    project.upsert_service(Service::new("web", "/nonexistent/sbin/nginx"));
    project
}

fn full_project() -> Project {
    let mut project = web_project();
    let mut backup = OneShot::new("backup", "/nonexistent/bin/rsync");
    backup.args = vec!["-a".into(), "/src".into(), "/dst".into()];
    project.upsert_oneshot(backup);
    project.add_timer(None, "backup", "1d").expect("timer");
    project
}

fn render(project: &Project) -> Vec<Artifact> {
    Renderer::new()
        .expect("renderer")
        .render_all(project)
        .expect("render")
}

fn artifact<'a>(artifacts: &'a [Artifact], file_name: &str) -> &'a Artifact {
    artifacts
        .iter()
        .find(|a| a.file_name == file_name)
        .unwrap_or_else(|| panic!("no artifact named {file_name}"))
}

fn line_index(content: &str, line: &str) -> usize {
    content
        .lines()
        .position(|l| l == line)
        .unwrap_or_else(|| panic!("line `{line}` missing from:\n{content}"))
}

#[test]
fn project_unit_is_a_noop_aggregate() {
    let artifacts = render(&web_project());
    let unit = &artifact(&artifacts, "demo.service").content;
    assert!(unit.contains("Description=Demo\n"));
    assert!(unit.contains("Type=oneshot\n"));
    assert!(unit.contains("ExecStart=/bin/true\n"));
    assert!(unit.contains("RemainAfterExit=yes\n"));
    assert!(unit.contains("WantedBy=multi-user.target\n"));
}

#[test]
fn service_unit_is_bound_to_project() {
    let artifacts = render(&web_project());
    let unit = &artifact(&artifacts, "demo-web.service").content;
    for expected in [
        "Description=web as part of Demo",
        "PartOf=demo.service",
        "After=demo.service",
        "ExecStart=/nonexistent/sbin/nginx",
        "Restart=always",
        "RestartSec=5",
        "WantedBy=demo.service",
    ] {
        line_index(unit, expected);
    }
    assert!(!unit.contains("Environment="));
}

#[test]
fn service_environment_is_rendered_in_key_order() {
    let mut project = web_project();
    let mut api = Service::new("api", "/nonexistent/api");
    api.environment.insert("PORT".into(), "8080".into());
    api.environment.insert("MODE".into(), "prod ready".into());
    api.restart = "on-failure".into();
    api.restart_sec = 30;
    project.upsert_service(api);

    let artifacts = render(&project);
    let unit = &artifact(&artifacts, "demo-api.service").content;
    let mode = line_index(unit, "Environment=\"MODE=prod ready\"");
    let port = line_index(unit, "Environment=\"PORT=8080\"");
    let exec = line_index(unit, "ExecStart=/nonexistent/api");
    assert!(mode < port && port < exec);
    line_index(unit, "Restart=on-failure");
    line_index(unit, "RestartSec=30");
}

#[test]
fn oneshot_and_timer_reference_each_other() {
    let artifacts = render(&full_project());

    let oneshot = &artifact(&artifacts, "demo-backup.service").content;
    line_index(oneshot, "Type=oneshot");
    line_index(
        oneshot,
        r#"ExecStart=/nonexistent/bin/rsync "-a" "/src" "/dst""#,
    );
    assert!(!oneshot.contains("Restart="));

    let timer = &artifact(&artifacts, "demo-backup-timer-1d.timer").content;
    for expected in [
        "Description=Timer backup-timer-1d as part of Demo",
        "PartOf=demo.service",
        "After=demo.service",
        "Requires=demo-backup.service",
        "Unit=demo-backup.service",
        "OnUnitInactiveSec=1d",
        "WantedBy=demo.service",
    ] {
        line_index(timer, expected);
    }
}

#[test]
fn install_script_enables_everything_in_order() {
    let artifacts = render(&full_project());
    let install = artifact(&artifacts, "install.sh");
    assert!(install.executable);
    let script = &install.content;

    assert!(script.starts_with("#!/usr/bin/env bash\n"));
    line_index(script, "   exit 1");
    let copy_services = line_index(script, "cp *.service /etc/systemd/system/");
    let copy_timers = line_index(script, "cp *.timer /etc/systemd/system/");
    let project = line_index(script, "systemctl enable demo");
    let web = line_index(script, "systemctl enable demo-web");
    let backup = line_index(script, "systemctl enable demo-backup");
    let timer = line_index(script, "systemctl enable demo-backup-timer-1d.timer");
    let reset = line_index(script, "systemctl reset-failed demo");
    let reload = line_index(script, "systemctl daemon-reload");
    assert!(copy_services < copy_timers);
    assert!(copy_timers < project);
    assert!(project < web && web < backup && backup < timer);
    assert!(timer < reset && reset < reload);
}

#[test]
fn install_script_skips_timer_copy_without_timers() {
    let artifacts = render(&web_project());
    let script = &artifact(&artifacts, "install.sh").content;
    assert!(!script.contains("*.timer"));
    assert!(!script.contains(".timer"));
}

#[test]
fn uninstall_script_mirrors_install() {
    let artifacts = render(&full_project());
    let uninstall = artifact(&artifacts, "uninstall.sh");
    assert!(uninstall.executable);
    let script = &uninstall.content;

    let stop_project = line_index(script, "systemctl stop demo");
    let stop_web = line_index(script, "systemctl stop demo-web");
    let stop_backup = line_index(script, "systemctl stop demo-backup");
    let stop_timer = line_index(script, "systemctl stop demo-backup-timer-1d.timer");
    let disable_web = line_index(script, "systemctl disable demo-web");
    let disable_timer = line_index(script, "systemctl disable demo-backup-timer-1d.timer");
    let disable_project = line_index(script, "systemctl disable demo");
    let rm_web = line_index(script, "rm -f /etc/systemd/system/demo-web.service");
    let rm_backup = line_index(script, "rm -f /etc/systemd/system/demo-backup.service");
    let rm_timer = line_index(script, "rm -f /etc/systemd/system/demo-backup-timer-1d.timer");
    let rm_project = line_index(script, "rm -f /etc/systemd/system/demo.service");
    let reload = line_index(script, "systemctl daemon-reload");

    assert!(stop_project < stop_web && stop_web < stop_backup && stop_backup < stop_timer);
    assert!(stop_timer < disable_web && disable_timer < disable_project);
    assert!(disable_project < rm_web);
    assert!(rm_web < rm_backup && rm_backup < rm_timer && rm_timer < rm_project);
    assert!(rm_project < reload);
}

#[test]
fn templates_leave_no_stray_blank_lines() {
    for project in [web_project(), full_project()] {
        for artifact in render(&project) {
            assert!(
                !artifact.content.contains("\n\n\n"),
                "{} has a double blank line:\n{}",
                artifact.file_name,
                artifact.content
            );
            assert!(artifact.content.ends_with('\n'), "{}", artifact.file_name);
        }
    }
}

#[test]
fn empty_project_renders_project_unit_and_scripts() {
    let project = Project::new("Demo", "/srv/demo").expect("project");
    let kinds: Vec<UnitKind> = render(&project).iter().map(|a| a.kind).collect();
    assert_eq!(
        kinds,
        vec![UnitKind::Project, UnitKind::Installer, UnitKind::Uninstaller]
    );
}

#[test]
fn dangling_launcher_fails_rendering() {
    let mut project = full_project();
    project.upsert_timer(Timer {
        name: "nightly".into(),
        launcher: "vanished".into(),
        interval: "1h".into(),
    });
    let err = Renderer::new()
        .expect("renderer")
        .render_all(&project)
        .unwrap_err();
    assert!(matches!(err, RenderError::Project(_)));
    assert!(err.to_string().contains("vanished"), "got: {err}");
}

#[test]
fn script_comments_carry_the_slug_only() {
    let mut project = web_project();
    project.name = "My Demo".into();
    let artifacts = render(&project);
    let install = &artifact(&artifacts, "install.sh").content;
    let uninstall = &artifact(&artifacts, "uninstall.sh").content;
    assert_eq!(
        install.lines().nth(1),
        Some("# Installs and enables every unit of my-demo. Safe to re-run.")
    );
    assert_eq!(
        uninstall.lines().nth(1),
        Some("# Stops, disables and removes every unit of my-demo.")
    );
}

#[test]
fn line_breaks_never_reach_rendered_files() {
    let renderer = Renderer::new().expect("renderer");

    let mut project = web_project();
    project.name = "Demo\ntouch /tmp/owned".into();
    let err = renderer.render_all(&project).unwrap_err();
    assert!(err.to_string().contains("invalid name"), "got: {err}");

    let mut project = web_project();
    let mut api = Service::new("api", "/nonexistent/api");
    api.restart = "always\nExecStartPre=/bin/evil".into();
    project.upsert_service(api);
    let err = renderer.render_all(&project).unwrap_err();
    assert!(err.to_string().contains("invalid restart"), "got: {err}");

    let mut project = full_project();
    project.timers[0].interval = "1d\nOnBootSec=0".into();
    let err = renderer.render_all(&project).unwrap_err();
    assert!(err.to_string().contains("invalid interval"), "got: {err}");
}

#[test]
fn project_overrides_are_used_by_for_project() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    std::fs::create_dir_all(dir.path().join("templates")).expect("templates dir");
    std::fs::write(
        dir.path().join("templates/project.service.tera"),
        "# group {{ project.slug }}\n",
    )
    .expect("override");

    let project = Project::new("Demo", dir.path()).expect("project");
    let artifacts = Renderer::for_project(&project)
        .expect("renderer")
        .render_all(&project)
        .expect("render");
    assert_eq!(artifact(&artifacts, "demo.service").content, "# group demo\n");
}
