//! Table-driven slug derivation cases.

use rstest::rstest;
use sysgen_core::{slug::kebab, Project, Slug};

#[rstest]
#[case(" My Proj ", "my-proj")]
#[case("my-proj", "my-proj")]
#[case("MyProj", "my-proj")]
#[case("my_proj", "my-proj")]
#[case("My.Proj", "my-proj")]
#[case("HTTPServer", "http-server")]
#[case("backup-timer-1d", "backup-timer-1d")]
#[case("backup-timer-1h 30m", "backup-timer-1h-30m")]
#[case("Nightly DB Dump", "nightly-db-dump")]
fn kebab_cases(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(kebab(input), expected);
}

#[rstest]
#[case(" My Proj ")]
#[case("HTTPServer")]
#[case("someCamelCase_with spaces")]
#[case("a--b__c")]
#[case("ÄÖÜ mixed Ümlaut")]
fn slug_is_idempotent(#[case] input: &str) {
    let once = Slug::of(input);
    assert_eq!(Slug::of(once.as_str()), once);
}

#[rstest]
#[case("Demo", "web", "demo-web")]
#[case(" My Proj ", "Web Server", "my-proj-web-server")]
#[case("my-proj", "webServer", "my-proj-web-server")]
fn entity_slug_combines_project_and_entity(
    #[case] project: &str,
    #[case] entity: &str,
    #[case] expected: &str,
) {
    let p = Project::new(project, "/tmp/unused").expect("project");
    assert_eq!(p.entity_slug(entity).as_str(), expected);
}
