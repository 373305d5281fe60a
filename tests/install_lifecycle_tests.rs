//! End-to-end install/uninstall lifecycle against a workspace sandbox

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

#[allow(deprecated)]
fn pagoda_cmd() -> Command {
    Command::cargo_bin("pagoda").unwrap()
}

const MANIFEST: &str = r#"
bundle: acme-site
version: 1.2.0
services:
  - code: orders
    image: acme/orders@sha256:aaa
    ingress-path: /orders
widgets:
  - code: nav
    titles:
      en: Navigation
  - code: footer
    titles:
      en: Footer
page-templates:
  - code: hero
    template: "<main>{0}{1}</main>"
    frames: 2
pages:
  - code: home
    titles:
      en: Home
    template: hero
    widgets:
      - frame: 0
        code: nav
      - frame: 1
        code: footer
"#;

fn write_manifest(workspace: &Path) {
    fs::write(workspace.join("bundle.yaml"), MANIFEST).unwrap();
}

#[test]
fn test_install_creates_platform_artifacts() {
    let temp = TempDir::new().unwrap();
    write_manifest(temp.path());

    pagoda_cmd()
        .args(["-w"])
        .arg(temp.path())
        .arg("install")
        .assert()
        .success()
        .stdout(predicate::str::contains("Installing"))
        .stdout(predicate::str::contains("INSTALL_COMPLETED"));

    let platform = temp.path().join("platform");
    assert!(platform.join("service/orders.json").exists());
    assert!(platform.join("widget/nav.json").exists());
    assert!(platform.join("widget/footer.json").exists());
    assert!(platform.join("page-template/hero.json").exists());
    assert!(platform.join("page/home.json").exists());

    // The page was wired frame by frame
    let page = fs::read_to_string(platform.join("page/home.json")).unwrap();
    assert!(page.contains("nav"));
    assert!(page.contains("footer"));

    // Job state was written through to disk
    assert!(temp.path().join(".pagoda/jobs.json").exists());
}

#[test]
fn test_reinstall_skips_everything() {
    let temp = TempDir::new().unwrap();
    write_manifest(temp.path());

    pagoda_cmd()
        .args(["-w"])
        .arg(temp.path())
        .arg("install")
        .assert()
        .success();

    pagoda_cmd()
        .args(["-w"])
        .arg(temp.path())
        .arg("install")
        .assert()
        .success()
        .stdout(predicate::str::contains("SKIP"))
        .stdout(predicate::str::contains("INSTALL_COMPLETED"));
}

#[test]
fn test_deleted_artifact_is_healed_on_reinstall() {
    let temp = TempDir::new().unwrap();
    write_manifest(temp.path());

    pagoda_cmd()
        .args(["-w"])
        .arg(temp.path())
        .arg("install")
        .assert()
        .success();

    // Drift: someone removes a widget behind the engine's back
    fs::remove_file(temp.path().join("platform/widget/nav.json")).unwrap();

    pagoda_cmd()
        .args(["-w"])
        .arg(temp.path())
        .arg("install")
        .assert()
        .success()
        .stdout(predicate::str::contains("OVERRIDE"));

    assert!(temp.path().join("platform/widget/nav.json").exists());
}

#[test]
fn test_plan_is_read_only() {
    let temp = TempDir::new().unwrap();
    write_manifest(temp.path());

    pagoda_cmd()
        .args(["-w"])
        .arg(temp.path())
        .arg("plan")
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE"))
        .stdout(predicate::str::contains("Service drift"))
        .stdout(predicate::str::contains("NEW"));

    // Nothing was installed or recorded
    assert!(!temp.path().join("platform").exists());
    assert!(!temp.path().join(".pagoda/jobs.json").exists());
}

#[test]
fn test_status_and_list_after_install() {
    let temp = TempDir::new().unwrap();
    write_manifest(temp.path());

    let output = pagoda_cmd()
        .args(["-w"])
        .arg(temp.path())
        .arg("install")
        .output()
        .unwrap();
    assert!(output.status.success());

    // Pull the job id out of "Install job <id> finished as ..."
    let stdout = String::from_utf8_lossy(&output.stdout);
    let job_id = stdout
        .lines()
        .find_map(|line| {
            line.strip_prefix("Install job ")
                .and_then(|rest| rest.split_whitespace().next())
        })
        .expect("install output names the job id")
        .to_string();

    pagoda_cmd()
        .args(["-w"])
        .arg(temp.path())
        .args(["status", &job_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("acme-site"))
        .stdout(predicate::str::contains("INSTALL_COMPLETED"))
        .stdout(predicate::str::contains("Components:"));

    pagoda_cmd()
        .args(["-w"])
        .arg(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains(&job_id));

    pagoda_cmd()
        .args(["-w"])
        .arg(temp.path())
        .args(["list", "--bundle", "acme-site"])
        .assert()
        .success()
        .stdout(predicate::str::contains("widget nav"))
        .stdout(predicate::str::contains("blake3:"));
}

#[test]
fn test_uninstall_removes_everything() {
    let temp = TempDir::new().unwrap();
    write_manifest(temp.path());

    pagoda_cmd()
        .args(["-w"])
        .arg(temp.path())
        .arg("install")
        .assert()
        .success();

    pagoda_cmd()
        .args(["-w"])
        .arg(temp.path())
        .args(["uninstall", "acme-site"])
        .assert()
        .success()
        .stdout(predicate::str::contains("UNINSTALL_COMPLETED"));

    let platform = temp.path().join("platform");
    assert!(!platform.join("service/orders.json").exists());
    assert!(!platform.join("widget/nav.json").exists());
    assert!(!platform.join("page/home.json").exists());

    pagoda_cmd()
        .args(["-w"])
        .arg(temp.path())
        .args(["list", "--bundle", "acme-site"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no installed components"));
}
