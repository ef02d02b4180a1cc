//! End-to-end build tests: library pipeline and the `pagesmith` binary.

use pagesmith::config::Mode;
use pagesmith::pages::InjectionMode;
use pagesmith::{emit, plan};
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn site() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        "src/index.html",
        "<html><head></head><body><script src=\"boot.js\"></script></body></html>",
    );
    write(
        tmp.path(),
        "src/gallery.html",
        "<html><head><title>Gallery</title></head><body><img src=\"img/a.jpg\"></body></html>",
    );
    write(tmp.path(), "src/img/a.jpg", "jpeg bytes");
    write(tmp.path(), "src/media/intro.mp4", "mp4 bytes");
    write(tmp.path(), "src/api/send.php", "<?php echo 1;");
    write(tmp.path(), "src/data/menu.json", "{}");
    tmp
}

fn pagesmith(project: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_pagesmith"));
    cmd.arg("--project").arg(project);
    cmd.env_remove("PAGESMITH_ENV");
    cmd
}

#[test]
fn library_build_produces_full_site() {
    let tmp = site();
    let plan = plan::plan_project(tmp.path(), Mode::Development).unwrap();

    assert_eq!(plan.pages.len(), plan.pages.iter().filter(|p| p.template_path.is_file()).count());
    assert_eq!(
        plan.pages
            .iter()
            .filter(|p| p.injection_mode == InjectionMode::None)
            .count(),
        1
    );

    let report = emit::emit(&plan, tmp.path()).unwrap();
    assert_eq!(report.pages.len(), 2);
    assert_eq!(report.assets.len(), 4);

    let dist = tmp.path().join("dist");
    for rel in ["img/a.jpg", "media/intro.mp4", "api/send.php", "data/menu.json"] {
        assert!(dist.join(rel).is_file(), "missing {rel}");
    }

    let index = fs::read_to_string(dist.join("index.html")).unwrap();
    assert!(!index.contains("bundle.js"));
    let gallery = fs::read_to_string(dist.join("gallery.html")).unwrap();
    assert!(gallery.contains("<script defer src=\"js/bundle.js\"></script></body>"));
}

#[test]
fn rebuild_is_stable() {
    let tmp = site();
    let first = plan::plan_project(tmp.path(), Mode::Production).unwrap();
    emit::emit(&first, tmp.path()).unwrap();
    let gallery_first = fs::read_to_string(tmp.path().join("dist/gallery.html")).unwrap();

    let second = plan::plan_project(tmp.path(), Mode::Production).unwrap();
    assert_eq!(first.pages, second.pages);
    assert_eq!(first.assets, second.assets);
    emit::emit(&second, tmp.path()).unwrap();
    let gallery_second = fs::read_to_string(tmp.path().join("dist/gallery.html")).unwrap();

    assert_eq!(gallery_first, gallery_second);
}

#[test]
fn cli_rebuild_with_custom_layout() {
    let tmp = site();
    fs::rename(tmp.path().join("src"), tmp.path().join("site")).unwrap();
    write(
        tmp.path(),
        "pagesmith.toml",
        "source_dir = \"site\"\noutput_dir = \"build/www\"\n[assets]\nstrip_prefix = \"site\"\n",
    );

    for _ in 0..2 {
        let out = pagesmith(tmp.path()).arg("build").output().unwrap();
        assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    }

    let www = tmp.path().join("build/www");
    for rel in ["gallery.html", "img/a.jpg", "data/menu.json"] {
        assert!(www.join(rel).is_file(), "missing {rel}");
    }
    assert!(!www.join("site").exists());
}

#[test]
fn cli_nested_output_is_rejected_before_writing() {
    let tmp = site();
    write(tmp.path(), "pagesmith.toml", "output_dir = \"src/dist\"\n");

    let out = pagesmith(tmp.path()).arg("build").output().unwrap();
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("must not contain one another"), "stderr: {stderr}");
    assert!(!tmp.path().join("src/dist").exists());
}

#[test]
fn cli_source_inside_output_keeps_sources() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "dist/src/index.html", "<html></html>");
    write(tmp.path(), "pagesmith.toml", "source_dir = \"dist/src\"\n");

    let out = pagesmith(tmp.path()).arg("build").output().unwrap();
    assert!(!out.status.success());
    assert!(tmp.path().join("dist/src/index.html").is_file());
}

#[test]
fn cli_build_succeeds() {
    let tmp = site();
    let out = pagesmith(tmp.path()).arg("build").output().unwrap();

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("==> Build complete"));
    assert!(stdout.contains("Emitted 2 pages, 4 assets"));
    assert!(tmp.path().join("dist/gallery.html").is_file());
}

#[test]
fn cli_missing_source_dir_fails() {
    let tmp = TempDir::new().unwrap();
    let out = pagesmith(tmp.path()).arg("build").output().unwrap();

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Cannot enumerate source pages"), "stderr: {stderr}");
    assert!(stderr.contains("src"), "stderr: {stderr}");
    assert!(!tmp.path().join("dist").exists());
}

#[test]
fn cli_plan_json() {
    let tmp = site();
    let out = pagesmith(tmp.path())
        .args(["--mode", "production", "plan", "--json"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["mode"], "production");
    let modes: Vec<(&str, &str)> = json["pages"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| {
            (
                p["output_filename"].as_str().unwrap(),
                p["injection_mode"].as_str().unwrap(),
            )
        })
        .collect();
    assert_eq!(modes, vec![("gallery.html", "body"), ("index.html", "none")]);
}

#[test]
fn cli_mode_from_environment() {
    let tmp = site();
    let out = pagesmith(tmp.path())
        .env("PAGESMITH_ENV", "production")
        .arg("check")
        .output()
        .unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Mode: production"));
    assert!(stdout.contains("==> Project is valid"));
    assert!(!tmp.path().join("dist").exists());
}

#[test]
fn cli_gen_config_is_loadable() {
    let tmp = TempDir::new().unwrap();
    let out = pagesmith(tmp.path()).arg("gen-config").output().unwrap();
    assert!(out.status.success());

    fs::write(tmp.path().join("pagesmith.toml"), &out.stdout).unwrap();
    let config = pagesmith::config::load_config(tmp.path()).unwrap();
    assert_eq!(config, pagesmith::config::BuildConfig::default());
}
