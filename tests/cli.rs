use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

mod common;

fn pairview(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("pairview").unwrap();
    cmd.current_dir(cwd).env_remove("PAIRVIEW_CONFIG");
    cmd
}

#[test]
fn runs() {
    let temp = tempfile::tempdir().unwrap();
    pairview(temp.path()).assert().success();
}

#[test]
fn outputs_tool_name() {
    let temp = tempfile::tempdir().unwrap();
    let mut cmd = pairview(temp.path());
    cmd.arg("-V");
    cmd.assert().success().stdout("pairview 0.1.0\n");
}

// Objects subcommand tests

#[test]
fn objects_prints_records() {
    let temp = tempfile::tempdir().unwrap();
    let xml = temp.path().join("IR_37.xml");
    common::write_file(
        &xml,
        &common::voc_xml(&[
            ("person", false, [10, 20, 50, 80]),
            ("car", true, [1, 2, 3, 4]),
        ]),
    );

    let mut cmd = pairview(temp.path());
    cmd.arg("objects").arg(&xml);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("2 object(s)"))
        .stdout(predicates::str::contains(
            "0: person difficult=0 bbox=(10, 20, 50, 80)",
        ))
        .stdout(predicates::str::contains("1: car difficult=1 bbox=(1, 2, 3, 4)"));
}

#[test]
fn objects_json_output_format() {
    let temp = tempfile::tempdir().unwrap();
    let xml = temp.path().join("a.xml");
    common::write_file(&xml, &common::voc_xml(&[("person", false, [10, 20, 50, 80])]));

    let mut cmd = pairview(temp.path());
    cmd.arg("objects").arg(&xml).args(["--output", "json"]);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("\"class_name\": \"person\""))
        .stdout(predicates::str::contains("\"xmax\": 50"));
}

#[test]
fn objects_nonexistent_file_fails() {
    let temp = tempfile::tempdir().unwrap();
    let mut cmd = pairview(temp.path());
    cmd.args(["objects", "nonexistent_file.xml"]);
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("Failed to read annotation"));
}

#[test]
fn objects_unsupported_output_fails() {
    let temp = tempfile::tempdir().unwrap();
    let xml = temp.path().join("a.xml");
    common::write_file(&xml, &common::voc_xml(&[]));

    let mut cmd = pairview(temp.path());
    cmd.arg("objects").arg(&xml).args(["--output", "yaml"]);
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("Unsupported format"));
}

// Plot subcommand tests

#[test]
fn plot_renders_configured_sample() {
    let temp = tempfile::tempdir().unwrap();
    let roots = common::write_sample(
        temp.path(),
        "37",
        &[("person", false, [10, 10, 40, 30])],
        &[("car", false, [5, 5, 20, 20])],
    );
    let config = common::write_config(&temp.path().join("config.json"), &roots, "37");
    let out = temp.path().join("figure.png");

    let mut cmd = pairview(temp.path());
    cmd.arg("--config")
        .arg(&config)
        .arg("plot")
        .arg("--output")
        .arg(&out);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("Rendered sample 37"))
        .stdout(predicates::str::contains("1 RGB box(es), 1 IR box(es)"));

    let figure = image::open(&out).expect("open figure");
    assert_eq!(figure.width(), 64 + 8 + 32);
    assert_eq!(figure.height(), 48);
}

#[test]
fn plot_picks_up_config_json_in_working_dir() {
    let temp = tempfile::tempdir().unwrap();
    let roots = common::write_sample(temp.path(), "12", &[], &[]);
    common::write_config(&temp.path().join("config.json"), &roots, "12");

    let mut cmd = pairview(temp.path());
    cmd.args(["plot", "--layout", "stacked"]);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("Rendered sample 12"));

    let figure = image::open(temp.path().join("pairview.png")).expect("open figure");
    assert_eq!(figure.height(), 48 + 8 + 32);
}

#[test]
fn plot_accepts_underscore_options_and_file_ids() {
    let temp = tempfile::tempdir().unwrap();
    let roots = common::write_sample(temp.path(), "7", &[], &[]);

    let mut cmd = pairview(temp.path());
    cmd.arg("plot")
        .arg("--file")
        .arg("IR_7HongWai.jpg")
        .arg("--rgb_img_path")
        .arg(&roots.rgb_img_dir)
        .arg("--rgb_anno_path")
        .arg(&roots.rgb_anno_dir)
        .arg("--ir_img_path")
        .arg(&roots.ir_img_dir)
        .arg("--ir_anno_path")
        .arg(&roots.ir_anno_dir);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("Rendered sample 7"));
}

#[test]
fn plot_file_without_digits_fails() {
    let temp = tempfile::tempdir().unwrap();
    let mut cmd = pairview(temp.path());
    cmd.args(["plot", "--file", "cover.jpg"]);
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("No sample id"));
}

#[test]
fn plot_missing_sample_fails() {
    let temp = tempfile::tempdir().unwrap();
    let roots = common::write_sample(temp.path(), "1", &[], &[]);
    let config = common::write_config(&temp.path().join("c.json"), &roots, "1");

    let mut cmd = pairview(temp.path());
    cmd.arg("--config")
        .arg(&config)
        .args(["plot", "--img_id", "2"]);
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("Failed to decode image"));
}

#[test]
fn plot_rejects_non_numeric_id() {
    let temp = tempfile::tempdir().unwrap();
    let mut cmd = pairview(temp.path());
    cmd.args(["plot", "--img-id", "abc"]);
    cmd.assert().failure();
}

#[test]
fn explicit_missing_config_fails() {
    let temp = tempfile::tempdir().unwrap();
    let mut cmd = pairview(temp.path());
    cmd.args(["--config", "missing.json", "plot"]);
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("Failed to read config"));
}

// List subcommand tests

#[test]
fn list_prints_ids_from_configured_rgb_dir() {
    let temp = tempfile::tempdir().unwrap();
    let roots = common::write_sample(temp.path(), "21", &[], &[]);
    common::write_file(&roots.rgb_img_dir.join("README.txt"), "no id here");
    let config = common::write_config(&temp.path().join("config.json"), &roots, "21");

    let mut cmd = pairview(temp.path());
    cmd.arg("--config").arg(&config).arg("list");
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("21\t"))
        .stdout(predicates::str::contains("README").not());
}

#[test]
fn list_json_output_format() {
    let temp = tempfile::tempdir().unwrap();
    let roots = common::write_sample(temp.path(), "4", &[], &[]);

    let mut cmd = pairview(temp.path());
    cmd.arg("list")
        .arg(&roots.ir_img_dir)
        .args(["--output", "json"]);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("\"id\": \"4\""));
}

// Check subcommand tests

#[test]
fn check_clean_annotation_passes() {
    let temp = tempfile::tempdir().unwrap();
    let roots = common::write_sample(
        temp.path(),
        "3",
        &[("person", false, [10, 10, 40, 30])],
        &[],
    );
    let config = common::write_config(&temp.path().join("config.json"), &roots, "3");

    let mut cmd = pairview(temp.path());
    cmd.arg("--config")
        .arg(&config)
        .arg("check")
        .arg(roots.rgb_anno_dir.join("IR_3.xml"))
        .arg("--image")
        .arg(roots.rgb_img_dir.join("IR_3.jpg"));
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("Check passed"));
}

#[test]
fn check_unordered_box_fails() {
    let temp = tempfile::tempdir().unwrap();
    let xml = temp.path().join("bad.xml");
    common::write_file(&xml, &common::voc_xml(&[("person", false, [50, 10, 10, 30])]));

    let mut cmd = pairview(temp.path());
    cmd.arg("check").arg(&xml);
    cmd.assert()
        .failure()
        .stdout(predicates::str::contains("InvalidBBoxOrdering"))
        .stderr(predicates::str::contains("1 error(s)"));
}

#[test]
fn check_strict_fails_on_warnings() {
    let temp = tempfile::tempdir().unwrap();
    let xml = temp.path().join("warn.xml");
    common::write_file(&xml, &common::voc_xml(&[("zebra", false, [1, 1, 10, 10])]));

    let mut cmd = pairview(temp.path());
    cmd.arg("check").arg(&xml);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("DefaultColorFallback"));

    let mut cmd = pairview(temp.path());
    cmd.arg("check").arg(&xml).args(["--strict", "--output", "json"]);
    cmd.assert()
        .failure()
        .stdout(predicates::str::contains("\"warning_count\": 1"));
}

#[test]
fn check_with_unreadable_image_fails() {
    let temp = tempfile::tempdir().unwrap();
    let xml = temp.path().join("IR_5.xml");
    common::write_file(&xml, &common::voc_xml(&[("person", false, [1, 1, 10, 10])]));

    let mut cmd = pairview(temp.path());
    cmd.arg("check")
        .arg(&xml)
        .arg("--image")
        .arg(temp.path().join("IR_5.jpg"));
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("Failed to decode image"))
        .stdout(predicates::str::contains("Check").not());
}
