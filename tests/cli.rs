use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

const LOGO: &str = concat!(
    "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 400 120\">\n",
    "  <style>.shade { fill: #555; }</style>\n",
    "  <text x=\"0\" y=\"14\" class=\"logo\">░░█████╗░░</text>\n",
    "  <text x=\"0\" y=\"28\" class=\"logo\"><tspan class=\"shade\">░</tspan>██╔══██╗░</text>\n",
    "  <text x=\"0\" y=\"42\" class=\"logo\">███████║</text>\n",
    "  <rect x=\"0\" y=\"0\" width=\"4\" height=\"4\"/>\n",
    "</svg>\n",
);

const EXPECTED: &str = concat!(
    "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 400 120\">\n",
    "  <style>.shade { fill: #555; }</style>\n",
    "  <text x=\"0\" y=\"14\" class=\"logo\"><tspan class=\"shade\">░░</tspan>█████╗<tspan class=\"shade\">░░</tspan></text>\n",
    "  <text x=\"0\" y=\"28\" class=\"logo\"><tspan class=\"shade\">░</tspan>██╔══██╗<tspan class=\"shade\">░</tspan></text>\n",
    "  <text x=\"0\" y=\"42\" class=\"logo\">███████║</text>\n",
    "  <rect x=\"0\" y=\"0\" width=\"4\" height=\"4\"/>\n",
    "</svg>\n",
);

/// The binary with color forcing cleared, so piped output is plain text.
fn svgshade() -> Command {
    let mut cmd = cargo_bin_cmd!("svgshade");
    cmd.env_remove("FORCE_COLOR")
        .env_remove("CLICOLOR_FORCE")
        .env_remove("IGNORE_IS_TERMINAL");
    cmd
}

#[test]
fn writes_updated_file_next_to_input() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("archup-logo.svg");
    let output = dir.path().join("archup-logo-updated.svg");
    fs::write(&input, LOGO).unwrap();

    let mut cmd = svgshade();
    cmd.arg(&input);
    cmd.assert()
        .success()
        .stdout(format!(
            "✓ Successfully processed {}\n\
             ✓ Output written to {}\n\
             \n\
             To replace the original file, run:\n  \
             mv {} {}\n",
            input.display(),
            output.display(),
            output.display(),
            input.display()
        ));

    assert_eq!(fs::read_to_string(&output).unwrap(), EXPECTED);
    assert_eq!(fs::read_to_string(&input).unwrap(), LOGO);
}

#[test]
fn explicit_output_path() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("logo.svg");
    let output = dir.path().join("out.svg");
    fs::write(&input, LOGO).unwrap();

    let mut cmd = svgshade();
    cmd.arg(&input).arg(&output);
    cmd.assert().success();

    assert_eq!(fs::read_to_string(&output).unwrap(), EXPECTED);
    assert!(!dir.path().join("logo-updated.svg").exists());
}

#[test]
fn rerun_on_output_is_a_no_op() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("logo.svg");
    let again = dir.path().join("again.svg");
    fs::write(&input, EXPECTED).unwrap();

    let mut cmd = svgshade();
    cmd.arg(&input).arg(&again);
    cmd.assert().success();

    assert_eq!(fs::read_to_string(&again).unwrap(), EXPECTED);
}

#[test]
fn custom_marker_and_class() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("logo.svg");
    let output = dir.path().join("out.svg");
    fs::write(&input, "<text x=\"0\">██░░</text>\n").unwrap();

    let mut cmd = svgshade();
    cmd.args(["--marker", "█", "--class", "solid"])
        .arg(&input)
        .arg(&output);
    cmd.assert().success();

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "<text x=\"0\"><tspan class=\"solid\">██</tspan>░░</text>\n"
    );
}

#[test]
fn verbose_reports_rewritten_lines() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("logo.svg");
    fs::write(&input, LOGO).unwrap();

    let mut cmd = svgshade();
    cmd.arg("--verbose").arg(&input);
    cmd.assert()
        .success()
        .stdout(
            predicate::str::contains("[shade] line 3:")
                .and(predicate::str::contains("[shade] 2 of 7 lines rewritten")),
        );
}

#[test]
fn missing_input_fails_without_output() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("archup-logo.svg");

    let mut cmd = svgshade();
    cmd.arg(&input);
    cmd.assert()
        .failure()
        .code(1)
        .stderr(format!("Error: {} not found\n", input.display()));

    assert!(!dir.path().join("archup-logo-updated.svg").exists());
}

#[test]
fn refuses_to_overwrite_input() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("logo.svg");
    fs::write(&input, LOGO).unwrap();

    let mut cmd = svgshade();
    cmd.arg(&input).arg(&input);
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("refusing to overwrite input"));

    assert_eq!(fs::read_to_string(&input).unwrap(), LOGO);
}

#[test]
fn refuses_input_spelled_differently() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("logo.svg");
    fs::write(&input, LOGO).unwrap();

    let absolute = input.to_str().unwrap().to_string();
    for output in ["./logo.svg", absolute.as_str()] {
        let mut cmd = svgshade();
        cmd.current_dir(dir.path()).arg("logo.svg").arg(output);
        cmd.assert()
            .failure()
            .code(1)
            .stderr(predicate::str::starts_with("Error: refusing to overwrite input"));

        assert_eq!(fs::read_to_string(&input).unwrap(), LOGO);
    }
}
