use std::fs;

use serde_json::Value;

use crate::common::{run_launcher, Workspace, BINARY_PATH};

fn stdout_json(output: &std::process::Output) -> Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).unwrap_or_else(|err| panic!("invalid plan JSON ({err}): {stdout}"))
}

fn stderr_report(output: &std::process::Output) -> Value {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let line = stderr
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .unwrap_or_else(|| panic!("stderr should contain an error report"));
    serde_json::from_str(line).unwrap_or_else(|err| panic!("invalid report JSON ({err}): {line}"))
}

#[test]
fn prints_launch_plan_on_success() {
    let workspace = Workspace::new();
    let deployment = workspace.file("app.war");
    let deployment_arg = format!("--deployment={deployment}");

    let output = run_launcher(&[deployment_arg.as_str(), "-Da=b", "--version"], &[]);
    assert!(output.status.success(), "launcher failed: {output:?}");

    let plan = stdout_json(&output);
    let configuration = &plan["configuration"];
    assert_eq!(configuration["deployment"], Value::String(deployment));
    assert_eq!(configuration["version"], Value::Bool(true));
    assert_eq!(configuration["help"], Value::Bool(false));
    assert_eq!(configuration["server_dir"], Value::Null);
    assert_eq!(
        configuration["server_arguments"],
        serde_json::json!(["-Da=b", "--version"])
    );
    assert_eq!(
        plan["launch_args"],
        serde_json::json!([deployment_arg, "-Da=b", "--version"])
    );
}

#[test]
fn unknown_argument_exits_with_usage_status() {
    let output = run_launcher(&["--not-a-real-flag"], &[]);

    assert_eq!(output.status.code(), Some(64), "output: {output:?}");
    assert!(output.stdout.is_empty(), "no plan is printed on failure");
    let report = stderr_report(&output);
    assert_eq!(report["code"], "UNKNOWN_ARGUMENT");
    assert_eq!(report["argument"], "--not-a-real-flag");
}

#[test]
fn missing_deployment_exits_with_no_input_status() {
    let output = run_launcher(&["--deployment=/path/that/does/not/exist"], &[]);

    assert_eq!(output.status.code(), Some(66), "output: {output:?}");
    let report = stderr_report(&output);
    assert_eq!(report["code"], "FILE_NOT_FOUND");
    assert_eq!(report["argument"], "/path/that/does/not/exist");
}

#[test]
fn environment_properties_are_applied() {
    let output = run_launcher(
        &["-b=127.0.0.1"],
        &[
            ("UBERJAR_SERVER_DIR", "/srv/from-env"),
            ("UBERJAR_NO_DELETE_SERVER_DIR", "1"),
        ],
    );
    assert!(output.status.success(), "launcher failed: {output:?}");

    let plan = stdout_json(&output);
    assert_eq!(plan["configuration"]["server_dir"], "/srv/from-env");
    assert_eq!(plan["configuration"]["no_delete_server_dir"], true);
}

#[test]
fn environment_property_conflicting_with_cli_is_rejected() {
    let output = run_launcher(
        &["--server-dir=/srv/from-cli"],
        &[("UBERJAR_SERVER_DIR", "/srv/from-env")],
    );

    assert_eq!(output.status.code(), Some(64), "output: {output:?}");
    let report = stderr_report(&output);
    assert_eq!(report["code"], "DUPLICATE_ARGUMENT");
    assert_eq!(report["argument"], "--server-dir");
}

#[test]
fn environment_overrides_properties_file() {
    let workspace = Workspace::new();
    let file = workspace.path("launch.toml");
    fs::write(&file, "[uberjar]\nserver-dir = \"/srv/from-file\"\n")
        .expect("can write properties file");
    let file = file.to_string_lossy().into_owned();

    let output = run_launcher(
        &[],
        &[
            ("UBERJAR_PROPERTIES_FILE", file.as_str()),
            ("UBERJAR_SERVER_DIR", "/srv/from-env"),
        ],
    );
    assert!(output.status.success(), "launcher failed: {output:?}");

    let plan = stdout_json(&output);
    assert_eq!(plan["configuration"]["server_dir"], "/srv/from-env");
}

#[test]
fn unreadable_properties_file_fails_generically() {
    let workspace = Workspace::new();
    let missing = workspace.missing("absent.toml");

    let output = run_launcher(&[], &[("UBERJAR_PROPERTIES_FILE", missing.as_str())]);
    assert_eq!(output.status.code(), Some(1), "output: {output:?}");
}

#[cfg(unix)]
#[test]
fn non_unicode_argument_fails_generically() {
    use std::{ffi::OsString, os::unix::ffi::OsStringExt, process::Command};

    let workspace = Workspace::new();
    let raw_path = OsString::from_vec(b"app-\xff.war".to_vec());
    let deployment = workspace.path("placeholder").with_file_name(&raw_path);
    fs::write(&deployment, b"war").expect("can write non-UTF-8 deployment");
    let mut argument = OsString::from("--deployment=");
    argument.push(deployment.as_os_str());

    let output = Command::new(BINARY_PATH)
        .env_clear()
        .env("RUST_LOG", "off")
        .arg(argument)
        .output()
        .expect("launcher process should start");
    assert_eq!(output.status.code(), Some(1), "output: {output:?}");
    assert!(output.stdout.is_empty(), "no plan expected: {output:?}");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("is not valid UTF-8"), "stderr: {stderr}");
}

#[cfg(unix)]
#[test]
fn non_unicode_environment_property_fails_generically() {
    use std::{ffi::OsString, os::unix::ffi::OsStringExt, process::Command};

    let output = Command::new(BINARY_PATH)
        .env_clear()
        .env("RUST_LOG", "off")
        .env("UBERJAR_SERVER_DIR", OsString::from_vec(b"/srv/\xff".to_vec()))
        .output()
        .expect("launcher process should start");
    assert_eq!(output.status.code(), Some(1), "output: {output:?}");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Environment variable UBERJAR_SERVER_DIR is not valid UTF-8"),
        "stderr: {stderr}"
    );
}
