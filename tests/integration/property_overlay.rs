use std::{fs, path::Path};

use uberjar_runtime::{
    config::{
        CLI_SCRIPT_PROP, DEPLOYMENT_PROP, EXTERNAL_SERVER_CONFIG_PROP, NO_DELETE_SERVER_DIR_PROP,
        SERVER_DIR_PROP,
    },
    resolve, ArgumentError, PropertySnapshot,
};

use crate::common::Workspace;

#[test]
fn every_property_populates_its_field() {
    let workspace = Workspace::new();
    let config = workspace.file("standalone.xml");
    let deployment = workspace.file("app.war");
    let script = workspace.file("setup.cli");
    let properties = PropertySnapshot::from_pairs([
        (EXTERNAL_SERVER_CONFIG_PROP, config.as_str()),
        (DEPLOYMENT_PROP, deployment.as_str()),
        (CLI_SCRIPT_PROP, script.as_str()),
        (SERVER_DIR_PROP, "/srv/app"),
        (NO_DELETE_SERVER_DIR_PROP, "true"),
    ]);

    let resolved = resolve(["-Dx=1"], &properties).expect("properties resolve");

    assert_eq!(resolved.external_server_config(), Some(Path::new(&config)));
    assert_eq!(resolved.deployment(), Some(Path::new(&deployment)));
    assert_eq!(resolved.cli_script(), Some(Path::new(&script)));
    assert_eq!(resolved.server_dir(), Some("/srv/app"));
    assert!(resolved.no_delete_server_dir());
    assert_eq!(resolved.server_arguments(), ["-Dx=1"]);
}

#[test]
fn property_after_cli_assignment_is_a_duplicate() {
    let workspace = Workspace::new();
    let first = workspace.file("first.war");
    let second = workspace.file("second.war");
    let properties = PropertySnapshot::from_pairs([(DEPLOYMENT_PROP, second.as_str())]);
    let arg = format!("--deployment={first}");

    assert_eq!(
        resolve([arg.as_str()], &properties),
        Err(ArgumentError::DuplicateArgument {
            option: "--deployment"
        })
    );
}

#[test]
fn same_value_from_both_sources_still_conflicts() {
    let workspace = Workspace::new();
    let script = workspace.file("setup.cli");
    let properties = PropertySnapshot::from_pairs([(CLI_SCRIPT_PROP, script.as_str())]);
    let arg = format!("--cli-script={script}");

    assert_eq!(
        resolve([arg.as_str()], &properties),
        Err(ArgumentError::DuplicateArgument {
            option: "--cli-script"
        })
    );
}

#[test]
fn cli_errors_win_over_property_errors() {
    let properties = PropertySnapshot::from_pairs([(DEPLOYMENT_PROP, "/missing/app.war")]);

    assert_eq!(
        resolve(["--bogus"], &properties),
        Err(ArgumentError::UnknownArgument {
            argument: "--bogus".into()
        })
    );
}

#[test]
fn missing_property_path_is_file_not_found() {
    let workspace = Workspace::new();
    let missing = workspace.missing("standalone.xml");
    let properties =
        PropertySnapshot::from_pairs([(EXTERNAL_SERVER_CONFIG_PROP, missing.as_str())]);

    match resolve(Vec::<String>::new(), &properties) {
        Err(ArgumentError::FileNotFound { path }) => assert_eq!(path, Path::new(&missing)),
        other => panic!("Unexpected result: {other:?}"),
    }
}

#[test]
fn properties_for_help_and_version_do_not_exist() {
    let properties = PropertySnapshot::from_pairs([
        ("uberjar.help", "true"),
        ("uberjar.version", "true"),
        ("uberjar.bind-address", "0.0.0.0"),
    ]);

    let resolved = resolve(["--help"], &properties).expect("unrecognized properties are ignored");
    assert!(resolved.help());
    assert!(!resolved.version());
    assert!(resolved.server_arguments().is_empty());
}

#[test]
fn properties_file_feeds_the_resolver() {
    let workspace = Workspace::new();
    let deployment = workspace.file("app.war");
    let file = workspace.path("launch.toml");
    fs::write(
        &file,
        format!("[uberjar]\ndeployment = \"{deployment}\"\nno-delete-server-dir = true\n"),
    )
    .expect("can write properties file");

    let properties = PropertySnapshot::load_file(file).expect("properties file loads");
    let resolved = resolve(["--server-dir=/srv/app"], &properties).expect("properties resolve");

    assert_eq!(resolved.deployment(), Some(Path::new(&deployment)));
    assert!(resolved.no_delete_server_dir());
    assert_eq!(resolved.server_dir(), Some("/srv/app"));
}
