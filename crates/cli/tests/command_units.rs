use std::fs;

use java_navigator::canonicalize_or_current;
use java_navigator::commands::{
    format_catalog, format_function_info, navigate_command, parse_http_method, write_outputs,
    NavigateArgs, CLASSES_FILE, DIAGRAM_FILE, RECORD_FILE,
};
use navigator_core::analysis::{CatalogEntry, JavaParser, Query};
use navigator_core::model::HttpMethod;
use navigator_core::services::{open_project, NavigationRequest, Navigator};
use tempfile::tempdir;

mod common;

use common::user_project;

#[test]
fn canonicalize_or_current_resolves_existing_relative_path() {
    let original = std::env::current_dir().expect("cwd");
    let tmp = tempdir().expect("tempdir");
    let subdir = tmp.path().join("nested");
    fs::create_dir_all(&subdir).expect("create nested");
    std::env::set_current_dir(tmp.path()).expect("chdir tmp");

    let result = canonicalize_or_current("nested").expect("canonicalize nested");
    assert_eq!(result, subdir.canonicalize().expect("canonicalize subdir"));

    std::env::set_current_dir(original).expect("restore cwd");
}

#[test]
fn parse_http_method_accepts_known_verbs() {
    assert_eq!(parse_http_method(None).expect("none"), None);
    assert_eq!(parse_http_method(Some("post")).expect("post"), Some(HttpMethod::Post));
    assert_eq!(parse_http_method(Some("REQUEST")).expect("request"), Some(HttpMethod::Any));
    assert!(parse_http_method(Some("FETCH")).is_err());
}

#[test]
fn catalog_marks_rest_entries() {
    let text = format_catalog(&[
        CatalogEntry {
            qualified_name: "A.get".into(),
            http_method: Some("GET".into()),
            endpoint_path: Some("/a".into()),
        },
        CatalogEntry { qualified_name: "B.run".into(), http_method: None, endpoint_path: None },
    ]);
    assert_eq!(text, "Available functions:\n  A.get (REST: GET /a)\n  B.run\n");
    assert!(format_catalog(&[]).contains("(none indexed)"));
}

#[test]
fn function_info_lists_calls_per_entry() {
    let project = user_project();
    let ctx = open_project(project.path()).expect("open project");
    let outcome = Navigator::new(&ctx, &JavaParser)
        .navigate(&NavigationRequest::new(Query::new("UserService.findUserById")))
        .expect("navigate");
    let text = format_function_info(&outcome.record);
    assert!(text.contains("1. UserService.findUserById"));
    assert!(text.contains("   Calls: ValidationUtil.validateId"));
    assert!(text.contains("2. ValidationUtil.validateId"));
    assert!(text.contains("   Calls: None"));
}

#[test]
fn write_outputs_creates_expected_files() {
    let project = user_project();
    let ctx = open_project(project.path()).expect("open project");
    let outcome = Navigator::new(&ctx, &JavaParser)
        .navigate(&NavigationRequest::new(Query::new("getUserById")))
        .expect("navigate");

    let out = tempdir().expect("out");
    let written = write_outputs(out.path(), &outcome, None).expect("write outputs");
    assert_eq!(written.len(), 3);
    assert_eq!(fs::read_to_string(out.path().join(DIAGRAM_FILE)).expect("mmd"), outcome.diagram);
    assert!(out.path().join(RECORD_FILE).is_file());
    assert!(out.path().join(CLASSES_FILE).is_file());
}

#[test]
fn navigate_command_reports_not_found() {
    let project = user_project();
    let args = NavigateArgs {
        function_token: "missing".into(),
        project_dir: project.path().to_string_lossy().to_string(),
        ..NavigateArgs::default()
    };
    let err = navigate_command(&args).unwrap_err();
    assert!(format!("{err:#}").contains("No function matches 'missing'"), "unexpected: {err:#}");
}

#[test]
fn navigate_command_succeeds_in_json_mode() {
    let project = user_project();
    let args = NavigateArgs {
        function_token: "validateId".into(),
        project_dir: project.path().to_string_lossy().to_string(),
        json: true,
        ..NavigateArgs::default()
    };
    navigate_command(&args).expect("navigate");
}
