#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use navigator_core::analysis::{CallGraph, CallResolver, JavaParser, SourceIndex, SourceParser};
use tempfile::{tempdir, TempDir};

pub const USER_CONTROLLER: &str = r#"package com.example.controller;

import com.example.service.UserService;
import org.springframework.web.bind.annotation.*;

@RestController
@RequestMapping("/api/users")
public class UserController {

    private final UserService userService;

    public UserController(UserService userService) {
        this.userService = userService;
    }

    @GetMapping("/{id}")
    public String getUserById(@PathVariable Long id) {
        return userService.findUserById(id);
    }
}
"#;

pub const USER_SERVICE: &str = r#"package com.example.service;

import com.example.util.ValidationUtil;
import org.springframework.stereotype.Service;

@Service
public class UserService {

    private final ValidationUtil validationUtil = new ValidationUtil();

    public String findUserById(Long id) {
        validationUtil.validateId(id);
        return "user-" + id;
    }
}
"#;

pub const VALIDATION_UTIL: &str = r#"package com.example.util;

public class ValidationUtil {

    public void validateId(Long id) {
        if (id == null || id <= 0) {
            throw new IllegalArgumentException("Invalid id: " + id);
        }
    }
}
"#;

pub const USER_REPOSITORY: &str = r#"package com.example.repository;

import java.util.HashMap;
import java.util.Map;

public class UserRepository {

    private final Map<Long, String> users = new HashMap<>();

    public String getUserById(Long id) {
        return users.get(id);
    }
}
"#;

pub fn write_file(root: &Path, rel: &str, body: impl AsRef<[u8]>) -> PathBuf {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dirs");
    }
    fs::write(&path, body).expect("write fixture file");
    path
}

/// Project with a route handler -> service -> validation chain plus an
/// unrelated repository method sharing the handler's name.
pub fn user_project() -> TempDir {
    let temp = tempdir().expect("tempdir");
    let java = "src/main/java/com/example";
    write_file(temp.path(), &format!("{java}/controller/UserController.java"), USER_CONTROLLER);
    write_file(temp.path(), &format!("{java}/service/UserService.java"), USER_SERVICE);
    write_file(temp.path(), &format!("{java}/util/ValidationUtil.java"), VALIDATION_UTIL);
    write_file(temp.path(), &format!("{java}/repository/UserRepository.java"), USER_REPOSITORY);
    temp
}

/// Parse in-memory sources in the given order into a single index.
pub fn index_of(files: &[(&str, &str)]) -> SourceIndex {
    let mut index = SourceIndex::default();
    for (name, source) in files {
        let classes = JavaParser.parse(Path::new(name), source).expect("parse fixture");
        index.classes.extend(classes);
        index.files_scanned += 1;
    }
    index
}

pub fn graph_of(files: &[(&str, &str)]) -> CallGraph {
    let index = index_of(files);
    let resolver = CallResolver::new(&index, &[]);
    CallGraph::build(index, &resolver)
}

pub fn node_id(graph: &CallGraph, qualified: &str) -> usize {
    let name = navigator_core::model::QualifiedName::parse(qualified).expect("qualified name");
    graph.find(&name).unwrap_or_else(|| panic!("missing node {qualified}"))
}
