#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::{tempdir, TempDir};

pub fn write_file(root: &Path, rel: &str, body: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dirs");
    }
    fs::write(&path, body).expect("write fixture file");
}

/// Handler -> service -> validator, plus a repository method sharing the
/// handler's name.
pub fn user_project() -> TempDir {
    let temp = tempdir().expect("tempdir");
    let root = temp.path();
    write_file(
        root,
        "src/controller/UserController.java",
        r#"@RestController
@RequestMapping("/api/users")
public class UserController {
    private UserService userService;

    @GetMapping("/{id}")
    public String getUserById(@PathVariable Long id) {
        return userService.findUserById(id);
    }
}
"#,
    );
    write_file(
        root,
        "src/repository/UserRepository.java",
        "public class UserRepository {\n    public String getUserById(Long id) {\n        return null;\n    }\n}\n",
    );
    write_file(
        root,
        "src/service/UserService.java",
        r#"public class UserService {
    private ValidationUtil validationUtil;

    public String findUserById(Long id) {
        validationUtil.validateId(id);
        return "user";
    }
}
"#,
    );
    write_file(
        root,
        "src/util/ValidationUtil.java",
        "public class ValidationUtil {\n    public void validateId(Long id) {\n    }\n}\n",
    );
    temp
}
