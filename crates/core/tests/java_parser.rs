use std::path::Path;

use navigator_core::analysis::{JavaParser, SourceParser};
use navigator_core::model::{ClassKind, HttpMethod, RestMapping};

mod common;

fn parse(source: &str) -> Vec<navigator_core::model::ClassDecl> {
    JavaParser.parse(Path::new("Fixture.java"), source).expect("parse")
}

#[test]
fn controller_fields_methods_and_routes() {
    let classes = parse(common::USER_CONTROLLER);
    assert_eq!(classes.len(), 1);
    let class = &classes[0];
    assert_eq!(class.name, "UserController");
    assert_eq!(class.kind, ClassKind::Class);
    assert_eq!(class.base_path.as_deref(), Some("/api/users"));
    assert_eq!((class.start_line, class.end_line), (6, 20));
    assert!(class.is_public);
    assert_eq!(class.field_type("userService"), Some("UserService"));

    // The constructor is not a call-graph node.
    assert_eq!(class.methods.len(), 1);
    let method = &class.methods[0];
    assert_eq!(method.name, "getUserById");
    assert_eq!((method.start_line, method.end_line), (16, 19));
    assert!(method.is_public);
    assert_eq!(
        method.rest,
        Some(RestMapping { http_method: HttpMethod::Get, path: "/api/users/{id}".into() })
    );
    let names: Vec<&str> = method.annotations.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["GetMapping", "PathVariable"]);
}

#[test]
fn request_mapping_variants() {
    let classes = parse(
        r#"@RestController
public class OrderController {
    @RequestMapping(value = "/orders", method = RequestMethod.POST)
    public void create() {}

    @RequestMapping("/orders/all")
    public void all() {}

    @RequestMapping(value = {"/a", "/b"}, method = RequestMethod.GET)
    public void multi() {}

    @PostMapping
    void bare() {}

    public void plain() {}
}
"#,
    );
    let methods = &classes[0].methods;
    let route = |i: usize| methods[i].rest.clone().map(|r| (r.http_method, r.path));
    assert_eq!(route(0), Some((HttpMethod::Post, "/orders".into())));
    assert_eq!(route(1), Some((HttpMethod::Any, "/orders/all".into())));
    assert_eq!(route(2), Some((HttpMethod::Get, "/a".into())));
    assert_eq!(route(3), Some((HttpMethod::Post, "/".into())));
    assert!(!methods[3].is_public);
    assert_eq!(route(4), None);
}

#[test]
fn interface_members_default_to_public_and_abstract_ones_are_skipped() {
    let classes = parse(
        "interface Repo {\n    User find(Long id);\n    default int count() { return 0; }\n}\n",
    );
    assert_eq!(classes[0].kind, ClassKind::Interface);
    assert_eq!(classes[0].methods.len(), 1);
    assert_eq!(classes[0].methods[0].name, "count");
    assert!(classes[0].methods[0].is_public);
}

#[test]
fn enum_constant_bodies_are_not_methods() {
    let classes = parse(
        r#"public enum Op {
    PLUS {
        int apply(int a, int b) { return a + b; }
    },
    MINUS {
        int apply(int a, int b) { return a - b; }
    };

    abstract int apply(int a, int b);

    public static Op parse(String s) { return valueOf(s); }
}
"#,
    );
    assert_eq!(classes[0].kind, ClassKind::Enum);
    let names: Vec<&str> = classes[0].methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["parse"]);
}

#[test]
fn nested_classes_follow_their_parent() {
    let classes = parse(
        "public class Outer {\n    public void a() { }\n    static class Inner {\n        void b() { }\n    }\n}\n",
    );
    let names: Vec<&str> = classes.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Outer", "Inner"]);
    assert_eq!(classes[0].methods[0].name, "a");
    assert_eq!(classes[1].methods[0].name, "b");
    assert_eq!(classes[1].methods[0].class_name, "Inner");
}

#[test]
fn braces_in_comments_and_literals_do_not_shift_spans() {
    let classes = parse(
        r#"public class Tricky {
    // a stray } in a comment
    private String s = "{{";
    /* { */
    public void run() {
        String t = "}";
        char c = '{';
        helper();
    }
    void helper() {}
}
"#,
    );
    let class = &classes[0];
    assert_eq!(class.field_type("s"), Some("String"));
    let run = &class.methods[0];
    assert_eq!((run.name.as_str(), run.start_line, run.end_line), ("run", 5, 9));
    assert_eq!(class.methods[1].name, "helper");
    assert_eq!(class.end_line, 11);
}

#[test]
fn field_types_are_reduced_to_raw_class_names() {
    let classes = parse(
        r#"class Holder {
    private Map<Long, List<User>> cache;
    private User[] users;
    private final java.util.List<User> list = new ArrayList<>();
    public <T> List<T> all() { return null; }
}
"#,
    );
    let class = &classes[0];
    assert_eq!(class.field_type("cache"), Some("Map"));
    assert_eq!(class.field_type("users"), Some("User"));
    assert_eq!(class.field_type("list"), Some("List"));
    assert_eq!(class.methods[0].name, "all");
}
