use navigator_core::analysis::CallResolver;
use navigator_core::model::{CalleeRef, QualifiedName};

mod common;

const SERVICE: &str = r#"public class Service {
    private Repo repo;
    private Helper helper;

    public void run() {
        repo.load();
        this.helper.assist();
        this.local();
        local();
        Util.format("x(");
        unknown.thing();
        new Widget();
        Widget w = build();
        list.stream().map(x -> x).collect();
        super.toString();
        @SuppressWarnings("unused") int y = compute(1);
    }

    int calc() {
        return compute(2);
    }

    void local() {}
}
"#;

const UTIL: &str = "public class Util {\n    static String format(String s) { return s; }\n}\n";

fn q(class: &str, method: &str) -> CalleeRef {
    CalleeRef::Qualified(QualifiedName::new(class, method))
}

fn u(method: &str) -> CalleeRef {
    CalleeRef::Unqualified(method.to_string())
}

#[test]
fn resolves_receivers_through_fields_this_and_known_classes() {
    let index = common::index_of(&[("Service.java", SERVICE), ("Util.java", UTIL)]);
    let resolver = CallResolver::new(&index, &[]);
    let class = &index.classes[0];

    let calls = resolver.resolve(class, &class.methods[0]);
    assert_eq!(
        calls,
        vec![
            q("Repo", "load"),
            q("Helper", "assist"),
            q("Service", "local"),
            q("Util", "format"),
            u("thing"),
            q("Service", "build"),
            u("stream"),
            u("map"),
            u("collect"),
            u("toString"),
            q("Service", "compute"),
        ]
    );

    let calc = resolver.resolve(class, &class.methods[1]);
    assert_eq!(calc, vec![q("Service", "compute")]);
}

#[test]
fn classes_declared_in_later_files_are_known() {
    let index = common::index_of(&[("Service.java", SERVICE), ("Util.java", UTIL)]);
    let resolver = CallResolver::new(&index, &[]);
    assert!(resolver.is_known_class("Util"));
    assert!(!resolver.is_known_class("Widget"));
}

#[test]
fn skip_calls_are_never_recorded() {
    let index = common::index_of(&[("Service.java", SERVICE)]);
    let resolver = CallResolver::new(&index, &["load".to_string(), "collect".to_string()]);
    let class = &index.classes[0];
    let calls = resolver.resolve(class, &class.methods[0]);
    assert!(!calls.contains(&q("Repo", "load")));
    assert!(!calls.contains(&u("collect")));
    assert!(calls.contains(&q("Helper", "assist")));
}

#[test]
fn unknown_static_receiver_degrades_to_unqualified() {
    let index = common::index_of(&[("Service.java", SERVICE)]);
    let resolver = CallResolver::new(&index, &[]);
    let class = &index.classes[0];
    let calls = resolver.resolve(class, &class.methods[0]);
    assert!(calls.contains(&u("format")));
}

const GENERIC_CALLS: &str = r#"public class Lookup {
    private Repo repo;

    public void run(int limit) {
        repo.<User>find(1);
        Util.<String, Integer>format("x");
        Collections.<String>emptyList();
        if (limit > count()) {
            items.forEach(x -> handle(x));
        }
    }
}
"#;

#[test]
fn explicit_type_arguments_keep_the_receiver() {
    let index = common::index_of(&[("Lookup.java", GENERIC_CALLS), ("Util.java", UTIL)]);
    let resolver = CallResolver::new(&index, &[]);
    let class = &index.classes[0];

    let calls = resolver.resolve(class, &class.methods[0]);
    assert_eq!(
        calls,
        vec![
            q("Repo", "find"),
            q("Util", "format"),
            u("emptyList"),
            q("Lookup", "count"),
            u("forEach"),
            q("Lookup", "handle"),
        ]
    );
}

const CONSTRUCTORS: &str = r#"public class Factory {
    public Object make() {
        Outer.Inner inner = new Outer.Inner();
        Object other = new com.example.Foo(inner);
        return new Outer().build();
    }
}
"#;

const OUTER: &str = "public class Outer {\n    Outer build() { return this; }\n}\n";

#[test]
fn qualified_constructors_are_not_calls() {
    let index = common::index_of(&[("Factory.java", CONSTRUCTORS), ("Outer.java", OUTER)]);
    let resolver = CallResolver::new(&index, &[]);
    let class = &index.classes[0];

    let calls = resolver.resolve(class, &class.methods[0]);
    assert_eq!(calls, vec![u("build")]);
}
