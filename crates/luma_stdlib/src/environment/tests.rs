use pretty_assertions::assert_eq;

use luma_value::{multi, MultiValue, Value};

use super::*;
use crate::{buffer_handler, silent_handler};

#[test]
fn test_default_opens_every_library() {
    let env = Environment::builder()
        .print_handler(silent_handler())
        .build()
        .unwrap();
    assert!(env.library("math").is_some());
    assert!(env.library("io").is_some());
    for name in ["print", "pcall", "setmetatable", "math", "io"] {
        assert!(!env.get(name).unwrap().is_nil(), "missing global {name}");
    }
}

#[test]
fn test_selected_libraries_only() {
    let env = Environment::builder()
        .libraries(Libraries::MATH)
        .print_handler(silent_handler())
        .build()
        .unwrap();
    assert!(env.get("print").unwrap().is_nil());
    assert!(env.get("io").unwrap().is_nil());
    assert!(env.library("io").is_none());
    assert!(env.get("math").unwrap().ptr_eq(env.library("math").unwrap()));
}

#[test]
fn test_empty_environment_has_no_globals() {
    let env = Environment::builder()
        .libraries(Libraries::empty())
        .build()
        .unwrap();
    assert!(env.globals().as_table().unwrap().is_empty());
}

#[test]
fn test_globals_round_trip() {
    let env = Environment::builder()
        .libraries(Libraries::empty())
        .build()
        .unwrap();
    env.set("answer", 42).unwrap();
    assert_eq!(env.get("answer").unwrap(), Value::from(42));
    assert_eq!(env.globals().raw_get("answer").unwrap(), Value::from(42));

    env.set("answer", Value::nil()).unwrap();
    assert!(env.get("answer").unwrap().is_nil());
}

#[test]
fn test_globals_honor_metatables() {
    let env = Environment::builder()
        .libraries(Libraries::empty())
        .build()
        .unwrap();
    let fallback = Value::function(|args: MultiValue| Ok(multi![args.get(2)]));
    let mt = Value::table_from_pairs([("__index", fallback)]).unwrap();
    env.globals().set_metatable(&mt).unwrap();
    assert_eq!(env.get("undefined_name").unwrap(), Value::from("undefined_name"));
}

#[test]
fn test_call_reports_missing_globals() {
    let env = Environment::builder()
        .libraries(Libraries::empty())
        .build()
        .unwrap();
    let err = env.call("nothing", multi![]).unwrap_err();
    assert_eq!(err.message, "attempt to call a nil value");
}

#[test]
fn test_library_survives_global_reassignment() {
    let env = Environment::builder()
        .print_handler(silent_handler())
        .build()
        .unwrap();
    env.set("math", Value::nil()).unwrap();
    let abs = env.library("math").unwrap().index("abs").unwrap();
    assert_eq!(abs.call_first(multi![-1]).unwrap(), Value::from(1));
}

#[test]
fn test_environments_are_independent() {
    let a = Environment::builder().print_handler(buffer_handler()).build().unwrap();
    let b = Environment::builder().print_handler(buffer_handler()).build().unwrap();
    a.set("shared", true).unwrap();
    assert!(b.get("shared").unwrap().is_nil());

    a.call("print", multi!["only a"]).unwrap();
    assert_eq!(a.output(), "only a\n");
    assert_eq!(b.output(), "");
}

#[test]
fn test_print_and_write_share_the_sink() {
    let env = Environment::builder().print_handler(buffer_handler()).build().unwrap();
    let write = env.library("io").unwrap().index("write").unwrap();
    write.call(multi!["a", 1]).unwrap();
    env.call("print", multi!["b"]).unwrap();
    assert_eq!(env.output(), "a1b\n");
    env.print_handler().clear();
    assert_eq!(env.output(), "");
}

#[test]
fn test_debug_lists_libraries() {
    let env = Environment::builder()
        .libraries(Libraries::MATH | Libraries::IO)
        .print_handler(silent_handler())
        .build()
        .unwrap();
    let text = format!("{env:?}");
    assert!(text.contains(r#"libraries: ["io", "math"]"#), "{text}");
}

#[test]
fn test_libraries_default_to_all() {
    assert_eq!(Libraries::default(), Libraries::ALL);
    assert!(Libraries::ALL.contains(Libraries::BASE | Libraries::MATH | Libraries::IO));
}
