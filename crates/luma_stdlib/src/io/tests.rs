use pretty_assertions::assert_eq;

use luma_value::{multi, Value};

use crate::{buffer_handler, Environment, Libraries};

#[test]
fn test_write_concatenates_without_newline() {
    let env = Environment::builder()
        .libraries(Libraries::IO)
        .print_handler(buffer_handler())
        .build()
        .unwrap();
    let write = env.library("io").unwrap().index("write").unwrap();

    let out = write.call(multi!["x = ", 1.5, ", ", Value::nil(), true]).unwrap();
    assert!(out.is_empty());
    write.call(multi![]).unwrap();
    write.call(multi!["\n"]).unwrap();
    assert_eq!(env.output(), "x = 1.5, niltrue\n");
}

#[test]
fn test_io_is_a_global_table() {
    let env = Environment::builder()
        .libraries(Libraries::IO)
        .print_handler(buffer_handler())
        .build()
        .unwrap();
    let io = env.get("io").unwrap();
    assert!(io.ptr_eq(env.library("io").unwrap()));
    assert!(env.get("print").unwrap().is_nil());
}
