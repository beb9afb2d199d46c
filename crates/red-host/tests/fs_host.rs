use std::fs;

use pretty_assertions::assert_eq;
use red_core::{Host, Interpreter, RedConfig, RedError, Value};
use red_host::{builtin_keywords, load_config, read_program, FsHost};
use tempfile::TempDir;

const COUNTER: &str = "EXPORT counter 0\nFUNC incr\n    LOAD counter\n    PUSH 1\n    ADD\n    STORE counter\nENDFUNC\n";

const STRINGS: &str = r#"{
    "prefix": "TEXT",
    "main": [
        {"case": "GREET", "code": ["LOADARG term0", "PUSH \"hello \"", "STRCAT"]}
    ]
}"#;

fn workspace() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("counter.kr"), COUNTER).unwrap();
    fs::write(dir.path().join("text.json"), STRINGS).unwrap();
    dir
}

#[test]
fn imports_and_keyports_resolve_against_base_dir() {
    let dir = workspace();
    let mut interp = Interpreter::new(RedConfig::new(), FsHost::with_base_dir(dir.path()));
    interp
        .run_source(
            "IMPORT counter.kr c\nMODRUN c incr\nMODGET c counter\nKEYPORT \"text.json\"\nTEXT GREET \"red\"",
        )
        .unwrap();
    assert_eq!(
        interp.stack().values(),
        &[Value::Number(1.0), Value::Text("hello red".into())]
    );
}

#[test]
fn missing_files_are_resource_errors() {
    let dir = workspace();
    let mut host = FsHost::with_base_dir(dir.path());
    assert!(matches!(
        host.read_module("absent.kr"),
        Err(RedError::Resource { .. })
    ));
    assert!(matches!(
        host.load_keywords("counter.kr"),
        Err(RedError::Resource { .. })
    ));
}

#[test]
fn builtin_pack_runs() {
    let mut interp = Interpreter::new(RedConfig::new(), FsHost::new());
    interp.register_keywords(builtin_keywords().unwrap());
    interp
        .run_source("PUSH 4\nSTORE n\nUTIL INC \"n\"\nUTIL INC \"n\"\nUTIL DEC \"n\"\nUTIL SQ 3")
        .unwrap();
    assert_eq!(interp.globals().load("n").unwrap(), Value::Number(5.0));
    assert_eq!(interp.stack().values(), &[Value::Number(9.0)]);
}

#[test]
fn program_and_config_files() {
    let dir = workspace();
    let program = dir.path().join("main.red");
    fs::write(&program, "PUSH 1\n").unwrap();
    assert_eq!(read_program(&program).unwrap(), "PUSH 1\n");

    let config_path = dir.path().join("red.toml");
    fs::write(&config_path, "max_call_depth = 16\n").unwrap();
    let config = load_config(&config_path).unwrap();
    assert_eq!(config.max_call_depth, 16);
    assert_eq!(config.max_stack_size, RedConfig::default().max_stack_size);

    assert!(matches!(
        read_program(dir.path().join("none.red")),
        Err(RedError::Resource { .. })
    ));
}
