use pretty_assertions::assert_eq;
use red_core::{Interpreter, KeywordExtension, MemoryHost, RedConfig, RedError, Value};

const COUNTER: &str = "\
// counter module
EXPORT counter 0
FUNC incr
    LOAD counter
    PUSH 1
    ADD
    STORE counter
ENDFUNC
";

const COUNTDOWN: &str = "\
EXPORT n 0
SET running true
FUNC count
    LOAD n
    PUSH 1
    ADD
    STORE n
    PUSH 5
    LOAD n
    LT
    STORE running
ENDFUNC
";

fn lines(code: &[&str]) -> Vec<String> {
    code.iter().map(|line| line.to_string()).collect()
}

fn math() -> KeywordExtension {
    KeywordExtension::from_cases(
        "MATH",
        vec![
            ("SQ", lines(&["LOADARG term0", "LOADARG term0", "MULT"])),
            ("TWICE", lines(&["MATH SQ 2", "LOADARG term0", "ADD"])),
        ],
    )
}

fn var() -> KeywordExtension {
    KeywordExtension::from_cases(
        "VAR",
        vec![
            ("SET", lines(&["LOADARG term1", "STORE term0"])),
            ("GET", lines(&["LOAD term0"])),
            ("CALL", lines(&["RUN peek"])),
        ],
    )
}

fn interpreter(host: MemoryHost) -> Interpreter<MemoryHost> {
    Interpreter::new(RedConfig::new(), host)
}

#[test]
fn module_exports_round_trip_through_modrun() {
    let mut interp = interpreter(MemoryHost::new().with_file("m.kr", COUNTER));
    interp
        .run_source("IMPORT \"m.kr\" mymod\nMODRUN mymod incr\nMODRUN mymod incr\nMODGET mymod counter")
        .unwrap();
    assert_eq!(interp.stack().values(), &[Value::Number(2.0)]);
}

#[test]
fn modstore_is_seen_by_module_functions() {
    let mut interp = interpreter(MemoryHost::new().with_file("m.kr", COUNTER));
    interp
        .run_source("IMPORT m.kr c\nPUSH 10\nMODSTORE c counter\nMODRUN c incr\nMODGET c counter")
        .unwrap();
    assert_eq!(interp.stack().values(), &[Value::Number(11.0)]);
    assert!(interp.globals().get("counter").is_none());
}

#[test]
fn module_loop_reads_internal_condition() {
    let mut interp = interpreter(MemoryHost::new().with_file("cd.kr", COUNTDOWN));
    interp
        .run_source("PUSH \"main\"\nIMPORT cd.kr cd\nMODRUN cd count running\nMODGET cd n")
        .unwrap();
    // module runs use their own stack
    assert_eq!(interp.stack().values(), &[Value::Text("main".into()), Value::Number(5.0)]);
}

#[test]
fn exarr_snapshots_importer_stack() {
    let mut interp = interpreter(MemoryHost::new().with_file("arr.kr", "EXARR items"));
    interp
        .run_source("PUSH 1\nPUSH 2\nIMPORT arr.kr a\nMODGET a items")
        .unwrap();
    assert_eq!(
        interp.stack().values(),
        &[
            Value::Number(1.0),
            Value::Number(2.0),
            Value::Array(vec![Value::Number(1.0), Value::Number(2.0)])
        ]
    );
}

#[test]
fn quoted_paths_keep_spaces() {
    let host = MemoryHost::new()
        .with_file("my  mods/m.kr", COUNTER)
        .with_keywords("my  packs/math.json", math());
    let mut interp = interpreter(host);
    interp
        .run_source("IMPORT \"my  mods/m.kr\" c\nMODRUN c incr\nMODGET c counter\nKEYPORT \"my  packs/math.json\"\nMATH SQ 3")
        .unwrap();
    assert_eq!(interp.stack().values(), &[Value::Number(1.0), Value::Number(9.0)]);
}

#[test]
fn module_errors() {
    let host = || MemoryHost::new().with_file("m.kr", COUNTER);

    let err = interpreter(host()).run_source("MODGET nope counter").unwrap_err();
    assert!(matches!(err, RedError::UnknownModule(_)));

    let err = interpreter(host()).run_source("PUSH 1\nMODSTORE nope x").unwrap_err();
    assert!(matches!(err, RedError::UnknownModule(_)));

    let err = interpreter(host())
        .run_source("IMPORT m.kr m\nMODGET m missing")
        .unwrap_err();
    assert!(matches!(err, RedError::UnboundSymbol(_)));

    let err = interpreter(host())
        .run_source("IMPORT m.kr m\nMODRUN m decr")
        .unwrap_err();
    assert!(matches!(err, RedError::UnknownFunction(_)));

    let err = interpreter(host()).run_source("IMPORT gone.kr g").unwrap_err();
    assert!(matches!(err, RedError::Resource { .. }));
}

#[test]
fn keyword_expansion_binds_arguments() {
    let mut interp = interpreter(MemoryHost::new());
    interp.register_keywords(math());
    interp.run_source("MATH SQ 4\nMATH TWICE 10").unwrap();
    assert_eq!(
        interp.stack().values(),
        &[Value::Number(16.0), Value::Number(14.0)]
    );
}

#[test]
fn keyport_loads_through_host() {
    let mut interp = interpreter(MemoryHost::new().with_keywords("math.json", math()));
    interp.run_source("KEYPORT \"math.json\"\nMATH SQ 3").unwrap();
    assert_eq!(interp.stack().values(), &[Value::Number(9.0)]);
    assert!(interp.keywords().get("MATH").is_some());
}

#[test]
fn store_and_load_resolve_through_arguments() {
    let mut interp = interpreter(MemoryHost::new());
    interp.register_keywords(var());
    interp
        .run_source("VAR SET \"total\" 5\nVAR GET \"total\"")
        .unwrap();
    assert_eq!(interp.globals().load("total").unwrap(), Value::Number(5.0));
    assert!(interp.globals().get("term0").is_none());
    assert_eq!(interp.stack().values(), &[Value::Number(5.0)]);
}

#[test]
fn keyword_failures() {
    let mut interp = interpreter(MemoryHost::new());
    interp.register_keywords(math());

    let err = interp.run_source("MATH SQ abc").unwrap_err();
    assert!(matches!(err, RedError::InvalidArgument(_)));

    let err = interp.run_source("MATH CUBE 2").unwrap_err();
    assert!(matches!(err, RedError::UnknownOperation(_)));

    let err = interp.run_source("MATH").unwrap_err();
    assert!(matches!(err, RedError::UnknownOperation(_)));

    let err = interp.run_source("LOADARG term0").unwrap_err();
    assert!(matches!(err, RedError::UnboundSymbol(_)));
}

#[test]
fn arguments_do_not_leak_into_functions() {
    let mut interp = interpreter(MemoryHost::new());
    interp.register_keywords(var());
    let err = interp
        .run_source("FUNC peek\nLOADARG term0\nENDFUNC\nVAR CALL 1")
        .unwrap_err();
    assert!(matches!(err, RedError::UnboundSymbol(_)));
}
