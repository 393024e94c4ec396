use std::io::Write;

use pretty_assertions::assert_eq;
use rstest::rstest;

use rvooo_core::config::{Backend, BranchPredictor, Config, ConfigError};

#[test]
fn file_overrides_only_what_it_names() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "general": {{ "max_cycles": 1234, "riscv_test": true }},
            "memory": {{ "ram_size": 65536 }},
            "pipeline": {{
                "backend": "in-order",
                "rob_size": 4,
                "latencies": {{ "lsu": 7 }}
            }}
        }}"#
    )
    .unwrap();

    let config = Config::from_json_file(file.path()).unwrap();
    assert_eq!(config.general.max_cycles, 1234);
    assert!(config.general.riscv_test);
    assert_eq!(config.memory.ram_size, 65536);
    assert_eq!(config.memory.ram_base, 0x8000_0000);
    assert_eq!(config.pipeline.backend, Backend::InOrder);
    assert_eq!(config.pipeline.rob_size, 4);
    assert_eq!(config.pipeline.rs_size, 8);
    assert_eq!(config.pipeline.latencies.lsu, 7);
    assert_eq!(config.pipeline.latencies.alu, 2);
}

#[rstest]
#[case("OutOfOrder", Backend::OutOfOrder)]
#[case("o3", Backend::OutOfOrder)]
#[case("InOrder", Backend::InOrder)]
#[case("inorder", Backend::InOrder)]
fn backend_names(#[case] name: &str, #[case] expected: Backend) {
    let json = format!(r#"{{"pipeline": {{"backend": "{name}"}}}}"#);
    assert_eq!(Config::from_json_str(&json).unwrap().pipeline.backend, expected);
}

#[rstest]
#[case("Static", BranchPredictor::Static)]
#[case("GShare", BranchPredictor::GShare)]
#[case("Gshare", BranchPredictor::GShare)]
#[case("GSharePlus", BranchPredictor::GSharePlus)]
fn predictor_names(#[case] name: &str, #[case] expected: BranchPredictor) {
    let json = format!(r#"{{"pipeline": {{"branch_predictor": "{name}"}}}}"#);
    assert_eq!(Config::from_json_str(&json).unwrap().pipeline.branch_predictor, expected);
}

#[rstest]
#[case::zero_rob(r#"{"pipeline": {"rob_size": 0}}"#)]
#[case::zero_rs(r#"{"pipeline": {"rs_size": 0}}"#)]
#[case::zero_queue(r#"{"pipeline": {"issue_queue_size": 0}}"#)]
#[case::zero_latency(r#"{"pipeline": {"latencies": {"alu": 0}}}"#)]
#[case::history_too_wide(r#"{"pipeline": {"bhr_size": 40}}"#)]
#[case::ram_wraps(r#"{"memory": {"ram_base": 4294967040, "ram_size": 512}}"#)]
#[case::console_in_ram(r#"{"memory": {"console_addr": 2147483904}}"#)]
fn invalid_values_are_rejected(#[case] json: &str) {
    assert!(matches!(Config::from_json_str(json), Err(ConfigError::Invalid(_))));
}

#[rstest]
#[case::unknown_backend(r#"{"pipeline": {"backend": "superscalar"}}"#)]
#[case::wrong_type(r#"{"general": {"max_cycles": "lots"}}"#)]
#[case::not_json("rob_size = 4")]
fn malformed_json_is_a_parse_error(#[case] json: &str) {
    assert!(matches!(Config::from_json_str(json), Err(ConfigError::Parse(_))));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = Config::from_json_file("/no/such/config.json").unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("/no/such/config.json"));
}
