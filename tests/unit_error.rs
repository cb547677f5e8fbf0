/// Unit tests for DiError and DiResult types

use lazy_di::{DiError, DiResult};
use std::error::Error;

#[test]
fn test_error_display_not_found() {
    let error = DiError::NotFound("database".to_string());
    assert_eq!(error.to_string(), "Service not found: database");
}

#[test]
fn test_error_display_circular() {
    let path = vec!["a".to_string(), "b".to_string(), "a".to_string()];
    let error = DiError::Circular(path);
    assert_eq!(error.to_string(), "Circular dependency: a > b > a");
}

#[test]
fn test_error_display_circular_empty_path() {
    let error = DiError::Circular(Vec::new());
    assert_eq!(error.to_string(), "Circular dependency: ");
}

#[test]
fn test_error_display_type_mismatch() {
    let error = DiError::TypeMismatch {
        service: "port".to_string(),
        expected: "u16",
    };
    assert_eq!(error.to_string(), "Type mismatch for port: expected u16");
}

#[test]
fn test_error_display_depth_exceeded() {
    let error = DiError::DepthExceeded(100);
    assert_eq!(error.to_string(), "Max depth 100 exceeded");
}

#[test]
fn test_factory_error_is_transparent() {
    let error = DiError::factory(std::io::Error::new(std::io::ErrorKind::NotFound, "config.toml missing"));
    assert_eq!(error.to_string(), "config.toml missing");

    match error {
        DiError::Factory(inner) => {
            let io = inner.downcast_ref::<std::io::Error>().unwrap();
            assert_eq!(io.kind(), std::io::ErrorKind::NotFound);
        }
        _ => panic!("Expected Factory error"),
    }
}

#[test]
fn test_factory_from_string() {
    let error = DiError::factory("plain message");
    assert_eq!(error.to_string(), "plain message");
}

#[test]
fn test_circular_path_accessor() {
    let error = DiError::Circular(vec!["x".to_string(), "x".to_string()]);
    assert_eq!(error.circular_path(), Some(&["x".to_string(), "x".to_string()][..]));
    assert_eq!(DiError::DepthExceeded(1).circular_path(), None);
}

#[test]
fn test_error_trait_implementation() {
    let error = DiError::NotFound("svc".to_string());
    let as_error: &dyn Error = &error;
    assert!(as_error.source().is_none());

    let debug_str = format!("{:?}", error);
    assert!(debug_str.contains("NotFound"));
}

#[test]
fn test_di_result_propagates_with_question_mark() {
    fn inner() -> DiResult<u8> {
        Err(DiError::NotFound("inner".to_string()))
    }

    fn outer() -> DiResult<u8> {
        let value = inner()?;
        Ok(value + 1)
    }

    assert!(matches!(outer(), Err(DiError::NotFound(id)) if id == "inner"));
}

#[test]
fn test_errors_cross_threads() {
    fn assert_send_sync<T: Send + Sync + 'static>() {}
    assert_send_sync::<DiError>();
}
