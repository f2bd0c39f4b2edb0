//! Tests for error types including source chaining and message formatting

#[cfg(test)]
mod tests {
    use std::error::Error;
    use std::path::Path;
    use unbuild::SolveError;
    use unbuild::io::error::{
        InconsistencyKind, LocalInconsistency, WithPath, invalid_parameter, parse_error,
    };

    // Tests error source chaining works correctly
    // Verified by breaking source chain
    #[test]
    fn test_error_source_chain() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = SolveError::FileSystem {
            path: "/tmp/test.map".into(),
            operation: "read",
            source: io_error,
        };

        assert!(error.source().is_some());
        assert!(error.to_string().contains("/tmp/test.map"));
    }

    // Tests global failures name the cell, the reason and the guess count
    // Verified by omitting the cause from the message
    #[test]
    fn test_global_inconsistency_message() {
        let error = SolveError::GlobalInconsistency {
            cause: LocalInconsistency::new(12, InconsistencyKind::EyelessArea),
            guesses: 3,
        };

        let message = error.to_string();
        assert!(message.contains("cell 12"));
        assert!(message.contains("maximum-age"));
        assert!(message.contains("3 guesses"));
        assert!(error.source().is_none());
    }

    // Tests InvalidParameter error contains all fields
    // Verified by omitting value from message
    #[test]
    fn test_invalid_parameter_error() {
        let error = invalid_parameter("threads", &0, &"must be positive");

        let message = error.to_string();
        assert!(message.contains("threads"));
        assert!(message.contains('0'));
        assert!(message.contains("must be positive"));
    }

    // Tests parse errors carry their line number
    // Verified by formatting the reason only
    #[test]
    fn test_parse_error() {
        let error = parse_error(4, &"expected 3 values, found 2");
        assert!(matches!(error, SolveError::MapParse { line: 4, .. }));
        assert!(error.to_string().contains("line 4"));
    }

    // Tests I/O results gain the path and operation
    // Verified by dropping the path in with_path
    #[test]
    fn test_with_path_context() {
        let result = std::fs::read_to_string("/nonexistent/unbuild/missing.map")
            .with_path(Path::new("/nonexistent/unbuild/missing.map"), "read");
        match result {
            Err(SolveError::FileSystem {
                path, operation, ..
            }) => {
                assert_eq!(path, Path::new("/nonexistent/unbuild/missing.map"));
                assert_eq!(operation, "read");
            }
            _ => unreachable!("Expected FileSystem error type"),
        }
    }

    // Tests plain I/O errors convert without a known path
    // Verified by panicking in the From implementation
    #[test]
    fn test_from_io_error() {
        let error: SolveError = std::io::Error::other("broken pipe").into();
        assert!(matches!(error, SolveError::FileSystem { .. }));
    }
}
