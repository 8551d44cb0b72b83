use pageviews::errors::{PageViewError, Result};
use std::error::Error;

#[cfg(test)]
mod error_creation_tests {
    use super::*;

    #[test]
    fn test_storage_unavailable_error() {
        let error = PageViewError::storage_unavailable("连接失败");

        assert!(matches!(error, PageViewError::StorageUnavailable(_)));
        assert!(error.to_string().contains("Storage Unavailable"));
        assert!(error.to_string().contains("连接失败"));
    }

    #[test]
    fn test_transaction_failure_error() {
        let error = PageViewError::transaction_failure("提交失败");

        assert!(matches!(error, PageViewError::TransactionFailure(_)));
        assert!(error.to_string().contains("Transaction Failure"));
        assert!(error.to_string().contains("提交失败"));
    }

    #[test]
    fn test_validation_error() {
        let error = PageViewError::validation("验证失败");

        assert!(matches!(error, PageViewError::Validation(_)));
        assert_eq!(error.to_string(), "Validation Error: 验证失败");
    }

    #[test]
    fn test_date_parse_error() {
        let error = PageViewError::date_parse("bad date");

        assert!(matches!(error, PageViewError::DateParse(_)));
        assert_eq!(error.message(), "bad date");
    }
}

#[cfg(test)]
mod error_code_tests {
    use super::*;

    #[test]
    fn test_codes_are_unique() {
        let errors = [
            PageViewError::storage_unavailable(""),
            PageViewError::transaction_failure(""),
            PageViewError::database_config(""),
            PageViewError::file_operation(""),
            PageViewError::serialization(""),
            PageViewError::validation(""),
            PageViewError::date_parse(""),
        ];
        let codes: Vec<&str> = errors.iter().map(|e| e.code()).collect();

        assert_eq!(codes, vec!["E001", "E002", "E003", "E004", "E005", "E006", "E007"]);
    }

    #[test]
    fn test_format_colored_contains_code_and_message() {
        colored::control::set_override(false);
        let error = PageViewError::database_config("DATABASE_URL is not set");
        let output = error.format_colored();

        assert!(output.contains("[ERROR]"));
        assert!(output.contains("E003"));
        assert!(output.contains("DATABASE_URL is not set"));
    }

    #[test]
    fn test_error_trait_object() {
        let error: Box<dyn Error> = Box::new(PageViewError::file_operation("missing"));
        assert!(error.source().is_none());
        assert!(error.to_string().contains("missing"));
    }
}

#[cfg(test)]
mod error_conversion_tests {
    use super::*;
    use sea_orm::{DbErr, RuntimeErr};

    #[test]
    fn test_from_db_err_custom_is_transaction_failure() {
        let error: PageViewError = DbErr::Custom("constraint failed".to_string()).into();

        assert!(matches!(error, PageViewError::TransactionFailure(_)));
        assert!(error.message().contains("constraint failed"));
    }

    #[test]
    fn test_from_db_err_conn_is_storage_unavailable() {
        let error: PageViewError =
            DbErr::Conn(RuntimeErr::Internal("connection refused".to_string())).into();

        assert!(matches!(error, PageViewError::StorageUnavailable(_)));
        assert_eq!(error.code(), "E001");
    }

    #[test]
    fn test_from_db_err_with_context_classifies_connection_errors() {
        let error = PageViewError::from_db_err(
            "Failed to upsert page 'cat'",
            DbErr::ConnectionAcquire(sea_orm::error::ConnAcquireErr::Timeout),
        );

        assert!(matches!(error, PageViewError::StorageUnavailable(_)));
        assert!(error.message().starts_with("Failed to upsert page 'cat': "));

        let error = PageViewError::from_db_err(
            "Failed to read back page 'cat'",
            DbErr::Conn(RuntimeErr::Internal("database is closed".to_string())),
        );
        assert_eq!(error.code(), "E001");
        assert!(error.message().contains("database is closed"));
    }

    #[test]
    fn test_from_db_err_with_context_other_errors() {
        let error = PageViewError::from_db_err(
            "Batch view insert failed",
            DbErr::Custom("UNIQUE constraint failed".to_string()),
        );

        assert!(matches!(error, PageViewError::TransactionFailure(_)));
        assert!(error.message().contains("Batch view insert failed"));
        assert!(error.message().contains("UNIQUE constraint failed"));
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "views.csv");
        let error: PageViewError = io.into();

        assert!(matches!(error, PageViewError::FileOperation(_)));
        assert!(error.message().contains("views.csv"));
    }

    #[test]
    fn test_from_serde_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let error: PageViewError = err.into();

        assert!(matches!(error, PageViewError::Serialization(_)));
    }

    #[test]
    fn test_from_chrono_parse_error() {
        let err = "yesterday"
            .parse::<chrono::DateTime<chrono::Utc>>()
            .unwrap_err();
        let error: PageViewError = err.into();

        assert_eq!(error.code(), "E007");
    }

    #[test]
    fn test_question_mark_conversion() {
        fn read() -> Result<String> {
            Ok(std::fs::read_to_string("/definitely/not/here.csv")?)
        }

        let error = read().unwrap_err();
        assert_eq!(error.code(), "E004");
    }
}
