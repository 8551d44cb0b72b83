use std::fmt;

#[derive(Debug, Clone)]
pub enum PageViewError {
    StorageUnavailable(String),
    TransactionFailure(String),
    DatabaseConfig(String),
    FileOperation(String),
    Serialization(String),
    Validation(String),
    DateParse(String),
}

impl PageViewError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            PageViewError::StorageUnavailable(_) => "E001",
            PageViewError::TransactionFailure(_) => "E002",
            PageViewError::DatabaseConfig(_) => "E003",
            PageViewError::FileOperation(_) => "E004",
            PageViewError::Serialization(_) => "E005",
            PageViewError::Validation(_) => "E006",
            PageViewError::DateParse(_) => "E007",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            PageViewError::StorageUnavailable(_) => "Storage Unavailable",
            PageViewError::TransactionFailure(_) => "Transaction Failure",
            PageViewError::DatabaseConfig(_) => "Database Configuration Error",
            PageViewError::FileOperation(_) => "File Operation Error",
            PageViewError::Serialization(_) => "Serialization Error",
            PageViewError::Validation(_) => "Validation Error",
            PageViewError::DateParse(_) => "Date Parse Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            PageViewError::StorageUnavailable(msg) => msg,
            PageViewError::TransactionFailure(msg) => msg,
            PageViewError::DatabaseConfig(msg) => msg,
            PageViewError::FileOperation(msg) => msg,
            PageViewError::Serialization(msg) => msg,
            PageViewError::Validation(msg) => msg,
            PageViewError::DateParse(msg) => msg,
        }
    }

    /// 格式化为彩色输出（用于终端）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出（用于日志）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for PageViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for PageViewError {}

// 便捷的构造函数
impl PageViewError {
    pub fn storage_unavailable<T: Into<String>>(msg: T) -> Self {
        PageViewError::StorageUnavailable(msg.into())
    }

    pub fn transaction_failure<T: Into<String>>(msg: T) -> Self {
        PageViewError::TransactionFailure(msg.into())
    }

    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        PageViewError::DatabaseConfig(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        PageViewError::FileOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        PageViewError::Serialization(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        PageViewError::Validation(msg.into())
    }

    pub fn date_parse<T: Into<String>>(msg: T) -> Self {
        PageViewError::DateParse(msg.into())
    }
}

impl PageViewError {
    /// 按 DbErr 类型分类并附加上下文
    ///
    /// 连接类错误视为存储不可用，其余一律是事务失败。
    pub fn from_db_err(context: impl fmt::Display, err: sea_orm::DbErr) -> Self {
        let msg = format!("{}: {}", context, err);
        match err {
            sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
                PageViewError::StorageUnavailable(msg)
            }
            _ => PageViewError::TransactionFailure(msg),
        }
    }
}

impl From<sea_orm::DbErr> for PageViewError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err {
            sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
                PageViewError::StorageUnavailable(err.to_string())
            }
            other => PageViewError::TransactionFailure(other.to_string()),
        }
    }
}

impl From<std::io::Error> for PageViewError {
    fn from(err: std::io::Error) -> Self {
        PageViewError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for PageViewError {
    fn from(err: serde_json::Error) -> Self {
        PageViewError::Serialization(err.to_string())
    }
}

impl From<csv::Error> for PageViewError {
    fn from(err: csv::Error) -> Self {
        PageViewError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for PageViewError {
    fn from(err: chrono::ParseError) -> Self {
        PageViewError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PageViewError>;
