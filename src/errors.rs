use std::fmt;

#[derive(Debug, Clone)]
pub enum HireStatsError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    FileOperation(String),
    Validation(String),
    NotFound(String),
    Serialization(String),
    Cancelled(String),
}

impl HireStatsError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            HireStatsError::DatabaseConfig(_) => "E001",
            HireStatsError::DatabaseConnection(_) => "E002",
            HireStatsError::DatabaseOperation(_) => "E003",
            HireStatsError::FileOperation(_) => "E004",
            HireStatsError::Validation(_) => "E005",
            HireStatsError::NotFound(_) => "E006",
            HireStatsError::Serialization(_) => "E007",
            HireStatsError::Cancelled(_) => "E008",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            HireStatsError::DatabaseConfig(_) => "Database Configuration Error",
            HireStatsError::DatabaseConnection(_) => "Database Connection Error",
            HireStatsError::DatabaseOperation(_) => "Database Operation Error",
            HireStatsError::FileOperation(_) => "File Operation Error",
            HireStatsError::Validation(_) => "Validation Error",
            HireStatsError::NotFound(_) => "Resource Not Found",
            HireStatsError::Serialization(_) => "Serialization Error",
            HireStatsError::Cancelled(_) => "Operation Cancelled",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            HireStatsError::DatabaseConfig(msg)
            | HireStatsError::DatabaseConnection(msg)
            | HireStatsError::DatabaseOperation(msg)
            | HireStatsError::FileOperation(msg)
            | HireStatsError::Validation(msg)
            | HireStatsError::NotFound(msg)
            | HireStatsError::Serialization(msg)
            | HireStatsError::Cancelled(msg) => msg,
        }
    }

    /// 格式化为彩色输出（用于 CLI 模式）
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

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for HireStatsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for HireStatsError {}

// 便捷的构造函数
impl HireStatsError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        HireStatsError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        HireStatsError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        HireStatsError::DatabaseOperation(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        HireStatsError::FileOperation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        HireStatsError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        HireStatsError::NotFound(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        HireStatsError::Serialization(msg.into())
    }

    pub fn cancelled<T: Into<String>>(msg: T) -> Self {
        HireStatsError::Cancelled(msg.into())
    }
}

impl From<sea_orm::DbErr> for HireStatsError {
    fn from(err: sea_orm::DbErr) -> Self {
        HireStatsError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for HireStatsError {
    fn from(err: std::io::Error) -> Self {
        HireStatsError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for HireStatsError {
    fn from(err: serde_json::Error) -> Self {
        HireStatsError::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for HireStatsError {
    fn from(err: toml::ser::Error) -> Self {
        HireStatsError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, HireStatsError>;
