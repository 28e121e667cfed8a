use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 题库内容错误
    #[error("内容错误: {0}")]
    Content(#[from] ContentError),
    /// 本地存储错误
    #[error("存储错误: {0}")]
    Storage(#[from] StorageError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 其他错误
    #[error("错误: {0}")]
    Other(String),
}

/// 题库内容错误
#[derive(Debug, Error)]
pub enum ContentError {
    /// 题目数据不满足约束
    #[error("题目 {id} 数据无效: {reason}")]
    InvalidQuestion { id: String, reason: String },
    /// 题目 ID 重复
    #[error("题目 ID 重复: {id}")]
    DuplicateId { id: String },
    /// 题库文档中的模块或难度标签无法识别
    #[error("无法识别的{field}标签: {value}")]
    UnknownLabel { field: &'static str, value: String },
}

/// 本地存储错误
#[derive(Debug, Error)]
pub enum StorageError {
    /// 打开数据库失败
    #[error("无法打开数据库 ({path}): {source}")]
    OpenFailed {
        path: String,
        #[source]
        source: rusqlite::Error,
    },
    /// 查询或写入失败
    #[error("数据库操作失败: {0}")]
    Query(#[from] rusqlite::Error),
    /// 存储的选项列表无法解析
    #[error("存储的选项无法解析 (题目: {id}): {source}")]
    CorruptOptions {
        id: String,
        #[source]
        source: serde_json::Error,
    },
    /// 后台任务异常退出
    #[error("存储任务执行失败: {0}")]
    TaskFailed(String),
    /// 数据库锁被污染
    #[error("数据库连接锁已失效")]
    Poisoned,
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// JSON 题库文档解析失败
    #[error("题库文档解析失败 ({path}): {source}")]
    JsonParseFailed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// TOML 序列化失败
    #[error("TOML序列化失败: {0}")]
    TomlSerializeFailed(#[from] toml::ser::Error),
    /// 目录不存在
    #[error("目录不存在: {path}")]
    DirectoryNotFound { path: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 命令行参数无效
    #[error("无效的命令: {0}")]
    InvalidCommand(String),
}

impl From<rusqlite::Error> for AppError {
    fn from(err: rusqlite::Error) -> Self {
        AppError::Storage(StorageError::Query(err))
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建题目无效错误
    pub fn invalid_question(id: impl Into<String>, reason: impl Into<String>) -> Self {
        AppError::Content(ContentError::InvalidQuestion {
            id: id.into(),
            reason: reason.into(),
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
