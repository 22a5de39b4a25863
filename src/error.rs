use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 浏览器相关错误
    #[error("浏览器错误: {0}")]
    Browser(#[from] BrowserError),
    /// 审计引擎错误
    #[error("审计错误: {0}")]
    Engine(#[from] EngineError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 浏览器相关错误
#[derive(Debug, Error)]
pub enum BrowserError {
    /// 浏览器配置失败
    #[error("浏览器配置失败: {message}")]
    ConfigurationFailed { message: String },
    /// 启动浏览器失败
    #[error("启动浏览器失败: {source}")]
    LaunchFailed {
        #[source]
        source: chromiumoxide::error::CdpError,
    },
}

/// 审计引擎错误
#[derive(Debug, Error)]
pub enum EngineError {
    /// URL 为空
    #[error("URL 为空")]
    EmptyUrl,
    /// 无法启动 lighthouse 进程
    #[error("无法启动 {program}: {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },
    /// lighthouse 进程以非零状态退出
    #[error("lighthouse 退出状态 {status}: {stderr}")]
    NonZeroExit { status: String, stderr: String },
    /// 审计超时
    #[error("审计 {url} 超时 ({secs} 秒)")]
    Timeout { url: String, secs: u64 },
    /// 结果 JSON 解析失败
    #[error("无法解析审计结果: {source}")]
    InvalidOutput {
        #[source]
        source: serde_json::Error,
    },
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
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 运行次数必须为正整数
    #[error("运行次数必须大于 0")]
    ZeroRuns,
    /// 未知的审计类别
    #[error("未知的审计类别: {0}")]
    UnknownCategory(String),
    /// 未知的评分聚合方式
    #[error("评分聚合方式必须为 average 或 median: {0} 无效")]
    UnknownScoreMethod(String),
    /// 未配置任何审计类别
    #[error("至少需要一个审计类别")]
    NoCategories,
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
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
