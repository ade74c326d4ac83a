use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 科目映射相关错误
    #[error("科目映射错误: {0}")]
    Subject(#[from] SubjectError),
    /// 下载相关错误
    #[error("下载错误: {0}")]
    Download(#[from] DownloadError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 请求参数错误
    #[error("请求参数错误: {0}")]
    Request(#[from] RequestError),
    /// 其他错误（用于包装第三方库错误）
    #[error("错误: {0}")]
    Other(String),
}

/// 科目映射相关错误
#[derive(Debug, Error)]
pub enum SubjectError {
    /// 科目代码不在映射中
    #[error("未找到科目代码 {code} 的映射")]
    NotFound { code: String },
    /// 映射条目不完整
    #[error("科目代码 {code} 的映射不完整")]
    IncompleteEntry { code: String },
    /// 科目列表页面获取失败
    #[error("获取 {level} 科目列表失败: {source}")]
    ListingFetchFailed {
        level: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 科目列表页面返回异常状态
    #[error("{level} 科目列表返回状态 {status}")]
    ListingBadStatus { level: String, status: u16 },
}

/// 下载相关错误
#[derive(Debug, Error)]
pub enum DownloadError {
    /// 网络传输失败
    #[error("请求 {url} 失败: {source}")]
    Transport {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 响应载荷未通过校验
    #[error("载荷校验失败 ({size} 字节)")]
    InvalidPayload { size: usize },
    /// 一个标识元组的所有候选文件名都未命中
    #[error("{query} 的所有候选文件名均未命中")]
    Exhausted { query: String },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 删除文件失败
    #[error("删除文件失败 ({path}): {source}")]
    DeleteFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// 请求参数错误
#[derive(Debug, Error)]
pub enum RequestError {
    /// 年份格式非法
    #[error("年份格式非法: '{value}'")]
    InvalidYear { value: String },
    /// 年份范围颠倒
    #[error("年份范围颠倒: {start} > {end}")]
    YearRangeInverted { start: u8, end: u8 },
    /// 科目代码为空
    #[error("科目代码不能为空")]
    EmptySubjectCodes,
    /// 试卷代码为空
    #[error("该文档类型需要至少一个试卷代码")]
    EmptyPaperCodes,
    /// 未启用任何考试季
    #[error("至少需要启用一个考试季")]
    NoSessionEnabled,
    /// 文档类型无法识别
    #[error("无法识别文档类型: '{value}'")]
    UnknownDocType { value: String },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件写入错误
    pub fn file_write_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建网络传输错误
    pub fn transport(
        url: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Download(DownloadError::Transport {
            url: url.into(),
            source: Box::new(source),
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
