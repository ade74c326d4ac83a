use serde::Deserialize;
use std::path::PathBuf;
use tracing::{info, warn};

/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 文档站基础 URL
    pub host_base_url: String,
    /// IGCSE 科目列表页面 URL
    pub igcse_listing_url: String,
    /// AS & A Level 科目列表页面 URL
    pub alevel_listing_url: String,
    /// 科目映射缓存文件路径
    pub subject_cache_file: PathBuf,
    /// 下载工作目录（每次运行开始时清空）
    pub working_dir: PathBuf,
    /// 合并产物输出目录
    pub output_dir: PathBuf,
    /// 单次请求超时（秒）
    pub request_timeout_secs: u64,
    /// 同时探测的标识元组数量
    pub max_concurrent_downloads: usize,
    /// 输出日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host_base_url: "https://bestexamhelp.com".to_string(),
            igcse_listing_url: "https://pastpapers.papacambridge.com/papers/caie/igcse"
                .to_string(),
            alevel_listing_url:
                "https://pastpapers.papacambridge.com/papers/caie/as-and-a-level".to_string(),
            subject_cache_file: PathBuf::from("subject_slugs.json"),
            working_dir: std::env::temp_dir().join("caie_downloader_temp"),
            output_dir: PathBuf::from("."),
            request_timeout_secs: 12,
            max_concurrent_downloads: 6,
            output_log_file: "download_log.txt".to_string(),
        }
    }
}

/// config.toml 中允许覆盖的字段
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    host_base_url: Option<String>,
    igcse_listing_url: Option<String>,
    alevel_listing_url: Option<String>,
    subject_cache_file: Option<PathBuf>,
    working_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    request_timeout_secs: Option<u64>,
    max_concurrent_downloads: Option<usize>,
    output_log_file: Option<String>,
}

impl Config {
    /// 加载配置：默认值 -> config.toml -> 环境变量，后者覆盖前者
    pub fn load() -> Self {
        let mut config = Self::default();
        config.apply_file("config.toml");
        config.apply_env();
        config
    }

    /// 从环境变量加载配置（忽略 config.toml）
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    fn apply_file(&mut self, path: &str) {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            // 配置文件是可选的
            Err(_) => return,
        };

        let file: ConfigFile = match toml::from_str(&content) {
            Ok(file) => file,
            Err(e) => {
                warn!("⚠️ 无法解析配置文件 {}: {}", path, e);
                return;
            }
        };

        info!("已加载配置文件: {}", path);

        if let Some(v) = file.host_base_url {
            self.host_base_url = v;
        }
        if let Some(v) = file.igcse_listing_url {
            self.igcse_listing_url = v;
        }
        if let Some(v) = file.alevel_listing_url {
            self.alevel_listing_url = v;
        }
        if let Some(v) = file.subject_cache_file {
            self.subject_cache_file = v;
        }
        if let Some(v) = file.working_dir {
            self.working_dir = v;
        }
        if let Some(v) = file.output_dir {
            self.output_dir = v;
        }
        if let Some(v) = file.request_timeout_secs {
            self.request_timeout_secs = v;
        }
        if let Some(v) = file.max_concurrent_downloads {
            self.max_concurrent_downloads = v;
        }
        if let Some(v) = file.output_log_file {
            self.output_log_file = v;
        }
    }

    fn apply_env(&mut self) {
        if let Ok(v) = std::env::var("HOST_BASE_URL") {
            self.host_base_url = v;
        }
        if let Ok(v) = std::env::var("IGCSE_LISTING_URL") {
            self.igcse_listing_url = v;
        }
        if let Ok(v) = std::env::var("ALEVEL_LISTING_URL") {
            self.alevel_listing_url = v;
        }
        if let Ok(v) = std::env::var("SUBJECT_CACHE_FILE") {
            self.subject_cache_file = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("WORKING_DIR") {
            self.working_dir = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("OUTPUT_DIR") {
            self.output_dir = PathBuf::from(v);
        }
        if let Some(v) = std::env::var("REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()) {
            self.request_timeout_secs = v;
        }
        if let Some(v) = std::env::var("MAX_CONCURRENT_DOWNLOADS").ok().and_then(|v| v.parse().ok()) {
            self.max_concurrent_downloads = v;
        }
        if let Ok(v) = std::env::var("OUTPUT_LOG_FILE") {
            self.output_log_file = v;
        }
    }
}
