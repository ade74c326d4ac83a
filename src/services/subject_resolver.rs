//! 科目映射解析服务 - 业务能力层
//!
//! 负责把数字科目代码解析为文档站 URL 所需的 slug 和课程层级。
//! 映射来自磁盘缓存，缓存缺失时从两个科目列表页面抓取构建，
//! 构建成功后尽力写回缓存。整个进程内映射最多构建一次。

use crate::config::Config;
use crate::error::SubjectError;
use crate::models::{Level, SubjectEntry};
use regex::Regex;
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

/// 以科目代码为键的映射
pub type SubjectMap = HashMap<String, SubjectEntry>;

/// 科目映射解析服务
///
/// 职责：
/// - 加载或构建科目代码 -> (slug, 层级) 映射
/// - 映射构建为单飞操作：并发的 resolve 调用等待同一次构建
/// - 单个层级的列表页面获取失败只导致该层级条目缺失，不中断
pub struct SubjectResolver {
    client: reqwest::Client,
    igcse_listing_url: String,
    alevel_listing_url: String,
    cache_file: PathBuf,
    map: OnceCell<SubjectMap>,
}

impl SubjectResolver {
    /// 创建新的科目映射解析服务
    pub fn new(config: &Config, client: reqwest::Client) -> Self {
        Self {
            client,
            igcse_listing_url: config.igcse_listing_url.clone(),
            alevel_listing_url: config.alevel_listing_url.clone(),
            cache_file: config.subject_cache_file.clone(),
            map: OnceCell::new(),
        }
    }

    /// 使用预置映射构造（测试用，不触发任何网络或缓存读写）
    pub fn with_map(entries: SubjectMap) -> Self {
        Self {
            client: reqwest::Client::new(),
            igcse_listing_url: String::new(),
            alevel_listing_url: String::new(),
            cache_file: PathBuf::new(),
            map: OnceCell::new_with(Some(entries)),
        }
    }

    /// 映射是否已经就绪
    pub fn is_built(&self) -> bool {
        self.map.initialized()
    }

    /// 解析科目代码
    ///
    /// # 返回
    /// 映射中存在且条目完整时返回 `Some`，否则返回 `None`
    pub async fn resolve(&self, code: &str) -> Option<SubjectEntry> {
        let code = code.trim();
        let map = self.map.get_or_init(|| self.load_or_build()).await;

        let entry = match map.get(code) {
            Some(entry) => entry,
            None => {
                warn!(
                    "⚠️ {}",
                    SubjectError::NotFound {
                        code: code.to_string()
                    }
                );
                return None;
            }
        };

        if entry.slug.is_empty() {
            warn!(
                "⚠️ {}",
                SubjectError::IncompleteEntry {
                    code: code.to_string()
                }
            );
            return None;
        }

        Some(entry.clone())
    }

    /// 加载缓存，缓存不可用时构建并尽力持久化
    async fn load_or_build(&self) -> SubjectMap {
        if let Some(map) = self.load_cache().await {
            return map;
        }

        info!("正在从科目列表页面构建映射 (IGCSE + A Level)...");
        let map = self.build_map().await;

        if !map.is_empty() {
            self.persist_cache(&map).await;
        }

        map
    }

    /// 读取持久化的科目映射
    async fn load_cache(&self) -> Option<SubjectMap> {
        let content = tokio::fs::read_to_string(&self.cache_file).await.ok()?;

        match serde_json::from_str::<SubjectMap>(&content) {
            Ok(map) => {
                info!(
                    "已加载科目映射缓存 {}，共 {} 条",
                    self.cache_file.display(),
                    map.len()
                );
                Some(map)
            }
            Err(e) => {
                warn!("⚠️ 科目映射缓存损坏，将重新构建: {}", e);
                None
            }
        }
    }

    /// 从两个层级的列表页面构建完整映射
    async fn build_map(&self) -> SubjectMap {
        let sources = [
            (Level::Igcse, self.igcse_listing_url.as_str()),
            (Level::ALevel, self.alevel_listing_url.as_str()),
        ];

        let mut map = SubjectMap::new();

        for (level, url) in sources {
            match self.fetch_listing(level, url).await {
                Ok(html) => {
                    let entries = parse_listing(&html, level);
                    info!("已从列表页面加载 {} 个 {} 科目", entries.len(), level);
                    map.extend(entries);
                }
                // 该层级条目缺失，整体构建继续
                Err(e) => warn!("⚠️ {}", e),
            }
        }

        map
    }

    /// 获取单个层级的列表页面
    async fn fetch_listing(&self, level: Level, url: &str) -> Result<String, SubjectError> {
        let resp = self.client.get(url).send().await.map_err(|e| {
            SubjectError::ListingFetchFailed {
                level: level.name().to_string(),
                source: Box::new(e),
            }
        })?;

        if !resp.status().is_success() {
            return Err(SubjectError::ListingBadStatus {
                level: level.name().to_string(),
                status: resp.status().as_u16(),
            });
        }

        resp.text().await.map_err(|e| SubjectError::ListingFetchFailed {
            level: level.name().to_string(),
            source: Box::new(e),
        })
    }

    /// 尽力写回缓存，失败只记录日志
    async fn persist_cache(&self, map: &SubjectMap) {
        let json = match serde_json::to_string_pretty(map) {
            Ok(json) => json,
            Err(e) => {
                warn!("⚠️ 无法序列化科目映射: {}", e);
                return;
            }
        };

        match tokio::fs::write(&self.cache_file, json).await {
            Ok(()) => info!("科目映射已保存至 {}", self.cache_file.display()),
            Err(e) => warn!("⚠️ 无法写入科目映射缓存: {}", e),
        }
    }
}

/// 解析科目列表页面
///
/// 提取形如 `">  Physics - 0625 <"` 的片段，返回该层级的映射条目。
pub fn parse_listing(html: &str, level: Level) -> SubjectMap {
    let mut entries = SubjectMap::new();

    let pattern = match Regex::new(r">\s*([^<>]*?)\s*-\s*([0-9]{3,4})\s*<") {
        Ok(pattern) => pattern,
        Err(e) => {
            warn!("⚠️ 科目列表正则构建失败: {}", e);
            return entries;
        }
    };

    for caps in pattern.captures_iter(html) {
        let raw_name = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        let code = caps.get(2).map(|m| m.as_str()).unwrap_or_default().trim();

        if code.is_empty() {
            continue;
        }

        // 规整名称中的空白
        let name_clean = raw_name.split_whitespace().collect::<Vec<_>>().join(" ");
        let slug = slugify(&name_clean, code);

        debug!("科目条目: {} -> {}", code, slug);
        entries.insert(
            code.to_string(),
            SubjectEntry {
                slug,
                level,
            },
        );
    }

    entries
}

/// 将科目显示名转换为文档站 slug
///
/// 规则：小写化，`&` 换为 ` and `，非字母数字的连续片段折叠为单个
/// 连字符，去掉首尾连字符，最后保证以科目代码结尾。
///
/// 例如 `"Physics"` + `"0625"` -> `"physics-0625"`。
pub fn slugify(name: &str, code: &str) -> String {
    let lowered = name.trim().to_lowercase().replace('&', " and ");

    let collapsed = match Regex::new(r"[^a-z0-9]+") {
        Ok(re) => re.replace_all(&lowered, "-").into_owned(),
        Err(_) => lowered,
    };

    let s = collapsed.trim_matches('-').to_string();

    if s.ends_with(code) {
        s
    } else {
        format!("{}-{}", s, code)
    }
}
