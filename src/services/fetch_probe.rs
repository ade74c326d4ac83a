//! 候选探测服务 - 业务能力层
//!
//! 只负责"取回并校验一个候选文件名"：构建 URL、单次限时请求、
//! 载荷校验、写入工作目录。未命中与传输失败对调用方语义相同，
//! 都表示"继续尝试下一个候选"。

use crate::config::Config;
use crate::error::{AppError, DownloadError, FileError};
use crate::models::Level;
use std::path::PathBuf;
use tracing::{debug, warn};

/// 最小可接受载荷大小，低于此值视为占位或错误页面
const MIN_PDF_BYTES: usize = 400;
/// PDF 文件魔数
const PDF_MAGIC: &[u8] = b"%PDF";

/// 成功取回并通过校验的文件
#[derive(Debug, Clone)]
pub struct RetrievedFile {
    /// 工作目录中的本地路径
    pub local_path: PathBuf,
    /// 来源 URL
    pub source_url: String,
    /// 文件大小（字节）
    pub size_bytes: u64,
}

/// 单次候选探测的结果
#[derive(Debug)]
pub enum ProbeOutcome {
    /// 命中：文件已写入工作目录
    Hit(RetrievedFile),
    /// 未命中：状态码非 2xx 或载荷校验失败
    Miss,
    /// 传输失败：网络错误或超时
    Transport,
}

/// 候选探测服务
pub struct FetchProbe {
    client: reqwest::Client,
    host_base_url: String,
    working_dir: PathBuf,
}

impl FetchProbe {
    /// 创建新的候选探测服务
    pub fn new(config: &Config, client: reqwest::Client) -> Self {
        Self {
            client,
            host_base_url: config.host_base_url.trim_end_matches('/').to_string(),
            working_dir: config.working_dir.clone(),
        }
    }

    /// 构建完整下载 URL
    ///
    /// 形如 `https://<host>/exam/<层级>/<slug>/<四位年份>/<文件名>`
    pub fn build_url(&self, level: Level, slug: &str, year_full: &str, filename: &str) -> String {
        format!(
            "{}/exam/{}/{}/{}/{}",
            self.host_base_url,
            level.path_segment(),
            slug,
            year_full,
            filename
        )
    }

    /// 探测一个候选文件名
    ///
    /// # 返回
    /// - `Hit`: 载荷通过校验，文件已按候选文件名写入工作目录
    /// - `Miss` / `Transport`: 工作目录不留任何痕迹
    pub async fn fetch(
        &self,
        level: Level,
        slug: &str,
        year_full: &str,
        filename: &str,
    ) -> ProbeOutcome {
        let url = self.build_url(level, slug, year_full, filename);
        debug!("尝试 URL -> {}", url);

        let resp = match self.client.get(&url).send().await {
            Ok(resp) => resp,
            Err(e) => {
                debug!("{}", AppError::transport(&url, e));
                return ProbeOutcome::Transport;
            }
        };

        if !resp.status().is_success() {
            return ProbeOutcome::Miss;
        }

        let payload = match resp.bytes().await {
            Ok(payload) => payload,
            Err(e) => {
                debug!("{}", AppError::transport(&url, e));
                return ProbeOutcome::Transport;
            }
        };

        self.accept_and_persist(filename, &payload, &url).await
    }

    /// 校验载荷并写入工作目录
    ///
    /// 载荷在写入前完成校验，任何失败路径都不会在工作目录留下文件。
    pub async fn accept_and_persist(
        &self,
        filename: &str,
        payload: &[u8],
        source_url: &str,
    ) -> ProbeOutcome {
        if !payload_looks_like_pdf(payload) {
            debug!(
                "{}: {}",
                filename,
                DownloadError::InvalidPayload {
                    size: payload.len()
                }
            );
            return ProbeOutcome::Miss;
        }

        let dest = self.working_dir.join(filename);
        if let Err(e) = tokio::fs::write(&dest, payload).await {
            warn!(
                "⚠️ {}",
                AppError::file_write_failed(dest.display().to_string(), e)
            );
            // 清理可能的半成品文件
            if let Err(e) = tokio::fs::remove_file(&dest).await {
                debug!(
                    "{}",
                    FileError::DeleteFailed {
                        path: dest.display().to_string(),
                        source: Box::new(e),
                    }
                );
            }
            return ProbeOutcome::Miss;
        }

        ProbeOutcome::Hit(RetrievedFile {
            local_path: dest,
            source_url: source_url.to_string(),
            size_bytes: payload.len() as u64,
        })
    }
}

/// 载荷是否是真实文档：大小阈值 + PDF 魔数
pub fn payload_looks_like_pdf(payload: &[u8]) -> bool {
    payload.len() >= MIN_PDF_BYTES && payload.starts_with(PDF_MAGIC)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pdf_payload(total_len: usize) -> Vec<u8> {
        let mut payload = b"%PDF-1.7\n".to_vec();
        payload.resize(total_len, b' ');
        payload
    }

    fn probe_in(dir: &std::path::Path) -> FetchProbe {
        let config = Config {
            working_dir: dir.to_path_buf(),
            ..Config::default()
        };
        FetchProbe::new(&config, reqwest::Client::new())
    }

    #[test]
    fn test_payload_validation_boundaries() {
        // 恰好达到阈值
        assert!(payload_looks_like_pdf(&pdf_payload(400)));
        assert!(payload_looks_like_pdf(&pdf_payload(4096)));

        // 低于阈值
        assert!(!payload_looks_like_pdf(&pdf_payload(399)));
        assert!(!payload_looks_like_pdf(b"%PDF"));

        // 魔数不对
        let mut html = b"<html>not found</html>".to_vec();
        html.resize(4096, b' ');
        assert!(!payload_looks_like_pdf(&html));

        assert!(!payload_looks_like_pdf(&[]));
    }

    #[test]
    fn test_build_url() {
        let config = Config {
            host_base_url: "https://bestexamhelp.com/".to_string(),
            ..Config::default()
        };
        let probe = FetchProbe::new(&config, reqwest::Client::new());

        assert_eq!(
            probe.build_url(
                crate::models::Level::Igcse,
                "physics-0625",
                "2025",
                "0625_m25_qp_22.pdf"
            ),
            "https://bestexamhelp.com/exam/cambridge-igcse/physics-0625/2025/0625_m25_qp_22.pdf"
        );
    }

    #[tokio::test]
    async fn test_accept_valid_payload_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let probe = probe_in(dir.path());

        let outcome = probe
            .accept_and_persist("0625_s23_qp_22.pdf", &pdf_payload(1024), "http://example/x.pdf")
            .await;

        match outcome {
            ProbeOutcome::Hit(file) => {
                assert!(file.local_path.exists());
                assert_eq!(file.size_bytes, 1024);
                assert_eq!(file.source_url, "http://example/x.pdf");
            }
            other => panic!("期望 Hit，得到 {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_reject_leaves_no_trace() {
        let dir = tempfile::tempdir().unwrap();
        let probe = probe_in(dir.path());

        let outcome = probe
            .accept_and_persist("0625_s23_qp_22.pdf", b"<html>404</html>", "http://example/x.pdf")
            .await;

        assert!(matches!(outcome, ProbeOutcome::Miss));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_reject_small_pdf_leaves_no_trace() {
        let dir = tempfile::tempdir().unwrap();
        let probe = probe_in(dir.path());

        let outcome = probe
            .accept_and_persist("0625_s23_qp_22.pdf", &pdf_payload(399), "http://example/x.pdf")
            .await;

        assert!(matches!(outcome, ProbeOutcome::Miss));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
