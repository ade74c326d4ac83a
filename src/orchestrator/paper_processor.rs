//! 单个标识元组处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块对一个标识元组执行完整的候选扫描：
//!
//! 1. **生成候选**：调用候选文件名生成器
//! 2. **顺序探测**：严格按生成顺序逐个探测，绝不并发探测兄弟候选
//! 3. **首中即停**：命中后立即返回，不做打分或回溯
//! 4. **失败吸收**：全部未命中只记录日志，不向上抛出

use crate::error::DownloadError;
use crate::models::{PaperQuery, SubjectEntry};
use crate::services::{generate_candidates, FetchProbe, ProbeOutcome, RetrievedFile};
use tracing::{debug, info};

/// 处理单个标识元组
///
/// # 参数
/// - `probe`: 候选探测服务
/// - `subject`: 已解析的科目条目
/// - `query`: 标识元组
///
/// # 返回
/// 命中时返回取回的文件，所有候选都未命中时返回 `None`
pub async fn process_query(
    probe: &FetchProbe,
    subject: &SubjectEntry,
    query: &PaperQuery,
) -> Option<RetrievedFile> {
    let candidates = generate_candidates(query);
    let year_full = query.year_full();

    debug!("{} 共 {} 个候选文件名", query, candidates.len());

    for filename in &candidates {
        match probe
            .fetch(subject.level, &subject.slug, &year_full, filename)
            .await
        {
            ProbeOutcome::Hit(file) => {
                info!("✅ 已下载: {}", filename);
                return Some(file);
            }
            // 未命中与传输失败同样处理：尝试下一个候选
            ProbeOutcome::Miss | ProbeOutcome::Transport => continue,
        }
    }

    info!(
        "❌ {}",
        DownloadError::Exhausted {
            query: query.to_string()
        }
    );
    None
}
