//! 产物收集服务 - 业务能力层
//!
//! 运行结束后把工作目录中的全部文档按文件名字典序拼接为一个
//! 输出产物。字典序保证合并顺序稳定可复现。

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

/// 收集工作目录中的全部 PDF 并按文件名字典序拼接
///
/// # 返回
/// - `Ok(Some(bytes))`: 按序拼接后的产物
/// - `Ok(None)`: 工作目录中没有任何文档（"未下载到文件"信号）
pub async fn collect_merged(working_dir: &Path) -> Result<Option<Vec<u8>>> {
    let mut entries = tokio::fs::read_dir(working_dir)
        .await
        .with_context(|| format!("无法读取工作目录: {}", working_dir.display()))?;

    let mut names: Vec<String> = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .with_context(|| format!("无法遍历工作目录: {}", working_dir.display()))?
    {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.to_lowercase().ends_with(".pdf") {
            names.push(name.to_string());
        }
    }

    if names.is_empty() {
        return Ok(None);
    }

    // 字典序决定合并顺序
    names.sort();

    let mut merged = Vec::new();
    for name in &names {
        let path = working_dir.join(name);
        let bytes = tokio::fs::read(&path)
            .await
            .with_context(|| format!("无法读取文件: {}", path.display()))?;
        merged.extend_from_slice(&bytes);
    }

    info!("已按字典序合并 {} 个文件", names.len());
    Ok(Some(merged))
}

/// 写出合并产物
pub async fn write_output(dest: &Path, bytes: &[u8]) -> Result<()> {
    tokio::fs::write(dest, bytes)
        .await
        .with_context(|| format!("无法写入合并产物: {}", dest.display()))?;

    info!("合并产物已保存至: {}", dest.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_working_dir_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let merged = collect_merged(dir.path()).await.unwrap();
        assert!(merged.is_none());
    }

    #[tokio::test]
    async fn test_merge_order_is_lexicographic() {
        let dir = tempfile::tempdir().unwrap();
        // 写入顺序与字典序相反
        std::fs::write(dir.path().join("0625_s23_qp_22.pdf"), b"BBB").unwrap();
        std::fs::write(dir.path().join("0625_s23_qp_21.pdf"), b"AAA").unwrap();

        let merged = collect_merged(dir.path()).await.unwrap().unwrap();
        assert_eq!(merged, b"AAABBB");
    }

    #[tokio::test]
    async fn test_ignores_non_pdf_entries() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"xxx").unwrap();
        std::fs::create_dir(dir.path().join("sub.pdf")).unwrap();

        let merged = collect_merged(dir.path()).await.unwrap();
        assert!(merged.is_none());
    }

    #[tokio::test]
    async fn test_accepts_uppercase_extension() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("0625_S23_QP_21.PDF"), b"AAA").unwrap();

        let merged = collect_merged(dir.path()).await.unwrap().unwrap();
        assert_eq!(merged, b"AAA");
    }

    #[tokio::test]
    async fn test_write_output() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.pdf");

        write_output(&dest, b"%PDF-merged").await.unwrap();
        assert_eq!(std::fs::read(&dest).unwrap(), b"%PDF-merged");
    }
}
