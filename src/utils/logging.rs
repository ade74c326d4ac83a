use anyhow::Result;
/// 日志工具模块
///
/// 提供日志格式化和输出的辅助函数
use std::fs;
use tracing::info;

use crate::models::ValidatedRequest;

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
///
/// # 返回
/// 返回是否成功初始化
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n试卷下载日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 记录程序启动信息
///
/// # 参数
/// - `max_concurrent`: 最大并发数
/// - `request`: 校验后的下载请求
pub fn log_startup(max_concurrent: usize, request: &ValidatedRequest) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 并发试卷下载模式");
    info!("📊 最大并发数: {}", max_concurrent);
    info!(
        "📚 科目: {} | 类型: {} | 年份: 20{:02}-20{:02}",
        request.subject_codes.join(","),
        request.doc_type,
        request.start_year,
        request.end_year
    );
    info!("{}", "=".repeat(60));
}

/// 打印最终统计信息
///
/// # 参数
/// - `downloaded`: 命中数量
/// - `attempted`: 尝试的元组总数
/// - `skipped_subjects`: 跳过的科目数量
/// - `log_file_path`: 日志文件路径
pub fn print_final_stats(
    downloaded: usize,
    attempted: usize,
    skipped_subjects: usize,
    log_file_path: &str,
) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 命中: {}/{}", downloaded, attempted);
    info!("❌ 未命中: {}", attempted.saturating_sub(downloaded));
    if skipped_subjects > 0 {
        info!("⚠️ 跳过科目: {}", skipped_subjects);
    }
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", log_file_path);
}
