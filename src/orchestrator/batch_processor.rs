//! 批量下载处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，驱动完整的下载扫描。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：校验表单输入、准备并清空工作目录、创建共享 HTTP 客户端
//! 2. **科目解析**：每个科目只向解析服务查询一次，未知科目整体跳过
//! 3. **元组规划**：按年份 × 考试季 × 卷别枚举标识元组
//! 4. **并发控制**：使用 Semaphore 限制同时探测的元组数量
//! 5. **资源管理**：工作目录由本层独占，运行开始时清空一次，绝不中途清理
//! 6. **产物收集**：扫描结束后合并工作目录并写出产物
//!
//! ## 设计特点
//!
//! - **失败吸收**：单个科目、单个元组的失败都不会中断整体扫描
//! - **向下委托**：单个元组的候选扫描委托给 paper_processor

use crate::config::Config;
use crate::models::{DocType, DownloadRequest, PaperQuery, Session, SubjectEntry, ValidatedRequest};
use crate::orchestrator::paper_processor;
use crate::services::{collect_merged, write_output, FetchProbe, SubjectResolver};
use crate::utils::logging;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

/// 运行结果摘要
#[derive(Debug)]
pub struct RunSummary {
    /// 尝试过的标识元组数量
    pub attempted: usize,
    /// 成功下载的文件数量
    pub downloaded: usize,
    /// 因无法解析而跳过的科目数量
    pub skipped_subjects: usize,
    /// 合并产物路径；`None` 表示本次运行没有下载到任何文件
    pub output: Option<PathBuf>,
}

/// 科目扫描结果
#[derive(Debug, Default)]
struct SweepResult {
    total: usize,
    hits: usize,
    misses: usize,
}

/// 应用主结构
pub struct App {
    config: Config,
    request: ValidatedRequest,
    resolver: Arc<SubjectResolver>,
    probe: Arc<FetchProbe>,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config, request: DownloadRequest) -> Result<Self> {
        // 校验表单输入（年份标准化、范围检查在表单边界完成）
        let request = request.validate()?;

        // 初始化日志文件
        logging::init_log_file(&config.output_log_file)?;
        logging::log_startup(config.max_concurrent_downloads, &request);

        // 共享 HTTP 客户端，所有请求统一限时
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("无法创建 HTTP 客户端")?;

        let resolver = SubjectResolver::new(&config, client.clone());
        let probe = FetchProbe::new(&config, client);

        Self::assemble(config, request, resolver, probe).await
    }

    /// 使用外部提供的服务构造（测试替身入口）
    pub async fn with_services(
        config: Config,
        request: DownloadRequest,
        resolver: SubjectResolver,
        probe: FetchProbe,
    ) -> Result<Self> {
        let request = request.validate()?;
        Self::assemble(config, request, resolver, probe).await
    }

    async fn assemble(
        config: Config,
        request: ValidatedRequest,
        resolver: SubjectResolver,
        probe: FetchProbe,
    ) -> Result<Self> {
        // 工作目录只在此处清空一次，任何下载开始之前
        prepare_working_dir(&config.working_dir).await?;

        Ok(Self {
            config,
            request,
            resolver: Arc::new(resolver),
            probe: Arc::new(probe),
        })
    }

    /// 运行完整下载扫描
    pub async fn run(&self) -> Result<RunSummary> {
        let mut summary = RunSummary {
            attempted: 0,
            downloaded: 0,
            skipped_subjects: 0,
            output: None,
        };

        for code in &self.request.subject_codes {
            // 每个科目只解析一次
            let subject = match self.resolver.resolve(code).await {
                Some(subject) => subject,
                None => {
                    warn!("⚠️ 跳过科目 {}：无法确定下载路径", code);
                    summary.skipped_subjects += 1;
                    continue;
                }
            };

            let queries = plan_subject_queries(&self.request, code);
            log_subject_start(code, &subject.slug, queries.len());

            let result = self.sweep_queries(&subject, queries).await;
            log_subject_complete(code, result.hits, result.total);

            summary.attempted += result.total;
            summary.downloaded += result.hits;
        }

        // 收集并写出合并产物
        match collect_merged(&self.config.working_dir).await? {
            Some(bytes) => {
                let dest = self.config.output_dir.join(self.request.output_file_name());
                write_output(&dest, &bytes).await?;
                summary.output = Some(dest);
            }
            None => warn!("⚠️ 本次运行没有下载到任何有效文件"),
        }

        logging::print_final_stats(
            summary.downloaded,
            summary.attempted,
            summary.skipped_subjects,
            &self.config.output_log_file,
        );

        Ok(summary)
    }

    /// 并发处理一个科目的全部标识元组
    ///
    /// 元组之间并发（受 Semaphore 限制），单个元组内部的候选
    /// 探测严格顺序执行。
    async fn sweep_queries(&self, subject: &SubjectEntry, queries: Vec<PaperQuery>) -> SweepResult {
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_downloads));
        let mut handles = Vec::new();

        for query in queries {
            let permit = match semaphore.clone().acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => break,
            };
            let probe = self.probe.clone();
            let subject = subject.clone();

            let handle = tokio::spawn(async move {
                let _permit = permit;
                paper_processor::process_query(&probe, &subject, &query)
                    .await
                    .is_some()
            });
            handles.push(handle);
        }

        let mut result = SweepResult::default();
        for handle in handles {
            result.total += 1;
            match handle.await {
                Ok(true) => result.hits += 1,
                Ok(false) => result.misses += 1,
                Err(e) => {
                    error!("下载任务执行失败: {}", e);
                    result.misses += 1;
                }
            }
        }

        result
    }
}

/// 枚举一个科目在整个年份范围内的全部标识元组
///
/// 规则：
/// - 考官报告：每个启用的考试季一个元组，没有试卷代码和卷别
/// - 试题卷 / 评分标准：2/3 月只有卷别 '2'，5/6 月和 10/11 月
///   各尝试卷别 '1'、'2'、'3'
/// - 2/3 月考试季只对 15 年之后的年份尝试（更早年代站点没有该考试季）
pub fn plan_subject_queries(request: &ValidatedRequest, subject_code: &str) -> Vec<PaperQuery> {
    let mut queries = Vec::new();

    for year in request.start_year..=request.end_year {
        if request.doc_type == DocType::ExaminerReport {
            for session in request.enabled_sessions() {
                if session == Session::FebMarch && year <= 15 {
                    continue;
                }
                queries.push(PaperQuery::examiner_report(subject_code, year, session));
            }
            continue;
        }

        for paper_code in &request.paper_codes {
            if request.feb_march && year > 15 {
                queries.push(PaperQuery::exam_paper(
                    subject_code,
                    paper_code.clone(),
                    year,
                    '2',
                    Session::FebMarch,
                    request.doc_type,
                ));
            }

            if request.may_june {
                for variant in ['1', '2', '3'] {
                    queries.push(PaperQuery::exam_paper(
                        subject_code,
                        paper_code.clone(),
                        year,
                        variant,
                        Session::MayJune,
                        request.doc_type,
                    ));
                }
            }

            if request.oct_nov {
                for variant in ['1', '2', '3'] {
                    queries.push(PaperQuery::exam_paper(
                        subject_code,
                        paper_code.clone(),
                        year,
                        variant,
                        Session::OctNov,
                        request.doc_type,
                    ));
                }
            }
        }
    }

    queries
}

/// 准备工作目录：确保存在并清空残留条目（文件和子目录）
async fn prepare_working_dir(working_dir: &Path) -> Result<()> {
    tokio::fs::create_dir_all(working_dir)
        .await
        .with_context(|| format!("无法创建工作目录: {}", working_dir.display()))?;

    let mut entries = tokio::fs::read_dir(working_dir)
        .await
        .with_context(|| format!("无法读取工作目录: {}", working_dir.display()))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .with_context(|| format!("无法遍历工作目录: {}", working_dir.display()))?
    {
        let path = entry.path();
        let removed = if path.is_dir() {
            tokio::fs::remove_dir_all(&path).await
        } else {
            tokio::fs::remove_file(&path).await
        };

        if let Err(e) = removed {
            warn!("⚠️ 无法清理残留条目 {}: {}", path.display(), e);
        }
    }

    Ok(())
}

// ========== 日志辅助函数 ==========

fn log_subject_start(code: &str, slug: &str, total_queries: usize) {
    info!("\n{}", "=".repeat(60));
    info!("📚 开始处理科目 {} ({})", code, slug);
    info!("📄 计划尝试 {} 个标识元组", total_queries);
    info!("{}", "=".repeat(60));
}

fn log_subject_complete(code: &str, hits: usize, total: usize) {
    info!("\n{}", "─".repeat(60));
    info!("✓ 科目 {} 完成: 命中 {}/{}", code, hits, total);
    info!("{}", "─".repeat(60));
}
