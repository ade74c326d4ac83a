//! # CAIE Downloader
//!
//! 一个用于批量下载剑桥历年真题的 Rust 应用程序。
//!
//! 文档站没有任何查询接口，只有随年代变化的 URL 和文件命名约定。
//! 本系统把松散的人工输入参数（科目代码、试卷代码、年份范围、
//! 考试季、文档类型）解析为具体的远程文件：先把科目代码解析为
//! URL 所需的 slug 和课程层级，再按约定流行程度逐个猜测文件名，
//! 命中并校验后落盘，最后合并为单一产物。
//!
//! ## 架构设计
//!
//! 本系统采用三层架构：
//!
//! ### ① 数据层（Models）
//! - `models/` - 领域类型与表单输入契约
//! - `Level` / `SubjectEntry` - 课程层级与科目映射条目
//! - `Session` / `DocType` / `PaperQuery` - 标识元组
//! - `DownloadRequest` - 表单输入边界与校验
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个对象
//! - `SubjectResolver` - 科目代码 -> (slug, 层级) 解析能力，单飞构建
//! - `candidate_generator` - 候选文件名生成能力（纯函数）
//! - `FetchProbe` - 单个候选的取回与校验能力
//! - `pdf_collector` - 工作目录合并能力
//!
//! ### ③ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量下载处理器，管理工作目录和并发
//! - `orchestrator/paper_processor` - 单个标识元组处理器，顺序探测候选
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{DocType, DownloadRequest, Level, PaperQuery, Session, SubjectEntry};
pub use orchestrator::{App, RunSummary};
pub use services::{FetchProbe, ProbeOutcome, SubjectResolver};
