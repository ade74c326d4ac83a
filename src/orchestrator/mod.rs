//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责完整下载扫描的调度和统计，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量下载处理器
//! - 管理应用生命周期（初始化、运行、产物收集）
//! - 独占并清空工作目录（每次运行恰好一次，在任何下载之前）
//! - 每个科目只解析一次 slug 和层级
//! - 枚举标识元组（年份 × 考试季 × 卷别）
//! - 控制并发数量（Semaphore）
//! - 输出全局统计信息
//!
//! ### `paper_processor` - 单个标识元组处理器
//! - 生成一个元组的候选文件名序列
//! - 严格按优先级顺序探测，首个命中即停
//! - 吸收全部未命中，只记录日志
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 科目 × 年份 × 考试季 × 卷别)
//!     ↓
//! paper_processor (处理单个标识元组)
//!     ↓
//! services (能力层：resolve / generate / probe / collect)
//! ```
//!
//! ## 设计原则
//!
//! 1. **单一职责**：batch_processor 管扫描，paper_processor 管单个元组
//! 2. **资源隔离**：只有编排层持有工作目录的写入与清理权
//! 3. **失败吸收**：任何单点失败都不中断整体扫描，只有聚合的
//!    "未下载到任何文件" 结果向上暴露

pub mod batch_processor;
pub mod paper_processor;

// 重新导出主要类型
pub use batch_processor::{plan_subject_queries, App, RunSummary};
pub use paper_processor::process_query;
