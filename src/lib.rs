//! # Quiz Generator
//!
//! 一个基于生成式模型的选择题出题与文档渲染流水线
//!
//! ## 架构设计
//!
//! 本系统采用严格的三层架构：
//!
//! ### ① 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个批次 / 单段文本
//! - `preprocess` - 文档文本清洗能力
//! - `planner` - 批次划分能力
//! - `LlmService` - 生成式模型调用能力（[`TextGenerator`] 契约）
//! - `validator` - 不可信模型输出的解析与校验能力
//! - `GenerationClient` - 单批次生成 + 重试能力
//!
//! ### ② 编排层（Orchestration）
//! - `orchestrator/pipeline` - 出题流水线，管理批次并发与完全汇合
//!
//! ### ③ 渲染层（Render）
//! - `render/` - 题目集合到确定性分页 PDF 的渲染
//! - 试卷与答案两份文档来自同一个题目集合快照
//!
//! ## 流程
//!
//! 规划批次 → N 个并发生成任务（错峰启动）→ 逐批校验 →
//! 完全汇合 → 按起始位置汇总 → 渲染试卷 + 答案

pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod render;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use config::Config;
pub use error::{BatchError, GenerationError, PipelineError, PipelineResult, RenderError};
pub use models::{
    index_to_letter, Batch, BatchOutcome, GeneratedQuiz, GenerationRequest, Level, Question,
};
pub use orchestrator::QuizPipeline;
pub use render::{render_answer_document, render_quiz_document};
pub use services::{plan_batches, preprocess, LlmService, TextGenerator};
