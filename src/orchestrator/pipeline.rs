//! 出题流水线 - 编排层
//!
//! ## 职责
//!
//! 本模块是核心的公共入口，负责把各业务能力组合成完整流程：
//!
//! 1. **规划**：把请求总量划分为有上限的批次
//! 2. **并发生成**：为每个批次发起独立的生成任务，错峰启动避免限流
//! 3. **完全汇合**：等待所有批次成功或重试耗尽，不做先到先得
//! 4. **汇总**：按批次起始位置排序拼接，容忍部分批次失败
//! 5. **渲染**：同一题目集合渲染试卷与答案两份文档
//!
//! ## 设计特点
//!
//! - 批次之间没有共享可变状态，每个批次独占自己的区间和重试循环
//! - 调用方丢弃返回的 future 即取消所有在途批次和退避等待
//! - 本层不做重试，重试完全是生成客户端的职责

use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{GenerationError, PipelineError, PipelineResult};
use crate::models::{BatchOutcome, GeneratedQuiz, GenerationRequest, Level, Question};
use crate::render;
use crate::services::{plan_batches, preprocess, GenerationClient, LlmService, TextGenerator};

/// 出题流水线
pub struct QuizPipeline {
    client: GenerationClient,
    config: Config,
}

impl QuizPipeline {
    /// 使用默认的 LLM 后端创建流水线
    pub fn new(config: Config) -> Self {
        let backend: Arc<dyn TextGenerator> = Arc::new(LlmService::new(&config));
        Self::with_backend(config, backend)
    }

    /// 使用自定义后端创建流水线（测试时注入 mock）
    pub fn with_backend(config: Config, backend: Arc<dyn TextGenerator>) -> Self {
        let client = GenerationClient::new(backend, &config);
        Self { client, config }
    }

    /// 按主题出题，返回题目集合与两份渲染好的文档
    pub async fn generate_from_topic(
        &self,
        request: GenerationRequest,
    ) -> PipelineResult<GeneratedQuiz> {
        info!(
            "🚀 开始出题: 主题「{}」, 难度 {}, 共 {} 道",
            crate::utils::logging::truncate_text(&request.subject_text, 40),
            request.level.name(),
            request.question_count
        );
        self.run(request).await
    }

    /// 按文档文本出题：先预处理原始文本，再走主题路径
    pub async fn generate_from_document_text(
        &self,
        raw_text: &str,
        level: Level,
        question_count: u32,
    ) -> PipelineResult<GeneratedQuiz> {
        let subject_text =
            preprocess::preprocess_with_limit(raw_text, self.config.max_subject_chars);
        info!(
            "📄 文档文本预处理完成: {} -> {} 字符",
            raw_text.chars().count(),
            subject_text.chars().count()
        );

        self.generate_from_topic(GenerationRequest::new(subject_text, level, question_count))
            .await
    }

    /// 流水线主体：规划 → 并发生成 → 汇总 → 渲染
    async fn run(&self, request: GenerationRequest) -> PipelineResult<GeneratedQuiz> {
        let batches = plan_batches(request.question_count, self.config.max_batch_size);
        info!(
            "📦 划分为 {} 个批次 (每批最多 {} 道)",
            batches.len(),
            self.config.max_batch_size
        );

        let stagger = Duration::from_millis(self.config.stagger_delay_ms);

        // 每个批次一个独立任务；启动时间按批次序号错开，
        // 在同一个调用方任务里汇合，调用方取消时全部一起取消
        let tasks = batches.iter().enumerate().map(|(index, &batch)| {
            let request = &request;
            async move {
                if index > 0 {
                    sleep(stagger * index as u32).await;
                }
                self.client.generate_batch(batch, request, index).await
            }
        });

        // 完全汇合：所有批次成功或重试耗尽后才继续
        let outcomes = futures::future::join_all(tasks).await;

        let requested = request.question_count;
        let (questions, failures) = aggregate(outcomes)?;
        let failed_batches = failures.len();

        for failure in &failures {
            warn!("⚠️ {}", failure);
        }
        if failed_batches > 0 {
            warn!(
                "⚠️ {} 个批次失败，实际交付 {}/{} 道题目",
                failed_batches,
                questions.len(),
                requested
            );
        } else {
            info!("✅ 全部批次成功，共 {} 道题目", questions.len());
        }

        if self.config.verbose_logging {
            for (i, question) in questions.iter().enumerate() {
                debug!(
                    "{}. {}",
                    i + 1,
                    crate::utils::logging::truncate_text(&question.text, 60)
                );
            }
        }

        let quiz_document = render::render_quiz_document(&questions)?;
        let answer_document = render::render_answer_document(&questions)?;
        info!(
            "📄 文档渲染完成: 试卷 {} 字节, 答案 {} 字节",
            quiz_document.len(),
            answer_document.len()
        );

        Ok(GeneratedQuiz {
            questions,
            quiz_document,
            answer_document,
            requested,
            failed_batches,
        })
    }
}

/// 汇总所有批次结果
///
/// 按 `start_index` 升序拼接成功批次的题目，与各批次的实际完成顺序无关。
/// 重试耗尽的批次被转换为 [`GenerationError::BatchExhausted`] 返回给编排层记录；
/// 只要有批次存活就返回部分结果，全部失败才是硬错误
pub fn aggregate(
    mut outcomes: Vec<BatchOutcome>,
) -> Result<(Vec<Question>, Vec<GenerationError>), PipelineError> {
    let total = outcomes.len();
    outcomes.sort_by_key(|outcome| outcome.batch.start_index);

    let mut questions = Vec::new();
    let mut failures = Vec::new();

    for (batch_index, outcome) in outcomes.into_iter().enumerate() {
        match outcome.error {
            Some(last_error) => failures.push(GenerationError::BatchExhausted {
                batch_index,
                attempts: outcome.attempts,
                last_error,
            }),
            None => questions.extend(outcome.questions),
        }
    }

    if total > 0 && failures.len() == total {
        return Err(GenerationError::AllBatchesFailed {
            failed: total,
            total,
        }
        .into());
    }

    Ok((questions, failures))
}
