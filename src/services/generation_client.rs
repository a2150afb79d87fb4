//! 生成客户端 - 业务能力层
//!
//! 只负责"完成单个批次"能力：构建提示词 → 调用后端 → 校验响应 → 重试
//!
//! 重试采用显式的有界循环（携带尝试计数器），不使用递归，
//! 这样超时和取消可以与循环干净地组合。批次重试耗尽后不会让兄弟批次
//! 一起失败，失败原因被记录在结果里交给编排层汇总

use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::BatchError;
use crate::models::{Batch, BatchOutcome, GenerationRequest, Question};
use crate::services::llm_service::TextGenerator;
use crate::services::validator;

/// 生成客户端
///
/// 职责：
/// - 只处理单个批次，批次之间没有共享状态
/// - 持有后端契约与重试策略
/// - 不出现 Vec<Batch>，不关心批次调度顺序
pub struct GenerationClient {
    backend: Arc<dyn TextGenerator>,
    max_retries: u32,
    retry_delay: Duration,
    request_timeout: Duration,
    max_output_tokens: u32,
    temperature: f32,
}

impl GenerationClient {
    /// 创建新的生成客户端
    pub fn new(backend: Arc<dyn TextGenerator>, config: &Config) -> Self {
        Self {
            backend,
            max_retries: config.max_retries,
            retry_delay: Duration::from_secs(config.retry_delay_secs),
            request_timeout: Duration::from_secs(config.request_timeout_secs),
            max_output_tokens: config.max_output_tokens,
            temperature: config.temperature,
        }
    }

    /// 处理单个批次，返回批次结果（失败信息携带在结果中，不会中断调用方）
    pub async fn generate_batch(
        &self,
        batch: Batch,
        request: &GenerationRequest,
        batch_index: usize,
    ) -> BatchOutcome {
        let prompt = build_prompt(batch.size, request);
        let mut last_error = None;

        // 重试循环：首次 + max_retries 次重试，失败原因均视为可重试
        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                debug!(
                    "[批次 {}] 等待 {} 秒后重试...",
                    batch_index,
                    self.retry_delay.as_secs()
                );
                sleep(self.retry_delay).await;
            }

            match self.attempt_once(&prompt).await {
                Ok(questions) => {
                    info!(
                        "[批次 {}] ✓ 生成成功: {}/{} 道题目 (第 {} 次尝试)",
                        batch_index,
                        questions.len(),
                        batch.size,
                        attempt + 1
                    );
                    return BatchOutcome {
                        batch,
                        questions,
                        attempts: attempt + 1,
                        error: None,
                    };
                }
                Err(e) => {
                    warn!(
                        "[批次 {}] 第 {}/{} 次尝试失败: {}",
                        batch_index,
                        attempt + 1,
                        self.max_retries + 1,
                        e
                    );
                    last_error = Some(e);
                }
            }
        }

        warn!(
            "[批次 {}] ❌ 重试耗尽，批次标记为失败 (共尝试 {} 次)",
            batch_index,
            self.max_retries + 1
        );

        BatchOutcome {
            batch,
            questions: Vec::new(),
            attempts: self.max_retries + 1,
            error: last_error,
        }
    }

    /// 单次尝试：带超时的后端调用 + 响应校验
    async fn attempt_once(&self, prompt: &str) -> Result<Vec<Question>, BatchError> {
        let call = self
            .backend
            .generate_text(prompt, self.max_output_tokens, self.temperature);

        let text = timeout(self.request_timeout, call)
            .await
            .map_err(|_| BatchError::Timeout {
                seconds: self.request_timeout.as_secs(),
            })?
            .map_err(|e| BatchError::Api {
                message: e.to_string(),
            })?;

        validator::validate_response(&text)
    }
}

/// 构建单个批次的出题提示词
///
/// 响应格式约定为单个 JSON 对象（包含 questions 数组），
/// 与校验器的提取逻辑一一对应
pub fn build_prompt(size: u32, request: &GenerationRequest) -> String {
    format!(
        r#"请生成 {size} 道关于「{topic}」的{level}难度单项选择题。

每道题目要求：
- 表述清晰简洁
- 恰好 4 个选项
- 只有一个正确答案
- 附带正确答案的解析

请严格按照以下 JSON 格式返回，不要输出任何其他内容：
{{
  "questions": [
    {{
      "question": "题干内容",
      "options": ["选项一", "选项二", "选项三", "选项四"],
      "correctAnswer": 0,
      "explanation": "为什么这个答案是正确的"
    }}
  ]
}}"#,
        size = size,
        topic = request.subject_text,
        level = request.level.prompt_name(),
    )
}
