use std::fmt;

/// 流水线对调用方暴露的错误类型
///
/// 调用方只会看到两个粗粒度类别：生成失败 / 渲染失败。
/// 后端返回的原始错误正文不会原样透出，只保留摘要信息用于日志
#[derive(Debug)]
pub enum PipelineError {
    /// 生成阶段错误
    Generation(GenerationError),
    /// 渲染阶段错误
    Render(RenderError),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Generation(e) => write!(f, "生成失败: {}", e),
            PipelineError::Render(e) => write!(f, "渲染失败: {}", e),
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PipelineError::Generation(e) => Some(e),
            PipelineError::Render(e) => Some(e),
        }
    }
}

/// 生成阶段错误
///
/// 单个批次内部的失败由重试吸收，只有重试耗尽的批次才会上报；
/// 只要还有存活批次，整体请求就不算失败
#[derive(Debug)]
pub enum GenerationError {
    /// 单个批次重试耗尽
    BatchExhausted {
        batch_index: usize,
        attempts: u32,
        last_error: BatchError,
    },
    /// 全部批次失败，整个请求硬失败
    AllBatchesFailed { failed: usize, total: usize },
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::BatchExhausted {
                batch_index,
                attempts,
                last_error,
            } => {
                write!(
                    f,
                    "批次 {} 重试耗尽 (共尝试 {} 次): {}",
                    batch_index, attempts, last_error
                )
            }
            GenerationError::AllBatchesFailed { failed, total } => {
                write!(f, "全部批次失败 ({}/{})", failed, total)
            }
        }
    }
}

impl std::error::Error for GenerationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenerationError::BatchExhausted { last_error, .. } => Some(last_error),
            GenerationError::AllBatchesFailed { .. } => None,
        }
    }
}

/// 批次级错误（单次尝试的失败原因）
///
/// 这些错误在生成客户端内部都视为可重试，只有重试耗尽后才会传播
#[derive(Debug)]
pub enum BatchError {
    /// 后端调用失败（网络错误、非成功状态等）
    Api { message: String },
    /// 单次调用超时
    Timeout { seconds: u64 },
    /// 响应中找不到可解析的 JSON 对象
    Parse { reason: String },
    /// JSON 结构不符合预期（缺少 questions 数组等）
    Schema { reason: String },
    /// 响应解析成功但没有任何合法题目
    NoValidQuestions,
}

impl fmt::Display for BatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchError::Api { message } => write!(f, "LLM API 调用失败: {}", message),
            BatchError::Timeout { seconds } => write!(f, "LLM 调用超时 ({} 秒)", seconds),
            BatchError::Parse { reason } => write!(f, "响应 JSON 解析失败: {}", reason),
            BatchError::Schema { reason } => write!(f, "响应结构不符合预期: {}", reason),
            BatchError::NoValidQuestions => write!(f, "响应中没有合法题目"),
        }
    }
}

impl std::error::Error for BatchError {}

/// 渲染阶段错误
#[derive(Debug)]
pub enum RenderError {
    /// 题目集合为空，无法渲染
    EmptyQuestionSet,
    /// 题目结构不一致（选项数量错误或答案下标越界）
    InvalidQuestion { index: usize },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::EmptyQuestionSet => write!(f, "题目集合为空，无法渲染文档"),
            RenderError::InvalidQuestion { index } => {
                write!(f, "第 {} 道题目结构不合法，无法渲染", index + 1)
            }
        }
    }
}

impl std::error::Error for RenderError {}

// ========== 便捷转换 ==========

impl From<GenerationError> for PipelineError {
    fn from(err: GenerationError) -> Self {
        PipelineError::Generation(err)
    }
}

impl From<RenderError> for PipelineError {
    fn from(err: RenderError) -> Self {
        PipelineError::Render(err)
    }
}

// ========== Result 类型别名 ==========

/// 流水线结果类型
pub type PipelineResult<T> = Result<T, PipelineError>;
