pub mod batch;
pub mod level;
pub mod question;

pub use batch::{Batch, BatchOutcome};
pub use level::Level;
pub use question::{index_to_letter, Question};

/// 一次出题请求
///
/// 由单次流水线调用创建，调用结束后即丢弃，核心不做持久化
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// 出题主题（或预处理后的文档文本）
    pub subject_text: String,
    /// 难度等级
    pub level: Level,
    /// 请求的题目总数
    pub question_count: u32,
}

impl GenerationRequest {
    pub fn new(subject_text: impl Into<String>, level: Level, question_count: u32) -> Self {
        Self {
            subject_text: subject_text.into(),
            level,
            question_count,
        }
    }
}

/// 流水线最终产物
///
/// 两份文档由同一个题目集合渲染而来，序号与题目的对应关系完全一致。
/// `requested` / `failed_batches` 用于向调用方报告"请求 N 道、实际交付 M 道"
#[derive(Debug, Clone)]
pub struct GeneratedQuiz {
    /// 按批次起始位置排序后的题目集合
    pub questions: Vec<Question>,
    /// 试卷 PDF 字节
    pub quiz_document: Vec<u8>,
    /// 答案解析 PDF 字节
    pub answer_document: Vec<u8>,
    /// 原始请求的题目数量
    pub requested: u32,
    /// 重试耗尽后仍然失败的批次数量
    pub failed_batches: usize,
}

impl GeneratedQuiz {
    /// 实际交付的题目数量
    pub fn delivered(&self) -> usize {
        self.questions.len()
    }
}
