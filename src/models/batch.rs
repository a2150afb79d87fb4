use crate::error::BatchError;
use crate::models::Question;

/// 单个生成批次
///
/// 所有批次的下标区间互不重叠，并集恰好覆盖 `[0, question_count)`。
/// 每个批次独占自己的 `start_index` / `size`，批次之间没有任何共享可变状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Batch {
    /// 批次在整体请求中的起始下标
    pub start_index: u32,
    /// 本批次请求的题目数量（不超过 `max_batch_size`）
    pub size: u32,
}

impl Batch {
    pub fn new(start_index: u32, size: u32) -> Self {
        Self { start_index, size }
    }
}

/// 批次处理结果
///
/// 每个批次在重试耗尽或成功后恰好产生一个结果。
/// 失败的批次携带最后一次的失败原因，供编排层汇总与记录
#[derive(Debug)]
pub struct BatchOutcome {
    /// 对应的批次
    pub batch: Batch,
    /// 校验通过的题目（失败时为空）
    pub questions: Vec<Question>,
    /// 实际尝试的次数（首次 + 重试）
    pub attempts: u32,
    /// 最后一次失败的原因（成功时为 None）
    pub error: Option<BatchError>,
}

impl BatchOutcome {
    /// 批次是否在重试耗尽后仍然失败
    pub fn failed(&self) -> bool {
        self.error.is_some()
    }
}
