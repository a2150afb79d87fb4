//! 批次规划服务 - 业务能力层
//!
//! 只负责"划分批次"能力，不关心流程
//!
//! 单次 LLM 调用一次性生成太多题目时，响应容易超长、解析失败率显著上升，
//! 所以把总量切成有上限的批次，每个批次对应一次独立的后端调用

use crate::models::Batch;

/// 将请求的题目总数划分为有上限的批次序列
///
/// - 所有批次的区间互不重叠，并集恰好覆盖 `[0, total_questions)`
/// - 每个批次的大小为 `min(max_batch_size, 剩余数量)`
/// - 批次数量为 `ceil(total_questions / max_batch_size)`
/// - 确定性：相同输入永远产生相同的划分
pub fn plan_batches(total_questions: u32, max_batch_size: u32) -> Vec<Batch> {
    let max_batch_size = max_batch_size.max(1);
    let mut batches = Vec::new();

    let mut start_index = 0;
    while start_index < total_questions {
        let size = max_batch_size.min(total_questions - start_index);
        batches.push(Batch::new(start_index, size));
        start_index += size;
    }

    batches
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_batch() {
        let batches = plan_batches(5, 20);
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0], Batch::new(0, 5));
    }

    #[test]
    fn test_exact_division() {
        let batches = plan_batches(40, 20);
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0], Batch::new(0, 20));
        assert_eq!(batches[1], Batch::new(20, 20));
    }

    #[test]
    fn test_remainder_batch() {
        let batches = plan_batches(45, 20);
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[2], Batch::new(40, 5));
    }

    #[test]
    fn test_zero_questions() {
        assert!(plan_batches(0, 20).is_empty());
    }

    #[test]
    fn test_zero_batch_size_is_clamped() {
        let batches = plan_batches(3, 0);
        assert_eq!(batches.len(), 3);
    }

    #[test]
    fn test_coverage_property() {
        // 所有组合下批次并集必须恰好覆盖 [0, total) 且数量等于 ceil(total/max)
        for total in 1..=100u32 {
            for max in 1..=25u32 {
                let batches = plan_batches(total, max);

                let expected_count = total.div_ceil(max) as usize;
                assert_eq!(batches.len(), expected_count, "total={} max={}", total, max);

                let mut covered = vec![false; total as usize];
                for batch in &batches {
                    assert!(batch.size >= 1 && batch.size <= max);
                    for i in batch.start_index..batch.start_index + batch.size {
                        assert!(!covered[i as usize], "区间重叠 total={} max={}", total, max);
                        covered[i as usize] = true;
                    }
                }
                assert!(covered.iter().all(|&c| c), "区间未覆盖 total={} max={}", total, max);
            }
        }
    }
}
