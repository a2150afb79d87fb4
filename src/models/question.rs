/// 单道选择题
///
/// 不变量：`options` 恒为 4 个选项，`correct_answer` 必须落在 `[0, 4)` 内。
/// 校验器只会放行满足不变量的题目，未通过校验的候选不会出现在任何下游环节
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Question {
    /// 题干内容
    pub text: String,
    /// 四个选项，按 A-D 顺序排列
    pub options: Vec<String>,
    /// 正确选项的下标（0-based）
    pub correct_answer: usize,
    /// 答案解析（可选）
    pub explanation: Option<String>,
}

impl Question {
    /// 检查题目是否满足结构不变量
    pub fn is_well_formed(&self) -> bool {
        !self.text.trim().is_empty() && self.options.len() == 4 && self.correct_answer < 4
    }
}

/// 根据选项下标推导字母标签（0 -> 'A'，3 -> 'D'）
///
/// 字母永远从位置推导，不作为数据存储，避免选项重排后标签漂移
pub fn index_to_letter(index: usize) -> char {
    (b'A' + index as u8) as char
}
