/// 难度等级枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Level {
    /// 入门
    Beginner,
    /// 中级
    Intermediate,
    /// 高级
    Advanced,
}

impl Level {
    /// 获取标准名称（英文小写，与外部接口保持一致）
    pub fn name(self) -> &'static str {
        match self {
            Level::Beginner => "beginner",
            Level::Intermediate => "intermediate",
            Level::Advanced => "advanced",
        }
    }

    /// 获取用于提示词的中文名称
    pub fn prompt_name(self) -> &'static str {
        match self {
            Level::Beginner => "入门",
            Level::Intermediate => "中级",
            Level::Advanced => "高级",
        }
    }

    /// 尝试从字符串解析难度等级
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "beginner" | "入门" => Some(Level::Beginner),
            "intermediate" | "中级" => Some(Level::Intermediate),
            "advanced" | "高级" => Some(Level::Advanced),
            _ => None,
        }
    }
}
