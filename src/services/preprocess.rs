//! 文本预处理服务 - 业务能力层
//!
//! 只负责"清洗文档文本"能力，不关心流程
//!
//! 上传文档的文本提取由外部协作方完成，这里拿到的是已经提取好的纯文本。
//! 提取结果往往带有排版残留（装饰符号、断行、连续空白），直接塞进提示词
//! 会浪费 token 并干扰模型，所以先做一次保守的清洗

use tracing::debug;

/// 预处理后文本的默认最大字符数
pub const MAX_SUBJECT_CHARS: usize = 5000;

/// 截断时句号必须落在上限的这个比例之后才会被采用
const SENTENCE_SEEK_THRESHOLD: f64 = 0.8;

/// 清洗原始文档文本，返回可直接作为出题主题的字符串
///
/// - 只保留 Unicode 字母、数字、空白和 `. , ? ! -`，其余字符替换为空格
/// - 连续空白折叠为单个空格并去掉首尾空白
/// - 超过 5000 字符时截断，优先在结尾 20% 范围内的句号处收尾
///
/// 纯函数，永不失败，最坏情况下返回空字符串
pub fn preprocess(raw: &str) -> String {
    preprocess_with_limit(raw, MAX_SUBJECT_CHARS)
}

/// 带自定义长度上限的预处理
pub fn preprocess_with_limit(raw: &str, max_chars: usize) -> String {
    // 第一步：按允许列表清洗字符
    let cleaned: String = raw
        .chars()
        .map(|c| if is_allowed(c) { c } else { ' ' })
        .collect();

    // 第二步：折叠连续空白并去掉首尾空白
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

    // 第三步：超长时截断
    let chars: Vec<char> = collapsed.chars().collect();
    if chars.len() <= max_chars {
        return collapsed;
    }

    debug!("预处理文本超长 ({} 字符)，截断至 {} 字符", chars.len(), max_chars);

    let truncated = &chars[..max_chars];

    // 优先在结尾 20% 范围内的最后一个句号处收尾，保持语义完整
    let threshold = (max_chars as f64 * SENTENCE_SEEK_THRESHOLD) as usize;
    if let Some(pos) = truncated.iter().rposition(|&c| c == '.') {
        if pos >= threshold {
            return truncated[..=pos].iter().collect();
        }
    }

    truncated.iter().collect()
}

/// 字符允许列表：Unicode 字母、数字、空白和少量标点
fn is_allowed(c: char) -> bool {
    c.is_alphanumeric() || c.is_whitespace() || matches!(c, '.' | ',' | '?' | '!' | '-')
}
