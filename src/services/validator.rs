//! 响应校验服务 - 业务能力层
//!
//! 只负责"把不可信的模型输出转换为合法题目"能力，不关心流程
//!
//! 模型输出是松散的：可能带 markdown 代码围栏、可能在 JSON 前后夹杂说明文字、
//! 字段可能缺失或越界。这里统一做三步：提取 JSON → 结构检查 → 逐条过滤。
//! 不合法的单条候选直接丢弃（不逐条重试），只有全军覆没才算批次失败

use crate::error::BatchError;
use crate::models::Question;
use regex::Regex;
use serde_json::Value as JsonValue;
use tracing::{debug, warn};

/// 校验模型的原始响应文本，返回按原始顺序排列的合法题目
pub fn validate_response(raw: &str) -> Result<Vec<Question>, BatchError> {
    // 第一步：去掉 markdown 代码围栏并提取第一个配平的 JSON 对象
    let cleaned = strip_code_fences(raw)?;
    let json_text = extract_json_object(&cleaned).ok_or_else(|| BatchError::Parse {
        reason: "响应中找不到 JSON 对象".to_string(),
    })?;

    let parsed: JsonValue = serde_json::from_str(json_text).map_err(|e| BatchError::Parse {
        reason: e.to_string(),
    })?;

    // 第二步：结构检查，必须存在 questions 数组
    let candidates = parsed
        .get("questions")
        .ok_or_else(|| BatchError::Schema {
            reason: "缺少 questions 字段".to_string(),
        })?
        .as_array()
        .ok_or_else(|| BatchError::Schema {
            reason: "questions 字段不是数组".to_string(),
        })?;

    // 第三步：逐条过滤，保留顺序
    let mut questions = Vec::new();
    for (idx, candidate) in candidates.iter().enumerate() {
        match to_question(candidate) {
            Some(question) => questions.push(question),
            None => {
                warn!("丢弃第 {} 条不合法的候选题目", idx + 1);
            }
        }
    }

    if questions.is_empty() {
        return Err(BatchError::NoValidQuestions);
    }

    debug!("校验通过 {}/{} 条候选题目", questions.len(), candidates.len());
    Ok(questions)
}

/// 去掉 markdown 代码围栏标记
fn strip_code_fences(raw: &str) -> Result<String, BatchError> {
    // 与响应提示词约定的 ```json 围栏对应，围栏本身不参与 JSON 扫描
    let re = Regex::new(r"```(?:json)?").map_err(|e| BatchError::Parse {
        reason: e.to_string(),
    })?;
    Ok(re.replace_all(raw, "").to_string())
}

/// 提取第一个配平的 JSON 对象子串
///
/// 从第一个 `{` 开始做括号配平扫描，正确跳过字符串字面量和转义字符，
/// 避免贪婪匹配把 JSON 之后的说明文字一起吞进来
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let bytes = text.as_bytes();

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &b) in bytes[start..].iter().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        match b {
            b'\\' if in_string => escaped = true,
            b'"' => in_string = !in_string,
            b'{' if !in_string => depth += 1,
            b'}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }

    None
}

/// 将单条候选转换为合法题目，不满足结构要求时返回 None
fn to_question(candidate: &JsonValue) -> Option<Question> {
    let text = candidate.get("question")?.as_str()?.trim();
    if text.is_empty() {
        return None;
    }

    let raw_options = candidate.get("options")?.as_array()?;
    if raw_options.len() != 4 {
        return None;
    }
    let mut options = Vec::with_capacity(4);
    for option in raw_options {
        options.push(option.as_str()?.to_string());
    }

    let correct_answer = candidate.get("correctAnswer")?.as_u64()?;
    if correct_answer >= 4 {
        return None;
    }

    let explanation = candidate
        .get("explanation")
        .and_then(|v| v.as_str())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    Some(Question {
        text: text.to_string(),
        options,
        correct_answer: correct_answer as usize,
        explanation,
    })
}
