//! LLM 服务 - 业务能力层
//!
//! 只负责"调用生成式模型"能力，不关心流程
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型
//! - 兼容 OpenAI API 的服务（如 Gemini, Azure, Doubao 等）

use anyhow::Result;
use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::Config;

/// 生成式文本后端的统一契约
///
/// 核心只通过这个请求/响应契约消费模型：一段提示词进去，一段文本出来。
/// 任何非成功状态、超时或空响应都由调用方按可重试失败处理
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// 发送提示词并返回模型的文本响应
    async fn generate_text(
        &self,
        prompt: &str,
        max_output_tokens: u32,
        temperature: f32,
    ) -> Result<String>;
}

/// LLM 服务
///
/// 职责：
/// - 封装 async-openai 客户端，实现 [`TextGenerator`] 契约
/// - 不出现 Batch / Question
/// - 不关心重试和流程顺序
pub struct LlmService {
    client: Client<OpenAIConfig>,
    model_name: String,
}

impl LlmService {
    /// 创建新的 LLM 服务
    pub fn new(config: &Config) -> Self {
        // 配置 OpenAI 客户端（兼容 OpenAI API 的服务）
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        let client = Client::with_config(openai_config);

        Self {
            client,
            model_name: config.llm_model_name.clone(),
        }
    }
}

#[async_trait]
impl TextGenerator for LlmService {
    async fn generate_text(
        &self,
        prompt: &str,
        max_output_tokens: u32,
        temperature: f32,
    ) -> Result<String> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("提示词长度: {} 字符", prompt.len());

        // 构建消息列表
        let mut messages = Vec::new();

        let system_msg = ChatCompletionRequestSystemMessageArgs::default()
            .content("你是一个专业的出题助手，严格按照要求的 JSON 格式输出选择题。")
            .build()?;
        messages.push(ChatCompletionRequestMessage::System(system_msg));

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()?;
        messages.push(ChatCompletionRequestMessage::User(user_msg));

        // 构建请求
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(messages)
            .temperature(temperature)
            .max_tokens(max_output_tokens)
            .build()?;

        // 调用 API
        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            anyhow::anyhow!("LLM API 调用失败: {}", e)
        })?;

        debug!("LLM API 调用成功");

        // 提取响应内容
        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| anyhow::anyhow!("LLM 返回内容为空"))?;

        Ok(content.trim().to_string())
    }
}
