/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    /// LLM 采样温度
    pub temperature: f32,
    /// LLM 单次响应的最大输出 token 数（控制响应体积和成本）
    pub max_output_tokens: u32,
    /// 单次 LLM 调用的超时时间（秒）
    pub request_timeout_secs: u64,
    // --- 批次调度配置 ---
    /// 单个批次最多包含的题目数量
    pub max_batch_size: u32,
    /// 单个批次失败后的最大重试次数（不含首次）
    pub max_retries: u32,
    /// 重试间隔（秒）
    pub retry_delay_secs: u64,
    /// 批次错峰启动间隔（毫秒），避免触发外部限流
    pub stagger_delay_ms: u64,
    // --- 预处理配置 ---
    /// 文档文本预处理后的最大字符数
    pub max_subject_chars: usize,
    // --- 输出配置 ---
    /// PDF 输出目录
    pub output_dir: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm_api_key: String::new(),
            llm_api_base_url: "https://generativelanguage.googleapis.com/v1beta/openai".to_string(),
            llm_model_name: "gemini-1.5-flash".to_string(),
            temperature: 0.7,
            max_output_tokens: 5000,
            request_timeout_secs: 60,
            max_batch_size: 20,
            max_retries: 3,
            retry_delay_secs: 2,
            stagger_delay_ms: 500,
            max_subject_chars: 5000,
            output_dir: "output_pdf".to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            llm_api_key: std::env::var("LLM_API_KEY").unwrap_or(default.llm_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(default.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(default.llm_model_name),
            temperature: std::env::var("LLM_TEMPERATURE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.temperature),
            max_output_tokens: std::env::var("LLM_MAX_OUTPUT_TOKENS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_output_tokens),
            request_timeout_secs: std::env::var("LLM_REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.request_timeout_secs),
            max_batch_size: std::env::var("MAX_BATCH_SIZE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_batch_size),
            max_retries: std::env::var("MAX_RETRIES").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_retries),
            retry_delay_secs: std::env::var("RETRY_DELAY_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.retry_delay_secs),
            stagger_delay_ms: std::env::var("STAGGER_DELAY_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.stagger_delay_ms),
            max_subject_chars: std::env::var("MAX_SUBJECT_CHARS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_subject_chars),
            output_dir: std::env::var("OUTPUT_DIR").unwrap_or(default.output_dir),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }
}
