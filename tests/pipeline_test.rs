//! 流水线集成测试
//!
//! 通过注入 mock 后端验证完整的 规划 → 并发生成 → 汇总 → 渲染 流程。
//! 真实 LLM 的联通性测试默认忽略，需要手动运行：
//! `cargo test --test pipeline_test -- --ignored`

use anyhow::Result;
use async_trait::async_trait;
use quiz_generator::{
    Config, GeneratedQuiz, GenerationError, GenerationRequest, Level, PipelineError, QuizPipeline,
    TextGenerator,
};
use std::sync::{Arc, Mutex};

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

/// 提取提示词中的第一个整数（提示词以"请生成 N 道"开头）
fn requested_size(prompt: &str) -> u32 {
    prompt
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect::<String>()
        .parse()
        .expect("提示词必须包含批次大小")
}

/// 按请求数量生成合法响应 JSON
fn questions_json(count: u32) -> String {
    let questions: Vec<serde_json::Value> = (1..=count)
        .map(|i| {
            serde_json::json!({
                "question": format!("Auto question {}", i),
                "options": [
                    format!("Choice A{}", i),
                    format!("Choice B{}", i),
                    format!("Choice C{}", i),
                    format!("Choice D{}", i),
                ],
                "correctAnswer": (i - 1) % 4,
                "explanation": format!("Because of reason {}", i),
            })
        })
        .collect();

    serde_json::json!({ "questions": questions }).to_string()
}

/// 永远成功的 mock 后端，会记录收到的提示词
struct HappyBackend {
    prompts: Mutex<Vec<String>>,
}

impl HappyBackend {
    fn new() -> Self {
        Self {
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl TextGenerator for HappyBackend {
    async fn generate_text(&self, prompt: &str, _: u32, _: f32) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(questions_json(requested_size(prompt)))
    }
}

/// 对特定批次大小永远失败的 mock 后端
struct FailSizeBackend {
    fail_size: u32,
}

#[async_trait]
impl TextGenerator for FailSizeBackend {
    async fn generate_text(&self, prompt: &str, _: u32, _: f32) -> Result<String> {
        let size = requested_size(prompt);
        if size == self.fail_size {
            anyhow::bail!("模拟的批次失败");
        }
        Ok(questions_json(size))
    }
}

/// 永远失败的 mock 后端
struct BrokenBackend;

#[async_trait]
impl TextGenerator for BrokenBackend {
    async fn generate_text(&self, _: &str, _: u32, _: f32) -> Result<String> {
        anyhow::bail!("模拟的后端故障")
    }
}

/// 测试用配置：去掉所有延迟
fn fast_config() -> Config {
    Config {
        retry_delay_secs: 0,
        stagger_delay_ms: 0,
        ..Config::default()
    }
}

async fn run_topic(
    backend: Arc<dyn TextGenerator>,
    topic: &str,
    count: u32,
) -> Result<GeneratedQuiz, PipelineError> {
    let pipeline = QuizPipeline::with_backend(fast_config(), backend);
    pipeline
        .generate_from_topic(GenerationRequest::new(topic, Level::Beginner, count))
        .await
}

#[tokio::test]
async fn test_photosynthesis_scenario() {
    let backend = Arc::new(HappyBackend::new());
    let quiz = run_topic(backend.clone(), "Photosynthesis", 5).await.unwrap();

    // 5 道题，单批完成
    assert_eq!(quiz.questions.len(), 5);
    assert_eq!(quiz.requested, 5);
    assert_eq!(quiz.failed_batches, 0);
    assert_eq!(backend.prompts.lock().unwrap().len(), 1);

    for question in &quiz.questions {
        assert_eq!(question.options.len(), 4);
        assert!(question.correct_answer < 4);
    }

    // 试卷包含 1.-5. 序号，且不含任何答案标记
    for i in 1..=5 {
        assert!(contains(
            &quiz.quiz_document,
            format!("{}. Auto question", i).as_bytes()
        ));
    }
    assert!(!contains(&quiz.quiz_document, b"Correct answer:"));
    assert!(contains(&quiz.answer_document, b"Correct answer:"));
}

#[tokio::test]
async fn test_large_request_is_batched() {
    let backend = Arc::new(HappyBackend::new());
    let quiz = run_topic(backend.clone(), "World History", 45).await.unwrap();

    assert_eq!(quiz.questions.len(), 45);
    // 45 道题按每批 20 道划分为 3 个批次
    let prompts = backend.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 3);
    let mut sizes: Vec<u32> = prompts.iter().map(|p| requested_size(p)).collect();
    sizes.sort();
    assert_eq!(sizes, vec![5, 20, 20]);
}

#[tokio::test]
async fn test_partial_failure_returns_surviving_batches() {
    // 3 个批次中大小为 5 的那个永远失败，其余成功
    let backend = Arc::new(FailSizeBackend { fail_size: 5 });
    let quiz = run_topic(backend, "Chemistry", 45).await.unwrap();

    assert_eq!(quiz.requested, 45);
    assert_eq!(quiz.failed_batches, 1);
    assert_eq!(quiz.delivered(), 40);
    assert!(!quiz.quiz_document.is_empty());
}

#[tokio::test]
async fn test_total_failure_is_hard_error() {
    let err = run_topic(Arc::new(BrokenBackend), "Physics", 45)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PipelineError::Generation(GenerationError::AllBatchesFailed { failed: 3, total: 3 })
    ));
}

#[tokio::test]
async fn test_document_text_mode_preprocesses_input() {
    let backend = Arc::new(HappyBackend::new());
    let pipeline = QuizPipeline::with_backend(fast_config(), backend.clone());

    let raw = "Cell   biology—basics!!  \n\n Mitochondria produce energy. ◆◇";
    let quiz = pipeline
        .generate_from_document_text(raw, Level::Advanced, 3)
        .await
        .unwrap();

    assert_eq!(quiz.questions.len(), 3);

    // 提示词里是清洗后的文本：空白折叠、破折号和装饰符号被剔除
    let prompts = backend.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Cell biology basics!! Mitochondria produce energy."));
    assert!(!prompts[0].contains('—'));
    assert!(!prompts[0].contains('◆'));
}

#[tokio::test]
async fn test_documents_are_deterministic_across_runs() {
    let first = run_topic(Arc::new(HappyBackend::new()), "Geography", 25)
        .await
        .unwrap();
    let second = run_topic(Arc::new(HappyBackend::new()), "Geography", 25)
        .await
        .unwrap();

    assert_eq!(first.questions, second.questions);
    assert_eq!(first.quiz_document, second.quiz_document);
    assert_eq!(first.answer_document, second.answer_document);
}

/// 真实 LLM 联通性测试
///
/// 运行方式：
/// ```bash
/// LLM_API_KEY=... cargo test --test pipeline_test -- --ignored --nocapture
/// ```
#[tokio::test]
#[ignore]
async fn test_real_llm_generation() {
    quiz_generator::utils::logging::init();

    let config = Config::from_env();
    let pipeline = QuizPipeline::new(config);

    let result = pipeline
        .generate_from_topic(GenerationRequest::new("光合作用", Level::Beginner, 5))
        .await;

    match result {
        Ok(quiz) => {
            println!("\n========== 生成结果 ==========");
            println!("交付题目: {}/{}", quiz.delivered(), quiz.requested);
            for (i, q) in quiz.questions.iter().enumerate() {
                println!("{}. {}", i + 1, q.text);
            }
            println!("==============================\n");
            println!("✅ 真实 LLM 出题成功！");
            assert!(!quiz.questions.is_empty());
        }
        Err(e) => {
            println!("❌ 真实 LLM 出题失败: {}", e);
            panic!("测试失败: {}", e);
        }
    }
}
