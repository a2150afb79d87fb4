use anyhow::{Context, Result};
use quiz_generator::utils::logging;
use quiz_generator::{Config, GenerationRequest, Level, QuizPipeline};
use std::path::Path;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::from_env();
    logging::log_startup(config.max_batch_size, config.max_retries);

    // 从环境变量读取出题参数
    let topic = std::env::var("QUIZ_TOPIC").context("请通过 QUIZ_TOPIC 环境变量指定出题主题")?;
    let level = std::env::var("QUIZ_LEVEL")
        .ok()
        .and_then(|v| Level::parse(&v))
        .unwrap_or(Level::Intermediate);
    let question_count = std::env::var("QUIZ_QUESTION_COUNT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(5u32);

    let output_dir = config.output_dir.clone();
    let pipeline = QuizPipeline::new(config);

    // 执行流水线
    let quiz = pipeline
        .generate_from_topic(GenerationRequest::new(topic, level, question_count))
        .await?;

    // 写出两份 PDF
    tokio::fs::create_dir_all(&output_dir)
        .await
        .with_context(|| format!("无法创建输出目录: {}", output_dir))?;

    let quiz_path = Path::new(&output_dir).join("quiz.pdf");
    let answers_path = Path::new(&output_dir).join("answers.pdf");

    tokio::fs::write(&quiz_path, &quiz.quiz_document)
        .await
        .with_context(|| format!("写入试卷失败: {}", quiz_path.display()))?;
    tokio::fs::write(&answers_path, &quiz.answer_document)
        .await
        .with_context(|| format!("写入答案失败: {}", answers_path.display()))?;

    info!("📄 试卷已保存至: {}", quiz_path.display());
    info!("📄 答案已保存至: {}", answers_path.display());

    logging::print_final_stats(quiz.delivered(), quiz.requested, quiz.failed_batches);

    Ok(())
}
