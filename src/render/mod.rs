//! 文档渲染 - 渲染层
//!
//! ## 职责
//!
//! 把题目集合渲染为两份分页 PDF 文档：试卷（不含答案）和答案解析。
//! 两份文档来自同一个题目集合快照，序号与题目的对应关系完全一致。
//!
//! ## 确定性
//!
//! 渲染对输入是纯函数：相同的题目集合产出字节级相同的 PDF
//! （相同分页、相同字体度量、相同顺序），用于缓存和测试比对。
//! 选项字母一律由下标推导（[`index_to_letter`]），从不存储

pub mod document;
pub mod pdf;

use crate::error::RenderError;
use crate::models::{index_to_letter, Question};
use document::DocumentWriter;
use pdf::Font;
use tracing::debug;

/// 渲染试卷文档（不含任何答案标记）
pub fn render_quiz_document(questions: &[Question]) -> Result<Vec<u8>, RenderError> {
    check_questions(questions)?;
    debug!("渲染试卷文档，共 {} 道题目", questions.len());

    let mut doc = DocumentWriter::new();
    doc.heading("Quiz");
    doc.spacing(10.0);
    doc.paragraph(
        12.0,
        Font::Regular,
        0.0,
        "Instructions: choose the best answer for each question.",
    );
    doc.spacing(14.0);

    for (index, question) in questions.iter().enumerate() {
        doc.paragraph(
            14.0,
            Font::Regular,
            0.0,
            &format!("{}. {}", index + 1, question.text),
        );
        doc.spacing(4.0);

        for (opt_index, option) in question.options.iter().enumerate() {
            doc.paragraph(
                12.0,
                Font::Regular,
                30.0,
                &format!("{}. {}", index_to_letter(opt_index), option),
            );
        }
        doc.spacing(12.0);
    }

    Ok(doc.finish())
}

/// 渲染答案解析文档（含正确答案字母与解析）
pub fn render_answer_document(questions: &[Question]) -> Result<Vec<u8>, RenderError> {
    check_questions(questions)?;
    debug!("渲染答案文档，共 {} 道题目", questions.len());

    let mut doc = DocumentWriter::new();
    doc.heading("Answer Key");
    doc.spacing(14.0);

    for (index, question) in questions.iter().enumerate() {
        doc.paragraph(
            14.0,
            Font::Regular,
            0.0,
            &format!("{}. {}", index + 1, question.text),
        );
        doc.spacing(4.0);

        doc.paragraph(
            12.0,
            Font::Bold,
            0.0,
            &format!("Correct answer: {}", index_to_letter(question.correct_answer)),
        );

        if let Some(explanation) = &question.explanation {
            doc.spacing(2.0);
            doc.paragraph(
                11.0,
                Font::Regular,
                30.0,
                &format!("Explanation: {}", explanation),
            );
        }
        doc.spacing(12.0);
    }

    Ok(doc.finish())
}

/// 渲染前的结构检查：集合非空，每道题满足不变量
fn check_questions(questions: &[Question]) -> Result<(), RenderError> {
    if questions.is_empty() {
        return Err(RenderError::EmptyQuestionSet);
    }
    for (index, question) in questions.iter().enumerate() {
        if !question.is_well_formed() {
            return Err(RenderError::InvalidQuestion { index });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    fn sample_questions(count: usize) -> Vec<Question> {
        (0..count)
            .map(|i| Question {
                text: format!("Sample question number {}?", i + 1),
                options: vec![
                    format!("Option one for {}", i + 1),
                    format!("Option two for {}", i + 1),
                    format!("Option three for {}", i + 1),
                    format!("Option four for {}", i + 1),
                ],
                correct_answer: i % 4,
                explanation: Some(format!("Explanation for question {}", i + 1)),
            })
            .collect()
    }

    #[test]
    fn test_quiz_contains_ordinals_and_options() {
        let questions = sample_questions(5);
        let bytes = render_quiz_document(&questions).unwrap();

        for i in 1..=5 {
            assert!(contains(&bytes, format!("{}. Sample question", i).as_bytes()));
        }
        assert!(contains(&bytes, b"A. Option one"));
        assert!(contains(&bytes, b"D. Option four"));
        assert!(contains(&bytes, b"Instructions:"));
    }

    #[test]
    fn test_quiz_has_no_answer_markers() {
        let questions = sample_questions(5);
        let quiz = render_quiz_document(&questions).unwrap();
        let answers = render_answer_document(&questions).unwrap();

        assert!(!contains(&quiz, b"Correct answer:"));
        assert!(!contains(&quiz, b"Explanation:"));
        assert!(contains(&answers, b"Correct answer:"));
        assert!(contains(&answers, b"Explanation:"));
    }

    #[test]
    fn test_answer_letters_derive_from_index() {
        let mut questions = sample_questions(1);
        questions[0].correct_answer = 2;
        let bytes = render_answer_document(&questions).unwrap();
        assert!(contains(&bytes, b"Correct answer: C"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let questions = sample_questions(12);
        assert_eq!(
            render_quiz_document(&questions).unwrap(),
            render_quiz_document(&questions).unwrap()
        );
        assert_eq!(
            render_answer_document(&questions).unwrap(),
            render_answer_document(&questions).unwrap()
        );
    }

    #[test]
    fn test_empty_question_set_fails() {
        assert!(matches!(
            render_quiz_document(&[]),
            Err(RenderError::EmptyQuestionSet)
        ));
        assert!(matches!(
            render_answer_document(&[]),
            Err(RenderError::EmptyQuestionSet)
        ));
    }

    #[test]
    fn test_inconsistent_question_fails() {
        let mut questions = sample_questions(3);
        questions[1].correct_answer = 7;

        let err = render_quiz_document(&questions).unwrap_err();
        assert!(matches!(err, RenderError::InvalidQuestion { index: 1 }));
    }

    #[test]
    fn test_many_questions_paginate() {
        let questions = sample_questions(40);
        let bytes = render_quiz_document(&questions).unwrap();

        let page_markers = bytes
            .windows(b"/Type /Page ".len())
            .filter(|w| *w == b"/Type /Page ")
            .count();
        assert!(page_markers > 1);
    }

    #[test]
    fn test_explanation_is_optional() {
        let mut questions = sample_questions(1);
        questions[0].explanation = None;
        let bytes = render_answer_document(&questions).unwrap();
        assert!(!contains(&bytes, b"Explanation:"));
    }
}
