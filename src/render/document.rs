//! 带光标的文档写入器
//!
//! 在 [`PdfBuilder`](crate::render::pdf::PdfBuilder) 之上提供段落级 API：
//! 自动换行、页边距、分页。所有布局参数都是固定常量，
//! 保证相同输入产生字节级相同的分页结果

use crate::render::pdf::{Font, PdfBuilder, PAGE_HEIGHT, PAGE_WIDTH};

/// 页边距（pt）
const MARGIN: f64 = 50.0;
/// 行高相对字号的倍数
const LINE_HEIGHT_FACTOR: f64 = 1.4;

/// 文档写入器
pub struct DocumentWriter {
    pdf: PdfBuilder,
    cursor_y: f64,
}

impl DocumentWriter {
    pub fn new() -> Self {
        Self {
            pdf: PdfBuilder::new(),
            cursor_y: PAGE_HEIGHT - MARGIN,
        }
    }

    /// 居中大标题（24pt 粗体）
    pub fn heading(&mut self, text: &str) {
        let size = 24.0;
        let line_height = size * LINE_HEIGHT_FACTOR;
        self.ensure_space(line_height);
        self.cursor_y -= line_height;

        let width = PdfBuilder::text_width(Font::Bold, size, text);
        let x = (PAGE_WIDTH - width) / 2.0;
        self.pdf.show_text(x, self.cursor_y, size, Font::Bold, text);
    }

    /// 写入一个段落，超宽自动换行，页面写满自动分页
    pub fn paragraph(&mut self, size: f64, font: Font, indent: f64, text: &str) {
        let line_height = size * LINE_HEIGHT_FACTOR;
        let max_width = PAGE_WIDTH - 2.0 * MARGIN - indent;

        for line in wrap_text(text, font, size, max_width) {
            self.ensure_space(line_height);
            self.cursor_y -= line_height;
            self.pdf
                .show_text(MARGIN + indent, self.cursor_y, size, font, &line);
        }
    }

    /// 垂直留白
    pub fn spacing(&mut self, points: f64) {
        self.cursor_y -= points;
    }

    /// 产出最终的 PDF 字节
    pub fn finish(self) -> Vec<u8> {
        self.pdf.finish()
    }

    /// 剩余空间不足时开新页
    fn ensure_space(&mut self, needed: f64) {
        if self.cursor_y - needed < MARGIN {
            self.pdf.new_page();
            self.cursor_y = PAGE_HEIGHT - MARGIN;
        }
    }
}

impl Default for DocumentWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// 按最大宽度把文本拆成多行
///
/// 优先在空格处断行；单个"词"超宽时（典型场景是没有空格的中文文本）
/// 退化为按字符断行
fn wrap_text(text: &str, font: Font, size: f64, max_width: f64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split(' ') {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };

        if PdfBuilder::text_width(font, size, &candidate) <= max_width {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }

        // 单词本身超宽时按字符拆分
        if PdfBuilder::text_width(font, size, word) > max_width {
            for c in word.chars() {
                let mut candidate = current.clone();
                candidate.push(c);
                if PdfBuilder::text_width(font, size, &candidate) > max_width
                    && !current.is_empty()
                {
                    lines.push(std::mem::take(&mut current));
                    current.push(c);
                } else {
                    current = candidate;
                }
            }
        } else {
            current = word.to_string();
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
