//! 最小化的确定性 PDF 组装器
//!
//! 只支持渲染试卷所需的能力：A4 页面、两种内置 Helvetica 字体、
//! 定位文本。内容流不压缩、不写入任何时间戳，相同输入永远产出
//! 字节级相同的文件
//!
//! 文本按 WinAnsi 编码写入，超出编码范围的字符退化为 `?`。
//! 宽度度量使用内置的 Helvetica AFM 宽度表，保证换行位置可复现

/// 页面宽度（A4, pt）
pub const PAGE_WIDTH: f64 = 595.0;
/// 页面高度（A4, pt）
pub const PAGE_HEIGHT: f64 = 842.0;

/// 内置字体
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
}

impl Font {
    fn resource_name(self) -> &'static str {
        match self {
            Font::Regular => "/F1",
            Font::Bold => "/F2",
        }
    }
}

/// PDF 构建器
///
/// 按页累积内容流，`finish` 时一次性组装对象表和交叉引用表
pub struct PdfBuilder {
    finished_pages: Vec<String>,
    current_page: String,
}

impl PdfBuilder {
    pub fn new() -> Self {
        Self {
            finished_pages: Vec::new(),
            current_page: String::new(),
        }
    }

    /// 结束当前页并开始新的一页
    pub fn new_page(&mut self) {
        let page = std::mem::take(&mut self.current_page);
        self.finished_pages.push(page);
    }

    /// 在当前页的指定位置绘制一行文本（y 为基线坐标）
    pub fn show_text(&mut self, x: f64, y: f64, size: f64, font: Font, text: &str) {
        let escaped = escape_text(text);
        self.current_page.push_str(&format!(
            "BT {} {} Tf {:.2} {:.2} Td ({}) Tj ET\n",
            font.resource_name(),
            format_number(size),
            x,
            y,
            escaped
        ));
    }

    /// 度量一行文本的宽度（pt）
    pub fn text_width(font: Font, size: f64, text: &str) -> f64 {
        let total: u32 = text
            .chars()
            .map(|c| char_width(font, encode_char(c)) as u32)
            .sum();
        total as f64 * size / 1000.0
    }

    /// 组装完整的 PDF 字节序列
    pub fn finish(mut self) -> Vec<u8> {
        self.new_page();
        let pages = self.finished_pages;
        let page_count = pages.len();

        // 对象编号布局：1 Catalog, 2 Pages, 3/4 字体, 之后每页两个对象（页面 + 内容流）
        let total_objects = 4 + page_count * 2;
        let mut out: Vec<u8> = Vec::new();
        let mut offsets: Vec<usize> = Vec::with_capacity(total_objects);

        out.extend_from_slice(b"%PDF-1.4\n");
        // 含高位字节的注释行，标记文件为二进制
        out.extend_from_slice(&[b'%', 0xE2, 0xE3, 0xCF, 0xD3, b'\n']);

        let kids: Vec<String> = (0..page_count)
            .map(|i| format!("{} 0 R", 5 + i * 2))
            .collect();

        push_object(
            &mut out,
            &mut offsets,
            1,
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        );
        push_object(
            &mut out,
            &mut offsets,
            2,
            format!(
                "<< /Type /Pages /Kids [{}] /Count {} >>",
                kids.join(" "),
                page_count
            ),
        );
        push_object(
            &mut out,
            &mut offsets,
            3,
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
                .to_string(),
        );
        push_object(
            &mut out,
            &mut offsets,
            4,
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>"
                .to_string(),
        );

        for (i, content) in pages.iter().enumerate() {
            let page_id = 5 + i * 2;
            let stream_id = page_id + 1;

            push_object(
                &mut out,
                &mut offsets,
                page_id,
                format!(
                    "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
                     /Resources << /Font << /F1 3 0 R /F2 4 0 R >> >> /Contents {} 0 R >>",
                    PAGE_WIDTH as u32, PAGE_HEIGHT as u32, stream_id
                ),
            );

            offsets.push(out.len());
            out.extend_from_slice(
                format!(
                    "{} 0 obj\n<< /Length {} >>\nstream\n",
                    stream_id,
                    content.len()
                )
                .as_bytes(),
            );
            out.extend_from_slice(content.as_bytes());
            out.extend_from_slice(b"endstream\nendobj\n");
        }

        // 交叉引用表
        let xref_offset = out.len();
        out.extend_from_slice(format!("xref\n0 {}\n", total_objects + 1).as_bytes());
        out.extend_from_slice(b"0000000000 65535 f \n");
        for offset in &offsets {
            out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
        }
        out.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
                total_objects + 1,
                xref_offset
            )
            .as_bytes(),
        );

        out
    }
}

impl Default for PdfBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn push_object(out: &mut Vec<u8>, offsets: &mut Vec<usize>, id: usize, body: String) {
    offsets.push(out.len());
    out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", id, body).as_bytes());
}

/// 字号多为整数，整数时省略小数部分，保持内容流紧凑且稳定
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}

/// 将字符映射为 WinAnsi 编码字节，无法表示的字符退化为 `?`
fn encode_char(c: char) -> u8 {
    let code = c as u32;
    match c {
        // 常见的排版字符（WinAnsi 0x80-0x9F 区）
        '…' => 0x85,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        _ if (0x20..0x7F).contains(&code) => code as u8,
        _ if (0xA0..0x100).contains(&code) => code as u8,
        _ => b'?',
    }
}

/// 转义内容流字符串字面量
fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        let byte = encode_char(c);
        match byte {
            b'(' => escaped.push_str("\\("),
            b')' => escaped.push_str("\\)"),
            b'\\' => escaped.push_str("\\\\"),
            0x20..=0x7E => escaped.push(byte as char),
            _ => escaped.push_str(&format!("\\{:03o}", byte)),
        }
    }
    escaped
}

/// Helvetica 的字符宽度（千分之一 em），覆盖 0x20-0x7E
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // 0x20-0x2F
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0x30-0x3F
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // 0x40-0x4F
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 0x50-0x5F
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // 0x60-0x6F
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 0x70-0x7E
];

/// Helvetica-Bold 的字符宽度（千分之一 em），覆盖 0x20-0x7E
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // 0x20-0x2F
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // 0x30-0x3F
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // 0x40-0x4F
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 0x50-0x5F
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // 0x60-0x6F
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // 0x70-0x7E
];

/// 编码范围外的字节使用统一的回退宽度
const FALLBACK_WIDTH: u16 = 556;

fn char_width(font: Font, byte: u8) -> u16 {
    let table = match font {
        Font::Regular => &HELVETICA_WIDTHS,
        Font::Bold => &HELVETICA_BOLD_WIDTHS,
    };
    if (0x20..0x7F).contains(&byte) {
        table[(byte - 0x20) as usize]
    } else {
        FALLBACK_WIDTH
    }
}
