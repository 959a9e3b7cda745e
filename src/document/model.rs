//! 文档模型
//!
//! 组装器的输出、写出器的输入。只描述"写什么、怎么排版"，不涉及具体文件格式

/// 段落对齐方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Justify,
}

/// 全文默认字体
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSpec {
    pub family: String,
    /// 字号（磅）
    pub size_pt: u32,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: "Times New Roman".to_string(),
            size_pt: 14,
        }
    }
}

/// 段落
///
/// `text` 中的换行在段落内保留为换行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    pub text: String,
    pub bold: bool,
    pub alignment: Alignment,
}

impl Paragraph {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            alignment: Alignment::Left,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn aligned(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }
}

/// 页脚内容
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FooterField {
    /// 当前页码
    PageNumber { alignment: Alignment },
}

/// 完整文档
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocumentModel {
    pub font: FontSpec,
    pub paragraphs: Vec<Paragraph>,
    pub footer: Option<FooterField>,
}

impl DocumentModel {
    pub fn new(font: FontSpec) -> Self {
        Self {
            font,
            paragraphs: Vec::new(),
            footer: None,
        }
    }

    pub fn push(&mut self, paragraph: Paragraph) {
        self.paragraphs.push(paragraph);
    }
}
