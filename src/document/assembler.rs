use tracing::debug;

use crate::document::markdown::{clean_line, clean_markdown, remove_duplicate_title};
use crate::document::model::{Alignment, DocumentModel, FontSpec, FooterField, Paragraph};
use crate::models::language::{is_conclusion_title, is_introduction_title};
use crate::models::Essay;

/// 文档组装器
///
/// 把通过校验的文章转换为文档模型，本身不会失败
#[derive(Debug, Clone, Default)]
pub struct DocumentAssembler {
    font: FontSpec,
}

impl DocumentAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assemble(&self, essay: &Essay) -> DocumentModel {
        let mut doc = DocumentModel::new(self.font.clone());

        doc.push(
            Paragraph::new(essay.topic.trim())
                .bold()
                .aligned(Alignment::Center),
        );

        for section in &essay.sections {
            // 流水线不会生成结论，出现时也跳过；章节标题里的"заключение"不算
            if !section.is_chapter && is_conclusion_title(&section.title) {
                debug!("跳过结论部分: {}", section.title);
                continue;
            }

            let heading = clean_line(section.title.trim()).trim().to_string();
            let heading_alignment = if !section.is_chapter && is_introduction_title(&section.title) {
                Alignment::Center
            } else {
                Alignment::Left
            };
            doc.push(Paragraph::new(heading).bold().aligned(heading_alignment));

            let body = remove_duplicate_title(&section.title, &clean_markdown(&section.content));
            doc.push(Paragraph::new(body).aligned(Alignment::Justify));
        }

        doc.footer = Some(FooterField::PageNumber {
            alignment: Alignment::Center,
        });

        doc
    }
}
