//! DOCX 写出器 - 基础设施层
//!
//! 把文档模型序列化为最小的 WordprocessingML 包，不认识文章/章节

use std::io::{Cursor, Write};

use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::document::{Alignment, DocumentModel, FontSpec, FooterField, Paragraph};
use crate::error::AppResult;

const NS_W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/><Override PartName="/word/footer1.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.footer+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const DOCUMENT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/footer" Target="footer1.xml"/></Relationships>"#;

/// 页脚关系 ID（与 DOCUMENT_RELS 对应）
const FOOTER_REL_ID: &str = "rId2";

/// DOCX 写出器
#[derive(Debug, Default, Clone, Copy)]
pub struct DocxWriter;

impl DocxWriter {
    pub fn new() -> Self {
        Self
    }

    /// 序列化为 .docx 文件内容
    pub fn to_bytes(&self, doc: &DocumentModel) -> AppResult<Vec<u8>> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

        let parts: [(&str, String); 6] = [
            ("[Content_Types].xml", CONTENT_TYPES.to_string()),
            ("_rels/.rels", ROOT_RELS.to_string()),
            ("word/_rels/document.xml.rels", DOCUMENT_RELS.to_string()),
            ("word/styles.xml", styles_xml(&doc.font)),
            ("word/document.xml", document_xml(doc)),
            ("word/footer1.xml", footer_xml(doc)),
        ];

        for (name, content) in parts {
            zip.start_file(name, options)?;
            zip.write_all(content.as_bytes())
                .map_err(zip::result::ZipError::Io)?;
        }

        Ok(zip.finish()?.into_inner())
    }
}

fn styles_xml(font: &FontSpec) -> String {
    let family = escape_attr(&font.family);
    // 字号以半磅为单位
    let half_points = font.size_pt * 2;
    format!(
        r#"{XML_DECL}
<w:styles xmlns:w="{NS_W}"><w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="{family}" w:hAnsi="{family}" w:cs="{family}" w:eastAsia="{family}"/><w:sz w:val="{half_points}"/><w:szCs w:val="{half_points}"/></w:rPr></w:rPrDefault></w:docDefaults><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style></w:styles>"#
    )
}

fn document_xml(doc: &DocumentModel) -> String {
    let body: String = doc.paragraphs.iter().map(paragraph_xml).collect();
    let footer_ref = if doc.footer.is_some() {
        format!(r#"<w:footerReference w:type="default" r:id="{FOOTER_REL_ID}"/>"#)
    } else {
        String::new()
    };

    format!(
        r#"{XML_DECL}
<w:document xmlns:w="{NS_W}" xmlns:r="{NS_R}"><w:body>{body}<w:sectPr>{footer_ref}<w:pgSz w:w="11906" w:h="16838"/><w:pgMar w:top="1134" w:right="850" w:bottom="1134" w:left="1701" w:header="708" w:footer="708" w:gutter="0"/></w:sectPr></w:body></w:document>"#
    )
}

fn footer_xml(doc: &DocumentModel) -> String {
    let paragraph = match doc.footer {
        Some(FooterField::PageNumber { alignment }) => format!(
            r#"<w:p><w:pPr>{}</w:pPr><w:fldSimple w:instr="PAGE"><w:r><w:t>1</w:t></w:r></w:fldSimple></w:p>"#,
            justification(alignment)
        ),
        None => "<w:p/>".to_string(),
    };

    format!(r#"{XML_DECL}
<w:ftr xmlns:w="{NS_W}" xmlns:r="{NS_R}">{paragraph}</w:ftr>"#)
}

fn paragraph_xml(p: &Paragraph) -> String {
    let run_props = if p.bold { "<w:rPr><w:b/></w:rPr>" } else { "" };

    let mut runs = String::new();
    for (i, line) in p.text.split('\n').enumerate() {
        if i > 0 {
            runs.push_str("<w:br/>");
        }
        runs.push_str(&format!(r#"<w:t xml:space="preserve">{}</w:t>"#, escape(line)));
    }

    format!(
        "<w:p><w:pPr>{}</w:pPr><w:r>{}{}</w:r></w:p>",
        justification(p.alignment),
        run_props,
        runs
    )
}

fn justification(alignment: Alignment) -> &'static str {
    match alignment {
        Alignment::Left => r#"<w:jc w:val="left"/>"#,
        Alignment::Center => r#"<w:jc w:val="center"/>"#,
        Alignment::Justify => r#"<w:jc w:val="both"/>"#,
    }
}

/// 文本节点转义
fn escape(text: &str) -> String {
    html_escape::encode_text(&xml_chars(text)).into_owned()
}

/// 双引号属性值转义
fn escape_attr(text: &str) -> String {
    html_escape::encode_double_quoted_attribute(&xml_chars(text)).into_owned()
}

/// 去掉 XML 1.0 不允许的字符（除制表符外的控制字符、U+FFFE、U+FFFF）
fn xml_chars(text: &str) -> String {
    text.chars()
        .filter(|c| (!c.is_control() || *c == '\t') && !matches!(c, '\u{FFFE}' | '\u{FFFF}'))
        .collect()
}
