//! 文档组装
//!
//! - `model` - 与文件格式无关的文档模型
//! - `markdown` - 生成文本的清理
//! - `assembler` - 文章 → 文档模型

pub mod assembler;
pub mod markdown;
pub mod model;

pub use assembler::DocumentAssembler;
pub use model::{Alignment, DocumentModel, FontSpec, FooterField, Paragraph};
