//! 基础设施层
//!
//! 只暴露"把文档模型写成文件内容"的能力

pub mod docx_writer;

pub use docx_writer::DocxWriter;
