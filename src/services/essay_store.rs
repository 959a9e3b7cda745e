//! 文章保存服务 - 业务能力层
//!
//! 只负责"把文档写到输出目录"能力，不关心流程

use std::path::PathBuf;

use tokio::fs;
use tracing::debug;

use crate::document::DocumentModel;
use crate::error::{AppError, AppResult};
use crate::infrastructure::DocxWriter;

/// 文章保存服务
///
/// 同名文件直接覆盖
pub struct EssayStore {
    output_dir: PathBuf,
    writer: DocxWriter,
}

impl EssayStore {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            writer: DocxWriter::new(),
        }
    }

    /// 保存文档
    ///
    /// # 参数
    /// - `file_name`: 文件名（已清理）
    /// - `doc`: 文档模型
    ///
    /// # 返回
    /// 写入的完整路径
    pub async fn save(&self, file_name: &str, doc: &DocumentModel) -> AppResult<PathBuf> {
        let bytes = self.writer.to_bytes(doc)?;

        fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| AppError::file_write_failed(self.output_dir.display().to_string(), e))?;

        let path = self.output_dir.join(file_name);
        debug!("写入文档: {} ({} 字节)", path.display(), bytes.len());

        fs::write(&path, bytes)
            .await
            .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))?;

        Ok(path)
    }
}
