// ==========================================
// 工作簿配置生成器 - YAML 写出
// ==========================================
// 约定: 先完整渲染再写文件，失败时不留半截输出
// ==========================================

use crate::domain::ConfigDocument;
use crate::error::{GeneratorError, GeneratorResult};
use std::fs;
use std::path::Path;
use tracing::info;

pub struct YamlWriter;

impl YamlWriter {
    /// 渲染为 YAML 文本
    pub fn render(&self, document: &ConfigDocument) -> GeneratorResult<String> {
        Ok(serde_yaml::to_string(document)?)
    }

    /// 渲染并写入文件（覆盖已有文件）
    pub fn write_to_file<P: AsRef<Path>>(
        &self,
        document: &ConfigDocument,
        output_path: P,
    ) -> GeneratorResult<()> {
        let path = output_path.as_ref();
        let yaml = self.render(document)?;

        fs::write(path, yaml.as_bytes()).map_err(|e| GeneratorError::OutputWriteError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        info!(path = %path.display(), bytes = yaml.len(), "YAML 文档已写出");
        Ok(())
    }
}
