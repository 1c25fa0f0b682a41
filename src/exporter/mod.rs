// ==========================================
// 工作簿配置生成器 - 导出层
// ==========================================
// 职责: 配置文档 → YAML 文本 / 文件
// ==========================================

pub mod yaml_writer;

pub use yaml_writer::YamlWriter;
