// ==========================================
// 工作簿配置生成器 - 错误类型
// ==========================================
// 工具: thiserror 派生宏
// 约定: 工作表/行缺失不是错误；文件读写失败一律致命
// ==========================================

use thiserror::Error;

/// 生成器错误类型
#[derive(Error, Debug)]
pub enum GeneratorError {
    // ===== 输入文件错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("工作表读取失败 (sheet: {sheet}): {message}")]
    SheetReadError { sheet: String, message: String },

    // ===== 输出错误 =====
    #[error("YAML 序列化失败: {0}")]
    YamlSerializeError(String),

    #[error("输出文件写入失败 ({path}): {message}")]
    OutputWriteError { path: String, message: String },

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for GeneratorError {
    fn from(err: std::io::Error) -> Self {
        GeneratorError::FileReadError(err.to_string())
    }
}

// 实现 From<serde_yaml::Error>
impl From<serde_yaml::Error> for GeneratorError {
    fn from(err: serde_yaml::Error) -> Self {
        GeneratorError::YamlSerializeError(err.to_string())
    }
}

/// Result 类型别名
pub type GeneratorResult<T> = Result<T, GeneratorError>;
