// ==========================================
// 工作簿配置生成器 - 核心库
// ==========================================
// 输入: 元数据工作簿 (.xlsx)
// 输出: 分层 YAML 配置文档
// 系统定位: 一次性批处理转换（读取 → 规范化 → 装配 → 写出）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 单元格值与文档实体
pub mod domain;

// 导入层 - 工作簿与约定工作表
pub mod importer;

// 引擎层 - 阶段解析与档案装配
pub mod engine;

// 导出层 - YAML 写出
pub mod exporter;

// 配置层 - 生成器参数
pub mod config;

// 错误类型
pub mod error;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

pub use config::GeneratorConfig;
pub use domain::{CellValue, ConfigDocument, Parameter, Phase, Profile};
pub use engine::{ConfigBuilder, PhaseParser, ProfileAssembler};
pub use error::{GeneratorError, GeneratorResult};
pub use exporter::YamlWriter;
pub use importer::{Sheet, SheetSource, Workbook};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "工作簿配置生成器";
