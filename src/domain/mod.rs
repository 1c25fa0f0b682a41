// ==========================================
// 工作簿配置生成器 - 领域模型层
// ==========================================
// 职责: 定义单元格值、参数、阶段、档案与根文档
// 红线: 不含工作簿读取逻辑，不含装配逻辑
// ==========================================

pub mod config_document;
pub mod types;

// 重导出核心类型
pub use config_document::{
    CategoryTable, ConfigDocument, Info, OptionLists, Parameter, ParameterTable, Phase, Profile,
    CONFIG_DATE_KEY, DEFAULT_PROFILE_ID_KEY, RESERVED_ROOT_KEYS,
};
pub use types::{CellValue, FieldValue, Record};
