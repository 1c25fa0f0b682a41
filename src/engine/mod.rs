// ==========================================
// 工作簿配置生成器 - 引擎层
// ==========================================
// 职责: 阶段解析、档案装配、配置文档编排
// ==========================================

pub mod config_builder;
pub mod phase_parser;
pub mod profile_assembler;

// 重导出核心引擎
pub use config_builder::ConfigBuilder;
pub use phase_parser::{PhaseParser, GENERAL_CATEGORY};
pub use profile_assembler::{discover_profile_bases, ProfileAssembler};
