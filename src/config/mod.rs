// ==========================================
// 工作簿配置生成器 - 配置层
// ==========================================
// 职责: 生成器参数（固定单元格位置、表头偏移、选项类型白名单）
//       以及约定的工作表名与命令行默认路径
// ==========================================

pub mod generator_config;

// 重导出核心配置
pub use generator_config::{cli_defaults, sheet_names, CellPosition, GeneratorConfig};
