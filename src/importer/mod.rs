// ==========================================
// 工作簿配置生成器 - 导入层
// ==========================================
// 职责: 读取工作簿，把约定工作表转为中间结构
// 支持: Excel (.xlsx)
// ==========================================

// 模块声明
pub mod key_normalizer;
pub mod sheet_readers;
pub mod workbook;

// 重导出核心类型
pub use key_normalizer::{normalize_key, normalize_text};
pub use sheet_readers::{CategoriesReader, FieldsReader, KeyValueReader, ListsReader, SheetReader};
pub use workbook::{Sheet, SheetSource, Workbook};
