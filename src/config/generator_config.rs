// ==========================================
// 工作簿配置生成器 - 生成器参数
// ==========================================
// 职责: 集中定义工作簿布局约定，供读取器与装配器共用
// ==========================================

/// 约定的工作表名（大小写精确匹配）
pub mod sheet_names {
    pub const FIELDS: &str = "fields";
    pub const LISTS: &str = "lists";
    pub const CATEGORIES: &str = "categories";
    pub const INFO: &str = "info";
    pub const DEFAULT: &str = "default";

    /// 前置阶段工作表前缀（发现时不区分大小写）
    pub const PRE_PREFIX: &str = "pre_";
    /// 后置阶段工作表前缀
    pub const POST_PREFIX: &str = "post_";
}

/// 命令行默认路径（相对当前工作目录）
pub mod cli_defaults {
    pub const INPUT: &str = "metadata.xlsx";
    pub const OUTPUT: &str = "metadata.yaml";
}

/// 单元格绝对位置（0 基，行在前）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPosition {
    pub row: usize,
    pub col: usize,
}

impl CellPosition {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

// ==========================================
// GeneratorConfig - 生成器参数
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// 阶段工作表的列头所在行（前 3 行保留给元数据）
    pub phase_header_row: usize,

    /// 档案 ID 单元格（B1）
    pub profile_id_cell: CellPosition,

    /// 档案名称单元格（B2）
    pub profile_name_cell: CellPosition,

    /// 需要挂载选项列表的 datatype（精确匹配）
    pub option_datatypes: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            phase_header_row: 3,
            profile_id_cell: CellPosition::new(0, 1),
            profile_name_cell: CellPosition::new(1, 1),
            option_datatypes: vec!["dropdown".to_string(), "text_suggestions".to_string()],
        }
    }
}

impl GeneratorConfig {
    /// 判断 datatype 是否需要挂载选项列表
    pub fn takes_options(&self, datatype: &str) -> bool {
        self.option_datatypes.iter().any(|d| d == datatype)
    }
}
