// ==========================================
// 工作簿配置生成器 - 档案装配器
// ==========================================
// 职责: 由 pre_<base> / post_<base> 工作表对装配配置档案
// 约定: 只扫描 pre_ 前缀发现档案；只有 post_ 工作表的档案不会出现
// ==========================================

use crate::config::{sheet_names, CellPosition, GeneratorConfig};
use crate::domain::{CategoryTable, CellValue, ParameterTable, Profile};
use crate::engine::phase_parser::PhaseParser;
use crate::importer::key_normalizer::{normalize_key, normalize_text};
use crate::importer::workbook::{Sheet, SheetSource};
use indexmap::IndexMap;
use tracing::{debug, info};

/// 从工作表名发现档案基名
///
/// 名称以 pre_ 开头（不区分大小写）者，规范化后去掉前缀；
/// 结果去重并保持首次出现顺序
pub fn discover_profile_bases<'a, I>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut bases: Vec<String> = Vec::new();

    for name in names {
        if !name.to_lowercase().starts_with(sheet_names::PRE_PREFIX) {
            continue;
        }
        let Some(normalized) = normalize_text(name) else {
            continue;
        };
        let base = normalized
            .strip_prefix(sheet_names::PRE_PREFIX)
            .unwrap_or(&normalized)
            .to_string();
        if !bases.contains(&base) {
            bases.push(base);
        }
    }

    bases
}

/// 按 `<prefix><base>`、`<PREFIX><base>` 顺序精确查找工作表
fn find_phase_sheet<'s, S: SheetSource>(
    source: &'s S,
    prefix: &str,
    base: &str,
) -> Option<&'s Sheet> {
    source
        .sheet(&format!("{}{}", prefix, base))
        .or_else(|| source.sheet(&format!("{}{}", prefix.to_uppercase(), base)))
}

pub struct ProfileAssembler {
    phase_parser: PhaseParser,
    id_cell: CellPosition,
    name_cell: CellPosition,
}

impl ProfileAssembler {
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            phase_parser: PhaseParser::new(config.phase_header_row),
            id_cell: config.profile_id_cell,
            name_cell: config.profile_name_cell,
        }
    }

    /// 装配全部档案：基名 → 档案
    pub fn assemble<S: SheetSource>(
        &self,
        source: &S,
        parameters: &ParameterTable,
        categories: &CategoryTable,
    ) -> IndexMap<String, Profile> {
        let bases = discover_profile_bases(source.sheet_names());
        debug!(bases = ?bases, "发现档案基名");

        let mut profiles = IndexMap::new();
        for base in bases {
            let mut profile = Profile::default();

            if let Some(pre_sheet) = find_phase_sheet(source, sheet_names::PRE_PREFIX, &base) {
                profile.id = Some(self.read_profile_id(pre_sheet, &base));
                profile.name = Some(self.read_profile_name(pre_sheet, &base));
                profile.pre = Some(self.phase_parser.parse(pre_sheet, parameters, categories));
            } else {
                debug!(base = %base, "未找到精确命名的 pre_ 工作表");
            }

            if let Some(post_sheet) = find_phase_sheet(source, sheet_names::POST_PREFIX, &base) {
                profile.post = Some(self.phase_parser.parse(post_sheet, parameters, categories));
            }

            info!(
                profile = %base,
                pre = profile.pre.is_some(),
                post = profile.post.is_some(),
                "档案装配完成"
            );
            profiles.insert(base, profile);
        }

        profiles
    }

    /// 档案 ID：单元格文本规范化，否则为基名
    fn read_profile_id(&self, sheet: &Sheet, base: &str) -> String {
        let cell = sheet.cell(self.id_cell);
        if !cell.is_truthy() {
            return base.to_string();
        }
        normalize_key(cell).unwrap_or_else(|| base.to_string())
    }

    /// 档案名称：单元格原值，否则为基名
    fn read_profile_name(&self, sheet: &Sheet, base: &str) -> CellValue {
        let cell = sheet.cell(self.name_cell);
        if cell.is_truthy() {
            cell.clone()
        } else {
            CellValue::String(base.to_string())
        }
    }
}

impl Default for ProfileAssembler {
    fn default() -> Self {
        Self::new(&GeneratorConfig::default())
    }
}
