// ==========================================
// 工作簿配置生成器 - 约定工作表读取器
// ==========================================
// 职责: fields / lists / categories / info / default 五张表
//       各自读成中间结构，互不依赖
// 约定: 无法解析出 ID 的行静默丢弃；重复 ID 后写覆盖
//       五张表均从已用区域左上角开始读取
// ==========================================

use crate::domain::{CategoryTable, CellValue, Info, OptionLists, Parameter, ParameterTable};
use crate::importer::key_normalizer::normalize_key;
use crate::importer::workbook::Sheet;
use tracing::debug;

// ==========================================
// SheetReader Trait
// ==========================================
// 用途: 单张工作表 → 中间结构
pub trait SheetReader {
    type Output;

    fn read(&self, sheet: &Sheet) -> Self::Output;
}

// ==========================================
// FieldsReader - 参数表
// ==========================================
pub struct FieldsReader;

impl SheetReader for FieldsReader {
    type Output = ParameterTable;

    fn read(&self, sheet: &Sheet) -> ParameterTable {
        let mut parameters = ParameterTable::new();

        for (row_idx, record) in sheet.used_records().into_iter().enumerate() {
            let mut param = Parameter::new();
            for (key, value) in record {
                // unit 为空时整列不出现
                if key == "unit" && value.is_blank() {
                    continue;
                }
                param.set(key, value);
            }

            let Some(id) = Self::resolve_id(&param) else {
                debug!(sheet = sheet.name(), row = row_idx + 1, "字段行无 ID，已跳过");
                continue;
            };

            param.set("id", CellValue::String(id.clone()));
            parameters.insert(id, param);
        }

        parameters
    }
}

impl FieldsReader {
    /// id 列优先，其次 field_id 列
    fn resolve_id(param: &Parameter) -> Option<String> {
        let raw = match param.scalar("id") {
            Some(id) if id.is_truthy() => Some(id),
            _ => param.scalar("field_id"),
        };
        raw.and_then(normalize_key)
    }
}

// ==========================================
// ListsReader - 选项列表
// ==========================================
// 首行为列表 ID，向下逐行收集非空单元格
pub struct ListsReader;

impl SheetReader for ListsReader {
    type Output = OptionLists;

    fn read(&self, sheet: &Sheet) -> OptionLists {
        let mut lists = OptionLists::new();
        let mut rows = sheet.used_rows();
        let Some(header) = rows.next() else {
            return lists;
        };

        let ids: Vec<Option<String>> = header.iter().map(normalize_key).collect();
        for id in ids.iter().flatten() {
            lists.entry(id.clone()).or_default();
        }

        for row in rows {
            for (col, id) in ids.iter().enumerate() {
                let (Some(id), Some(value)) = (id, row.get(col)) else {
                    continue;
                };
                if value.is_empty() {
                    continue;
                }
                if let Some(options) = lists.get_mut(id) {
                    options.push(value.clone());
                }
            }
        }

        lists
    }
}

// ==========================================
// CategoriesReader - 分类表
// ==========================================
pub struct CategoriesReader;

impl SheetReader for CategoriesReader {
    type Output = CategoryTable;

    fn read(&self, sheet: &Sheet) -> CategoryTable {
        let mut categories = CategoryTable::new();

        for record in sheet.used_records() {
            let Some(id) = record.get("id").and_then(normalize_key) else {
                continue;
            };
            let display_name = match record.get("display_name") {
                Some(name) if name.is_truthy() => name.to_string(),
                _ => id.clone(),
            };
            categories.insert(id, display_name);
        }

        categories
    }
}

// ==========================================
// KeyValueReader - 两列键值表（info / default）
// ==========================================
// 无表头；已用区域首列为键，次列为值
pub struct KeyValueReader;

impl SheetReader for KeyValueReader {
    type Output = Info;

    fn read(&self, sheet: &Sheet) -> Info {
        let mut entries = Info::new();

        for row in sheet.used_rows() {
            let (Some(key), Some(value)) = (row.first(), row.get(1)) else {
                continue;
            };
            if !key.is_truthy() || value.is_empty() {
                continue;
            }
            if let Some(key) = normalize_key(key) {
                entries.insert(key, value.clone());
            }
        }

        entries
    }
}
