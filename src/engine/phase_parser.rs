// ==========================================
// 工作簿配置生成器 - 阶段解析器
// ==========================================
// 职责: pre_/post_ 工作表 → Phase（分类 → 字段 → 明细）
// 输入: 工作表 + 参数表 + 分类表
// 红线: 只能引用 fields 中已声明的字段；覆写不影响共享参数
// ==========================================

use crate::config::GeneratorConfig;
use crate::domain::{CategoryTable, CellValue, Parameter, ParameterTable, Phase, Record};
use crate::importer::key_normalizer::{fold_text, normalize_key};
use crate::importer::workbook::Sheet;
use tracing::debug;

/// 未填分类时使用的分类键
pub const GENERAL_CATEGORY: &str = "general";

pub struct PhaseParser {
    header_row: usize,
}

impl PhaseParser {
    /// # 参数
    /// - header_row: 列头所在行（之前的行保留给元数据）
    pub fn new(header_row: usize) -> Self {
        Self { header_row }
    }

    pub fn parse(
        &self,
        sheet: &Sheet,
        parameters: &ParameterTable,
        categories: &CategoryTable,
    ) -> Phase {
        let mut phase = Phase::new();

        for record in sheet.records(self.header_row) {
            let Some(field_id) = Self::resolve_field_id(&record) else {
                continue;
            };
            let Some(base) = parameters.get(&field_id) else {
                debug!(sheet = sheet.name(), field_id = %field_id, "字段未声明，已跳过");
                continue;
            };

            let category = Self::resolve_category(&record, categories);
            let detail = Self::overlay(base, &record);
            phase.upsert(&category, &field_id, detail);
        }

        debug!(
            sheet = sheet.name(),
            fields = phase.field_count(),
            "阶段解析完成"
        );
        phase
    }

    /// field_id 列优先，其次 id 列
    fn resolve_field_id(record: &Record) -> Option<String> {
        let raw = match record.get("field_id") {
            Some(value) if value.is_truthy() => Some(value),
            _ => record.get("id"),
        };
        raw.and_then(normalize_key)
    }

    /// 分类键；已登记的分类换成显示名称
    fn resolve_category(record: &Record, categories: &CategoryTable) -> String {
        let key = record
            .get("category")
            .filter(|value| value.is_truthy())
            .and_then(normalize_key)
            .unwrap_or_else(|| GENERAL_CATEGORY.to_string());

        match categories.get(&key) {
            Some(display_name) if !display_name.is_empty() => display_name.clone(),
            _ => key,
        }
    }

    /// 克隆参数并叠加本阶段的 required / default / description
    fn overlay(base: &Parameter, record: &Record) -> Parameter {
        let mut detail = base.clone();

        // required 取规范化结果：非文本值无键，输出 null
        if let Some(required) = record.get("required").filter(|v| !v.is_empty()) {
            let value = match required.as_text() {
                Some(text) => CellValue::String(fold_text(text)),
                None => CellValue::Null,
            };
            detail.set("required", value);
        }
        for key in ["default", "description"] {
            if let Some(value) = record.get(key).filter(|v| !v.is_empty()) {
                detail.set(key, value.clone());
            }
        }

        detail
    }
}

impl Default for PhaseParser {
    fn default() -> Self {
        Self::new(GeneratorConfig::default().phase_header_row)
    }
}
