// ==========================================
// 工作簿配置生成器 - 键规范化
// ==========================================
// 职责: 工作表名、列头、查找值统一为稳定标识
// 规则: TRIM → 小写 → 连续空白折叠为单个下划线
// ==========================================

use crate::domain::CellValue;

/// 折叠文本（结果可能为空串）
pub fn fold_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

/// 规范化文本键
///
/// # 返回
/// - Some(String): 规范化后的键
/// - None: 规范化结果为空
pub fn normalize_text(text: &str) -> Option<String> {
    let key = fold_text(text);
    if key.is_empty() {
        None
    } else {
        Some(key)
    }
}

/// 规范化单元格值；非文本值没有键
pub fn normalize_key(value: &CellValue) -> Option<String> {
    value.as_text().and_then(normalize_text)
}
