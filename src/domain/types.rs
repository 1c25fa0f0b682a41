// ==========================================
// 工作簿配置生成器 - 领域类型定义
// ==========================================
// 职责: 单元格标量值、字段属性值、行记录
// 约定: 列集合由工作簿决定，因此行记录是有序映射而非固定结构体
// ==========================================

use calamine::Data;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::fmt;

// ==========================================
// 单元格标量值 (Cell Value)
// ==========================================
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    /// 无键值（规范化结果缺失），输出为 YAML null
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

// f64 可精确表示的最大整数
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

impl CellValue {
    /// 整数值的浮点数按整数携带，输出 `5` 而不是 `5.0`
    pub fn from_f64(value: f64) -> Self {
        if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
            CellValue::Int(value as i64)
        } else {
            CellValue::Float(value)
        }
    }

    /// 文本值（仅 String 变体）
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// 空单元格或空字符串
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty | CellValue::Null => true,
            CellValue::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// 空值或仅含空白的文本
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty | CellValue::Null => true,
            CellValue::String(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// 取值意义上的"有值"：空、0、NaN、false 都视为无值
    pub fn is_truthy(&self) -> bool {
        match self {
            CellValue::Empty | CellValue::Null => false,
            CellValue::Bool(b) => *b,
            CellValue::Int(i) => *i != 0,
            CellValue::Float(f) => *f != 0.0 && !f.is_nan(),
            CellValue::String(s) => !s.is_empty(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty | CellValue::Null => Ok(()),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Int(i) => write!(f, "{}", i),
            CellValue::Float(v) => write!(f, "{}", v),
            CellValue::String(s) => write!(f, "{}", s),
        }
    }
}

// 空单元格输出为空字符串；Null 输出为 null
impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Empty => serializer.serialize_str(""),
            CellValue::Null => serializer.serialize_unit(),
            CellValue::Bool(b) => serializer.serialize_bool(*b),
            CellValue::Int(i) => serializer.serialize_i64(*i),
            CellValue::Float(v) => serializer.serialize_f64(*v),
            CellValue::String(s) => serializer.serialize_str(s),
        }
    }
}

impl From<&Data> for CellValue {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty => CellValue::Empty,
            Data::Bool(b) => CellValue::Bool(*b),
            Data::Int(i) => CellValue::Int(*i),
            Data::Float(f) => CellValue::from_f64(*f),
            // 日期按序列号携带，不做格式化
            Data::DateTime(dt) => CellValue::from_f64(dt.as_f64()),
            Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
                CellValue::String(s.clone())
            }
            Data::Error(e) => CellValue::String(e.to_string()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::String(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::String(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::from_f64(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

// ==========================================
// 字段属性值 (Field Value)
// ==========================================
// 参数属性大多是标量；options 是有序序列
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Scalar(CellValue),
    List(Vec<CellValue>),
}

impl FieldValue {
    pub fn as_scalar(&self) -> Option<&CellValue> {
        match self {
            FieldValue::Scalar(v) => Some(v),
            FieldValue::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[CellValue]> {
        match self {
            FieldValue::List(items) => Some(items.as_slice()),
            FieldValue::Scalar(_) => None,
        }
    }
}

impl From<CellValue> for FieldValue {
    fn from(value: CellValue) -> Self {
        FieldValue::Scalar(value)
    }
}

/// 行记录：规范化列名 → 单元格值（保持列顺序）
pub type Record = IndexMap<String, CellValue>;
