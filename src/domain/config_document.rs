// ==========================================
// 工作簿配置生成器 - 配置文档实体
// ==========================================
// 职责: 参数、阶段、档案与根文档的结构定义
// 约定: 所有键都是规范化后的键；重复键一律"后写覆盖"
// ==========================================

use crate::domain::types::{CellValue, FieldValue};
use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use serde::Serialize;

// ==========================================
// Parameter - 字段定义
// ==========================================
// 来自 fields 工作表；阶段中使用的是克隆后再覆写的副本
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Parameter {
    attributes: IndexMap<String, FieldValue>,
}

impl Parameter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入或覆盖属性（已有键保持原位置）
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.attributes.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.attributes.get(key)
    }

    /// 标量属性
    pub fn scalar(&self, key: &str) -> Option<&CellValue> {
        self.get(key).and_then(FieldValue::as_scalar)
    }

    pub fn id(&self) -> Option<&str> {
        self.scalar("id").and_then(CellValue::as_text)
    }

    pub fn datatype(&self) -> Option<&str> {
        self.scalar("datatype").and_then(CellValue::as_text)
    }

    pub fn options(&self) -> Option<&[CellValue]> {
        self.get("options").and_then(FieldValue::as_list)
    }

    pub fn set_options(&mut self, options: Vec<CellValue>) {
        self.set("options", FieldValue::List(options));
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

/// 参数表：字段 ID → 参数
pub type ParameterTable = IndexMap<String, Parameter>;

/// 选项列表：列表 ID → 有序选项
pub type OptionLists = IndexMap<String, Vec<CellValue>>;

/// 分类表：分类 ID → 显示名称
pub type CategoryTable = IndexMap<String, String>;

/// 文档 info 段
pub type Info = IndexMap<String, CellValue>;

// ==========================================
// Phase - 阶段（分类 → 字段 → 明细）
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Phase {
    categories: IndexMap<String, IndexMap<String, Parameter>>,
}

impl Phase {
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入 phase[category][field_id]，同一位置后写覆盖
    pub fn upsert(&mut self, category: &str, field_id: &str, detail: Parameter) {
        self.categories
            .entry(category.to_string())
            .or_default()
            .insert(field_id.to_string(), detail);
    }

    pub fn category(&self, category: &str) -> Option<&IndexMap<String, Parameter>> {
        self.categories.get(category)
    }

    pub fn get(&self, category: &str, field_id: &str) -> Option<&Parameter> {
        self.category(category).and_then(|fields| fields.get(field_id))
    }

    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// 所有分类下的字段条目总数
    pub fn field_count(&self) -> usize {
        self.categories.values().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

// ==========================================
// Profile - 配置档案
// ==========================================
// id/name/pre 只来自 pre_ 工作表；post 只贡献阶段数据
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Profile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<CellValue>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre: Option<Phase>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<Phase>,
}

// ==========================================
// ConfigDocument - 根文档
// ==========================================

/// default 工作表不可覆写的根键
pub const RESERVED_ROOT_KEYS: &[&str] = &["info", "profiles"];

pub const CONFIG_DATE_KEY: &str = "config_date";
pub const DEFAULT_PROFILE_ID_KEY: &str = "default_profile_id";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigDocument {
    pub info: Info,
    pub profiles: IndexMap<String, Profile>,
    pub default_profile_id: CellValue,

    /// default 工作表合并进来的其余根键
    #[serde(flatten)]
    pub extra: IndexMap<String, CellValue>,
}

impl Default for ConfigDocument {
    fn default() -> Self {
        Self {
            info: Info::new(),
            profiles: IndexMap::new(),
            default_profile_id: CellValue::String(String::new()),
            extra: IndexMap::new(),
        }
    }
}

impl ConfigDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// 将一个 default 工作表键合并到根上
    ///
    /// # 返回
    /// - true: 已写入（新增或覆盖）
    /// - false: 键为保留键（info/profiles），未写入
    pub fn merge_root(&mut self, key: &str, value: CellValue) -> bool {
        if RESERVED_ROOT_KEYS.contains(&key) {
            return false;
        }
        if key == DEFAULT_PROFILE_ID_KEY {
            self.default_profile_id = value;
        } else {
            self.extra.insert(key.to_string(), value);
        }
        true
    }

    /// info.config_date 缺失（或为空值）时写入生成时间
    ///
    /// # 返回
    /// - true: 写入了时间戳
    pub fn stamp_config_date(&mut self, now: DateTime<Utc>) -> bool {
        let present = self
            .info
            .get(CONFIG_DATE_KEY)
            .map(CellValue::is_truthy)
            .unwrap_or(false);
        if present {
            return false;
        }
        self.info.insert(
            CONFIG_DATE_KEY.to_string(),
            CellValue::String(now.to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        true
    }
}
