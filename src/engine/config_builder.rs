// ==========================================
// 工作簿配置生成器 - 配置文档编排器
// ==========================================
// 用途: 协调读取器、选项挂载、时间戳与档案装配
// 流程:
// 1. fields → 参数表
// 2. lists → 选项列表
// 3. categories → 分类表
// 4. info → 文档 info 段
// 5. default → 合并到文档根
// 6. 为下拉类字段挂载 options
// 7. 缺失时写入 config_date
// 8. 装配档案
// 约定: 任一约定工作表缺失都按空输入处理
// ==========================================

use crate::config::{sheet_names, GeneratorConfig};
use crate::domain::{ConfigDocument, OptionLists, ParameterTable};
use crate::engine::profile_assembler::ProfileAssembler;
use crate::error::GeneratorResult;
use crate::importer::sheet_readers::{
    CategoriesReader, FieldsReader, KeyValueReader, ListsReader, SheetReader,
};
use crate::importer::workbook::{SheetSource, Workbook};
use chrono::{DateTime, Utc};
use std::path::Path;
use tracing::{debug, info, warn};

/// 读取可选工作表；缺失时返回 None
fn read_optional<S, R>(source: &S, reader: &R, name: &str) -> Option<R::Output>
where
    S: SheetSource,
    R: SheetReader,
{
    match source.sheet(name) {
        Some(sheet) => Some(reader.read(sheet)),
        None => {
            debug!(sheet = name, "工作表不存在，按空处理");
            None
        }
    }
}

// ==========================================
// ConfigBuilder - 配置文档编排器
// ==========================================
pub struct ConfigBuilder {
    config: GeneratorConfig,
    assembler: ProfileAssembler,
}

impl ConfigBuilder {
    pub fn new(config: GeneratorConfig) -> Self {
        let assembler = ProfileAssembler::new(&config);
        Self { config, assembler }
    }

    /// 打开工作簿文件并生成配置文档
    ///
    /// # 返回
    /// - Err: 文件不存在或无法解析（致命，不重试）
    pub fn build_from_file<P: AsRef<Path>>(&self, file_path: P) -> GeneratorResult<ConfigDocument> {
        let workbook = Workbook::open(file_path)?;
        Ok(self.build(&workbook))
    }

    /// 以当前时间生成配置文档
    pub fn build<S: SheetSource>(&self, source: &S) -> ConfigDocument {
        self.build_at(source, Utc::now())
    }

    /// 以给定时间生成配置文档（now 仅在 info 无 config_date 时使用）
    pub fn build_at<S: SheetSource>(&self, source: &S, now: DateTime<Utc>) -> ConfigDocument {
        let mut document = ConfigDocument::new();

        let mut parameters =
            read_optional(source, &FieldsReader, sheet_names::FIELDS).unwrap_or_default();
        let lists = read_optional(source, &ListsReader, sheet_names::LISTS).unwrap_or_default();
        let categories =
            read_optional(source, &CategoriesReader, sheet_names::CATEGORIES).unwrap_or_default();

        if let Some(info) = read_optional(source, &KeyValueReader, sheet_names::INFO) {
            document.info = info;
        }

        if let Some(defaults) = read_optional(source, &KeyValueReader, sheet_names::DEFAULT) {
            for (key, value) in defaults {
                if !document.merge_root(&key, value) {
                    warn!(key = %key, "default 工作表中的保留键已忽略");
                }
            }
        }

        self.attach_options(&mut parameters, &lists);

        if document.stamp_config_date(now) {
            debug!("info 未提供 config_date，已写入生成时间");
        }

        document.profiles = self.assembler.assemble(source, &parameters, &categories);

        info!(
            parameters = parameters.len(),
            lists = lists.len(),
            categories = categories.len(),
            profiles = document.profiles.len(),
            "配置文档生成完成"
        );
        document
    }

    /// 为选项类字段挂载同名列表；没有同名列表时挂空列表
    fn attach_options(&self, parameters: &mut ParameterTable, lists: &OptionLists) {
        for (id, param) in parameters.iter_mut() {
            let takes_options = param
                .datatype()
                .map(|datatype| self.config.takes_options(datatype))
                .unwrap_or(false);
            if !takes_options {
                continue;
            }
            let options = lists.get(id).cloned().unwrap_or_default();
            debug!(field_id = %id, options = options.len(), "挂载选项列表");
            param.set_options(options);
        }
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}
