// ==========================================
// 工作簿配置生成器 - 工作簿读取
// ==========================================
// 支持: Excel (.xlsx)
// 职责: 一次性把所有工作表读入内存，转为以 A1 为原点的网格
// 坐标: cell()/records(n) 按 A1 绝对定位；used_*() 从已用区域左上角开始
// ==========================================

use crate::config::CellPosition;
use crate::domain::{CellValue, Record};
use crate::error::{GeneratorError, GeneratorResult};
use crate::importer::key_normalizer::normalize_text;
use calamine::{open_workbook, Data, Range, Reader, SheetType, Xlsx};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

static EMPTY_CELL: CellValue = CellValue::Empty;

// ==========================================
// SheetSource Trait
// ==========================================
// 用途: 按名称访问工作表
// 实现者: Workbook（真实文件或测试中的合成工作表）
pub trait SheetSource {
    /// 工作表名（保持工作簿顺序）
    fn sheet_names(&self) -> Vec<&str>;

    /// 按名称精确查找工作表
    fn sheet(&self, name: &str) -> Option<&Sheet>;
}

// ==========================================
// Sheet - 单个工作表网格
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    name: String,
    rows: Vec<Vec<CellValue>>,
    /// 已用区域左上角 (行, 列)
    origin: (usize, usize),
}

impl Sheet {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            name: name.into(),
            rows,
            origin: (0, 0),
        }
    }

    /// 指定已用区域原点
    pub fn with_origin(mut self, row: usize, col: usize) -> Self {
        self.origin = (row, col);
        self
    }

    /// 由 calamine Range 构造
    ///
    /// Range 从第一个非空单元格开始，这里补齐前导行列，使坐标与 A1 对齐，
    /// 并记下原点供 used_rows / used_records 使用
    pub fn from_range(name: impl Into<String>, range: &Range<Data>) -> Self {
        let (start_row, start_col) = range
            .start()
            .map(|(r, c)| (r as usize, c as usize))
            .unwrap_or((0, 0));

        let mut rows = vec![Vec::new(); start_row];
        for data_row in range.rows() {
            let mut row = vec![CellValue::Empty; start_col];
            row.extend(data_row.iter().map(CellValue::from));
            rows.push(row);
        }

        Self::new(name, rows).with_origin(start_row, start_col)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn origin(&self) -> (usize, usize) {
        self.origin
    }

    /// 从已用区域原点开始的网格行（列同样从原点列开始）
    pub fn used_rows(&self) -> impl Iterator<Item = &[CellValue]> + '_ {
        let (row0, col0) = self.origin;
        self.rows
            .iter()
            .skip(row0)
            .map(move |row| row.get(col0..).unwrap_or(&[]))
    }

    /// 绝对位置取值，越界视为空单元格
    pub fn cell(&self, position: CellPosition) -> &CellValue {
        self.rows
            .get(position.row)
            .and_then(|row| row.get(position.col))
            .unwrap_or(&EMPTY_CELL)
    }

    /// 按表头读取行记录
    ///
    /// # 参数
    /// - header_row: 表头所在行（0 基，A1 绝对行号），其后各行为数据
    ///
    /// # 说明
    /// - 列名经规范化；规范化为空的列被忽略
    /// - 同名列头依次加 _1、_2 后缀，不互相覆盖
    /// - 缺失单元格记为空值
    /// - 完全空白的行被跳过
    pub fn records(&self, header_row: usize) -> Vec<Record> {
        Self::collect_records(self.rows.iter().skip(header_row).map(Vec::as_slice))
    }

    /// 以已用区域首行为表头读取行记录
    pub fn used_records(&self) -> Vec<Record> {
        Self::collect_records(self.used_rows())
    }

    fn collect_records<'a, I>(mut rows: I) -> Vec<Record>
    where
        I: Iterator<Item = &'a [CellValue]>,
    {
        let Some(header) = rows.next() else {
            return Vec::new();
        };
        let columns = Self::header_columns(header);
        if columns.is_empty() {
            return Vec::new();
        }

        rows.filter(|row| !row.iter().all(CellValue::is_empty))
            .map(|row| {
                let mut record = Record::new();
                for (col, key) in &columns {
                    record.insert(key.clone(), row.get(*col).cloned().unwrap_or_default());
                }
                record
            })
            .collect()
    }

    /// 列头 → (列号, 规范化键)
    ///
    /// 重复的原始列头按出现顺序改名为 `<列头>_1`、`<列头>_2`…… 再规范化
    fn header_columns(header: &[CellValue]) -> Vec<(usize, String)> {
        let mut seen: HashMap<String, usize> = HashMap::new();
        let mut columns = Vec::new();

        for (col, cell) in header.iter().enumerate() {
            let raw = cell.to_string();
            if normalize_text(&raw).is_none() {
                continue;
            }

            let mut name = raw.clone();
            let count = seen.get(&raw).copied().unwrap_or(0);
            if count > 0 {
                let mut counter = count;
                loop {
                    name = format!("{}_{}", raw, counter);
                    counter += 1;
                    if !seen.contains_key(&name) {
                        break;
                    }
                }
                seen.insert(raw.clone(), counter);
                seen.insert(name.clone(), 1);
            } else {
                seen.insert(raw.clone(), 1);
            }

            if let Some(key) = normalize_text(&name) {
                columns.push((col, key));
            }
        }

        columns
    }
}

// ==========================================
// Workbook - 内存工作簿
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn from_sheets(sheets: Vec<Sheet>) -> Self {
        Self { sheets }
    }

    /// 打开 .xlsx 文件并读入所有工作表
    ///
    /// # 返回
    /// - Ok(Workbook): 全部工作表网格
    /// - Err: 文件不存在、文件损坏、工作表解析失败（均为致命错误）
    pub fn open<P: AsRef<Path>>(file_path: P) -> GeneratorResult<Self> {
        let path = file_path.as_ref();

        // 检查文件存在
        if !path.exists() {
            return Err(GeneratorError::FileNotFound(path.display().to_string()));
        }

        // 打开 Excel 文件
        let mut workbook: Xlsx<_> = open_workbook(path)
            .map_err(|e: calamine::XlsxError| GeneratorError::ExcelParseError(e.to_string()))?;

        // 只读取普通工作表（跳过图表页）
        let names: Vec<String> = workbook
            .sheets_metadata()
            .iter()
            .filter(|meta| matches!(meta.typ, SheetType::WorkSheet))
            .map(|meta| meta.name.clone())
            .collect();

        let mut sheets = Vec::with_capacity(names.len());
        for name in names {
            let range =
                workbook
                    .worksheet_range(&name)
                    .map_err(|e| GeneratorError::SheetReadError {
                        sheet: name.clone(),
                        message: e.to_string(),
                    })?;
            debug!(sheet = %name, rows = range.height(), "工作表已读取");
            sheets.push(Sheet::from_range(name, &range));
        }

        info!(path = %path.display(), sheets = sheets.len(), "工作簿加载完成");
        Ok(Self { sheets })
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

impl SheetSource for Workbook {
    fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(Sheet::name).collect()
    }

    fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|sheet| sheet.name == name)
    }
}
