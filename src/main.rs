// ==========================================
// 工作簿配置生成器 - 命令行入口
// ==========================================
// 用法: workbook-config-gen [INPUT] [OUTPUT]
// 默认: metadata.xlsx → metadata.yaml（相对当前工作目录）
// ==========================================

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use workbook_config_gen::config::cli_defaults;
use workbook_config_gen::{logging, ConfigBuilder, GeneratorConfig, YamlWriter};

/// 将元数据工作簿转换为 YAML 配置文档
#[derive(Parser)]
#[command(name = "workbook-config-gen", version)]
#[command(about = "元数据工作簿 → YAML 配置文档", long_about = None)]
struct Cli {
    /// 输入工作簿路径
    #[arg(default_value = cli_defaults::INPUT)]
    input: PathBuf,

    /// 输出 YAML 路径
    #[arg(default_value = cli_defaults::OUTPUT)]
    output: PathBuf,

    /// 日志详细程度（-v 为 debug，-vv 为 trace）
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// 相对路径按当前工作目录解析
fn resolve(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("无法获取当前工作目录")?;
    Ok(cwd.join(path))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // 初始化日志系统
    logging::init(cli.verbose);
    tracing::debug!("{} v{}", workbook_config_gen::APP_NAME, workbook_config_gen::VERSION);

    let input = resolve(&cli.input)?;
    println!("ℹ️ 输入文件: {}", input.display());
    let output = resolve(&cli.output)?;
    println!("ℹ️ 输出文件: {}", output.display());

    let builder = ConfigBuilder::new(GeneratorConfig::default());
    let document = builder
        .build_from_file(&input)
        .with_context(|| format!("配置生成失败: {}", input.display()))?;
    println!("✅ 生成成功");

    YamlWriter
        .write_to_file(&document, &output)
        .with_context(|| format!("写出失败: {}", output.display()))?;
    println!("✅ 已由 {} 写出 {}", input.display(), output.display());

    Ok(())
}
