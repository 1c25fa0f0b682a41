// ==========================================
// 工作簿 → YAML 完整流程集成测试
// ==========================================
// 测试目标: 真实 .xlsx 文件经读取、装配、写出后的文档结构
// ==========================================


use chrono::{DateTime, Utc};
use serde_yaml::Value;
use test_helpers::{
    read_yaml, temp_paths, write_basic_workbook, write_typed_workbook, write_workbook, TestCell,
};
use workbook_config_gen::{logging, ConfigBuilder, GeneratorError, YamlWriter};

/// 生成并写出，返回解析后的 YAML
fn generate(input: &std::path::Path, output: &std::path::Path) -> Value {
    let document = ConfigBuilder::default()
        .build_from_file(input)
        .expect("Generation should succeed");
    YamlWriter
        .write_to_file(&document, output)
        .expect("Write should succeed");
    read_yaml(output)
}

fn strings(values: &[&str]) -> Value {
    Value::Sequence(values.iter().map(|v| Value::from(*v)).collect())
}

#[test]
fn test_dropdown_options_reach_profile_phase() {
    logging::init_test();
    let (_dir, input, output) = temp_paths();
    write_basic_workbook(&input).expect("Failed to write workbook");

    let yaml = generate(&input, &output);

    let color = &yaml["profiles"]["basic"]["pre"]["general"]["color"];
    assert_eq!(color["options"], strings(&["Red", "Blue"]));
    assert_eq!(color["id"], Value::from("color"));
    assert_eq!(color["datatype"], Value::from("dropdown"));

    // B1/B2 为空时 id/name 取基名
    assert_eq!(yaml["profiles"]["basic"]["id"], Value::from("basic"));
    assert_eq!(yaml["profiles"]["basic"]["name"], Value::from("basic"));
    assert!(yaml["profiles"]["basic"].get("post").is_none());
}

#[test]
fn test_config_date_defaults_to_generation_time() {
    logging::init_test();
    let (_dir, input, output) = temp_paths();
    write_basic_workbook(&input).expect("Failed to write workbook");

    let before = Utc::now();
    let yaml = generate(&input, &output);
    let after = Utc::now();

    let raw = yaml["info"]["config_date"]
        .as_str()
        .expect("config_date should be a string");
    let stamped = DateTime::parse_from_rfc3339(raw)
        .expect("config_date should be ISO-8601")
        .with_timezone(&Utc);

    // 毫秒精度截断，允许 1ms 误差
    assert!(stamped >= before - chrono::Duration::milliseconds(1));
    assert!(stamped <= after);
}

#[test]
fn test_info_and_default_sheets() {
    logging::init_test();
    let (_dir, input, output) = temp_paths();
    write_workbook(
        &input,
        &[
            (
                "info",
                vec![
                    vec!["Title", "Plant Metadata"],
                    vec!["Config Date", "2025-06-01T00:00:00.000Z"],
                ],
            ),
            (
                "default",
                vec![vec!["default_profile_id", "basic"], vec!["Theme", "dark"]],
            ),
        ],
    )
    .expect("Failed to write workbook");

    let yaml = generate(&input, &output);

    assert_eq!(yaml["default_profile_id"], Value::from("basic"));
    assert_eq!(yaml["theme"], Value::from("dark"));
    assert_eq!(yaml["info"]["title"], Value::from("Plant Metadata"));
    assert_eq!(
        yaml["info"]["config_date"],
        Value::from("2025-06-01T00:00:00.000Z")
    );
    assert_eq!(yaml["profiles"], Value::Mapping(Default::default()));
}

#[test]
fn test_post_only_sheet_yields_no_profile() {
    logging::init_test();
    let (_dir, input, output) = temp_paths();
    write_workbook(
        &input,
        &[
            ("fields", vec![vec!["id"], vec!["color"]]),
            (
                "post_alpha",
                vec![vec![], vec![], vec![], vec!["field_id"], vec!["color"]],
            ),
        ],
    )
    .expect("Failed to write workbook");

    let yaml = generate(&input, &output);
    assert!(yaml["profiles"].get("alpha").is_none());
    assert_eq!(yaml["profiles"], Value::Mapping(Default::default()));
}

#[test]
fn test_pre_and_post_phases_with_categories() {
    logging::init_test();
    let (_dir, input, output) = temp_paths();
    write_workbook(
        &input,
        &[
            (
                "fields",
                vec![
                    vec!["Field ID", "Datatype", "Unit", "Description"],
                    vec!["Speed", "number", "km/h", "Line speed"],
                    vec!["Operator", "text", "", ""],
                    vec!["", "text", "", "no id"],
                ],
            ),
            (
                "categories",
                vec![vec!["id", "display_name"], vec!["process", "Process Data"]],
            ),
            (
                "PRE_shift",
                vec![
                    vec!["id", "Night Shift"],
                    vec!["name", "Night Shift"],
                    vec![],
                    vec!["field_id", "category", "required", "default"],
                    vec!["speed", "Process", "YES", "40"],
                    vec!["operator", "", "no", ""],
                    vec!["unknown", "", "", ""],
                ],
            ),
            (
                "post_shift",
                vec![
                    vec![],
                    vec![],
                    vec![],
                    vec!["field_id", "description"],
                    vec!["operator", "Signed off by"],
                    vec!["operator", "Signed off by"],
                ],
            ),
        ],
    )
    .expect("Failed to write workbook");

    let yaml = generate(&input, &output);
    let profile = &yaml["profiles"]["shift"];

    assert_eq!(profile["id"], Value::from("night_shift"));
    assert_eq!(profile["name"], Value::from("Night Shift"));

    let speed = &profile["pre"]["Process Data"]["speed"];
    assert_eq!(speed["required"], Value::from("yes"));
    assert_eq!(speed["default"], Value::from("40"));
    assert_eq!(speed["unit"], Value::from("km/h"));
    assert_eq!(speed["description"], Value::from("Line speed"));

    let operator = &profile["pre"]["general"]["operator"];
    assert_eq!(operator["required"], Value::from("no"));
    assert!(operator.get("unit").is_none(), "空 unit 不应出现");
    assert_eq!(operator["description"], Value::from(""));

    assert!(profile["pre"]["general"].get("unknown").is_none());

    let post_operator = &profile["post"]["general"]["operator"];
    assert_eq!(post_operator["description"], Value::from("Signed off by"));
    assert!(post_operator.get("required").is_none());
    assert_eq!(profile["post"]["general"].as_mapping().unwrap().len(), 1);
}

#[test]
fn test_rows_without_ids_contribute_nothing() {
    logging::init_test();
    let (_dir, input, _output) = temp_paths();
    write_workbook(
        &input,
        &[(
            "fields",
            vec![
                vec!["label", "datatype"],
                vec!["Orphan", "dropdown"],
                vec!["Another", "text"],
            ],
        )],
    )
    .expect("Failed to write workbook");

    let document = ConfigBuilder::default()
        .build_from_file(&input)
        .expect("Generation should succeed");
    assert!(document.profiles.is_empty());

    // 无 ID 行不可被阶段引用
    let (_dir2, input2, output2) = temp_paths();
    write_workbook(
        &input2,
        &[
            ("fields", vec![vec!["label"], vec!["Orphan"]]),
            (
                "pre_p",
                vec![vec![], vec![], vec![], vec!["field_id"], vec!["orphan"]],
            ),
        ],
    )
    .expect("Failed to write workbook");
    let yaml = generate(&input2, &output2);
    assert_eq!(
        yaml["profiles"]["p"]["pre"],
        Value::Mapping(Default::default())
    );
}

#[test]
fn test_dropdown_without_list_gets_empty_options() {
    logging::init_test();
    let (_dir, input, output) = temp_paths();
    write_workbook(
        &input,
        &[
            (
                "fields",
                vec![vec!["id", "datatype"], vec!["size", "dropdown"]],
            ),
            ("lists", vec![vec!["color"], vec!["Red"]]),
            (
                "pre_p",
                vec![vec![], vec![], vec![], vec!["field_id"], vec!["size"]],
            ),
        ],
    )
    .expect("Failed to write workbook");

    let yaml = generate(&input, &output);
    assert_eq!(
        yaml["profiles"]["p"]["pre"]["general"]["size"]["options"],
        Value::Sequence(Vec::new())
    );
}

#[test]
fn test_numeric_cells_keep_their_type() {
    logging::init_test();
    let (_dir, input, output) = temp_paths();
    write_typed_workbook(
        &input,
        &[
            (
                "fields",
                vec![
                    vec![
                        TestCell::Text("id"),
                        TestCell::Text("max"),
                        TestCell::Text("step"),
                        TestCell::Text("editable"),
                    ],
                    vec![
                        TestCell::Text("level"),
                        TestCell::Number(5.0),
                        TestCell::Number(0.5),
                        TestCell::Bool(true),
                    ],
                ],
            ),
            (
                "lists",
                vec![
                    vec![TestCell::Text("level")],
                    vec![TestCell::Number(1.0)],
                    vec![TestCell::Number(2.0)],
                ],
            ),
            (
                "pre_p",
                vec![
                    vec![],
                    vec![],
                    vec![],
                    vec![TestCell::Text("field_id"), TestCell::Text("default")],
                    vec![TestCell::Text("level"), TestCell::Number(3.0)],
                ],
            ),
        ],
    )
    .expect("Failed to write workbook");

    let yaml = generate(&input, &output);
    let level = &yaml["profiles"]["p"]["pre"]["general"]["level"];

    assert_eq!(level["max"].as_i64(), Some(5));
    assert_eq!(level["step"].as_f64(), Some(0.5));
    assert_eq!(level["editable"], Value::Bool(true));
    assert_eq!(level["default"].as_i64(), Some(3));
    // datatype 缺失，不挂载 options
    assert!(level.get("options").is_none());
}

#[test]
fn test_sheets_read_from_used_range_origin() {
    logging::init_test();
    let (_dir, input, output) = temp_paths();
    write_workbook(
        &input,
        &[
            // 已用区域 A2:B3
            (
                "fields",
                vec![vec![], vec!["id", "datatype"], vec!["Color", "dropdown"]],
            ),
            // 已用区域 B1:C1
            ("info", vec![vec!["", "Title", "Demo"]]),
            // 已用区域 B1:B2
            ("lists", vec![vec!["", "Color"], vec!["", "Red"]]),
            // 阶段表仍按绝对第 4 行取列头
            (
                "pre_p",
                vec![vec![], vec![], vec![], vec!["field_id"], vec!["color"]],
            ),
        ],
    )
    .expect("Failed to write workbook");

    let yaml = generate(&input, &output);

    assert_eq!(yaml["info"]["title"], Value::from("Demo"));
    let color = &yaml["profiles"]["p"]["pre"]["general"]["color"];
    assert_eq!(color["datatype"], Value::from("dropdown"));
    assert_eq!(color["options"], strings(&["Red"]));
}

#[test]
fn test_required_overlay_is_normalized() {
    logging::init_test();
    let (_dir, input, output) = temp_paths();
    write_typed_workbook(
        &input,
        &[
            (
                "fields",
                vec![
                    vec![TestCell::Text("id")],
                    vec![TestCell::Text("color")],
                    vec![TestCell::Text("size")],
                    vec![TestCell::Text("weight")],
                ],
            ),
            (
                "pre_p",
                vec![
                    vec![],
                    vec![],
                    vec![],
                    vec![TestCell::Text("field_id"), TestCell::Text("required")],
                    vec![TestCell::Text("color"), TestCell::Bool(true)],
                    vec![TestCell::Text("size"), TestCell::Text("   ")],
                    vec![TestCell::Text("weight"), TestCell::Text(" Must Have ")],
                ],
            ),
        ],
    )
    .expect("Failed to write workbook");

    let yaml = generate(&input, &output);
    let general = &yaml["profiles"]["p"]["pre"]["general"];

    // 非文本值没有规范化键
    assert_eq!(general["color"]["required"], Value::Null);
    assert!(general["color"].get("required").is_some());
    assert_eq!(general["size"]["required"], Value::from(""));
    assert_eq!(general["weight"]["required"], Value::from("must_have"));
}

#[test]
fn test_duplicate_header_does_not_override_first_column() {
    logging::init_test();
    let (_dir, input, output) = temp_paths();
    write_workbook(
        &input,
        &[
            (
                "fields",
                vec![vec!["id", "label", "id"], vec!["Color", "Paint", "Other"]],
            ),
            (
                "pre_p",
                vec![vec![], vec![], vec![], vec!["field_id"], vec!["color"]],
            ),
        ],
    )
    .expect("Failed to write workbook");

    let yaml = generate(&input, &output);
    let color = &yaml["profiles"]["p"]["pre"]["general"]["color"];
    assert_eq!(color["id"], Value::from("color"));
    assert_eq!(color["id_1"], Value::from("Other"));
}

#[test]
fn test_missing_workbook_is_fatal() {
    logging::init_test();
    let (_dir, input, output) = temp_paths();

    let result = ConfigBuilder::default().build_from_file(&input);
    assert!(matches!(result, Err(GeneratorError::FileNotFound(_))));
    assert!(!output.exists());
}

#[test]
fn test_corrupt_workbook_is_fatal() {
    logging::init_test();
    let (_dir, input, _output) = temp_paths();
    std::fs::write(&input, b"this is not a zip archive").expect("Failed to write file");

    let result = ConfigBuilder::default().build_from_file(&input);
    assert!(matches!(result, Err(GeneratorError::ExcelParseError(_))));
}
