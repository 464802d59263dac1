use serde_json::json;

use deep_trim::{ExcludeList, OptionsInput, OptionsRecord, TrimConfig, TrimOptions};

#[test]
fn defaults() {
    let o = TrimOptions::default();
    assert!(o.exclude.is_empty());
    assert!(o.convert_to_full_width);
    assert_eq!(TrimOptions::from(None::<Vec<String>>), o);
}

#[test]
fn legacy_list_equals_record_with_exclude() {
    let legacy = TrimOptions::from(vec!["name".to_string()]);
    let record = TrimOptions::from(OptionsRecord {
        exclude: Some(vec!["name".to_string()]),
        convert_to_full_width: None,
    });
    assert_eq!(legacy, record);
    assert!(legacy.convert_to_full_width);
}

#[test]
fn deserializes_both_shapes() -> anyhow::Result<()> {
    let legacy: TrimOptions = serde_json::from_value(json!(["a.b", "c.*"]))?;
    assert_eq!(legacy.exclude, ExcludeList::new(["a.b", "c.*"]));
    assert!(legacy.convert_to_full_width);

    let record: TrimOptions =
        serde_json::from_value(json!({"exclude": ["x"], "convertToFullWidth": false}))?;
    assert_eq!(record.exclude.patterns(), ["x".to_string()]);
    assert!(!record.convert_to_full_width);

    let empty: TrimOptions = serde_json::from_value(json!({}))?;
    assert_eq!(empty, TrimOptions::default());

    let input: OptionsInput = serde_json::from_value(json!(["p"]))?;
    assert_eq!(input, OptionsInput::Exclude(vec!["p".to_string()]));
    Ok(())
}

#[test]
fn typed_deserialization_rejects_wrong_types() {
    assert!(serde_json::from_value::<TrimOptions>(json!({"convertToFullWidth": "yes"})).is_err());
    assert!(serde_json::from_value::<TrimOptions>(json!(42)).is_err());
}

#[test]
fn lenient_accepts_anything() {
    let o = TrimOptions::from_json_lenient(&json!(["a", 1, null, "b"]));
    assert_eq!(o.exclude.patterns(), ["a".to_string(), "b".to_string()]);
    assert!(o.convert_to_full_width);

    let o = TrimOptions::from_json_lenient(&json!({"exclude": "not-a-list"}));
    assert!(o.exclude.is_empty());
    assert!(o.convert_to_full_width);

    for v in [json!(null), json!(0), json!(""), json!("nope"), json!(true)] {
        assert_eq!(TrimOptions::from_json_lenient(&v), TrimOptions::default(), "{v}");
    }
}

#[test]
fn lenient_coerces_full_width_flag() {
    let flag = |v: serde_json::Value| {
        TrimOptions::from_json_lenient(&json!({ "convertToFullWidth": v })).convert_to_full_width
    };
    assert!(!flag(json!(null)));
    assert!(!flag(json!(false)));
    assert!(!flag(json!(0)));
    assert!(!flag(json!("")));
    assert!(flag(json!(1)));
    assert!(flag(json!("false")));
    assert!(flag(json!([])));
    assert!(flag(json!({})));
}

#[test]
fn options_serialize_as_record() -> anyhow::Result<()> {
    let o = TrimOptions::new().exclude(["a"]).convert_to_full_width(false);
    assert_eq!(
        serde_json::to_value(&o)?,
        json!({"exclude": ["a"], "convertToFullWidth": false})
    );
    Ok(())
}

#[test]
fn config_from_toml_table() -> anyhow::Result<()> {
    let cfg = TrimConfig::from_toml_str(
        r#"
        [trim]
        exclude = ["user.password", "raw.*"]
        convert_to_full_width = false
        "#,
    )?;
    assert_eq!(cfg.options().exclude, ExcludeList::new(["user.password", "raw.*"]));
    assert!(!cfg.options().convert_to_full_width);
    Ok(())
}

#[test]
fn config_from_toml_legacy_list() -> anyhow::Result<()> {
    let cfg = TrimConfig::from_toml_str(r#"trim = ["name"]"#)?;
    assert_eq!(cfg.trim, TrimOptions::from(["name"]));

    let empty = TrimConfig::from_toml_str("")?;
    assert_eq!(empty, TrimConfig::default());
    Ok(())
}

#[test]
fn config_load_from_file_and_missing_file() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("deep-trim.toml");

    let missing = TrimConfig::load(&path)?;
    assert_eq!(missing, TrimConfig::default());

    std::fs::write(&path, "[trim]\nconvertToFullWidth = false\n")?;
    let cfg = TrimConfig::load(&path)?;
    assert!(!cfg.trim.convert_to_full_width);
    assert!(cfg.trim.exclude.is_empty());

    std::fs::write(&path, "[trim\n")?;
    let err = TrimConfig::load(&path).unwrap_err();
    assert!(format!("{err:#}").contains("parsing config file"));
    Ok(())
}

#[test]
fn list_conversions_agree() {
    let from_vec = TrimOptions::from(vec!["a", "b.*"]);
    let patterns: &[&str] = &["a", "b.*"];
    let from_slice = TrimOptions::from(patterns);
    let from_array = TrimOptions::from(["a", "b.*"]);
    let from_strings = TrimOptions::from(vec!["a".to_string(), "b.*".to_string()]);

    assert_eq!(from_vec, from_slice);
    assert_eq!(from_vec, from_array);
    assert_eq!(from_vec, from_strings);
    assert!(from_vec.exclude.matches("b.c"));
    assert!(from_vec.convert_to_full_width);
    assert_eq!(TrimOptions::from(Some(["a", "b.*"])), from_vec);
}
