use serde_json::{json, Value};
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};
use utilkit::utils::validation::Validate;
use utilkit::{render, Dispatcher, UtilkitConfig, UtilkitError};

fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

async fn call(dispatcher: &Dispatcher, name: &str, values: &[&str]) -> anyhow::Result<Value> {
    Ok(dispatcher.call(name, &args(values)).await?)
}

#[tokio::test]
async fn names_resolve_in_any_case_style() -> anyhow::Result<()> {
    let dispatcher = Dispatcher::default();
    for name in ["levenshteinDistance", "levenshtein_distance", "levenshtein-distance"] {
        assert_eq!(call(&dispatcher, name, &["kitten", "sitting"]).await?, json!(3));
    }
    Ok(())
}

#[tokio::test]
async fn arguments_follow_declared_kinds() -> anyhow::Result<()> {
    let dispatcher = Dispatcher::default();

    assert_eq!(call(&dispatcher, "capitalize", &["123"]).await?, json!("123"));
    assert_eq!(call(&dispatcher, "typeOf", &["123"]).await?, json!("number"));
    assert_eq!(call(&dispatcher, "typeOf", &["hello"]).await?, json!("string"));
    assert_eq!(
        call(&dispatcher, "padStart", &["7", "3", "0"]).await?,
        json!("007")
    );
    assert_eq!(
        call(&dispatcher, "range", &["0", "10", "3"]).await?,
        json!([0, 3, 6, 9])
    );
    assert_eq!(
        call(&dispatcher, "sortBy", &[r#"[{"n":2},{"n":1}]"#, "n"]).await?,
        json!([{"n": 1}, {"n": 2}])
    );
    assert_eq!(
        call(&dispatcher, "getPath", &[r#"{"a":{"b":[1,2]}}"#, "a.b.1"]).await?,
        json!(2)
    );
    Ok(())
}

#[tokio::test]
async fn dates_accept_text_and_now() -> anyhow::Result<()> {
    let dispatcher = Dispatcher::default();

    assert_eq!(
        call(&dispatcher, "formatDate", &["2024-03-05 14:07:09", "YYYY/MM/DD HH:mm"]).await?,
        json!("2024/03/05 14:07")
    );
    assert_eq!(
        call(&dispatcher, "diffDays", &["2024-01-01", "2024-03-01"]).await?,
        json!(60)
    );
    assert_eq!(call(&dispatcher, "isLeapYear", &["2024"]).await?, json!(true));

    let added = call(&dispatcher, "addMonths", &["2024-01-31", "1"]).await?;
    assert!(added.as_str().unwrap_or_default().starts_with("2024-02-29"));

    assert_eq!(call(&dispatcher, "timeAgo", &["now"]).await?, json!("just now"));
    Ok(())
}

#[tokio::test]
async fn failures_map_to_error_categories() {
    let dispatcher = Dispatcher::default();

    let err = dispatcher.call("frobnicate", &[]).await.unwrap_err();
    assert!(matches!(err, UtilkitError::UnknownFunction { .. }));
    assert_eq!(err.exit_code(), 2);

    let err = dispatcher.call("reverse", &args(&["a", "b"])).await.unwrap_err();
    assert!(matches!(err, UtilkitError::ArityError { got: 2, .. }));

    let err = dispatcher.call("chunk", &args(&["not json", "2"])).await.unwrap_err();
    assert!(matches!(err, UtilkitError::ArgumentError { .. }));

    let err = dispatcher.call("toRoman", &args(&["0"])).await.unwrap_err();
    assert!(matches!(err, UtilkitError::InvalidInput { .. }));
    assert_eq!(err.exit_code(), 1);
}

#[tokio::test]
async fn sentinel_results_are_null_not_errors() -> anyhow::Result<()> {
    let dispatcher = Dispatcher::default();
    assert_eq!(call(&dispatcher, "hexToRgb", &["#zzz"]).await?, Value::Null);
    assert_eq!(call(&dispatcher, "parseUrl", &["not a url"]).await?, Value::Null);
    assert_eq!(call(&dispatcher, "base64Decode", &["%%%"]).await?, Value::Null);
    assert_eq!(call(&dispatcher, "parseJson", &["{oops"]).await?, Value::Null);
    Ok(())
}

#[tokio::test]
async fn filesystem_functions_through_dispatcher() -> anyhow::Result<()> {
    let dispatcher = Dispatcher::default();
    let dir = TempDir::new()?;
    let root = dir.path();
    let note = root.join("notes/today.txt");
    let note = note.to_str().unwrap_or_default();

    assert_eq!(call(&dispatcher, "writeFile", &[note, "first"]).await?, json!(true));
    assert_eq!(call(&dispatcher, "appendFile", &[note, " second"]).await?, json!(true));
    assert_eq!(call(&dispatcher, "readFile", &[note]).await?, json!("first second"));
    assert_eq!(call(&dispatcher, "fileSize", &[note]).await?, json!(12));

    let data = root.join("data.json");
    let data = data.to_str().unwrap_or_default();
    assert_eq!(
        call(&dispatcher, "writeJson", &[data, r#"{"a":[1,2]}"#, "false"]).await?,
        json!(true)
    );
    assert_eq!(call(&dispatcher, "readFile", &[data]).await?, json!(r#"{"a":[1,2]}"#));
    assert_eq!(call(&dispatcher, "readJson", &[data]).await?, json!({"a": [1, 2]}));

    let listing = call(&dispatcher, "listDir", &[root.to_str().unwrap_or_default()]).await?;
    assert_eq!(listing, json!(["data.json", "notes"]));

    let stats = call(&dispatcher, "fileStats", &[note]).await?;
    assert_eq!(stats["size"], json!(12));

    assert_eq!(call(&dispatcher, "deleteFile", &[note]).await?, json!(true));
    assert_eq!(call(&dispatcher, "fileExists", &[note]).await?, json!(false));
    assert_eq!(call(&dispatcher, "readFile", &[note]).await?, Value::Null);
    Ok(())
}

#[tokio::test]
async fn configured_hash_options_reach_password_hashing() -> anyhow::Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(b"[crypto]\niterations = 1000\nkey_length = 32\nsalt_length = 8\n")?;

    let settings = UtilkitConfig::load(Some(file.path()))?;
    settings.validate()?;
    let dispatcher = Dispatcher::new(settings.call_context());

    let record = call(&dispatcher, "hashPassword", &["hunter2"]).await?;
    assert_eq!(record["iterations"], json!(1000));
    assert_eq!(record["keyLength"], json!(32));
    assert_eq!(record["salt"].as_str().map(str::len), Some(16));
    assert_eq!(record["hash"].as_str().map(str::len), Some(64));

    let record_text = record.to_string();
    assert_eq!(
        call(&dispatcher, "verifyPassword", &["hunter2", &record_text]).await?,
        json!(true)
    );
    assert_eq!(
        call(&dispatcher, "verifyPassword", &["hunter3", &record_text]).await?,
        json!(false)
    );
    assert_eq!(
        call(&dispatcher, "verifyPassword", &["hunter2", r#"{"salt":"x"}"#]).await?,
        json!(false)
    );
    Ok(())
}

#[test]
fn rendering_respects_output_settings() -> anyhow::Result<()> {
    let settings = UtilkitConfig::from_toml_str("[output]\npretty = false\n")?;
    let value = json!({"a": [1, 2]});
    assert_eq!(render(&value, settings.output.pretty)?, r#"{"a":[1,2]}"#);
    assert_eq!(render(&json!("plain text"), true)?, "plain text");
    Ok(())
}
