use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};

use kn_template_core::placeholder::{missing_placeholders, validate_name};
use kn_template_core::renderer::render_template;
use kn_template_core::value::Values;

use crate::output;

/// Flags for `kn-template render`.
#[derive(Debug, Default)]
pub struct RenderOptions {
    pub values_path: Option<PathBuf>,
    pub assignments: Vec<(String, String)>,
    pub strict: bool,
    pub digest: bool,
    pub output_path: Option<PathBuf>,
}

/// Render a template and write the result to stdout or `--output`.
///
/// Values come from the `--values` JSON object, with `--set` assignments
/// layered on top. Non-scalar JSON members are dropped before rendering.
/// In strict mode any placeholder without a value aborts the command.
pub async fn run(
    config_path: &Path,
    name: Option<&str>,
    file: Option<&Path>,
    opts: &RenderOptions,
) -> Result<()> {
    let (label, text) = super::load_template(config_path, name, file).await?;
    let values = collect_values(opts.values_path.as_deref(), &opts.assignments).await?;

    let missing = missing_placeholders(&text, &values);
    if !missing.is_empty() {
        if opts.strict {
            for name in &missing {
                output::print_error(&format!("no value for placeholder '{name}'"));
            }
            anyhow::bail!("{} placeholder(s) in '{label}' have no value", missing.len());
        }
        output::print_warning(&format!("rendering empty for: {}", missing.join(", ")));
    }

    let rendered = render_template(&text, &values);
    tracing::info!(template = %label, bytes = rendered.len(), "rendered template");

    match &opts.output_path {
        Some(path) => {
            output::print_header(&format!("kn-template render: {label}"));
            tokio::fs::write(path, &rendered)
                .await
                .with_context(|| format!("failed to write {}", path.display()))?;
            output::print_success(&format!("wrote {}", path.display()));
        }
        None => print!("{rendered}"),
    }

    if opts.digest {
        output::print_key_value("SHA-256", &content_digest(&rendered));
    }

    Ok(())
}

/// Merge the values file and `--set` assignments; assignments win.
async fn collect_values(values_path: Option<&Path>, assignments: &[(String, String)]) -> Result<Values> {
    let mut values = match values_path {
        Some(path) => {
            let raw = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("failed to read values file {}", path.display()))?;
            let json: serde_json::Value = serde_json::from_str(&raw)
                .with_context(|| format!("values file {} is not valid JSON", path.display()))?;
            Values::from_json(&json)?
        }
        None => Values::new(),
    };

    values.extend(assignments.iter().cloned().collect());
    Ok(values)
}

/// Parse a `NAME=VALUE` assignment from the command line.
pub fn parse_assignment(s: &str) -> std::result::Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{s}'"))?;
    let name = name.trim();
    validate_name(name).map_err(|e| e.to_string())?;
    Ok((name.to_string(), value.to_string()))
}

/// Hex SHA-256 of the rendered text.
fn content_digest(rendered: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(rendered.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kn_template_core::value::ScalarValue;

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("name=Ada").unwrap(),
            ("name".to_string(), "Ada".to_string())
        );
        assert_eq!(
            parse_assignment("expr=a=b").unwrap(),
            ("expr".to_string(), "a=b".to_string())
        );
        assert_eq!(parse_assignment("empty=").unwrap().1, "");
    }

    #[test]
    fn test_parse_assignment_invalid() {
        assert!(parse_assignment("novalue").is_err());
        assert!(parse_assignment("=x").is_err());
        let err = parse_assignment("bad name=x").unwrap_err();
        assert!(err.starts_with("invalid placeholder name: 'bad name'"));
    }

    #[test]
    fn test_content_digest() {
        assert_eq!(
            content_digest(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(content_digest("abc").len(), 64);
    }

    #[tokio::test]
    async fn test_collect_values_assignments_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("values.json");
        std::fs::write(&path, r#"{"name": "file", "count": 2, "tags": ["x"]}"#).unwrap();

        let assignments = vec![("name".to_string(), "cli".to_string())];
        let values = collect_values(Some(&path), &assignments).await.unwrap();

        assert_eq!(values.get("name"), Some(&ScalarValue::Text("cli".into())));
        assert_eq!(values.get("count").map(ScalarValue::to_text).as_deref(), Some("2"));
        assert!(values.get("tags").is_none());
    }

    #[tokio::test]
    async fn test_collect_values_rejects_non_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("values.json");
        std::fs::write(&path, "[1, 2]").unwrap();
        assert!(collect_values(Some(&path), &[]).await.is_err());
    }

    #[tokio::test]
    async fn test_run_writes_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("t.md");
        let out = dir.path().join("out.md");
        std::fs::write(&template, "# {{title}}\n{{body}}").unwrap();

        let opts = RenderOptions {
            assignments: vec![
                ("title".into(), "Plan".into()),
                ("body".into(), "<b>ship</b>".into()),
            ],
            output_path: Some(out.clone()),
            ..RenderOptions::default()
        };
        run(&dir.path().join("none.json"), None, Some(&template), &opts)
            .await
            .unwrap();
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "# Plan\nbship/b");
    }

    #[tokio::test]
    async fn test_run_strict_fails_on_missing() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("t.md");
        std::fs::write(&template, "{{a}} {{b}}").unwrap();

        let opts = RenderOptions {
            assignments: vec![("a".into(), "1".into())],
            strict: true,
            ..RenderOptions::default()
        };
        let err = run(&dir.path().join("none.json"), None, Some(&template), &opts)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("1 placeholder"));
    }
}
