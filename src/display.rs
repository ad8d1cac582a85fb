use crate::OutputFormat;
use paramstore::{Parameters, Result};
use std::collections::BTreeMap;

pub fn print_success(message: &str) {
    tracing::info!("✓ {}", message);
}

pub fn print_warning(message: &str) {
    tracing::warn!("{}", message);
}

/// Render the short-name map of `parameters` in the requested format.
///
/// Keys are sorted so output is stable between runs.
pub fn render_parameters(parameters: &Parameters, format: &OutputFormat) -> Result<String> {
    let flat: BTreeMap<String, String> = parameters.to_key_value_map().into_iter().collect();

    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&flat)?,
        OutputFormat::Env => render_env(&flat),
        OutputFormat::Table => render_table(&flat),
    };
    Ok(rendered)
}

fn render_env(flat: &BTreeMap<String, String>) -> String {
    let mut out = String::new();
    for (key, value) in flat {
        if !is_valid_env_key(key) {
            print_warning(&format!("Skipping '{}': not a valid environment variable name", key));
            continue;
        }
        out.push_str(&format!("{}='{}'\n", key, value.replace('\'', r"'\''")));
    }
    out
}

fn render_table(flat: &BTreeMap<String, String>) -> String {
    if flat.is_empty() {
        return "No parameters found\n".to_string();
    }

    let width = flat.keys().map(|k| k.chars().count()).max().unwrap_or(0).max(3);
    let mut out = format!("{:<width$}  VALUE\n", "KEY", width = width);
    for (key, value) in flat {
        out.push_str(&format!("{:<width$}  {}\n", key, value, width = width));
    }
    out
}

/// `[A-Za-z_][A-Za-z0-9_]*`
fn is_valid_env_key(key: &str) -> bool {
    let mut chars = key.chars();
    matches!(chars.next(), Some(c) if c == '_' || c.is_ascii_alphabetic())
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;
    use paramstore::Parameter;
    use std::collections::HashMap;

    fn sample() -> Parameters {
        Parameters::new(
            "/svc/dev/",
            HashMap::from([
                ("/svc/dev/DB_PASS".to_string(), Parameter::from("it's")),
                ("/svc/dev/DB_HOST".to_string(), Parameter::from("h")),
                ("/svc/dev/nested/key".to_string(), Parameter::from("n")),
            ]),
        )
    }

    #[test]
    fn test_render_json_sorted() {
        let out = render_parameters(&sample(), &OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"DB_HOST": "h", "DB_PASS": "it's", "nested/key": "n"})
        );
        assert!(out.find("DB_HOST").unwrap() < out.find("DB_PASS").unwrap());
    }

    #[test]
    fn test_render_env_quotes_and_skips_invalid_keys() {
        let out = render_parameters(&sample(), &OutputFormat::Env).unwrap();
        assert_eq!(out, "DB_HOST='h'\nDB_PASS='it'\\''s'\n");
    }

    #[test]
    fn test_render_table() {
        let out = render_parameters(&sample(), &OutputFormat::Table).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "KEY         VALUE");
        assert_eq!(lines[1], "DB_HOST     h");
        assert_eq!(lines.len(), 4);

        let empty = Parameters::new("/svc/dev/", HashMap::new());
        assert_eq!(
            render_parameters(&empty, &OutputFormat::Table).unwrap(),
            "No parameters found\n"
        );
    }

    #[test]
    fn test_env_key_validation() {
        assert!(is_valid_env_key("DB_HOST"));
        assert!(is_valid_env_key("_private1"));
        assert!(!is_valid_env_key("1ABC"));
        assert!(!is_valid_env_key("nested/key"));
        assert!(!is_valid_env_key(""));
    }
}
