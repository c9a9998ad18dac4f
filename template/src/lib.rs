//! Renders Jinja message templates against JSON data.
//!
//! Values print the way Python's Jinja prints them: `True`, `False`, `None`,
//! and lists or dicts in their Python form. Like Jinja, a single trailing
//! newline of the template is not rendered.

pub mod error;

pub use error::{Result, TemplateError};

use minijinja::value::{Value as TemplateValue, ValueKind};
use minijinja::Environment;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Renders `template` against the JSON `data`
///
/// # Errors
/// Returns an error for template syntax errors and failed expressions, such as
/// attribute access on an undefined value
pub fn render(template: &str, data: &Value) -> Result<String> {
    Ok(environment().render_str(template, data)?)
}

/// Renders the template file with the JSON data file and writes the result to `output`
///
/// # Errors
/// Returns an error when a file cannot be read or written, the data is not
/// valid JSON or the template cannot be rendered
pub fn render_file(template_path: &Path, data_path: &Path, output: &Path) -> Result<()> {
    let data: Value = serde_json::from_str(&fs::read_to_string(data_path)?)
        .map_err(|e| TemplateError::Data(e).with_context(data_path.display().to_string()))?;
    let template = fs::read_to_string(template_path)?;
    let rendered = render(&template, &data)
        .map_err(|e| e.with_context(template_path.display().to_string()))?;
    fs::write(output, rendered)?;
    Ok(())
}

fn environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_formatter(|out, _state, value| {
        out.write_str(&python_display(value, false)?)?;
        Ok(())
    });
    env
}

/// Python's `str()` of a value; `nested` values inside lists and dicts use `repr()`
fn python_display(
    value: &TemplateValue,
    nested: bool,
) -> std::result::Result<String, minijinja::Error> {
    let text = match value.kind() {
        ValueKind::Undefined => String::new(),
        ValueKind::None => "None".to_string(),
        ValueKind::Bool if value.is_true() => "True".to_string(),
        ValueKind::Bool => "False".to_string(),
        ValueKind::String if nested => python_quote(value.as_str().unwrap_or_default()),
        ValueKind::Seq => {
            let items = value
                .try_iter()?
                .map(|item| python_display(&item, true))
                .collect::<std::result::Result<Vec<_>, _>>()?;
            format!("[{}]", items.join(", "))
        }
        ValueKind::Map => {
            let entries = value
                .try_iter()?
                .map(|key| {
                    let item = value.get_item(&key)?;
                    Ok(format!("{}: {}", python_display(&key, true)?, python_display(&item, true)?))
                })
                .collect::<std::result::Result<Vec<_>, minijinja::Error>>()?;
            format!("{{{}}}", entries.join(", "))
        }
        _ => value.to_string(),
    };
    Ok(text)
}

fn python_quote(text: &str) -> String {
    format!("'{}'", text.replace('\\', "\\\\").replace('\'', "\\'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn data() -> Value {
        json!({
            "repo": "acme/app",
            "vulnerabilities": { "totalFiles": 2, "files": ["a.txt", "b.txt"] },
            "passed": false,
            "owner": null
        })
    }

    #[test]
    fn test_render_variables_and_paths() {
        let rendered = render(
            "Repo {{ repo }} has {{vulnerabilities.totalFiles}} files, first {{ vulnerabilities.files[0] }}",
            &data(),
        )
        .unwrap();
        assert_eq!(rendered, "Repo acme/app has 2 files, first a.txt");
    }

    #[test]
    fn test_render_python_style_values() {
        let rendered = render(
            "{{ passed }} {{ owner }} {{ vulnerabilities.files }} {{ {'ok': true} }}",
            &data(),
        )
        .unwrap();
        assert_eq!(rendered, "False None ['a.txt', 'b.txt'] {'ok': True}");
    }

    #[test]
    fn test_undefined_renders_empty() {
        assert_eq!(render("[{{ missing }}]", &data()).unwrap(), "[]");
    }

    #[test]
    fn test_attribute_of_undefined_is_an_error() {
        assert!(matches!(
            render("{{ missing.value }}", &data()),
            Err(TemplateError::Render(_))
        ));
    }

    #[test]
    fn test_comments_and_whitespace_control() {
        let rendered = render("a {# note #}b  \n  {{- repo -}}  \n c", &data()).unwrap();
        assert_eq!(rendered, "a bacme/appc");
    }

    #[test]
    fn test_trailing_newline_dropped_once() {
        assert_eq!(render("{{ repo }}\n\n", &data()).unwrap(), "acme/app\n");
    }

    #[test]
    fn test_statements_and_filters() {
        let template = "{% if not passed %}Failed:{% endif %}\
            {% for file in vulnerabilities.files %} {{ file | upper }}{% endfor %}";
        assert_eq!(render(template, &data()).unwrap(), "Failed: A.TXT B.TXT");
    }

    #[test]
    fn test_syntax_error_reports_line() {
        let err = render("line one\n{% if passed %}ok", &data()).unwrap_err();
        assert!(matches!(err, TemplateError::Render(_)));
        assert!(err.user_message().starts_with("Template error on line 2"));
    }
}
