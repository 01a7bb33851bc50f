//! Template rendering module
//!
//! Loads named templates from the `templates/` directory and fills
//! `{{var}}` placeholders. A missing template file degrades to a
//! built-in fallback page so page routes never fail.

use tokio::fs;

const TEMPLATE_DIR: &str = "templates";

/// Render a named template with the given variables.
pub async fn render(name: &str, vars: &[(&str, &str)]) -> String {
    let path = format!("{TEMPLATE_DIR}/{name}.html");
    match fs::read_to_string(&path).await {
        Ok(template) => substitute(&template, vars),
        Err(e) => {
            crate::logger::log_warning(&format!("Failed to load template {path}: {e}, using fallback"));
            fallback_page(name)
        }
    }
}

/// Replace every `{{key}}` placeholder with its value.
/// Unknown placeholders are left intact.
fn substitute(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{{{key}}}}}"), value);
    }
    result
}

fn fallback_page(name: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>Item Service</title></head>
<body><h1>Item Service</h1><p>Template "{name}" is unavailable.</p></body>
</html>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitute_fills_placeholders() {
        let html = substitute(
            "<p>{{hostname}} on {{container_id}}</p>",
            &[("hostname", "web-1"), ("container_id", "abc123")],
        );
        assert_eq!(html, "<p>web-1 on abc123</p>");
    }

    #[test]
    fn test_substitute_repeated_placeholder() {
        let html = substitute("{{x}}-{{x}}", &[("x", "a")]);
        assert_eq!(html, "a-a");
    }

    #[test]
    fn test_substitute_leaves_unknown_placeholders() {
        let html = substitute("<p>{{unknown}}</p>", &[("hostname", "web-1")]);
        assert_eq!(html, "<p>{{unknown}}</p>");
    }

    #[test]
    fn test_fallback_page_names_template() {
        let html = fallback_page("index");
        assert!(html.contains("index"));
        assert!(html.starts_with("<!DOCTYPE html>"));
    }

    #[tokio::test]
    async fn test_render_missing_template_uses_fallback() {
        let html = render("definitely-not-a-template", &[]).await;
        assert!(html.contains("unavailable"));
    }
}
