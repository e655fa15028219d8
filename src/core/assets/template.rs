use regex::Regex;

use crate::core::{Error, Result};

// The template references assets through Django's static tag; the filenames
// carry Vite's content hash, so the previous reference is matched by shape
// rather than by exact name.
const CSS_PATTERN: &str =
    r#"<link rel="stylesheet" href="\{% static 'assets/main-[^']+\.css' %\}">"#;
const JS_PATTERN: &str =
    r#"<script type="module" src="\{% static 'assets/main-[^']+\.js' %\}"></script>"#;

/// Rewrite the stylesheet and script references in `content` to the given
/// asset filenames. Returns the patched content and the number of references
/// replaced.
pub fn patch(content: &str, js_file: &str, css_file: &str) -> Result<(String, usize)> {
    let css_re =
        Regex::new(CSS_PATTERN).map_err(|e| Error::internal_unexpected(e.to_string()))?;
    let js_re = Regex::new(JS_PATTERN).map_err(|e| Error::internal_unexpected(e.to_string()))?;

    let css_replacement = format!(
        r#"<link rel="stylesheet" href="{{% static '{}' %}}">"#,
        css_file
    );
    let js_replacement = format!(
        r#"<script type="module" src="{{% static '{}' %}}"></script>"#,
        js_file
    );

    let mut replacements = 0;
    replacements += css_re.find_iter(content).count();
    let patched = css_re.replace_all(content, regex::NoExpand(&css_replacement));
    replacements += js_re.find_iter(&patched).count();
    let patched = js_re
        .replace_all(&patched, regex::NoExpand(&js_replacement))
        .into_owned();

    Ok((patched, replacements))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <link rel="stylesheet" href="{% static 'assets/main-old111.css' %}">
</head>
<body>
    <div id="root"></div>
    <script type="module" src="{% static 'assets/main-old111.js' %}"></script>
</body>
</html>
"#;

    #[test]
    fn replaces_both_references() {
        let (patched, replacements) =
            patch(TEMPLATE, "assets/main-abc123.js", "assets/main-abc123.css").unwrap();
        assert_eq!(replacements, 2);
        assert!(patched.contains(r#"href="{% static 'assets/main-abc123.css' %}""#));
        assert!(patched.contains(r#"src="{% static 'assets/main-abc123.js' %}""#));
        assert!(!patched.contains("main-old111"));
    }

    #[test]
    fn unrecognized_template_is_returned_unchanged() {
        let content = "<html><body>no asset tags</body></html>\n";
        let (patched, replacements) =
            patch(content, "assets/main-abc.js", "assets/main-abc.css").unwrap();
        assert_eq!(replacements, 0);
        assert_eq!(patched, content);
    }

    #[test]
    fn patch_is_idempotent() {
        let (once, _) = patch(TEMPLATE, "assets/main-abc.js", "assets/main-abc.css").unwrap();
        let (twice, replacements) =
            patch(&once, "assets/main-abc.js", "assets/main-abc.css").unwrap();
        assert_eq!(replacements, 2);
        assert_eq!(once, twice);
    }
}
