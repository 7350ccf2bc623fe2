//! Lazy preload script for per-file mode.
//!
//! The script carries the icon names as one space-joined string literal
//! and requests each icon's individual asset with an `Image`, resolving
//! `style:filename` the same way the build does.

use crate::icon::{IconName, DEFAULT_STYLE, ICON_EXTENSION, PUBLIC_ICON_PATH};

/// Output filename of the preload script.
pub const PRELOAD_FILENAME: &str = "preload-script.js";

/// Generate the preload script for `names`.
///
/// Returns `None` for an empty list: no script is produced at all.
pub fn generate(names: &[IconName]) -> Option<String> {
    if names.is_empty() {
        return None;
    }

    let joined = names
        .iter()
        .map(IconName::as_str)
        .collect::<Vec<_>>()
        .join(" ");

    // A JSON string is a valid JS string literal.
    let literal = serde_json::Value::String(joined).to_string();

    Some(format!(
        r#"{literal}.split(' ').forEach((iconName) => {{
  const img = new Image()
  const separator = iconName.indexOf(':')
  const [style, filename] = separator === -1
    ? ['{DEFAULT_STYLE}', iconName]
    : [iconName.slice(0, separator), iconName.slice(separator + 1)]

  img.src = '{PUBLIC_ICON_PATH}/' + style + '/' + filename + '.{ICON_EXTENSION}'
}})
"#
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    #[test]
    fn test_empty_list_produces_nothing() {
        assert!(generate(&[]).is_none());
    }

    #[test]
    fn test_script_snapshot() {
        let names = vec![IconName::from("home"), IconName::from("solid:star")];
        let script = generate(&names).unwrap();

        assert_snapshot!(script, @r#"
        "home solid:star".split(' ').forEach((iconName) => {
          const img = new Image()
          const separator = iconName.indexOf(':')
          const [style, filename] = separator === -1
            ? ['line', iconName]
            : [iconName.slice(0, separator), iconName.slice(separator + 1)]

          img.src = '/assets/icons/' + style + '/' + filename + '.svg'
        })
        "#);
    }

    #[test]
    fn test_names_are_escaped() {
        let names = vec![IconName::from(r#"we"ird\name"#)];
        let script = generate(&names).unwrap();

        assert!(script.starts_with(r#""we\"ird\\name".split"#));
    }
}
