//! Variable substitution for templated file bodies

use std::collections::HashMap;

/// Substitute `{{name}}` placeholders from `variables`.
/// Returns the name of the first undefined variable on failure.
pub fn render(template: &str, variables: &HashMap<String, String>) -> Result<String, String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let name = after[..end].trim();
                match variables.get(name) {
                    Some(value) => out.push_str(value),
                    None => return Err(name.to_string()),
                }
                rest = &after[end + 2..];
            }
            None => {
                // Unterminated braces are literal content
                out.push_str(&rest[start..]);
                return Ok(out);
            }
        }
    }
    out.push_str(rest);
    Ok(out)
}
