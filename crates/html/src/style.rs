// Inline `style` attribute handling. Elements keep their declarations as an ordered list of
// (property, value) pairs; property names are ASCII-lowercased.

// input: "color: red; font-size: 12px;"
// output: vec![("color", "red"), ("font-size", "12px")]
pub fn parse_declarations(input: &str) -> Vec<(String, String)> {
    input
        .split(';')
        .filter_map(|pair| {
            let (n, v) = pair.split_once(':')?;
            let name = n.trim().to_ascii_lowercase();
            if name.is_empty() {
                return None;
            }
            Some((name, v.trim().to_string()))
        })
        .collect()
}

// input: [("color", "red"), ("font-size", "12px")]
// output: "color: red; font-size: 12px"
pub fn format_declarations(style: &[(String, String)]) -> String {
    let mut out = String::new();
    for (i, (k, v)) in style.iter().enumerate() {
        if i != 0 {
            out.push_str("; ");
        }
        out.push_str(k);
        out.push_str(": ");
        out.push_str(v);
    }
    out
}

/// Set `property` to `value`, replacing an existing entry in place or appending.
pub fn set_declaration(style: &mut Vec<(String, String)>, property: &str, value: &str) {
    let name = property.trim().to_ascii_lowercase();
    if name.is_empty() {
        return;
    }
    match style.iter_mut().find(|(k, _)| *k == name) {
        Some((_, existing)) => *existing = value.trim().to_string(),
        None => style.push((name, value.trim().to_string())),
    }
}
