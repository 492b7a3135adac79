/// Escape text for use in SVG/HTML content and attribute values
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const STYLE: &str = r#"
body { margin: 0; padding: 24px; font-family: sans-serif; background: #f5f6fa; color: #2a3f5f; }
main { display: inline-block; background: #fff; box-shadow: 0 1px 4px rgba(0, 0, 0, 0.12); }
.bar-hover { cursor: pointer; }
.bar-hover:hover { fill: rgba(42, 63, 95, 0.08); }
.tick-label:hover { text-decoration: underline; }
footer { margin-top: 12px; font-size: 13px; color: #667; }
"#;

/// Wrap an SVG chart in a standalone HTML page
pub fn html_page(title: &str, svg: &str, bar_count: usize) -> String {
    let noun = if bar_count == 1 { "repository" } else { "repositories" };
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n<main>\n{svg}</main>\n<footer>{bar_count} {noun}. Hover a bar for owner and description; click a label to open the repository.</footer>\n</body>\n</html>\n",
        title = escape_xml(title),
    )
}
