//! Text cleanup and prompt context formatting.

/// Entities decoded by [`strip_html`].
const ENTITIES: [(&str, &str); 6] = [
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&apos;", "'"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&amp;", "&"),
];

/// Remove HTML tags from a headline and decode the common entities.
///
/// `&amp;` is decoded last so `&amp;quot;` becomes `&quot;`, not `"`.
pub fn strip_html(input: &str) -> String {
    let mut text = String::with_capacity(input.len());
    let mut in_tag = false;
    for ch in input.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }

    let mut decoded = text;
    for (entity, replacement) in ENTITIES {
        decoded = decoded.replace(entity, replacement);
    }
    decoded.trim().to_string()
}

/// Format `(title, content)` pairs as numbered context blocks.
///
/// Each block is `[{n}. {title}]\n{content}`, numbered from 1, joined with a
/// blank line.
pub fn build_context<'a>(items: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    items
        .into_iter()
        .enumerate()
        .map(|(i, (title, content))| format!("[{}. {}]\n{}", i + 1, title, content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_html_removes_tags_and_entities() {
        assert_eq!(
            strip_html("<b>삼성전자</b>, &quot;HBM&quot; 공급 확대 &amp; 증설"),
            "삼성전자, \"HBM\" 공급 확대 & 증설"
        );
        assert_eq!(strip_html("  Fed&#39;s view &lt;hold&gt; "), "Fed's view <hold>");
    }

    #[test]
    fn test_strip_html_decodes_amp_last() {
        assert_eq!(strip_html("&amp;quot;"), "&quot;");
    }

    #[test]
    fn test_build_context_numbers_from_one() {
        let context = build_context([("First", "body one"), ("Second", "body two")]);
        assert_eq!(context, "[1. First]\nbody one\n\n[2. Second]\nbody two");
    }

    #[test]
    fn test_build_context_empty() {
        assert_eq!(build_context(std::iter::empty()), "");
    }
}
