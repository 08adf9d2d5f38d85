/// 转义 HTML 特殊字符
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
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

/// 纯文本转为可嵌入邮件的 HTML：先转义，再把换行替换为 `<br/>`
pub fn text_to_html(input: &str) -> String {
    escape_html(input)
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\n', "<br/>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert("x")</script> & 'y'"#),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt; &amp; &#39;y&#39;"
        );
    }

    #[test]
    fn test_text_to_html_keeps_line_breaks() {
        assert_eq!(text_to_html("line 1\r\nline <2>\nend"), "line 1<br/>line &lt;2&gt;<br/>end");
    }
}
