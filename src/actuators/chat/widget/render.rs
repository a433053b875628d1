/// Renders an assistant reply from Markdown. Raw HTML in the reply is escaped.
pub fn reply_html(text: &str) -> String {
    match markdown::to_html_with_options(text, &markdown::Options::gfm()) {
        Ok(rendered) => rendered,
        Err(_) => markdown::to_html(text),
    }
}
