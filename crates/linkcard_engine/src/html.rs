use crate::PageMetadata;

/// Render the shareable HTML snippet that accompanies the card image.
///
/// `image_file` is the file name of the generated PNG, referenced relative
/// to the snippet so the pair can be uploaded side by side.
pub fn render_snippet(metadata: &PageMetadata, image_file: &str) -> String {
    let title = escape(metadata.title.as_deref().unwrap_or("(no title)"));
    let description = escape(metadata.description.as_deref().unwrap_or(""));
    let url = escape(&metadata.final_url);
    let image = escape(image_file);

    let mut head_meta = String::new();
    head_meta.push_str(&format!("    <meta property=\"og:title\" content=\"{title}\">\n"));
    if !description.is_empty() {
        head_meta.push_str(&format!(
            "    <meta property=\"og:description\" content=\"{description}\">\n"
        ));
    }
    head_meta.push_str(&format!("    <meta property=\"og:url\" content=\"{url}\">\n"));
    head_meta.push_str(&format!("    <meta property=\"og:image\" content=\"{image}\">\n"));
    if let Some(site) = metadata.site_name.as_deref() {
        head_meta.push_str(&format!(
            "    <meta property=\"og:site_name\" content=\"{}\">\n",
            escape(site)
        ));
    }

    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         \x20   <meta charset=\"utf-8\">\n\
         {head_meta}\
         \x20   <title>{title}</title>\n\
         </head>\n\
         <body>\n\
         \x20   <a class=\"linkcard\" href=\"{url}\">\n\
         \x20       <img src=\"{image}\" alt=\"{title}\" width=\"600\">\n\
         \x20       <p>{title}</p>\n\
         \x20       <p>{description}</p>\n\
         \x20   </a>\n\
         </body>\n\
         </html>\n"
    )
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
