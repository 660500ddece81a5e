//! Directory listing module
//!
//! Renders the HTML index shown for directories without an index file.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::path::Path;
use tokio::fs;

use crate::http::response::escape_html;

/// Characters left unescaped in links: unreserved URL characters and `/`
const LINK_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

struct ListingEntry {
    name: String,
    is_dir: bool,
    is_symlink: bool,
}

/// Render the listing page for `dir`, titled with the decoded `request_path`
pub async fn render_listing(dir: &Path, request_path: &str) -> std::io::Result<String> {
    let mut entries = Vec::new();
    let mut read_dir = fs::read_dir(dir).await?;
    while let Some(entry) = read_dir.next_entry().await? {
        let name = entry.file_name().to_string_lossy().into_owned();
        let is_symlink = entry.file_type().await.is_ok_and(|t| t.is_symlink());
        // Follows symlinks, so a link to a directory still gets a trailing slash
        let is_dir = fs::metadata(entry.path()).await.is_ok_and(|m| m.is_dir());
        entries.push(ListingEntry {
            name,
            is_dir,
            is_symlink,
        });
    }
    entries.sort_by_cached_key(|e| e.name.to_lowercase());

    let display_path = escape_html(&percent_decode_str(request_path).decode_utf8_lossy());
    let title = format!("Directory listing for {display_path}");

    let mut lines = vec![
        "<!DOCTYPE HTML>".to_string(),
        "<html lang=\"en\">".to_string(),
        "<head>".to_string(),
        "<meta charset=\"utf-8\">".to_string(),
        format!("<title>{title}</title>\n</head>"),
        format!("<body>\n<h1>{title}</h1>"),
        "<hr>\n<ul>".to_string(),
    ];
    for entry in &entries {
        lines.push(render_entry(entry));
    }
    lines.push("</ul>\n<hr>\n</body>\n</html>\n".to_string());

    Ok(lines.join("\n"))
}

fn render_entry(entry: &ListingEntry) -> String {
    let mut display_name = entry.name.clone();
    let mut link_name = entry.name.clone();
    if entry.is_dir {
        display_name.push('/');
        link_name.push('/');
    }
    if entry.is_symlink {
        display_name = format!("{}@", entry.name);
    }
    format!(
        "<li><a href=\"{}\">{}</a></li>",
        utf8_percent_encode(&link_name, LINK_ESCAPE),
        escape_html(&display_name)
    )
}
