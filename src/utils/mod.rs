use std::path::PathBuf;

/// Replaces characters that cannot appear in file names.
///
/// Path separators become `-`; a `:` is left alone.
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| match c {
            '/' | '\\' => '-',
            '<' | '>' | '"' | '|' | '?' | '*' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

/// Container name of a MIME type: the text between `/` and the first `;`.
///
/// `video/mp4; codecs="avc1"` gives `mp4`.
pub fn extract_extension(mime_type: &str) -> &str {
    let essence = mime_type
        .split_once(';')
        .map_or(mime_type, |(essence, _)| essence);
    let subtype = essence
        .split_once('/')
        .map_or(essence, |(_, subtype)| subtype);
    subtype.trim()
}

/// `<sanitized title>.<extension>`; an empty title falls back to `fallback`.
pub fn output_filename(title: &str, fallback: &str, mime_type: &str) -> PathBuf {
    let stem = if title.trim().is_empty() {
        fallback
    } else {
        title
    };

    PathBuf::from(format!(
        "{}.{}",
        sanitize_filename(stem),
        extract_extension(mime_type)
    ))
}
