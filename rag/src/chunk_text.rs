/// Split a document into paragraph chunks on blank lines.
///
/// Each candidate is trimmed before the emptiness check, so runs of blank lines and
/// whitespace-only paragraphs never produce a chunk. There is no size limit and no overlap.
pub fn chunk_text(text: &str) -> Vec<String> {
    let text = text.replace("\r\n", "\n");
    text.split("\n\n")
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .map(str::to_string)
        .collect()
}
