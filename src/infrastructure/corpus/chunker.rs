//! Paragraph-packing chunker for corpus files

/// Split text into paragraph-aligned chunks of at most `chunk_size` bytes
///
/// Paragraphs are packed greedily; a single paragraph larger than the
/// limit becomes its own chunk rather than being split mid-sentence.
pub fn chunk_paragraphs(content: &str, chunk_size: usize) -> Vec<String> {
    let content = content.trim();

    if content.is_empty() {
        return Vec::new();
    }

    if content.len() <= chunk_size {
        return vec![content.to_string()];
    }

    let paragraphs: Vec<&str> = content
        .split("\n\n")
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect();

    let mut chunks = Vec::new();
    let mut current = String::new();

    for paragraph in paragraphs {
        if current.is_empty() {
            current.push_str(paragraph);
        } else if current.len() + 2 + paragraph.len() <= chunk_size {
            current.push_str("\n\n");
            current.push_str(paragraph);
        } else {
            chunks.push(std::mem::take(&mut current));
            current.push_str(paragraph);
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}
