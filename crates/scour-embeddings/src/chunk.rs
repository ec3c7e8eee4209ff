/// Split text into overlapping word windows.
///
/// Windows advance by `chunk_size - chunk_overlap` words; the final window
/// may be shorter. Empty input yields no chunks.
pub fn chunk_text(text: &str, chunk_size: usize, chunk_overlap: usize) -> Vec<String> {
    if text.trim().is_empty() || chunk_size == 0 {
        return vec![];
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    let step = chunk_size.saturating_sub(chunk_overlap).max(1);
    let mut chunks = Vec::new();

    let mut start = 0;
    while start < words.len() {
        let end = (start + chunk_size).min(words.len());
        chunks.push(words[start..end].join(" "));
        if end == words.len() {
            break;
        }
        start += step;
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_yields_no_chunks() {
        assert!(chunk_text("", 10, 2).is_empty());
        assert!(chunk_text("   ", 10, 2).is_empty());
    }

    #[test]
    fn short_text_is_one_chunk() {
        let chunks = chunk_text("one two three", 10, 2);
        assert_eq!(chunks, vec!["one two three".to_string()]);
    }

    #[test]
    fn windows_overlap() {
        let chunks = chunk_text("a b c d e f", 4, 2);
        assert_eq!(chunks[0], "a b c d");
        assert_eq!(chunks[1], "c d e f");
    }
}
