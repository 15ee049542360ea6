/// Split `text` into contiguous pieces of `chunk_chars` characters.
///
/// Every piece except the last holds exactly `chunk_chars` characters; the
/// last holds between 1 and `chunk_chars`. Concatenating the pieces in
/// order gives back `text`. Empty input yields no pieces. Splits fall on
/// character boundaries, never inside a multi-byte character.
///
/// A `chunk_chars` of 0 is treated as 1.
pub fn chunk(text: &str, chunk_chars: usize) -> Vec<&str> {
    let size = chunk_chars.max(1);
    let mut chunks = Vec::with_capacity(text.len() / size + 1);
    let mut start = 0;
    let mut count = 0;

    for (idx, _) in text.char_indices() {
        if count == size {
            chunks.push(&text[start..idx]);
            start = idx;
            count = 0;
        }
        count += 1;
    }

    if start < text.len() {
        chunks.push(&text[start..]);
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_invariants(text: &str, size: usize) {
        let chunks = chunk(text, size);
        assert_eq!(chunks.concat(), text);
        if let Some((last, head)) = chunks.split_last() {
            for piece in head {
                assert_eq!(piece.chars().count(), size);
            }
            let last_len = last.chars().count();
            assert!(last_len >= 1 && last_len <= size);
        }
    }

    #[test]
    fn uneven_split() {
        assert_eq!(chunk("abcdefg", 3), vec!["abc", "def", "g"]);
    }

    #[test]
    fn exact_multiple_has_no_empty_tail() {
        assert_eq!(chunk("abcdef", 3), vec!["abc", "def"]);
    }

    #[test]
    fn shorter_than_chunk() {
        assert_eq!(chunk("ab", 3000), vec!["ab"]);
    }

    #[test]
    fn empty_text_has_no_chunks() {
        assert!(chunk("", 10).is_empty());
    }

    #[test]
    fn multibyte_counted_as_chars() {
        let text = "añb😀cé";
        let chunks = chunk(text, 2);
        assert_eq!(chunks, vec!["añ", "b😀", "cé"]);
    }

    #[test]
    fn invariants_hold_across_sizes() {
        let text = "{\n  \"categories\": {\n    \"performance\": {\"título\": \"Rendimiento\"}\n  }\n}";
        for size in 1..=text.chars().count() + 1 {
            check_invariants(text, size);
        }
    }

    #[test]
    fn zero_size_treated_as_one() {
        assert_eq!(chunk("abc", 0), vec!["a", "b", "c"]);
    }
}
