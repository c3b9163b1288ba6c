//! Column arithmetic on lines. A column is a grapheme index, never a byte offset.

use unicode_segmentation::UnicodeSegmentation;

/// Number of columns in `line`.
pub fn len(line: &str) -> usize {
    line.graphemes(true).count()
}

/// Byte offset of column `col`, or the end of the line past the last column.
pub fn byte_at(line: &str, col: usize) -> usize {
    line.grapheme_indices(true).nth(col).map_or(line.len(), |(at, _)| at)
}

/// Column that starts at byte offset `byte`.
pub fn col_at(line: &str, byte: usize) -> usize {
    line[..byte].graphemes(true).count()
}

pub fn split_at(line: &str, col: usize) -> (&str, &str) {
    line.split_at(byte_at(line, col))
}

/// Columns `from..to`.
pub fn slice(line: &str, from: usize, to: usize) -> &str {
    &line[byte_at(line, from)..byte_at(line, to)]
}

pub fn remove(line: &mut String, from: usize, to: usize) {
    let range = byte_at(line, from)..byte_at(line, to);
    line.replace_range(range, "");
}

pub fn insert(line: &mut String, col: usize, ch: char) {
    let at = byte_at(line, col);
    line.insert(at, ch);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_are_graphemes() {
        let line = "e\u{301}pe\u{301}e";
        assert_eq!(len(line), 4);
        assert_eq!(slice(line, 1, 3), "pe\u{301}");
        assert_eq!(col_at(line, byte_at(line, 3)), 3);
        assert_eq!(byte_at(line, 10), line.len());
    }

    #[test]
    fn edit_in_place() {
        let mut line = "ring".to_string();
        insert(&mut line, 1, 'a');
        assert_eq!(line, "raing");
        remove(&mut line, 0, 2);
        assert_eq!(line, "ing");
        assert_eq!(split_at(&line, 1), ("i", "ng"));
    }
}
