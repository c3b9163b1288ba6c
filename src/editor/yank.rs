/// The cut/copy buffer.
///
/// Segments are separated by line breaks when pasted. `ends_with_newline`
/// adds one more break after the last segment, which is how whole lines are
/// stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YankRing {
    segments: Vec<String>,
    ends_with_newline: bool,
}

impl YankRing {
    pub fn clear(&mut self) {
        self.segments.clear();
        self.ends_with_newline = false;
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn ends_with_newline(&self) -> bool {
        self.ends_with_newline
    }

    /// Replace the contents with whole lines.
    pub fn set_lines(&mut self, lines: Vec<String>) {
        self.segments = lines;
        self.ends_with_newline = true;
    }

    /// Replace the contents with a span inside one line.
    pub fn set_span(&mut self, text: String) {
        self.segments = vec![text];
        self.ends_with_newline = false;
    }

    /// Append text that follows whatever was killed before.
    pub fn push_text(&mut self, text: String) {
        if self.ends_with_newline || self.segments.is_empty() {
            self.segments.push(text);
        } else if let Some(last) = self.segments.last_mut() {
            last.push_str(&text);
        }
        self.ends_with_newline = false;
    }

    /// Append a line break.
    pub fn push_line_break(&mut self) {
        if self.segments.is_empty() || self.ends_with_newline {
            self.segments.push(String::new());
        }
        self.ends_with_newline = true;
    }
}
