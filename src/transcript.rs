//! Transcript: the scrollback of processed submissions.
//!
//! Append-only, except for a full reset by `clear`.

use crate::types::TranscriptEntry;

#[derive(Debug, Clone, Default)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Transcript::default()
    }

    pub fn push(&mut self, entry: TranscriptEntry) {
        self.entries.push(entry);
    }

    /// Drop every entry in one step.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries in submission order.
    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&TranscriptEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Output;

    #[test]
    fn entries_keep_submission_order() {
        let mut t = Transcript::new();
        t.push(TranscriptEntry::new("one", Output::default()));
        t.push(TranscriptEntry::new("two", Output::default()));
        let inputs: Vec<&str> = t.entries().iter().map(|e| e.input.as_str()).collect();
        assert_eq!(inputs, vec!["one", "two"]);
        assert_eq!(t.last().map(|e| e.input.as_str()), Some("two"));
    }

    #[test]
    fn clear_empties_everything() {
        let mut t = Transcript::new();
        for i in 0..5 {
            t.push(TranscriptEntry::new(&i.to_string(), Output::default()));
        }
        t.clear();
        assert!(t.is_empty());
        assert_eq!(t.len(), 0);
    }
}
