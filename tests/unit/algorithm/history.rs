//! Tests for the removal log and its checkpoint counter

#[cfg(test)]
mod tests {
    use unbuild::algorithm::eligibility::Hypothesis;
    use unbuild::algorithm::history::{History, HistoryEntry};

    // Tests the mark counter follows pushed and popped checkpoints
    // Verified by counting removals as marks
    #[test]
    fn test_marks_follow_checkpoints() {
        let mut history = History::new();
        history.push(HistoryEntry::removal(3, Hypothesis::Oldest));
        history.push(HistoryEntry::checkpoint(7, Hypothesis::Oldest));
        history.push(HistoryEntry::removal(8, Hypothesis::Newest));
        assert_eq!(history.marks(), 1);
        assert_eq!(history.len(), 3);

        assert_eq!(
            history.pop(),
            Some(HistoryEntry::removal(8, Hypothesis::Newest))
        );
        assert_eq!(history.marks(), 1);
        let checkpoint = history.pop().unwrap();
        assert!(checkpoint.checkpoint);
        assert_eq!(checkpoint.hypothesis, Hypothesis::Oldest);
        assert_eq!(history.marks(), 0);
    }

    // Tests removals skip checkpoints and keep log order
    // Verified by returning all entries from removals
    #[test]
    fn test_removals_skip_checkpoints() {
        let mut history = History::with_capacity(4);
        history.push(HistoryEntry::removal(1, Hypothesis::Newest));
        history.push(HistoryEntry::checkpoint(2, Hypothesis::Oldest));
        history.push(HistoryEntry::removal(2, Hypothesis::Newest));

        let indices: Vec<usize> = history.removals().map(|entry| entry.index).collect();
        assert_eq!(indices, vec![1, 2]);
    }

    // Tests appending concatenates entries and marks
    // Verified by prepending instead of appending
    #[test]
    fn test_append() {
        let mut first = History::new();
        first.push(HistoryEntry::removal(0, Hypothesis::Oldest));

        let mut second = History::new();
        second.push(HistoryEntry::checkpoint(5, Hypothesis::Oldest));
        second.push(HistoryEntry::removal(6, Hypothesis::Newest));

        first.append(&second);
        let indices: Vec<usize> = first.entries().iter().map(|entry| entry.index).collect();
        assert_eq!(indices, vec![0, 5, 6]);
        assert_eq!(first.marks(), 1);
    }

    // Tests popping an empty log yields nothing
    // Verified by underflowing the mark counter
    #[test]
    fn test_pop_empty() {
        let mut history = History::new();
        assert!(history.is_empty());
        assert_eq!(history.pop(), None);
        assert_eq!(history.marks(), 0);
    }
}
