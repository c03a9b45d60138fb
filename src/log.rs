/// One diagnostic recorded while productions are registered.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LogMsg {
    Note(String),
    Warning(String),
}

/// Ordered collection of notes and warnings.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Log {
    messages: Vec<LogMsg>,
    num_notes: usize,
    num_warnings: usize,
}

impl Log {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Clears all messages.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.num_notes = 0;
        self.num_warnings = 0;
    }

    /// Appends another log's messages after this one's.
    pub fn extend(&mut self, other: Self) {
        self.num_notes += other.num_notes;
        self.num_warnings += other.num_warnings;
        self.messages.extend(other.messages);
    }

    pub fn messages(&self) -> impl Iterator<Item = &LogMsg> {
        self.messages.iter()
    }

    pub fn notes(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().filter_map(|m| match m {
            LogMsg::Note(s) => Some(s.as_str()),
            LogMsg::Warning(_) => None,
        })
    }

    pub fn warnings(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().filter_map(|m| match m {
            LogMsg::Warning(s) => Some(s.as_str()),
            LogMsg::Note(_) => None,
        })
    }
}

pub trait Logger {
    fn add_note<T: Into<String>>(&mut self, msg: T);
    fn add_warning<T: Into<String>>(&mut self, msg: T);
    fn num_notes(&self) -> usize;
    fn num_warnings(&self) -> usize;
}

impl Logger for Log {
    fn add_note<T: Into<String>>(&mut self, msg: T) {
        self.messages.push(LogMsg::Note(msg.into()));
        self.num_notes += 1;
    }

    fn add_warning<T: Into<String>>(&mut self, msg: T) {
        self.messages.push(LogMsg::Warning(msg.into()));
        self.num_warnings += 1;
    }

    fn num_notes(&self) -> usize {
        self.num_notes
    }

    fn num_warnings(&self) -> usize {
        self.num_warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[ntest::timeout(100)]
    fn test_counts_and_order() {
        let mut log = Log::new();
        assert!(log.is_empty());

        log.add_note("first");
        log.add_warning("second");
        log.add_note("third");

        assert_eq!(log.num_notes(), 2);
        assert_eq!(log.num_warnings(), 1);
        assert_eq!(log.notes().collect::<Vec<_>>(), vec!["first", "third"]);
        assert_eq!(log.warnings().collect::<Vec<_>>(), vec!["second"]);
        assert_eq!(
            log.messages().next(),
            Some(&LogMsg::Note("first".to_string()))
        );

        let mut other = Log::new();
        other.add_warning("fourth");
        log.extend(other);
        assert_eq!(log.num_warnings(), 2);

        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.num_notes(), 0);
    }
}
