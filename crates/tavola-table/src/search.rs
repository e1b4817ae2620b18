//! Debounced free-text search input
//!
//! Keystrokes are collected with [`SearchDebouncer::input`]; the keyword only
//! settles once the input has been quiet for the debounce window. The host's
//! event loop polls with the current time and forwards a settled keyword to
//! [`TableController::set_keyword`](crate::TableController::set_keyword).

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    delay: Duration,
    pending: Option<(String, Instant)>,
    applied: String,
}

impl SearchDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            applied: String::new(),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// The keyword most recently handed out
    pub fn applied(&self) -> &str {
        &self.applied
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending input will settle, if any
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, due)| *due)
    }

    /// Record the current input text; restarts the debounce window
    pub fn input(&mut self, text: &str, now: Instant) {
        self.pending = Some((text.trim().to_string(), now + self.delay));
    }

    /// Yield the settled keyword once the window has elapsed and it differs
    /// from the last applied one
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some((_, due)) if now >= *due => self.settle(),
            _ => None,
        }
    }

    /// Settle immediately (e.g. on Enter)
    pub fn flush(&mut self) -> Option<String> {
        self.settle()
    }

    /// Drop pending input and the applied keyword; yields an empty keyword if
    /// one was applied
    pub fn clear(&mut self) -> Option<String> {
        self.pending = None;
        if self.applied.is_empty() {
            return None;
        }
        self.applied.clear();
        Some(String::new())
    }

    fn settle(&mut self) -> Option<String> {
        let (text, _) = self.pending.take()?;
        if text == self.applied {
            return None;
        }
        tracing::debug!(keyword = %text, "Search keyword settled");
        self.applied = text.clone();
        Some(text)
    }
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(Duration::from_millis(300))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(300);

    #[test]
    fn test_settles_after_quiet_period() {
        let start = Instant::now();
        let mut search = SearchDebouncer::new(DELAY);

        search.input("p", start);
        search.input("pas", start + Duration::from_millis(100));
        assert_eq!(search.poll(start + Duration::from_millis(350)), None);
        assert!(search.is_pending());

        assert_eq!(
            search.poll(start + Duration::from_millis(400)),
            Some("pas".to_string())
        );
        assert!(!search.is_pending());
        assert_eq!(search.applied(), "pas");
    }

    #[test]
    fn test_unchanged_keyword_is_not_reapplied() {
        let start = Instant::now();
        let mut search = SearchDebouncer::new(DELAY);

        search.input("curry", start);
        assert_eq!(search.flush(), Some("curry".to_string()));

        search.input(" curry ", start);
        assert_eq!(search.poll(start + DELAY), None);
    }

    #[test]
    fn test_clear() {
        let mut search = SearchDebouncer::new(DELAY);
        assert_eq!(search.clear(), None);

        search.input("tofu", Instant::now());
        search.flush();
        assert_eq!(search.clear(), Some(String::new()));
        assert_eq!(search.applied(), "");
    }
}
