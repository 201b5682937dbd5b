use std::fmt;

/// Identifies one user submission. Strictly increasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RequestToken(u64);

impl RequestToken {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out submission tokens and answers whether a captured token is still current.
///
/// Token 0 is never issued, so results carrying it are always stale.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequestSequencer {
    current: RequestToken,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_submission(&mut self) -> RequestToken {
        self.current = RequestToken(self.current.0 + 1);
        self.current
    }

    pub fn current(&self) -> Option<RequestToken> {
        (self.current.0 > 0).then_some(self.current)
    }

    pub fn is_stale(&self, token: RequestToken) -> bool {
        token.0 == 0 || token != self.current
    }
}

#[cfg(test)]
mod tests {
    use super::{RequestSequencer, RequestToken};

    #[test]
    fn tokens_strictly_increase() {
        let mut sequencer = RequestSequencer::new();
        assert_eq!(sequencer.current(), None);
        let first = sequencer.begin_submission();
        let second = sequencer.begin_submission();
        assert!(second > first);
        assert_eq!(sequencer.current(), Some(second));
    }

    #[test]
    fn only_latest_token_is_fresh() {
        let mut sequencer = RequestSequencer::new();
        assert!(sequencer.is_stale(RequestToken::default()));
        let first = sequencer.begin_submission();
        assert!(!sequencer.is_stale(first));
        let second = sequencer.begin_submission();
        assert!(sequencer.is_stale(first));
        assert!(!sequencer.is_stale(second));
        assert!(sequencer.is_stale(RequestToken::new(second.get() + 1)));
    }
}
