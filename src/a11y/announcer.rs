use std::time::{Duration, Instant};

/// Speech channel. Assertive interrupts whatever the reader is saying,
/// polite waits its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Polite,
    Assertive,
}

impl Channel {
    fn index(self) -> usize {
        match self {
            Channel::Polite => 0,
            Channel::Assertive => 1,
        }
    }

    fn from_index(idx: usize) -> Self {
        if idx == 0 {
            Channel::Polite
        } else {
            Channel::Assertive
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Pending {
    nonce: u64,
    text: String,
}

/// Text ready to be written to a live line, marker already applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Committed {
    pub channel: Channel,
    pub text: String,
}

/// Staging area between "something wants to be spoken" and the once-per-frame
/// write into the live lines. Duplicate suppression is global across both
/// channels; supersession is per channel and resolved by nonce at pump time.
#[derive(Debug, Clone, PartialEq)]
pub struct Announcer {
    debounce: Duration,
    next_nonce: u64,
    last_accepted: Option<(String, Instant)>,
    pending: [Option<Pending>; 2],
    committed_nonce: [u64; 2],
    marker_flip: [bool; 2],
}

// Appended to every other commit so identical visible text still registers
// as a fresh change to diff-based readers.
const MARKER: char = '\u{200B}';

impl Announcer {
    #[must_use]
    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            next_nonce: 0,
            last_accepted: None,
            pending: [None, None],
            committed_nonce: [0, 0],
            marker_flip: [false, false],
        }
    }

    /// Queues `text` for the next frame. Whitespace is collapsed first; a
    /// repeat of the previous accepted text inside the debounce window is
    /// dropped outright. Dropped calls do not refresh the window.
    pub fn announce(&mut self, text: &str, channel: Channel, now: Instant) {
        let normalized = normalize(text);
        if normalized.is_empty() {
            return;
        }

        if let Some((last, at)) = &self.last_accepted {
            if *last == normalized && now.duration_since(*at) < self.debounce {
                tracing::trace!(text = %normalized, "announcement deduplicated");
                return;
            }
        }

        self.next_nonce += 1;
        self.last_accepted = Some((normalized.clone(), now));
        self.pending[channel.index()] = Some(Pending {
            nonce: self.next_nonce,
            text: normalized,
        });
    }

    /// Frame pump. Drains at most one announcement per channel, the newest;
    /// anything superseded since it was queued is skipped silently.
    pub fn take_ready(&mut self) -> Vec<Committed> {
        let mut ready = Vec::new();
        for idx in 0..self.pending.len() {
            let Some(pending) = self.pending[idx].take() else {
                continue;
            };
            if pending.nonce <= self.committed_nonce[idx] {
                continue;
            }
            self.committed_nonce[idx] = pending.nonce;
            self.marker_flip[idx] = !self.marker_flip[idx];
            let text = if self.marker_flip[idx] {
                let mut text = pending.text;
                text.push(MARKER);
                text
            } else {
                pending.text
            };
            ready.push(Committed {
                channel: Channel::from_index(idx),
                text,
            });
        }
        ready
    }
}

impl Default for Announcer {
    fn default() -> Self {
        Self::new(Duration::from_millis(300))
    }
}

fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn announcer() -> Announcer {
        Announcer::new(Duration::from_millis(300))
    }

    fn texts(committed: &[Committed]) -> Vec<String> {
        committed
            .iter()
            .map(|c| c.text.trim_end_matches(MARKER).to_string())
            .collect()
    }

    #[test]
    fn collapses_whitespace_and_newlines() {
        let mut a = announcer();
        let now = Instant::now();
        a.announce("  You\n rolled \t a   six  ", Channel::Polite, now);
        assert_eq!(texts(&a.take_ready()), vec!["You rolled a six"]);
    }

    #[test]
    fn blank_text_is_ignored() {
        let mut a = announcer();
        a.announce("   \n\t ", Channel::Polite, Instant::now());
        assert!(a.take_ready().is_empty());
    }

    #[test]
    fn duplicate_inside_window_commits_once() {
        let mut a = announcer();
        let now = Instant::now();
        a.announce("Your turn", Channel::Polite, now);
        a.announce("Your turn", Channel::Polite, now + Duration::from_millis(100));
        assert_eq!(a.take_ready().len(), 1);
        assert!(a.take_ready().is_empty());
    }

    #[test]
    fn duplicate_after_window_commits_again() {
        let mut a = announcer();
        let now = Instant::now();
        a.announce("Your turn", Channel::Polite, now);
        assert_eq!(a.take_ready().len(), 1);
        a.announce("Your turn", Channel::Polite, now + Duration::from_millis(400));
        assert_eq!(a.take_ready().len(), 1);
    }

    #[test]
    fn dropped_duplicates_do_not_refresh_the_window() {
        let mut a = announcer();
        let now = Instant::now();
        a.announce("Bid", Channel::Polite, now);
        // Dropped: inside the window of the first call.
        a.announce("Bid", Channel::Polite, now + Duration::from_millis(250));
        // Accepted: the window is still measured from the first call.
        a.announce("Bid", Channel::Polite, now + Duration::from_millis(350));
        assert_eq!(a.take_ready().len(), 1);
    }

    #[test]
    fn dedup_applies_across_channels() {
        let mut a = announcer();
        let now = Instant::now();
        a.announce("Dealt", Channel::Polite, now);
        a.announce("Dealt", Channel::Assertive, now + Duration::from_millis(50));
        let ready = a.take_ready();
        assert_eq!(ready.len(), 1);
        assert_eq!(ready[0].channel, Channel::Polite);
    }

    #[test]
    fn newer_announcement_supersedes_uncommitted_one() {
        let mut a = announcer();
        let now = Instant::now();
        a.announce("first", Channel::Polite, now);
        a.announce("second", Channel::Polite, now + Duration::from_millis(10));
        assert_eq!(texts(&a.take_ready()), vec!["second"]);
    }

    #[test]
    fn channels_commit_independently() {
        let mut a = announcer();
        let now = Instant::now();
        a.announce("status", Channel::Polite, now);
        a.announce("alert", Channel::Assertive, now + Duration::from_millis(10));
        let ready = a.take_ready();
        assert_eq!(ready.len(), 2);
        assert_eq!(ready[0].channel, Channel::Polite);
        assert_eq!(ready[1].channel, Channel::Assertive);
    }

    #[test]
    fn marker_alternates_on_successive_commits() {
        let mut a = announcer();
        let now = Instant::now();
        a.announce("round one", Channel::Polite, now);
        let first = a.take_ready();
        a.announce("round one", Channel::Polite, now + Duration::from_millis(400));
        let second = a.take_ready();
        assert!(first[0].text.ends_with(MARKER));
        assert!(!second[0].text.ends_with(MARKER));
        // The visible text would otherwise be byte-identical.
        assert_ne!(first[0].text, second[0].text);
    }
}
