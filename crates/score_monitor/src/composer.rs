/// Football Updates: Message Composer
/// Buffer řádků zápasů, žije jen po dobu jednoho cyklu

use football_feed::ExtractedMatch;

pub const PREVIEW_HEADER: &str = "Live Football Scores:";

/// Lines accumulate for the lifetime of one cycle; build a fresh composer per cycle.
#[derive(Debug, Default)]
pub struct MessageComposer {
    buffer: String,
}

impl MessageComposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compose_line(m: &ExtractedMatch) -> String {
        format!("Match: {} vs {}:", m.home_team, m.away_team)
    }

    /// Appends the match line and returns it.
    pub fn push(&mut self, m: &ExtractedMatch) -> String {
        let line = Self::compose_line(m);
        self.buffer.push_str(&line);
        self.buffer.push('\n');
        line
    }

    /// Buffer without the trailing newline, this is what gets dispatched.
    pub fn contents(&self) -> &str {
        self.buffer.strip_suffix('\n').unwrap_or(&self.buffer)
    }

    /// Log-only rendering with the header line.
    pub fn preview(&self) -> String {
        format!("{PREVIEW_HEADER}\n{}", self.buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(home: &str, away: &str) -> ExtractedMatch {
        ExtractedMatch {
            home_team: home.to_string(),
            away_team: away.to_string(),
            score:     "N/A".to_string(),
        }
    }

    #[test]
    fn line_format() {
        assert_eq!(
            MessageComposer::compose_line(&m("Arsenal", "Chelsea")),
            "Match: Arsenal vs Chelsea:"
        );
        assert_eq!(
            MessageComposer::compose_line(&m("Unknown Team", "Unknown Team")),
            "Match: Unknown Team vs Unknown Team:"
        );
    }

    #[test]
    fn buffer_accumulates_without_reset() {
        let mut c = MessageComposer::new();
        assert_eq!(c.contents(), "");
        assert_eq!(c.preview(), "Live Football Scores:\n");

        assert_eq!(c.push(&m("A", "B")), "Match: A vs B:");
        assert_eq!(c.contents(), "Match: A vs B:");

        c.push(&m("C", "D"));
        assert_eq!(c.contents(), "Match: A vs B:\nMatch: C vs D:");
        assert_eq!(
            c.preview(),
            "Live Football Scores:\nMatch: A vs B:\nMatch: C vs D:\n"
        );
    }
}
