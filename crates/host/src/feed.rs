//! Newline-delimited JSON event feed.

use storybell_dispatch::TriggerEvent;

/// Parses one feed line.
///
/// Blank lines and `#` comments yield `None`; malformed lines are logged and
/// skipped so one bad event never stops the feed.
pub fn parse_line(line_no: usize, line: &str) -> Option<TriggerEvent> {
	let line = line.trim();
	if line.is_empty() || line.starts_with('#') {
		return None;
	}
	match serde_json::from_str(line) {
		Ok(event) => Some(event),
		Err(e) => {
			tracing::warn!(line = line_no, error = %e, "skipping malformed event");
			None
		}
	}
}
