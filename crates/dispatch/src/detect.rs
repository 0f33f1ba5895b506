//! Story text transition classification.

/// How a story update changed its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
	/// Text went from empty to non-empty.
	Completed,
	/// Already-written text changed.
	Edited,
	/// Nothing relevant changed.
	NoOp,
}

impl Classification {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Completed => "completed",
			Self::Edited => "edited",
			Self::NoOp => "no_op",
		}
	}
}

/// Classifies a story text transition. Surrounding whitespace is ignored.
pub fn classify(old_text: &str, new_text: &str) -> Classification {
	let old_text = old_text.trim();
	let new_text = new_text.trim();
	if old_text.is_empty() && !new_text.is_empty() {
		Classification::Completed
	} else if !old_text.is_empty() && new_text != old_text {
		Classification::Edited
	} else {
		Classification::NoOp
	}
}
