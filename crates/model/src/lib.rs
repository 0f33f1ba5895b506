//! Document model for the story notification dispatcher.
//!
//! Documents are stored as ordered JSON objects ([`Document`]). The typed views
//! in this crate decode only the fields the dispatcher reads; everything else in
//! a document is ignored and left untouched by writes.

pub mod document;
pub mod error;
pub mod partnership;
pub mod path;
pub mod queue;
pub mod story;
pub mod user;

pub use document::{Document, decode, value_text};
pub use error::{ModelError, Result};
pub use partnership::PartnershipDocument;
pub use path::DocPath;
pub use queue::QueuedNotification;
pub use story::StoryDocument;
pub use user::UserDocument;
