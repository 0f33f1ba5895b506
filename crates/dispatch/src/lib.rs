//! Push notification dispatch for collaborative stories.
//!
//! Two independent handlers run per document event:
//! - [`Dispatcher::on_story_updated`] notifies the author's partner the first
//!   time a story gains text.
//! - [`Dispatcher::on_notification_queued`] sends a persisted queue record and
//!   marks it processed, tolerating redelivery of the same create event.
//!
//! Both share [`deliver_push`], which sends a message and runs a
//! [`FailureHook`] when the gateway rejects it. Handlers never return errors:
//! every failure is logged and reported as part of the handler's outcome.

mod config;
mod deliver;
mod detect;
mod dispatcher;
mod error;
mod partner;
mod queue;
mod story;
mod trigger;

pub use config::DispatchConfig;
pub use deliver::{Delivery, FailureHook, deliver_push};
pub use detect::{Classification, classify};
pub use dispatcher::{Dispatcher, Outcome};
pub use error::{DispatchError, Result};
pub use partner::{PartnerError, resolve_partner};
pub use queue::QueueOutcome;
pub use story::{Completion, StoryOutcome};
pub use trigger::{Route, TriggerEvent};
