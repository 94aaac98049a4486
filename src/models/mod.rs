//! Domain models for the study sheet.
//!
//! # Core Concepts
//!
//! - [`Sheet`]: The root document. One instance per process, replaced wholesale on every edit.
//! - [`Topic`]: A named grouping of [`SubTopic`]s.
//! - [`SubTopic`]: A named grouping of [`Question`]s.
//! - [`Question`]: A leaf item with a [`Difficulty`], a link and a completion flag.
//!
//! [`Progress`] is derived from the questions on demand and is never part of
//! the stored document.

mod progress;
mod question;
mod sheet;

pub use progress::*;
pub use question::*;
pub use sheet::*;
