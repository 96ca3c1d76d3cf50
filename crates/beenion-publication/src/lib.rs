//! Beenion: Publication bounded context.
//!
//! Publications own an editorial team and a pool of reviewers that projects
//! submitted to the publication can draw from.

pub mod application;
pub mod domain;
