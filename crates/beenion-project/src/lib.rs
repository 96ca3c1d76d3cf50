//! Beenion: Project bounded context.
//!
//! Projects are submitted to a publication and collect invited reviewers
//! until they are closed.

pub mod application;
pub mod domain;
