//! Beenion: Newsletter bounded context.
//!
//! Newsletters publish articles. Which newsletter roles may create, update
//! or delete articles is configurable per newsletter.

pub mod application;
pub mod domain;
