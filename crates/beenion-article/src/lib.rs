//! Beenion: Article bounded context.
//!
//! Articles are written for a newsletter. Their owner may always change
//! them; everyone else needs the matching newsletter privilege.

pub mod application;
pub mod domain;
