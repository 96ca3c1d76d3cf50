//! Beenion: User bounded context.
//!
//! Users are only ever read by other contexts' commands: this crate owns the
//! user event family, the `User` snapshot and the user history validators.

pub mod domain;
