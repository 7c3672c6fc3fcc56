//! Domain model for blog records.
//!
//! # Responsibility
//! - Define the Author and Post records and their drafts.
//! - Own the field validators every write path goes through.
//!
//! # Invariants
//! - A record value that exists in memory already satisfies every
//!   store-independent field rule.
//! - Records are identified by store-assigned integer ids.

pub mod author;
pub mod post;
pub mod validation;
