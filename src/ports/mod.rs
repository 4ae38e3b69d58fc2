//! Port traits for external collaborators.

pub mod journal_port;
