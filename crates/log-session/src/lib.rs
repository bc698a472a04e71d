//! Analysis Session
//!
//! The session object owns the state a viewer needs between interactions:
//! the current parsed table, resolved channel roles, and the source name.
//! It replaces global module state with an explicit object the caller owns
//! and hands around; all computation stays in the pure engine crates, and
//! everything returned here is plain serializable data.

mod session;

pub use session::{AnalysisSession, ChannelComparison};
