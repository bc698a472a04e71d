//! Background Datalog Parsing
//!
//! Runs the CSV parse off the caller's thread so large logs do not block
//! interactive rendering. Progress and the terminal result arrive over an
//! mpsc channel; callers correlate messages to requests by id. There is no
//! cancellation: a superseded request still completes, and the caller
//! discards the stale result.

mod worker;

pub use worker::{spawn_parse, ParseRequest, ParseUpdate, PROGRESS_STEP};
