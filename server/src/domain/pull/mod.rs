//! Image pull extraction pipeline
//!
//! Turns kubelet pull-report events into metric observations:
//! `RawEvent -> filter -> parse -> attributes -> record`. Every stage is a
//! pure transform except recording, and no stage keeps state between events.

pub mod attrs;
pub mod event;
pub mod filter;
pub mod parse;
pub mod pipeline;
pub mod record;

pub use event::RawEvent;
pub use parse::{ParseError, ParsedPullRecord, parse_message};
pub use pipeline::PullPipeline;
pub use record::PullInstruments;
