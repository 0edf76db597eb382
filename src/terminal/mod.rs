//! Terminal presentation of a rendered frame.

mod output;

pub use output::OutputBuffer;
