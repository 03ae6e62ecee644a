//! Input handling - Turns raw console lines into commands or utterances

pub mod parser;

pub use parser::{ConsoleCommand, Input, InputParser};
