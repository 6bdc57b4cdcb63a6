pub mod decoder;
pub mod error;
pub mod processor;
pub mod quirks;
pub mod ram;
pub mod rom;
pub mod timer;
