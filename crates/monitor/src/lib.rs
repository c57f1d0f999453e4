//! Drives chain watchers and hands the messages they find to a sink.
pub mod driver;
pub mod sink;
