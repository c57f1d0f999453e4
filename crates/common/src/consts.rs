//! Repeated constants used around the monitor

/// User agent used in http clients
pub const USER_AGENT: &str = concat!("vaa-monitor/", env!("CARGO_PKG_VERSION"));
