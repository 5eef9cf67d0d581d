mod uptime;

pub use uptime::*;
