mod udp;

pub use udp::*;
