pub use vm::{Fault, Lmc, StopReason};

pub mod digits;
pub mod load;
pub mod op;
pub mod port;
pub mod vm;
