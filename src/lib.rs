pub mod logger;

pub mod m68k;

pub mod serde;
