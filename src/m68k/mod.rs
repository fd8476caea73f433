pub mod register;

pub mod trace;
