//! Internal machinery shared by the public bitmap modules.

pub mod rlw;
