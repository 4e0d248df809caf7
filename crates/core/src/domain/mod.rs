pub mod call;
pub mod trace;
