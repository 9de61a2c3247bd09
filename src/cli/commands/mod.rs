pub mod classify;
pub mod encode;
