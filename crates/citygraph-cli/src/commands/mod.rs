//! The two procedures exposed by the binary.
//!
//! Both write their report to a [`Console`](crate::console::Console) and
//! return an error only for failures that should end the process non-zero.

pub mod deploy;
pub mod webhook;
