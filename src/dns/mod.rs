//! DNS checks for candidate emails
//!
//! An email is only reported when its domain publishes at least one MX record.

mod mx;

pub use mx::{MxCheck, MxValidator};
