//! Format implementations
//!
//! This module contains all format implementations that convert between
//! the IR document and its text representations.

pub mod html;
pub mod icons;
pub mod treeviz;
pub mod wiki;

pub use html::{HtmlFormat, HtmlOptions};
pub use treeviz::TreevizFormat;
pub use wiki::WikiFormat;
