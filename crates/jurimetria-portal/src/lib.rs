//! e-SAJ portal layer: drives the case search, captures the rendered page,
//! and parses it into an [`Extraction`](jurimetria_core::Extraction).

pub mod config;
mod error;
mod html;
pub mod page;
pub mod rows;
pub mod source;

#[cfg(feature = "chromium")]
pub mod session;

pub use config::PortalConfig;
pub use error::PortalError;
pub use page::{PageSnapshot, parse_snapshot};
pub use source::{CaseSource, extract_case};

#[cfg(feature = "chromium")]
pub use session::{ChromiumPortal, find_chromium};
