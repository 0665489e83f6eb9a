use jurimetria_core::CaseNumberError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PortalError {
    #[error("invalid case number: {0}")]
    CaseNumber(#[from] CaseNumberError),

    #[error("invalid selector {selector:?}: {message}")]
    Selector { selector: String, message: String },

    #[error("Chromium not found; set JURIMETRIA_CHROMIUM_PATH or install google-chrome/chromium")]
    ChromiumNotFound,

    #[error("browser config: {0}")]
    BrowserConfig(String),

    #[cfg(feature = "chromium")]
    #[error("browser error: {0}")]
    Cdp(#[from] chromiumoxide::error::CdpError),

    #[error("page script failed: {0}")]
    Script(String),

    #[error("timed out after {ms}ms waiting for {what}")]
    Timeout { what: String, ms: u64 },
}
