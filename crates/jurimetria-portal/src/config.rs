use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Public case search of the TJSP first-instance e-SAJ.
pub const SEARCH_URL: &str = "https://esaj.tjsp.jus.br/cpopg/open.do";

pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Browser and timing settings for a portal session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalConfig {
    pub search_url: String,
    /// Budget for navigation and for the result page to settle.
    pub page_timeout_ms: u64,
    /// Budget for each form element to appear.
    pub element_timeout_ms: u64,
    /// Pause between keystrokes when typing the case number.
    pub typing_delay_ms: u64,
    pub headless: bool,
    pub window: (u32, u32),
    pub user_agent: String,
    /// Extra Chromium command-line switches.
    pub args: Vec<String>,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            search_url: SEARCH_URL.to_string(),
            page_timeout_ms: 30_000,
            element_timeout_ms: 15_000,
            typing_delay_ms: 50,
            headless: true,
            window: (1366, 768),
            user_agent: USER_AGENT.to_string(),
            args: vec!["--disable-blink-features=AutomationControlled".to_string()],
        }
    }
}

impl PortalConfig {
    pub fn page_timeout(&self) -> Duration {
        Duration::from_millis(self.page_timeout_ms)
    }

    pub fn element_timeout(&self) -> Duration {
        Duration::from_millis(self.element_timeout_ms)
    }

    pub fn typing_delay(&self) -> Duration {
        Duration::from_millis(self.typing_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = PortalConfig::default();
        assert_eq!(config.search_url, SEARCH_URL);
        assert_eq!(config.page_timeout(), Duration::from_secs(30));
        assert_eq!(config.element_timeout(), Duration::from_secs(15));
        assert_eq!(config.typing_delay(), Duration::from_millis(50));
        assert!(config.headless);
        assert_eq!(config.window, (1366, 768));
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
        assert!(
            config
                .args
                .iter()
                .any(|a| a.contains("AutomationControlled"))
        );
    }
}
