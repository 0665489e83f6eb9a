//! Chromium session driving the e-SAJ search form over CDP.

use std::fmt::Display;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::element::Element;
use chromiumoxide::page::{Page, ScreenshotParams};
use futures::StreamExt;
use jurimetria_core::CaseNumber;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::page::PageSnapshot;
use crate::source::CaseSource;
use crate::{PortalConfig, PortalError};

const SEARCH_BY_NUMBER: &str = "#radioNumeroUnificado";
const NUMBER_INPUT: &str = "#numeroDigitoAnoUnificado";
const FORUM_INPUT: &str = "#foroNumeroUnificado";
const SUBMIT: &str = "#botaoConsultarProcessos";

const POLL: Duration = Duration::from_millis(100);

/// Clicks the "Mais" parties expander and the "all movements" link when
/// they exist.
const EXPAND_JS: &str = r#"(() => {
  const more = [...document.querySelectorAll('a, span, button')]
    .find(e => e.textContent.trim() === 'Mais');
  if (more) more.click();
  const all = document.querySelector('#linkTodasMovimentacoes');
  if (all) all.click();
  return !!(more || all);
})()"#;

/// True once the case header or the portal message is rendered and visible.
const RESULT_VISIBLE_JS: &str = r#"(() => ['#classeProcesso', '#mensagemRetorno'].some(sel => {
  const el = document.querySelector(sel);
  return !!el && el.offsetParent !== null;
}))()"#;

const BODY_TEXT_JS: &str = "document.body ? document.body.innerText : ''";

/// Find the Chromium binary: `JURIMETRIA_CHROMIUM_PATH`, then the usual
/// names on `PATH`.
pub fn find_chromium() -> Option<PathBuf> {
    if let Ok(p) = std::env::var("JURIMETRIA_CHROMIUM_PATH") {
        let path = PathBuf::from(&p);
        if path.exists() {
            return Some(path);
        }
    }

    ["google-chrome", "chromium", "chromium-browser"]
        .into_iter()
        .find_map(|name| which::which(name).ok())
}

/// One browser for a whole batch; each case gets a fresh page.
pub struct ChromiumPortal {
    browser: Browser,
    handler: JoinHandle<()>,
    config: PortalConfig,
    page: Option<Page>,
}

impl ChromiumPortal {
    pub async fn launch(config: PortalConfig) -> Result<Self, PortalError> {
        let chrome = find_chromium().ok_or(PortalError::ChromiumNotFound)?;
        let (width, height) = config.window;

        let mut builder = BrowserConfig::builder()
            .chrome_executable(chrome)
            .window_size(width, height)
            .viewport(None)
            .arg(format!("--user-agent={}", config.user_agent));
        if !config.headless {
            builder = builder.with_head();
        }
        for arg in &config.args {
            builder = builder.arg(arg.clone());
        }
        let browser_config = builder.build().map_err(PortalError::BrowserConfig)?;

        let (browser, mut events) = Browser::launch(browser_config).await?;
        let handler = tokio::spawn(async move {
            while let Some(event) = events.next().await {
                if let Err(e) = event {
                    debug!(error = %e, "cdp handler event");
                }
            }
        });

        info!(headless = config.headless, "browser launched");
        Ok(Self {
            browser,
            handler,
            config,
            page: None,
        })
    }

    /// Save a full-page PNG of the page left open by the last search.
    pub async fn screenshot(&self, path: &Path) -> Result<(), PortalError> {
        let Some(page) = &self.page else {
            return Err(PortalError::Script("no page open".into()));
        };
        page.save_screenshot(ScreenshotParams::builder().full_page(true).build(), path)
            .await?;
        info!(path = %path.display(), "screenshot saved");
        Ok(())
    }

    pub async fn close(mut self) -> Result<(), PortalError> {
        self.close_page().await;
        self.browser.close().await?;
        if let Err(e) = self.browser.wait().await {
            debug!(error = %e, "waiting for browser exit");
        }
        self.handler.abort();
        info!("browser closed");
        Ok(())
    }

    async fn close_page(&mut self) {
        if let Some(page) = self.page.take()
            && let Err(e) = page.close().await
        {
            debug!(error = %e, "closing previous page");
        }
    }

    async fn search(&self, page: &Page, number: &CaseNumber) -> Result<PageSnapshot, PortalError> {
        let (head, forum) = number.unified_parts()?;

        let ms = self.config.page_timeout_ms;
        tokio::time::timeout(self.config.page_timeout(), page.goto(&self.config.search_url))
            .await
            .map_err(|_| PortalError::Timeout {
                what: format!("navigation to {}", self.config.search_url),
                ms,
            })??;

        self.wait_for(page, SEARCH_BY_NUMBER).await?.click().await?;
        tokio::time::sleep(Duration::from_millis(500)).await;

        self.fill(page, NUMBER_INPUT, &head).await?;
        tokio::time::sleep(Duration::from_millis(300)).await;
        self.fill(page, FORUM_INPUT, &forum).await?;
        tokio::time::sleep(Duration::from_millis(500)).await;

        self.wait_for(page, SUBMIT).await?.click().await?;
        match tokio::time::timeout(self.config.page_timeout(), page.wait_for_navigation()).await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => debug!(error = %e, "waiting for navigation after submit"),
            Err(_) => warn!(ms, "navigation after submit did not finish"),
        }
        self.wait_for_result(page).await;

        let expanded: bool = page
            .evaluate(EXPAND_JS)
            .await?
            .into_value()
            .unwrap_or(false);
        if expanded {
            tokio::time::sleep(Duration::from_secs(1)).await;
        }

        let html = page.content().await?;
        let body_text = page
            .evaluate(BODY_TEXT_JS)
            .await?
            .into_value::<String>()
            .ok();

        Ok(PageSnapshot { html, body_text })
    }

    /// Poll until `css` matches, within the element timeout.
    async fn wait_for(&self, page: &Page, css: &str) -> Result<Element, PortalError> {
        let start = Instant::now();
        loop {
            if let Ok(el) = page.find_element(css).await {
                return Ok(el);
            }
            if start.elapsed() >= self.config.element_timeout() {
                return Err(PortalError::Timeout {
                    what: css.to_string(),
                    ms: self.config.element_timeout_ms,
                });
            }
            tokio::time::sleep(POLL).await;
        }
    }

    /// Clear an input, then type `text` one key at a time.
    async fn fill(&self, page: &Page, css: &str, text: &str) -> Result<(), PortalError> {
        let input = self.wait_for(page, css).await?;
        page.evaluate(format!("document.querySelector('{css}').value = ''"))
            .await?;
        input.click().await?;
        for c in text.chars() {
            input.type_str(c.to_string()).await?;
            tokio::time::sleep(self.config.typing_delay()).await;
        }
        Ok(())
    }

    /// Wait for either the case header or the portal message to be visible.
    /// Running out of time is logged and the page is captured as it stands.
    async fn wait_for_result(&self, page: &Page) {
        let settled = poll_until(self.config.element_timeout(), || async move {
            page.evaluate(RESULT_VISIBLE_JS)
                .await?
                .into_value::<bool>()
                .map_err(|e| PortalError::Script(e.to_string()))
        })
        .await;
        if !settled {
            warn!(
                ms = self.config.element_timeout_ms,
                "result page did not settle, capturing as is"
            );
        }
    }
}

/// Poll `check` until it reports true or `timeout` passes. An error counts as
/// "not yet": the document may be mid-navigation.
async fn poll_until<F, Fut, E>(timeout: Duration, mut check: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool, E>>,
    E: Display,
{
    let start = Instant::now();
    loop {
        match check().await {
            Ok(true) => return true,
            Ok(false) => {}
            Err(e) => debug!(error = %e, "page not ready"),
        }
        if start.elapsed() >= timeout {
            return false;
        }
        tokio::time::sleep(POLL).await;
    }
}

#[async_trait]
impl CaseSource for ChromiumPortal {
    async fn fetch(&mut self, number: &CaseNumber) -> Result<PageSnapshot, PortalError> {
        self.close_page().await;
        let page = self.browser.new_page("about:blank").await?;
        self.page = Some(page.clone());
        self.search(&page, number).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires Chromium and network access to the portal
    async fn searches_a_known_case() {
        let mut portal = ChromiumPortal::launch(PortalConfig::default())
            .await
            .expect("failed to launch browser");
        let snapshot = portal
            .fetch(&CaseNumber::from("1001535-69.2025.8.26.0260"))
            .await
            .expect("search failed");
        assert!(snapshot.html.contains("classeProcesso") || snapshot.html.contains("mensagemRetorno"));

        let dir = tempfile::tempdir().unwrap();
        let shot = dir.path().join("resultado_teste.png");
        portal.screenshot(&shot).await.expect("screenshot failed");
        assert!(shot.exists());

        portal.close().await.expect("close failed");
    }

    #[tokio::test]
    async fn polling_survives_errors_until_settled() {
        let mut calls = 0;
        let settled = poll_until(Duration::from_secs(5), || {
            calls += 1;
            let n = calls;
            async move {
                match n {
                    1 => Err("execution context was destroyed"),
                    2 => Ok(false),
                    _ => Ok(true),
                }
            }
        })
        .await;
        assert!(settled);
        assert_eq!(calls, 3);
    }

    #[tokio::test]
    async fn polling_gives_up_after_timeout() {
        let settled =
            poll_until(Duration::from_millis(250), || async { Ok::<_, String>(false) }).await;
        assert!(!settled);

        let settled = poll_until(Duration::from_millis(250), || async {
            Err::<bool, _>("still navigating")
        })
        .await;
        assert!(!settled);
    }

    #[test]
    fn result_check_requires_visibility() {
        assert!(RESULT_VISIBLE_JS.contains("#classeProcesso"));
        assert!(RESULT_VISIBLE_JS.contains("#mensagemRetorno"));
        assert!(RESULT_VISIBLE_JS.contains("offsetParent !== null"));
    }

    #[test]
    fn env_override_must_exist() {
        // A dangling override falls through to PATH lookup instead of being
        // returned.
        unsafe { std::env::set_var("JURIMETRIA_CHROMIUM_PATH", "/nonexistent/chrome") };
        let found = find_chromium();
        unsafe { std::env::remove_var("JURIMETRIA_CHROMIUM_PATH") };
        assert_ne!(found, Some(PathBuf::from("/nonexistent/chrome")));
    }
}
