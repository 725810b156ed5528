use crate::config::ScraperConfig;
use crate::error::FetchError;
use crate::fetchers::PageSource;
use fantoccini::error::CmdError;
use fantoccini::wd::Capabilities;
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::json;
use std::time::Duration;
use tokio::time::timeout;

/// Endpoints tried when the configured WebDriver URL does not answer
const FALLBACK_WEBDRIVER_URLS: [&str; 4] = [
    "http://localhost:9515", // ChromeDriver default
    "http://localhost:4723", // Appium default
    "http://localhost:9222", // Chrome debug port default
    "http://127.0.0.1:4444", // Try with IP instead of localhost
];

/// Upper bound for navigating to a page and reading its source
const SCRAPE_TIMEOUT: Duration = Duration::from_secs(45);

const HIDE_AUTOMATION_SCRIPT: &str =
    "Object.defineProperty(navigator, 'webdriver', {get: () => undefined})";

/// Fetches pages by driving a browser through a WebDriver server, so that
/// client-side rendered content is present in the returned markup.
pub struct WebDriverSource {
    client: Client,
    webdriver_url: String,
    capabilities: Capabilities,
    page_timeout: Duration,
}

impl WebDriverSource {
    /// Connect to `webdriver_url`, falling back to well-known local endpoints
    pub async fn connect(
        webdriver_url: &str,
        headless: bool,
        page_timeout: Duration,
    ) -> Result<Self, FetchError> {
        let capabilities = chrome_capabilities(headless);
        let (client, connected_url) = connect_with_fallback(webdriver_url, &capabilities).await?;
        hide_automation(&client).await;

        Ok(Self {
            client,
            webdriver_url: connected_url,
            capabilities,
            page_timeout,
        })
    }

    pub async fn from_config(config: &ScraperConfig) -> Result<Self, FetchError> {
        Self::connect(
            &config.webdriver_url,
            config.headless,
            config.request_timeout(),
        )
        .await
    }

    /// Navigate to `url`, wait for the body to appear and read the page source
    async fn load(&self, url: &str) -> Result<String, CmdError> {
        self.client.goto(url).await?;
        self.client
            .wait()
            .at_most(self.page_timeout)
            .for_element(Locator::Css("body"))
            .await?;
        self.client.source().await
    }

    /// Replace a lost session with a fresh one on the same server
    async fn reconnect(&mut self) -> Result<(), FetchError> {
        ::log::warn!("Attempting to reconnect WebDriver session");
        match try_connect(&self.webdriver_url, &self.capabilities).await {
            Ok(client) => {
                hide_automation(&client).await;
                self.client = client;
                ::log::info!("Successfully reconnected to WebDriver");
                Ok(())
            }
            Err(e) => {
                ::log::error!("Failed to reconnect to WebDriver: {}", e);
                Err(FetchError::WebDriverUnavailable(self.webdriver_url.clone()))
            }
        }
    }

    async fn fetch_with_reconnect(&mut self, url: &str) -> Result<String, FetchError> {
        match self.load(url).await {
            Ok(html) => Ok(html),
            Err(e) if is_session_lost(&e) => {
                ::log::warn!("Lost session while accessing {}", url);
                self.reconnect().await?;
                Ok(self.load(url).await?)
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl PageSource for WebDriverSource {
    async fn fetch(&mut self, url: &str) -> Result<String, FetchError> {
        let started = std::time::Instant::now();
        ::log::debug!("SCRAPE: {}", url);

        let html = timeout(SCRAPE_TIMEOUT, self.fetch_with_reconnect(url))
            .await
            .map_err(|_| FetchError::Timeout {
                url: url.to_string(),
                secs: SCRAPE_TIMEOUT.as_secs(),
            })??;

        ::log::debug!(
            "Loaded {} in {:.2} seconds",
            url,
            started.elapsed().as_secs_f64()
        );
        Ok(html)
    }

    async fn close(self) {
        if let Err(e) = self.client.close().await {
            ::log::warn!("Failed to close WebDriver client: {}", e);
        }
    }
}

/// Chrome options that keep the browser quiet and less obviously automated
fn chrome_capabilities(headless: bool) -> Capabilities {
    let mut args = vec![
        "--no-sandbox",
        "--disable-dev-shm-usage",
        "--disable-blink-features=AutomationControlled",
    ];
    if headless {
        args.insert(0, "--headless");
    }

    let mut capabilities = Capabilities::new();
    capabilities.insert(
        "goog:chromeOptions".to_string(),
        json!({
            "args": args,
            "excludeSwitches": ["enable-automation"],
            "useAutomationExtension": false,
        }),
    );
    capabilities
}

async fn try_connect(
    webdriver_url: &str,
    capabilities: &Capabilities,
) -> Result<Client, fantoccini::error::NewSessionError> {
    let mut builder = ClientBuilder::native();
    builder.capabilities(capabilities.clone());
    builder.connect(webdriver_url).await
}

/// Connects to the WebDriver instance, returning the client and the URL that answered
async fn connect_with_fallback(
    webdriver_url: &str,
    capabilities: &Capabilities,
) -> Result<(Client, String), FetchError> {
    match try_connect(webdriver_url, capabilities).await {
        Ok(client) => {
            ::log::debug!("Connected to WebDriver at {}", webdriver_url);
            return Ok((client, webdriver_url.to_string()));
        }
        Err(e) => {
            ::log::error!(
                "Failed to connect to WebDriver at {}: {}",
                webdriver_url,
                e
            );
        }
    }

    let mut tried = vec![webdriver_url];
    for url in FALLBACK_WEBDRIVER_URLS {
        if url == webdriver_url {
            continue;
        }
        tried.push(url);

        ::log::info!("Trying fallback WebDriver URL: {}", url);
        if let Ok(client) = try_connect(url, capabilities).await {
            ::log::debug!("Connected to fallback WebDriver at {}", url);
            return Ok((client, url.to_string()));
        }
    }

    ::log::error!(
        "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
    );
    Err(FetchError::WebDriverUnavailable(tried.join(", ")))
}

async fn hide_automation(client: &Client) {
    if let Err(e) = client.execute(HIDE_AUTOMATION_SCRIPT, Vec::new()).await {
        ::log::warn!("Could not hide navigator.webdriver: {}", e);
    }
}

fn is_session_lost(error: &CmdError) -> bool {
    let message = error.to_string();
    message.contains("Unable to find session") || message.contains("invalid session id")
}
