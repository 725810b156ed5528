pub mod http;
pub mod webdriver;

pub use http::{HttpSource, check_url_reachable};
pub use webdriver::WebDriverSource;

use crate::error::FetchError;

/// Something that turns a URL into the raw HTML served there.
///
/// Sources are driven sequentially by a [`crate::Session`], so methods take
/// `&mut self` and need not be `Send`.
#[allow(async_fn_in_trait)]
pub trait PageSource {
    /// Retrieve the markup at `url`
    async fn fetch(&mut self, url: &str) -> Result<String, FetchError>;

    /// Release any resources held by the source
    async fn close(self)
    where
        Self: Sized,
    {
    }
}
