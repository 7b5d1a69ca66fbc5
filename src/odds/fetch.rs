use std::collections::HashMap;

use log::debug;

use crate::odds::error::{OddsError, Result};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:72.0) Gecko/20100101 Firefox/72.0";

/// Body and headers of a successful upstream response. Header names are
/// stored lower-cased.
#[derive(Debug, Clone, Default)]
pub struct FetchedPage {
    pub body: String,
    pub headers: HashMap<String, String>,
}

impl FetchedPage {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(|v| v.as_str())
    }
}

/// The one network seam. Sources only ever talk to upstream through this.
pub trait Fetch {
    fn fetch(&self, url: &str) -> Result<FetchedPage>;
}

pub struct UreqFetcher;

impl Fetch for UreqFetcher {
    fn fetch(&self, url: &str) -> Result<FetchedPage> {
        let shown_url = redact_api_key(url);
        debug!("GET {}", shown_url);
        let r = ureq::get(url)
            .set("User-Agent", USER_AGENT)
            .set("Accept", "text/html,application/json;q=0.9,*/*;q=0.8")
            .set("Accept-Language", "en-US,en;q=0.5")
            .set("Cache-Control", "no-cache")
            .call();
        let r = match r {
            Ok(r) => r,
            Err(ureq::Error::Status(code, r)) => {
                let body = r.into_string().unwrap_or_default();
                return Err(OddsError::Upstream(format!(
                    "{} returned status {}: {}",
                    shown_url, code, body
                )));
            }
            Err(e) => {
                return Err(OddsError::Upstream(format!("{}: {}", shown_url, redact_api_key(&e.to_string()))));
            }
        };
        let headers = r
            .headers_names()
            .into_iter()
            .filter_map(|name| {
                let value = r.header(&name)?.to_string();
                Some((name.to_lowercase(), value))
            })
            .collect();
        let body = r
            .into_string()
            .map_err(|e| OddsError::Upstream(format!("failed to read body from {}: {}", shown_url, e)))?;
        debug!("{} returned {} bytes", shown_url, body.len());
        Ok(FetchedPage { body, headers })
    }
}

/// Masks the `apiKey` query value so URLs can be logged and put in errors.
pub fn redact_api_key(url: &str) -> String {
    match url.find("apiKey=") {
        Some(start) => {
            let value_start = start + "apiKey=".len();
            let value_end = url[value_start..]
                .find('&')
                .map(|i| value_start + i)
                .unwrap_or_else(|| url.len());
            format!("{}***{}", &url[..value_start], &url[value_end..])
        }
        None => url.to_string(),
    }
}
