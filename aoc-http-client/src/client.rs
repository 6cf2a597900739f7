//! Input download client

use crate::error::AocError;
use reqwest::blocking::Response;
use reqwest::header::{COOKIE, HeaderValue};
use reqwest::Url;
use zeroize::Zeroizing;

const DEFAULT_BASE_URL: &str = "https://adventofcode.com";

/// Pages of the site the client knows how to reach
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Page {
    /// `/{year}/day/{day}/input`
    Input { year: u16, day: u8 },
    /// `/settings`, only reachable with a logged-in session
    Settings,
}

/// Blocking client for adventofcode.com
///
/// Redirects are never followed: an expired session makes the site redirect
/// to the front page, which must be seen as a redirect rather than a page.
#[derive(Clone, Debug)]
pub struct AocClient {
    client: reqwest::blocking::Client,
    base_url: Url,
}

impl AocClient {
    /// Client against the real site with default transport settings
    pub fn new() -> Result<Self, AocError> {
        Self::builder().build()
    }

    pub fn builder() -> AocClientBuilder {
        AocClientBuilder::default()
    }

    fn url(&self, page: Page) -> Result<Url, AocError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| AocError::ClientInit(format!("{} cannot be a base URL", self.base_url)))?;
            segments.clear();
            match page {
                Page::Input { year, day } => {
                    segments.extend(&[&year.to_string(), "day", &day.to_string(), "input"]);
                }
                Page::Settings => {
                    segments.push("settings");
                }
            }
        }
        Ok(url)
    }

    /// `Cookie` header for `session`; the formatted copy is wiped on drop
    fn session_cookie(session: &str) -> Result<HeaderValue, AocError> {
        let cookie = Zeroizing::new(format!("session={}", session.trim()));
        let mut header = HeaderValue::from_str(&cookie)
            .map_err(|_| AocError::ClientInit("session cookie contains invalid characters".to_string()))?;
        header.set_sensitive(true);
        Ok(header)
    }

    fn get(&self, page: Page, session: &str) -> Result<Response, AocError> {
        let url = self.url(page)?;
        tracing::debug!(%url, "requesting");
        let response = self
            .client
            .get(url)
            .header(COOKIE, Self::session_cookie(session)?)
            .send()?;
        tracing::debug!(status = %response.status(), "response received");
        Ok(response)
    }

    /// Whether `session` belongs to a logged-in account
    ///
    /// The settings page answers 2xx for a valid session. Anything else,
    /// including the redirect sent for an expired cookie, means invalid.
    pub fn verify_session(&self, session: &str) -> Result<bool, AocError> {
        let response = self.get(Page::Settings, session)?;
        Ok(response.status().is_success())
    }

    /// Personal puzzle input for `year`/`day`
    ///
    /// # Errors
    ///
    /// * [`AocError::Request`] on transport failure
    /// * [`AocError::InvalidStatus`] when the puzzle is locked or the session rejected
    /// * [`AocError::Encoding`] when the body is not UTF-8
    pub fn get_input(&self, year: u16, day: u8, session: &str) -> Result<String, AocError> {
        let response = self.get(Page::Input { year, day }, session)?;
        let status = response.status();
        if !status.is_success() {
            return Err(AocError::InvalidStatus {
                status,
                url: response.url().clone(),
            });
        }
        let input = response.text().map_err(|_| AocError::Encoding)?;
        tracing::info!(year, day, bytes = input.len(), "downloaded puzzle input");
        Ok(input)
    }
}

/// Builder for [`AocClient`]
///
/// ```no_run
/// use std::time::Duration;
///
/// # fn main() -> Result<(), aoc_http_client::AocError> {
/// let client = aoc_http_client::AocClient::builder()
///     .base_url("http://localhost:8080")?
///     .client_builder(reqwest::blocking::Client::builder().timeout(Duration::from_secs(10)))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct AocClientBuilder {
    base_url: Option<Url>,
    client_builder: Option<reqwest::blocking::ClientBuilder>,
}

impl AocClientBuilder {
    /// Point the client somewhere other than adventofcode.com
    pub fn base_url(mut self, url: impl reqwest::IntoUrl) -> Result<Self, AocError> {
        self.base_url = Some(url.into_url()?);
        Ok(self)
    }

    /// Start from a custom transport configuration. Its redirect policy is
    /// replaced with [`reqwest::redirect::Policy::none`].
    pub fn client_builder(mut self, builder: reqwest::blocking::ClientBuilder) -> Self {
        self.client_builder = Some(builder);
        self
    }

    pub fn build(self) -> Result<AocClient, AocError> {
        let base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_URL).map_err(|e| AocError::ClientInit(e.to_string()))?,
        };
        let client = self
            .client_builder
            .unwrap_or_else(|| reqwest::blocking::Client::builder().use_rustls_tls())
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| AocError::ClientInit(e.to_string()))?;

        Ok(AocClient { client, base_url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn client_for(server: &mockito::ServerGuard) -> AocClient {
        AocClient::builder()
            .base_url(server.url())
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn default_base_url() {
        let client = AocClient::new().unwrap();
        assert_eq!(client.base_url.as_str(), "https://adventofcode.com/");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(matches!(
            AocClient::builder().base_url("not a url"),
            Err(AocError::Request(_))
        ));
    }

    #[test]
    fn base_url_path_is_replaced() {
        let client = AocClient::builder()
            .base_url("http://localhost:1234/some/prefix")
            .unwrap()
            .build()
            .unwrap();
        let url = client.url(Page::Input { year: 2022, day: 7 }).unwrap();
        assert_eq!(url.as_str(), "http://localhost:1234/2022/day/7/input");
    }

    #[test]
    fn session_cookie_is_sensitive() {
        let header = AocClient::session_cookie(" abc123\n").unwrap();
        assert!(header.is_sensitive());
        assert_eq!(header.to_str().unwrap(), "session=abc123");
        assert!(AocClient::session_cookie("bad\u{7f}value").is_err());
    }

    #[test]
    fn input_is_downloaded_with_cookie() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/2022/day/1/input")
            .match_header("cookie", "session=secret")
            .with_status(200)
            .with_body("1000\n2000\n")
            .expect(1)
            .create();

        let input = client_for(&server).get_input(2022, 1, "secret").unwrap();
        assert_eq!(input, "1000\n2000\n");
        mock.assert();
    }

    #[test]
    fn redirects_are_not_followed() {
        let mut server = mockito::Server::new();
        let home = server.mock("GET", "/").with_status(200).expect(0).create();
        let settings = server
            .mock("GET", "/settings")
            .with_status(302)
            .with_header("location", "/")
            .expect(1)
            .create();

        assert!(!client_for(&server).verify_session("expired").unwrap());
        home.assert();
        settings.assert();
    }

    #[test]
    fn settings_page_means_valid_session() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/settings")
            .match_header("cookie", "session=fresh")
            .with_status(200)
            .with_body("<html>settings</html>")
            .create();

        assert!(client_for(&server).verify_session("fresh").unwrap());
        mock.assert();
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(10))]

        #[test]
        fn input_url_follows_year_and_day(year in 2015u16..2035, day in 1u8..=25) {
            let client = AocClient::new().unwrap();
            let url = client.url(Page::Input { year, day }).unwrap();
            prop_assert_eq!(url.path(), format!("/{year}/day/{day}/input"));
        }

        #[test]
        fn failed_status_is_reported(
            day in 1u8..=25,
            status in prop::sample::select(vec![400usize, 404, 429, 500, 503]),
        ) {
            let mut server = mockito::Server::new();
            let path = format!("/2022/day/{day}/input");
            let mock = server
                .mock("GET", path.as_str())
                .with_status(status)
                .expect(1)
                .create();

            match client_for(&server).get_input(2022, day, "s") {
                Err(AocError::InvalidStatus { status: got, url }) => {
                    prop_assert_eq!(usize::from(got.as_u16()), status);
                    prop_assert_eq!(url.path(), path.as_str());
                }
                other => prop_assert!(false, "unexpected result {:?}", other),
            }
            mock.assert();
        }
    }
}
