//! Exposes a `Client` struct to talk to the router's admin pages.

use std::time::Instant;

use anyhow::Context;

use super::retry::{check_status, Attempt, AuthRetry};
use super::FetchError;
use crate::config::RouterConfig;
use crate::dhcp::LeaseTable;

/// Page listing the DHCP clients, the same on every WRT firmware.
pub const DHCP_TABLE_PATH: &str = "/DHCPTable.asp";

fn elapsed_ms(start: &Instant) -> u128 {
    start.elapsed().as_millis()
}

pub struct Client {
    /// Use to make requests
    client: reqwest::Client,
    /// Where and how to log in
    config: RouterConfig,
}

impl Client {
    pub fn new(config: RouterConfig) -> anyhow::Result<Client> {
        let mut builder = reqwest::Client::builder();

        if config.accept_invalid_certs() {
            log::warn!(
                "accepting invalid certificates from {}, the router's certificate is self-signed",
                config.host()
            );
            builder = builder.danger_accept_invalid_certs(true);
        }
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .context("invalid http client configuration")?;

        Ok(Client { client, config })
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Example: `client.make_url("/DHCPTable.asp")` will produce
    /// `https://{host}/DHCPTable.asp`
    pub fn make_url(&self, path: &str) -> String {
        format!("https://{}{}", self.config.host(), path)
    }

    async fn attempt(&self, url: &str, attempt: u32) -> Result<Attempt<Vec<u8>>, FetchError> {
        let now = Instant::now();
        let resp = self
            .client
            .get(url)
            .basic_auth(self.config.username(), Some(self.config.password()))
            .send()
            .await?;

        let status = resp.status();
        log::debug!(
            "GET {} ({}) took {}ms (attempt {})",
            url,
            status,
            elapsed_ms(&now),
            attempt
        );

        match check_status(status)? {
            Attempt::Unauthorized => Ok(Attempt::Unauthorized),
            Attempt::Accepted(()) => {
                let body = resp.bytes().await?;
                Ok(Attempt::Accepted(body.to_vec()))
            }
        }
    }

    /// GET `url` with basic auth, retrying on `401 Unauthorized`.
    ///
    /// Returns the raw body of the `200 OK` response.
    pub async fn fetch_page(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        AuthRetry::new(self.config.auth_retries())
            .run(|attempt| self.attempt(url, attempt))
            .await
    }

    /// Raw html of the DHCP client page.
    pub async fn dhcp_table_html(&self) -> Result<Vec<u8>, FetchError> {
        self.fetch_page(&self.make_url(DHCP_TABLE_PATH)).await
    }

    /// Fetch and parse the DHCP client list.
    pub async fn leases(&self) -> anyhow::Result<LeaseTable> {
        let html = self
            .dhcp_table_html()
            .await
            .context("couldn't fetch the DHCP client page")?;

        let leases = LeaseTable::from_html_bytes(&html)?;
        log::debug!("found {} leases", leases.len());
        Ok(leases)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    use super::{Client, DHCP_TABLE_PATH};
    use crate::api::FetchError;
    use crate::config::RouterConfig;
    use crate::dhcp::ExtractError;

    const PAGE: &str = "<script>table = new Array('Laptop','192.168.1.10',\
        'AA:BB:CC:DD:EE:FF','86400','client1');</script>";

    fn unauthorized() -> String {
        "HTTP/1.1 401 Unauthorized\r\n\
         WWW-Authenticate: Basic realm=\"WRT54G\"\r\n\
         Content-Length: 0\r\n\
         Connection: close\r\n\r\n"
            .to_string()
    }

    fn status(line: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            line,
            body.len(),
            body
        )
    }

    /// Plain http server answering one connection per scripted response.
    ///
    /// Resolves to the request heads it received.
    async fn serve(responses: Vec<String>) -> (String, JoinHandle<Vec<String>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let mut heads = Vec::new();
            for response in responses {
                let (mut stream, _) = listener.accept().await.unwrap();

                let mut head = Vec::new();
                let mut buf = [0u8; 1024];
                while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                    let n = stream.read(&mut buf).await.unwrap();
                    if n == 0 {
                        break;
                    }
                    head.extend_from_slice(&buf[..n]);
                }
                heads.push(String::from_utf8_lossy(&head).to_ascii_lowercase());

                stream.write_all(response.as_bytes()).await.unwrap();
                stream.shutdown().await.unwrap();
            }
            heads
        });

        (base, handle)
    }

    fn client(retries: u32) -> Client {
        let config = RouterConfig::new("127.0.0.1", "user", "pass")
            .unwrap()
            .with_auth_retries(retries)
            .with_timeout(Some(Duration::from_secs(5)));
        Client::new(config).unwrap()
    }

    #[tokio::test]
    async fn dhcp_table_url() {
        let config = RouterConfig::new("192.168.1.1", "", "admin").unwrap();
        let client = Client::new(config).unwrap();
        assert_eq!(
            client.make_url(DHCP_TABLE_PATH),
            "https://192.168.1.1/DHCPTable.asp"
        );
    }

    #[tokio::test]
    async fn basic_auth_on_every_attempt() {
        let (base, server) = serve(vec![unauthorized(), status("200 OK", PAGE)]).await;

        let body = client(10)
            .fetch_page(&format!("{base}{DHCP_TABLE_PATH}"))
            .await
            .unwrap();
        assert_eq!(body, PAGE.as_bytes());

        let heads = server.await.unwrap();
        assert_eq!(heads.len(), 2);
        for head in heads {
            assert!(head.starts_with("get /dhcptable.asp http/1.1"));
            // user:pass
            assert!(head.contains("authorization: basic dxnlcjpwyxnz"));
        }
    }

    #[tokio::test]
    async fn auth_exhausted() {
        let (base, server) = serve((0..11).map(|_| unauthorized()).collect()).await;

        let err = client(10)
            .fetch_page(&format!("{base}{DHCP_TABLE_PATH}"))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::AuthExhausted { attempts: 11 }));
        assert!(err.to_string().contains("11"));

        assert_eq!(server.await.unwrap().len(), 11);
    }

    #[tokio::test]
    async fn status_not_retried() {
        let (base, server) = serve(vec![status("500 Internal Server Error", "")]).await;

        let err = client(10)
            .fetch_page(&format!("{base}{DHCP_TABLE_PATH}"))
            .await
            .unwrap_err();
        match err {
            FetchError::Status(text) => assert_eq!(text, "500 Internal Server Error"),
            other => panic!("unexpected {:?}", other),
        }

        assert_eq!(server.await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(10)
            .fetch_page(&format!("http://{addr}{DHCP_TABLE_PATH}"))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }

    #[tokio::test]
    async fn login_page_is_not_a_lease_table() {
        let (base, server) = serve(vec![status("200 OK", "<html>Login</html>")]).await;

        let body = client(10)
            .fetch_page(&format!("{base}{DHCP_TABLE_PATH}"))
            .await
            .unwrap();
        assert_eq!(
            crate::dhcp::LeaseTable::from_html_bytes(&body),
            Err(ExtractError::NotFound)
        );

        server.await.unwrap();
    }
}
