//! HTTP client wrapper - typed calls against the chain API

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::ApiError;
use crate::models::{
    Balance, Block, BlocksPage, ChainInfo, MiningFlag, MiningStatus, StartMining,
    StatsSnapshot, TransferRequest, Wallet,
};

/// Shape of an error body returned by the API
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Map a non-2xx response to an error.
///
/// A JSON body's `message` wins; a JSON body without one falls back to a
/// generic message, and an unparseable body reports the status code.
pub fn error_from_body(status: u16, body: &str) -> ApiError {
    let message = match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody { message: Some(m) }) if !m.is_empty() => m,
        Ok(_) => "API request failed".to_string(),
        Err(_) => format!("HTTP error! status: {}", status),
    };
    ApiError::Http { status, message }
}

/// Client for the chain API rooted at a base URL
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base: String,
}

impl ApiClient {
    pub fn new(base: impl Into<String>, timeout: Duration) -> Self {
        ApiClient {
            http: create_client(timeout),
            base: base.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base, endpoint)
    }

    /// Base URL with each segment appended percent-encoded
    fn segments_url(&self, segments: &[&str]) -> Result<reqwest::Url, ApiError> {
        let mut url = reqwest::Url::parse(&self.base)
            .map_err(|e| ApiError::Transport(format!("Invalid API base {}: {}", self.base, e)))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::Transport(format!("Invalid API base {}", self.base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send a request and return the body of a 2xx response
    async fn send(&self, builder: reqwest::RequestBuilder) -> Result<String, ApiError> {
        let resp = builder
            .header("Content-Type", "application/json")
            .send()
            .await?;
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(error_from_body(status.as_u16(), &body));
        }
        Ok(body)
    }

    async fn request<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let body = self.send(builder).await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub async fn chain_info(&self) -> Result<ChainInfo, ApiError> {
        self.request(self.http.get(self.url("/api"))).await
    }

    pub async fn mining_status(&self) -> Result<MiningStatus, ApiError> {
        self.request(self.http.get(self.url("/api/mining/status"))).await
    }

    /// Composite fetch: chain info first, then the mining flag, merged
    pub async fn fetch_stats(&self) -> Result<StatsSnapshot, ApiError> {
        let info = self.chain_info().await?;
        let mining: MiningFlag = self
            .request(self.http.get(self.url("/api/mining/status")))
            .await?;
        Ok(StatsSnapshot::merge(info, &mining))
    }

    pub async fn blocks(&self, limit: usize) -> Result<Vec<Block>, ApiError> {
        let page: BlocksPage = self
            .request(self.http.get(self.url(&format!("/api/blockchain/blocks?limit={}", limit))))
            .await?;
        Ok(page.blocks)
    }

    pub async fn create_wallet(&self) -> Result<Wallet, ApiError> {
        self.request(self.http.post(self.url("/api/wallets"))).await
    }

    pub async fn balance(&self, address: &str) -> Result<f64, ApiError> {
        let url = self.segments_url(&["api", "wallets", address, "balance"])?;
        let balance: Balance = self.request(self.http.get(url)).await?;
        Ok(balance.balance)
    }

    pub async fn submit_transfer(&self, transfer: &TransferRequest) -> Result<(), ApiError> {
        let body = serde_json::to_string(transfer).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.send(self.http.post(self.url("/api/transactions")).body(body))
            .await
            .map(|_| ())
    }

    pub async fn start_mining(&self, miner_address: &str) -> Result<(), ApiError> {
        let body = serde_json::to_string(&StartMining {
            miner_address: miner_address.to_string(),
        })
        .map_err(|e| ApiError::Decode(e.to_string()))?;
        self.send(self.http.post(self.url("/api/mining/start")).body(body))
            .await
            .map(|_| ())
    }

    pub async fn stop_mining(&self) -> Result<(), ApiError> {
        self.send(self.http.post(self.url("/api/mining/stop")))
            .await
            .map(|_| ())
    }
}

/// Create an HTTP client with the given timeout
pub fn create_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::mpsc;

    /// Loopback server answering each connection with the next canned response.
    /// Request lines are forwarded on the returned channel.
    async fn serve(responses: Vec<(u16, &'static str)>) -> (String, mpsc::UnboundedReceiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (seen_tx, seen_rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            for (status, body) in responses {
                let (mut socket, _) = listener.accept().await.unwrap();
                let request = read_request(&mut socket).await;
                let _ = seen_tx.send(request);
                let reply = format!(
                    "HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                socket.write_all(reply.as_bytes()).await.unwrap();
                socket.shutdown().await.ok();
            }
        });

        (format!("http://{}", addr), seen_rx)
    }

    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf).to_string();
            if let Some(end) = text.find("\r\n\r\n") {
                let content_length = text[..end]
                    .lines()
                    .find_map(|l| {
                        let lower = l.to_ascii_lowercase();
                        lower
                            .strip_prefix("content-length:")
                            .and_then(|v| v.trim().parse::<usize>().ok())
                    })
                    .unwrap_or(0);
                if buf.len() >= end + 4 + content_length {
                    return text;
                }
            }
        }
        String::from_utf8_lossy(&buf).to_string()
    }

    fn client(base: &str) -> ApiClient {
        ApiClient::new(base, Duration::from_secs(5))
    }

    #[test]
    fn test_error_from_body_message() {
        let err = error_from_body(400, r#"{"message":"Insufficient balance"}"#);
        assert_eq!(err.to_string(), "Insufficient balance");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_error_from_body_without_message() {
        let err = error_from_body(500, r#"{"error":"boom"}"#);
        assert_eq!(err.to_string(), "API request failed");
    }

    #[test]
    fn test_error_from_unparseable_body() {
        let err = error_from_body(502, "<html>Bad Gateway</html>");
        assert_eq!(err.to_string(), "HTTP error! status: 502");
        let err = error_from_body(404, "");
        assert_eq!(err.to_string(), "HTTP error! status: 404");
    }

    #[tokio::test]
    async fn test_fetch_stats_merges_two_calls() {
        let (base, mut seen) = serve(vec![
            (200, r#"{"blockchain":{"height":100,"pendingTransactions":5,"totalSupply":1000000}}"#),
            (200, r#"{"isMining":true}"#),
        ])
        .await;

        let stats = client(&base).fetch_stats().await.unwrap();
        assert_eq!(stats.height, 100);
        assert_eq!(stats.pending_transactions, 5);
        assert_eq!(stats.total_supply, 1_000_000.0);
        assert!(stats.mining_status);

        assert!(seen.recv().await.unwrap().starts_with("GET /api HTTP/1.1"));
        assert!(seen.recv().await.unwrap().starts_with("GET /api/mining/status HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_fetch_stats_tolerates_odd_mining_body() {
        let (base, _seen) = serve(vec![
            (200, r#"{"blockchain":{"height":7}}"#),
            (200, r#"{"isMining":false,"minerAddress":null,"hashRate":"n/a"}"#),
        ])
        .await;

        let stats = client(&base).fetch_stats().await.unwrap();
        assert_eq!(stats.height, 7);
        assert!(!stats.mining_status);
    }

    #[tokio::test]
    async fn test_mining_status_with_null_miner() {
        let (base, _seen) = serve(vec![(200, r#"{"isMining":false,"minerAddress":null,"difficulty":4}"#)]).await;
        let status = client(&base).mining_status().await.unwrap();
        assert_eq!(status.miner_address, "");
        assert!(!status.is_mining);
    }

    #[tokio::test]
    async fn test_balance_address_is_percent_encoded() {
        let (base, mut seen) = serve(vec![(200, r#"{"balance":1}"#)]).await;
        client(&base).balance("wtf1abcdef#x").await.unwrap();
        assert!(seen
            .recv()
            .await
            .unwrap()
            .starts_with("GET /api/wallets/wtf1abcdef%23x/balance HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_balance_plain_address() {
        let (base, mut seen) = serve(vec![(200, r#"{"balance":12.5}"#)]).await;
        let balance = client(&format!("{}/", base)).balance("wtf1holder0001").await.unwrap();
        assert_eq!(balance, 12.5);
        assert!(seen
            .recv()
            .await
            .unwrap()
            .starts_with("GET /api/wallets/wtf1holder0001/balance HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_http_error_carries_server_message() {
        let (base, _seen) = serve(vec![(400, r#"{"message":"Invalid signature"}"#)]).await;
        let transfer = TransferRequest {
            from_address: "wtf1aaaaaaaaaa".into(),
            to_address: "wtf1bbbbbbbbbb".into(),
            amount: 1.0,
            private_key: "key".into(),
        };
        let err = client(&base).submit_transfer(&transfer).await.unwrap_err();
        assert_eq!(err, ApiError::Http { status: 400, message: "Invalid signature".into() });
    }

    #[tokio::test]
    async fn test_blocks_request_uses_limit() {
        let (base, mut seen) = serve(vec![(200, r#"{"blocks":[{"index":1,"hash":"h"}]}"#)]).await;
        let blocks = client(&base).blocks(10).await.unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].hash, "h");
        assert!(seen
            .recv()
            .await
            .unwrap()
            .starts_with("GET /api/blockchain/blocks?limit=10 HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_start_mining_posts_miner_address() {
        let (base, mut seen) = serve(vec![(200, r#"{"message":"ok"}"#)]).await;
        client(&base).start_mining("wtf1miner12345").await.unwrap();
        let request = seen.recv().await.unwrap();
        assert!(request.starts_with("POST /api/mining/start HTTP/1.1"));
        assert!(request.contains(r#"{"minerAddress":"wtf1miner12345"}"#));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let err = client(&format!("http://{}", addr)).mining_status().await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
