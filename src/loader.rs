//! Catalog loader.
//!
//! Issues the single catalog request for a mounted view. The loader is
//! consumed by [`CatalogLoader::fetch_once`], so a second attempt cannot be
//! expressed. Cancellation is advisory: the request is left to finish and its
//! result is discarded when the liveness token was cancelled in the meantime.

use std::future::Future;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::domain::aggregates::Product;
use crate::CatalogLoadError;

/// Result of the one fetch attempt.
pub type LoadOutcome = crate::Result<Vec<Product>>;

/// Something that can produce the product list.
pub trait CatalogSource {
    /// Fetch and parse the full product list.
    fn fetch(&self) -> impl Future<Output = LoadOutcome> + Send;
}

/// Plain GET against a JSON endpoint returning an array of products.
#[derive(Clone, Debug)]
pub struct HttpCatalogSource {
    client: reqwest::Client,
    url: reqwest::Url,
}

impl HttpCatalogSource {
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(url: reqwest::Url) -> crate::Result<Self> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client, url })
    }

    pub fn url(&self) -> &reqwest::Url { &self.url }
}

impl CatalogSource for HttpCatalogSource {
    async fn fetch(&self) -> LoadOutcome {
        let response = self.client.get(self.url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(CatalogLoadError::Status(status));
        }

        let body = response.bytes().await?;
        let products: Vec<Product> = serde_json::from_slice(&body)?;
        Ok(products)
    }
}

/// Owns the catalog source until the one fetch is made.
#[derive(Debug)]
pub struct CatalogLoader<S> {
    source: S,
}

impl<S: CatalogSource> CatalogLoader<S> {
    pub fn new(source: S) -> Self { Self { source } }

    /// Run the fetch. Returns `None` when `liveness` was cancelled before the
    /// fetch settled; the caller must not apply anything in that case.
    pub async fn fetch_once(self, liveness: CancellationToken) -> Option<LoadOutcome> {
        info!("fetching catalog");
        let outcome = self.source.fetch().await;

        if liveness.is_cancelled() {
            debug!(ok = outcome.is_ok(), "view torn down, discarding catalog result");
            return None;
        }

        match &outcome {
            Ok(products) => info!(count = products.len(), "catalog loaded"),
            Err(error) => warn!(%error, "catalog load failed"),
        }
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::Notify;

    const CATALOG: &str = r#"[
        {"id": 1, "title": "Backpack", "price": 109.95, "category": "men's clothing", "image": "https://example.com/1.png"},
        {"id": 2, "title": "Ring", "price": 9.99, "category": "jewelery", "image": "https://example.com/2.png", "rating": {"rate": 4.1, "count": 3}}
    ]"#;

    fn http_response(status: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
    }

    /// Serves exactly one canned response and returns the URL to hit.
    async fn serve_once(response: String) -> reqwest::Url {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 8192];
            let mut read = 0;
            loop {
                let n = socket.read(&mut buf[read..]).await.unwrap();
                read += n;
                if n == 0 || buf[..read].windows(4).any(|w| w == b"\r\n\r\n") { break; }
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });
        format!("http://{addr}/products").parse().unwrap()
    }

    async fn fetch(url: reqwest::Url) -> LoadOutcome {
        HttpCatalogSource::new(url).unwrap().fetch().await
    }

    #[tokio::test]
    async fn test_http_success() {
        let url = serve_once(http_response("200 OK", CATALOG)).await;
        let products = fetch(url).await.unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[1].title(), "Ring");
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let url = serve_once(http_response("500 Internal Server Error", "oops")).await;
        let err = fetch(url).await.unwrap_err();
        assert!(matches!(err, CatalogLoadError::Status(s) if s.as_u16() == 500));
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn test_http_malformed_body() {
        let url = serve_once(http_response("200 OK", r#"{"products": []}"#)).await;
        assert!(matches!(fetch(url).await, Err(CatalogLoadError::Parse(_))));
    }

    #[tokio::test]
    async fn test_http_accepts_relative_image_and_null_description() {
        let body = r#"[
            {"id": 1, "title": "Mug", "price": 7, "category": "kitchen", "image": "/img/1.png", "description": null},
            {"id": 2, "title": "", "price": 3, "category": "kitchen", "image": "img/2.png"}
        ]"#;
        let url = serve_once(http_response("200 OK", body)).await;
        let products = fetch(url).await.unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].image(), "/img/1.png");
        assert_eq!(products[0].description(), "");
        assert_eq!(products[1].title(), "");
    }

    #[tokio::test]
    async fn test_http_negative_price_is_parse_failure() {
        let body = r#"[{"id": 1, "title": "Mug", "price": -7, "category": "kitchen", "image": "/img/1.png"}]"#;
        let url = serve_once(http_response("200 OK", body)).await;
        assert!(matches!(fetch(url).await, Err(CatalogLoadError::Parse(_))));
    }

    #[tokio::test]
    async fn test_http_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let url: reqwest::Url = format!("http://{addr}/products").parse().unwrap();
        let err = fetch(url).await.unwrap_err();
        assert!(matches!(err, CatalogLoadError::Transport(_)));
        assert!(!err.to_string().is_empty());
    }

    struct GatedSource {
        gate: Arc<Notify>,
    }

    impl CatalogSource for GatedSource {
        async fn fetch(&self) -> LoadOutcome {
            self.gate.notified().await;
            Ok(serde_json::from_str(CATALOG)?)
        }
    }

    #[tokio::test]
    async fn test_fetch_once_discards_after_cancel() {
        let gate = Arc::new(Notify::new());
        let token = CancellationToken::new();
        let loader = CatalogLoader::new(GatedSource { gate: gate.clone() });
        let pending = tokio::spawn(loader.fetch_once(token.clone()));

        token.cancel();
        gate.notify_one();
        assert!(pending.await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_fetch_once_delivers_while_live() {
        let gate = Arc::new(Notify::new());
        gate.notify_one();
        let outcome = CatalogLoader::new(GatedSource { gate }).fetch_once(CancellationToken::new()).await;
        assert_eq!(outcome.unwrap().unwrap().len(), 2);
    }
}
