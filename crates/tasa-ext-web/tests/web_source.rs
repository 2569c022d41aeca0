//! Web price source against a local HTTP server.

use std::time::Duration;

use tasa_ext_web::{Site, SiteAdapter, WebPriceSource};
use tasa_traits::{ParsedPrice, PriceSource, SourceType, Ticker, TraitError};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serves `body` with `status` to every connection, after `delay`.
async fn serve(status: &'static str, body: &'static str, delay: Duration) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            tokio::spawn(async move {
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                tokio::time::sleep(delay).await;
                let response = format!(
                    "HTTP/1.1 {status}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    format!("http://{addr}/quote?t={{ticker}}")
}

fn local_site(template: String) -> Site {
    Site::Custom(SiteAdapter::new(template, "td.precioticker", 0))
}

#[tokio::test]
async fn fetches_and_extracts_price() {
    let template = serve(
        "200 OK",
        r#"<table><tr><td class="precioticker">61,35</td></tr></table>"#,
        Duration::ZERO,
    )
    .await;
    let source = WebPriceSource::new(local_site(template)).unwrap();

    assert_eq!(source.source_type(), SourceType::Web);
    let price = source.price(&Ticker::new("AL30D")).await.unwrap();
    assert_eq!(price, ParsedPrice::Value(61.35));
}

#[tokio::test]
async fn non_numeric_quote_is_not_a_number() {
    let template = serve(
        "200 OK",
        r#"<table><tr><td class="precioticker">s/c</td></tr></table>"#,
        Duration::ZERO,
    )
    .await;
    let source = WebPriceSource::new(local_site(template)).unwrap();

    let price = source.price(&Ticker::new("AL41D")).await.unwrap();
    assert!(!price.is_value());
}

#[tokio::test]
async fn page_without_price_is_not_found() {
    let template = serve("200 OK", "<html><body>maintenance</body></html>", Duration::ZERO).await;
    let source = WebPriceSource::new(local_site(template)).unwrap();

    let result = source.price(&Ticker::new("AL29D")).await;
    assert!(matches!(result, Err(TraitError::NotFound(_))));
}

#[tokio::test]
async fn server_error_is_connection_failure() {
    let template = serve("500 Internal Server Error", "oops", Duration::ZERO).await;
    let source = WebPriceSource::new(local_site(template)).unwrap();

    let result = source.price(&Ticker::new("AL35D")).await;
    assert!(matches!(result, Err(TraitError::ConnectionFailed(_))));
}

#[tokio::test]
async fn slow_server_times_out() {
    let template = serve("200 OK", "<td class=\"precioticker\">1</td>", Duration::from_secs(5)).await;
    let source =
        WebPriceSource::with_timeout(local_site(template), Duration::from_millis(200)).unwrap();

    let result = source.price(&Ticker::new("AE38D")).await;
    assert!(matches!(result, Err(TraitError::Timeout)));
}

#[test]
fn custom_site_from_toml() {
    let adapter: SiteAdapter = toml::from_str(
        r#"
        endpoint_template = "https://quotes.example.com/bond/{ticker}"
        selector = "div.last-price"
        "#,
    )
    .unwrap();

    assert_eq!(adapter.result_index, 0);
    assert_eq!(
        adapter.url_for(&Ticker::new("AL30")),
        "https://quotes.example.com/bond/AL30"
    );
    assert!(adapter.validate().is_ok());
}
