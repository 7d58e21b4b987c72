//! Handle accounting across repeated fetches.
//!
//! Kept to a single test so nothing else in this binary opens descriptors
//! while it counts them.

#![cfg(target_os = "linux")]

mod common;

use cardkingdom::{CardKingdomError, Context};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn open_fds() -> usize {
    std::fs::read_dir("/proc/self/fd").unwrap().count()
}

#[tokio::test(flavor = "multi_thread")]
async fn repeated_fetches_do_not_leak_handles() {
    // Local files, including the failure path.
    let (good, _tmp_good) = common::write_fixture("pricelist.json", &common::sample_json());
    let (bad, _tmp_bad) = common::write_fixture("broken.json", "{\"meta\":");
    let good = good.to_str().unwrap().to_string();
    let bad = bad.to_str().unwrap().to_string();

    let local_growth = tokio::task::spawn_blocking(move || {
        let ctx = Context::background();
        // The first call starts the shared I/O runtime.
        cardkingdom::fetch(&ctx, None, &good).unwrap();
        let before = open_fds();
        for _ in 0..25 {
            cardkingdom::fetch(&ctx, None, &good).unwrap();
            let err = cardkingdom::fetch(&ctx, None, &bad).unwrap_err();
            assert!(matches!(err, CardKingdomError::Decode { .. }));
        }
        open_fds().saturating_sub(before)
    })
    .await
    .unwrap();
    assert_eq!(local_growth, 0);

    // Singles then sealed over one shared client, including a non-OK response.
    let server = MockServer::start().await;
    for route in ["/api/v2/pricelist", "/api/sealed_pricelist"] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_string(common::sample_json()))
            .mount(&server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/down"))
        .respond_with(ResponseTemplate::new(503).set_body_string("service unavailable"))
        .mount(&server)
        .await;

    let base = server.uri();
    let remote_growth = tokio::task::spawn_blocking(move || {
        let client = reqwest::Client::new();
        let ctx = Context::background();
        let singles = format!("{base}/api/v2/pricelist");
        let sealed = format!("{base}/api/sealed_pricelist");
        let down = format!("{base}/down");

        // Warm the connection pool first.
        cardkingdom::fetch(&ctx, Some(&client), &singles).unwrap();
        cardkingdom::fetch(&ctx, Some(&client), &sealed).unwrap();
        let before = open_fds();
        for _ in 0..25 {
            cardkingdom::fetch(&ctx, Some(&client), &singles).unwrap();
            cardkingdom::fetch(&ctx, Some(&client), &sealed).unwrap();
            assert!(cardkingdom::fetch(&ctx, Some(&client), &down).is_err());
        }
        open_fds().saturating_sub(before)
    })
    .await
    .unwrap();
    // An error response that is not read to the end may retire its pooled
    // connection for a fresh one, which is a swap rather than growth.
    assert!(remote_growth <= 2, "open descriptors grew by {remote_growth}");
}
