//! Contract checks every provider must satisfy, driven through the same
//! `Provider::fetch` seam the chains use.

use std::sync::Arc;

use pricebar_core::adapters::{
    binance, coingecko, floatrates, goldprice, okx, open_er, ReferenceGoldProvider,
};
use pricebar_core::{
    adapters, AssetClass, ExchangeRateResolver, FetchContext, PriceRecord, Provider,
    ProviderErrorKind,
};
use pricebar_tests::ScriptedHttpClient;

struct PriceCase {
    provider: Box<dyn Provider<Output = PriceRecord>>,
    url: &'static str,
    payload: &'static str,
    asset: AssetClass,
    price: f64,
}

fn price_cases() -> Vec<PriceCase> {
    vec![
        PriceCase {
            provider: Box::new(okx::provider()),
            url: okx::URL,
            payload: r#"{"code":"0","msg":"","data":[{"instId":"BTC-USDT","last":"64850.2","open24h":"63000","high24h":"65100"}]}"#,
            asset: AssetClass::Crypto,
            price: 64_850.2,
        },
        PriceCase {
            provider: Box::new(binance::provider()),
            url: binance::URL,
            payload: r#"{"symbol":"BTCUSDT","priceChange":"-512.10","priceChangePercent":"-0.778","lastPrice":"65301.99000000"}"#,
            asset: AssetClass::Crypto,
            price: 65_301.99,
        },
        PriceCase {
            provider: Box::new(coingecko::bitcoin()),
            url: coingecko::BITCOIN_URL,
            payload: r#"{"bitcoin":{"usd":65012,"usd_24h_change":-1.0261}}"#,
            asset: AssetClass::Crypto,
            price: 65_012.0,
        },
        PriceCase {
            provider: Box::new(coingecko::gold()),
            url: coingecko::GOLD_URL,
            payload: r#"{"gold":{"cny":16500.5,"cny_24h_change":0.1234}}"#,
            asset: AssetClass::Metal,
            price: 530.5,
        },
        PriceCase {
            provider: Box::new(goldprice::provider()),
            url: goldprice::URL,
            payload: r#"{"ts":1718000000000,"items":[{"curr":"CNY","xauPrice":15858,"chgXau":-20.5}]}"#,
            asset: AssetClass::Metal,
            price: 509.85,
        },
        PriceCase {
            provider: Box::new(open_er::gold()),
            url: open_er::XAU_URL,
            payload: r#"{"result":"success","base_code":"XAU","rates":{"USD":2330.1,"CNY":16000}}"#,
            asset: AssetClass::Metal,
            price: 514.41,
        },
    ]
}

fn context(http: &ScriptedHttpClient) -> FetchContext<'_> {
    FetchContext {
        http,
        timeout_ms: 5_000,
    }
}

#[tokio::test]
async fn every_price_provider_normalizes_its_payload() {
    for case in price_cases() {
        let http = ScriptedHttpClient::new().json(case.url, case.payload);
        let name = case.provider.name();

        let record = case
            .provider
            .fetch(context(&http))
            .await
            .unwrap_or_else(|error| panic!("provider '{name}' failed: {error}"));

        assert_eq!(record.asset, case.asset, "provider '{name}': asset");
        assert_eq!(record.unit_price, case.price, "provider '{name}': price");
        assert_eq!(record.source, name, "provider '{name}': source");
        assert!(!record.synthetic, "provider '{name}': synthetic flag");
        assert!(
            record.change_24h_percent.is_finite(),
            "provider '{name}': change must be finite"
        );
        assert_eq!(http.requested_urls(), vec![case.url], "provider '{name}': url");
    }
}

#[tokio::test]
async fn every_price_provider_rejects_an_empty_object() {
    for case in price_cases() {
        let http = ScriptedHttpClient::new().json(case.url, "{}");
        let name = case.provider.name();

        let error = case
            .provider
            .fetch(context(&http))
            .await
            .expect_err("empty object must not normalize");

        assert_eq!(
            error.kind(),
            ProviderErrorKind::MalformedResponse,
            "provider '{name}': error kind"
        );
    }
}

#[tokio::test]
async fn every_price_provider_reports_transport_and_parse_failures() {
    for case in price_cases() {
        let name = case.provider.name();

        let down = ScriptedHttpClient::new().status(case.url, 502, "bad gateway");
        let error = case.provider.fetch(context(&down)).await.expect_err("502");
        assert_eq!(
            error.code(),
            "provider.transport_failure",
            "provider '{name}': status"
        );

        let garbled = ScriptedHttpClient::new().json(case.url, "{\"truncated\":");
        let error = case.provider.fetch(context(&garbled)).await.expect_err("bad json");
        assert_eq!(
            error.code(),
            "provider.parse_failure",
            "provider '{name}': body"
        );
    }
}

#[tokio::test]
async fn negative_prices_are_rejected() {
    let http = ScriptedHttpClient::new().json(
        binance::URL,
        r#"{"lastPrice":"-1.0","priceChangePercent":"0"}"#,
    );

    let error = binance::provider()
        .fetch(context(&http))
        .await
        .expect_err("negative price");

    assert_eq!(error.kind(), ProviderErrorKind::MalformedResponse);
}

#[tokio::test]
async fn rate_providers_read_cny_and_require_positive_rates() {
    let cases: [(Box<dyn Provider<Output = f64>>, &str, &str); 2] = [
        (
            Box::new(open_er::usd_rate()),
            open_er::USD_URL,
            r#"{"result":"success","base_code":"USD","rates":{"USD":1,"CNY":7.2431}}"#,
        ),
        (
            Box::new(floatrates::usd_rate()),
            floatrates::URL,
            r#"{"cny":{"code":"CNY","alphaCode":"CNY","rate":7.2431,"inverseRate":0.1381}}"#,
        ),
    ];

    for (provider, url, payload) in cases {
        let name = provider.name();
        let http = ScriptedHttpClient::new().json(url, payload);
        let rate = provider
            .fetch(context(&http))
            .await
            .unwrap_or_else(|error| panic!("provider '{name}' failed: {error}"));
        assert_eq!(rate, 7.2431, "provider '{name}': rate");

        let zero = payload.replace("7.2431", "0");
        let http = ScriptedHttpClient::new().json(url, zero);
        assert!(
            provider.fetch(context(&http)).await.is_err(),
            "provider '{name}': zero rate must be rejected"
        );
    }
}

#[tokio::test]
async fn reference_gold_prices_fixed_ounce_at_live_rate() {
    let http = ScriptedHttpClient::new().json(open_er::USD_URL, r#"{"rates":{"CNY":7.2}}"#);
    let rates = Arc::new(ExchangeRateResolver::new(adapters::exchange_rate_chain()));
    let provider = ReferenceGoldProvider::new(2_202.5, 7.0, rates);

    let record = provider.fetch(context(&http)).await.expect("never fails");

    assert_eq!(record.source, "reference-gold");
    assert_eq!(record.asset, AssetClass::Metal);
    assert_eq!(record.unit_price, 509.85);
    assert_eq!(record.change_24h_percent, 0.0);
}
