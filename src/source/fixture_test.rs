use super::*;
use crate::part;

fn source() -> FixtureSource {
    FixtureSource::new(Duration::ZERO)
}

#[tokio::test]
async fn dashboard_fixture_decodes() {
    let payload = source().dashboard().await.unwrap();
    assert!(!payload.current_quarter_range.is_empty());
    assert_eq!(payload.sales.last().map(|p| p.date.as_str()), Some("2025-03-31"));
}

#[tokio::test]
async fn model_fixture_has_all_architectures() {
    let payload = source().build_models().await.unwrap();
    let p001 = &payload.summary["P001"];
    for model in ["MLP", "CNN1D", "LSTM", "CNN_LSTM"] {
        assert!(p001.contains_key(model), "missing {model}");
    }
    assert!(payload.metricas.iter().any(|m| m.contains_key("P001")));
}

#[tokio::test]
async fn predict_fixture_covers_default_product() {
    let payload = source().predict().await.unwrap();
    let p001 = payload.iter().find(|p| p.product_code == "P001").unwrap();
    let mlp = &p001.models["MLP"];
    assert_eq!(mlp.forecast.dates.len(), mlp.forecast.pred.len());
    assert_eq!(mlp.history.dates.len(), mlp.history.values.len());
}

#[tokio::test]
async fn inventory_fixture_normalizes_every_row() {
    let rows = source().inventory().await.unwrap();
    let parts = part::load_parts(&rows);
    assert_eq!(parts.len(), rows.len());
    assert!(parts.len() >= 23);
    assert!(parts.iter().all(|p| p.status.is_some()));
}

#[tokio::test(start_paused = true)]
async fn delay_is_applied_before_returning() {
    let source = FixtureSource::new(Duration::from_millis(1500));
    let started = tokio::time::Instant::now();
    source.dashboard().await.unwrap();
    assert!(started.elapsed() >= Duration::from_millis(1500));
}
