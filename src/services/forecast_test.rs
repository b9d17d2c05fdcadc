use super::*;
use crate::source::types::{Forecast, ForecastSummary, History, ProductForecast};

fn model() -> ModelForecast {
    ModelForecast {
        history: History { dates: vec!["2025-03-30".into(), "2025-03-31".into()], values: vec![12.0] },
        forecast: Forecast {
            dates: vec!["2025-04-01".into(), "2025-04-02".into(), "2025-04-03".into()],
            pred: vec![14.0, 15.0],
            lower: vec![10.0, 16.0, 9.0],
            upper: vec![18.0, 15.0],
        },
        summary: ForecastSummary { total_pred: 641.37, total_low: 500.0, total_up: 780.0, mean_daily: 21.379, median: 21.0 },
        metrics: None,
    }
}

fn payload() -> PredictPayload {
    let mut models = BTreeMap::new();
    models.insert("LSTM".to_owned(), model());
    models.insert("MLP".to_owned(), model());
    vec![ProductForecast { product_code: "P001".into(), models }]
}

#[test]
fn series_puts_history_before_forecast() {
    let points = forecast_series(&model());
    assert_eq!(points.len(), 5);
    assert_eq!(points[0].hist, Some(12.0));
    assert_eq!(points[0].pred, None);
    // Missing history value reads as zero.
    assert_eq!(points[1].hist, Some(0.0));
    assert_eq!(points[2].hist, None);
    assert_eq!(points[2].pred, Some(14.0));
}

#[test]
fn band_is_base_plus_range() {
    let points = forecast_series(&model());
    assert_eq!(points[2].ci_base, 10.0);
    assert_eq!(points[2].ci_range, 8.0);
}

#[test]
fn inverted_band_clamps_to_zero() {
    let points = forecast_series(&model());
    assert_eq!(points[3].ci_base, 16.0);
    assert_eq!(points[3].ci_range, 0.0);
}

#[test]
fn missing_bound_collapses_band() {
    let points = forecast_series(&model());
    let last = &points[4];
    assert_eq!(last.pred, Some(0.0));
    assert_eq!(last.lower, Some(9.0));
    assert_eq!(last.upper, None);
    assert_eq!(last.ci_base, 9.0);
    assert_eq!(last.ci_range, 0.0);
}

#[test]
fn cards_round_totals() {
    let cards = forecast_cards(&payload()[0].models);
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].model, "MLP");
    assert_eq!(cards[0].description, "Predicción con MLP");
    assert_eq!(cards[0].total, "641 unidades");
    assert_eq!(cards[0].footer, "La demanda diaria es de 21.38 unidades");
}

#[test]
fn view_for_known_selection() {
    let view = build_view(&payload(), "P001", "LSTM").unwrap();
    assert_eq!(view.models, vec!["LSTM", "MLP"]);
    assert_eq!(view.points.len(), 5);
    assert!(view.metrics.is_none());
}

#[test]
fn view_rejects_unknown_selection() {
    assert!(matches!(build_view(&payload(), "P002", "MLP"), Err(ViewError::UnknownProduct(_))));
    assert!(matches!(build_view(&payload(), "P001", "CNN1D"), Err(ViewError::UnknownModel(_))));
}
