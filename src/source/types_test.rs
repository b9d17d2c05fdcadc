use super::*;

#[test]
fn dashboard_accepts_singular_invoice_key() {
    let json = r#"{"last_quarter_total_invoice": "4407", "sales": []}"#;
    let payload: DashboardPayload = serde_json::from_str(json).unwrap();
    assert_eq!(payload.last_quarter_total_invoices, "4407");
    assert_eq!(payload.current_quarter_range, "");
}

#[test]
fn sales_point_defaults_missing_counts() {
    let point: SalesPoint = serde_json::from_str(r#"{"date": "2025-03-01"}"#).unwrap();
    assert_eq!(point.current_year, 0);
    assert_eq!(point.last_year, 0);
}

#[test]
fn model_summary_tolerates_null_last() {
    let json = r#"{"summary": {"P001": {"MLP": {"last": null, "desc_1": "", "desc_2": "", "eval": "sin datos"}}}}"#;
    let payload: ModelPayload = serde_json::from_str(json).unwrap();
    let mlp = &payload.summary["P001"]["MLP"];
    assert!(mlp.last.is_none());
    assert_eq!(mlp.eval, "sin datos");
    assert!(payload.metricas.is_empty());
}

#[test]
fn last_loss_fields_may_be_null() {
    let last: LastLoss = serde_json::from_str(r#"{"loss": 0.5, "val_loss": null}"#).unwrap();
    assert_eq!(last.loss, Some(0.5));
    assert_eq!(last.val_loss, None);
}

#[test]
fn predict_decodes_without_metrics() {
    let json = r#"[{"product_code": "P001", "models": {"MLP": {
        "history": {"dates": ["2025-03-30"], "values": [4.0]},
        "forecast": {"dates": ["2025-04-01"], "pred": [5.0], "lower": [4.0], "upper": [6.0]},
        "summary": {"total_pred": 5.0, "total_low": 4.0, "total_up": 6.0, "mean_daily": 5.0, "median": 5.0}
    }}}]"#;
    let payload: PredictPayload = serde_json::from_str(json).unwrap();
    let mlp = &payload[0].models["MLP"];
    assert!(mlp.metrics.is_none());
    assert_eq!(mlp.forecast.pred, vec![5.0]);
    assert!((mlp.summary.mean_daily - 5.0).abs() < f64::EPSILON);
}
