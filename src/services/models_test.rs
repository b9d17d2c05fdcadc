use super::*;
use crate::source::types::LastLoss;

fn history(loss: &[f64], val_loss: &[f64]) -> LossHistory {
    LossHistory { loss: loss.to_vec(), val_loss: val_loss.to_vec() }
}

fn entry(product: &str, model: &str, h: LossHistory) -> ProductHistories {
    let mut models = BTreeMap::new();
    models.insert(model.to_owned(), h);
    let mut out = BTreeMap::new();
    out.insert(product.to_owned(), models);
    out
}

fn summary(val_loss: Option<f64>, eval: &str) -> ModelSummary {
    ModelSummary {
        last: Some(LastLoss { loss: Some(0.5), val_loss }),
        desc_1: format!("val_loss={}", val_loss.unwrap_or_default()),
        desc_2: format!("Desempeño {eval}"),
        eval: eval.to_owned(),
    }
}

fn payload() -> ModelPayload {
    let mut summaries = BTreeMap::new();
    summaries.insert("MLP".to_owned(), summary(Some(0.72), "bueno"));
    summaries.insert("LSTM".to_owned(), summary(Some(0.85), "medio"));
    let mut summary_map = BTreeMap::new();
    summary_map.insert("P001".to_owned(), summaries);
    ModelPayload {
        metricas: vec![
            entry("P001", "MLP", history(&[1.0, 0.8, 0.7], &[1.1, 0.9])),
            entry("P001", "LSTM", history(&[0.9], &[0.95])),
            entry("P002", "MLP", history(&[2.0], &[2.1])),
        ],
        summary: summary_map,
    }
}

#[test]
fn merge_folds_entries_per_product() {
    let merged = merge_metricas(&payload().metricas);
    assert_eq!(merged.len(), 2);
    assert_eq!(merged["P001"].len(), 2);
    assert!(merged["P002"].contains_key("MLP"));
}

#[test]
fn merge_later_entry_wins() {
    let metricas = vec![entry("P001", "MLP", history(&[1.0], &[])), entry("P001", "MLP", history(&[2.0], &[]))];
    let merged = merge_metricas(&metricas);
    assert_eq!(merged["P001"]["MLP"].loss, vec![2.0]);
}

#[test]
fn curve_pads_shorter_series_with_none() {
    let curve = loss_curve(&history(&[1.0, 0.8, 0.7], &[1.1, 0.9]));
    assert_eq!(curve.len(), 3);
    assert_eq!(curve[0], LossPoint { epoch: 1, train: Some(1.0), val: Some(1.1) });
    assert_eq!(curve[2], LossPoint { epoch: 3, train: Some(0.7), val: None });
}

#[test]
fn empty_history_has_empty_curve() {
    assert!(loss_curve(&LossHistory::default()).is_empty());
}

#[test]
fn cards_follow_display_order() {
    let cards = model_cards(&payload().summary["P001"]);
    let names: Vec<&str> = cards.iter().map(|c| c.model.as_str()).collect();
    assert_eq!(names, vec!["MLP", "LSTM"]);
    assert_eq!(cards[0].trend, Trend::Up);
    assert_eq!(cards[1].trend, Trend::Flat);
    assert_eq!(cards[0].val_loss, Some(0.72));
}

#[test]
fn card_carries_both_summary_lines() {
    let cards = model_cards(&payload().summary["P001"]);
    assert_eq!(cards[0].headline, "val_loss=0.72");
    assert_eq!(cards[0].description, "Desempeño bueno");
    assert_eq!(cards[1].headline, "val_loss=0.85");
}

#[test]
fn eval_labels_map_to_badges() {
    assert_eq!(eval_trend("malo"), Trend::Down);
    assert_eq!(eval_trend("sin datos"), Trend::Down);
}

#[test]
fn view_selects_product_and_model() {
    let view = build_view(&payload(), "P001", "MLP").unwrap();
    assert_eq!(view.models, vec!["LSTM", "MLP"]);
    assert_eq!(view.curve.len(), 3);
    assert_eq!(view.cards.len(), 2);
}

#[test]
fn view_product_without_summary_has_no_cards() {
    let view = build_view(&payload(), "P002", "MLP").unwrap();
    assert!(view.cards.is_empty());
    assert_eq!(view.curve.len(), 1);
}

#[test]
fn view_rejects_unknown_product_and_model() {
    assert!(matches!(build_view(&payload(), "P999", "MLP"), Err(ViewError::UnknownProduct(_))));
    assert!(matches!(build_view(&payload(), "P001", "CNN1D"), Err(ViewError::UnknownModel(_))));
}
