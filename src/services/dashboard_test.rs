use super::*;

fn point(date: &str) -> SalesPoint {
    SalesPoint { date: date.to_owned(), current_year: 10, last_year: 8 }
}

fn payload() -> DashboardPayload {
    DashboardPayload {
        current_quarter_range: "Trimestre 1, 2025-01-01 → 2025-03-31".into(),
        current_quarter_total_sales: "$1,284,530.75".into(),
        current_quarter_sale_rate: "$7.40".into(),
        current_quarter_total_invoices: "4312".into(),
        current_quarter_invoice_rate: "$-2.15".into(),
        last_quarter_range: "Trimestre 4, 2024-10-01 → 2024-12-31".into(),
        last_quarter_total_sales: "$1,196,020.10".into(),
        last_quarter_sale_rate: "$0.00".into(),
        last_quarter_total_invoices: "4407".into(),
        last_quarter_invoice_rate: "n/a".into(),
        sales: vec![point("2024-12-30"), point("2024-12-31"), point("2025-03-01"), point("2025-03-24"), point("2025-03-31")],
    }
}

// =========================================================================
// ranges
// =========================================================================

#[test]
fn range_parses_known_values() {
    assert_eq!(TimeRange::parse("7d").unwrap(), TimeRange::Days7);
    assert_eq!(TimeRange::default(), TimeRange::Days90);
    assert!(matches!(TimeRange::parse("1y"), Err(ViewError::UnknownRange(_))));
}

#[test]
fn range_start_counts_back_from_reference() {
    assert_eq!(TimeRange::Days90.start_date(), date!(2024 - 12 - 31));
    assert_eq!(TimeRange::Days30.start_date(), date!(2025 - 03 - 01));
    assert_eq!(TimeRange::Days7.start_date(), date!(2025 - 03 - 24));
}

#[test]
fn filter_keeps_points_on_or_after_start() {
    let sales = payload().sales;
    let dates = |range| filter_sales(&sales, range).into_iter().map(|p| p.date).collect::<Vec<_>>();
    assert_eq!(dates(TimeRange::Days90), vec!["2024-12-31", "2025-03-01", "2025-03-24", "2025-03-31"]);
    assert_eq!(dates(TimeRange::Days30), vec!["2025-03-01", "2025-03-24", "2025-03-31"]);
    assert_eq!(dates(TimeRange::Days7), vec!["2025-03-24", "2025-03-31"]);
}

#[test]
fn filter_drops_bad_dates() {
    let sales = vec![point("31/03/2025"), point("2025-03-30")];
    assert_eq!(filter_sales(&sales, TimeRange::Days7).len(), 1);
}

#[test]
fn range_serializes_as_label() {
    assert_eq!(serde_json::to_value(TimeRange::Days30).unwrap(), "30d");
}

// =========================================================================
// rates and cards
// =========================================================================

#[test]
fn parse_rate_strips_formatting() {
    assert_eq!(parse_rate("$7.40"), Some(7.4));
    assert_eq!(parse_rate("$-2.15"), Some(-2.15));
    assert_eq!(parse_rate("+12%"), Some(12.0));
    assert_eq!(parse_rate(""), Some(0.0));
    assert_eq!(parse_rate("n/a"), Some(0.0));
    assert_eq!(parse_rate("1.2.3"), None);
}

#[test]
fn trend_classifies_sign() {
    assert_eq!(Trend::classify(Some(0.1)), Trend::Up);
    assert_eq!(Trend::classify(Some(-0.1)), Trend::Down);
    assert_eq!(Trend::classify(Some(0.0)), Trend::Flat);
    assert_eq!(Trend::classify(None), Trend::Flat);
}

#[test]
fn cards_use_their_own_rate() {
    let cards = section_cards(&payload());
    assert_eq!(cards.len(), 4);
    assert_eq!(cards[0].trend, Trend::Up);
    assert_eq!(cards[0].footer, "Ventas subieron este período");
    // Invoice card follows the invoice rate, not the sales rate.
    assert_eq!(cards[1].trend, Trend::Down);
    assert_eq!(cards[1].footer, "No. facturas disminuyeron este período");
    assert_eq!(cards[2].footer, "Ventas sin cambios");
    assert_eq!(cards[3].trend, Trend::Flat);
    assert_eq!(cards[3].range, "Trimestre 4, 2024-10-01 → 2024-12-31");
}

#[test]
fn view_combines_cards_and_sales() {
    let view = build_view(&payload(), TimeRange::Days7);
    assert_eq!(view.cards.len(), 4);
    assert_eq!(view.sales.len(), 2);
    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["range"], "7d");
    assert_eq!(json["cards"][0]["trend"], "up");
}
