use super::*;
use crate::table::test_helpers::{part, sample_parts};

#[test]
fn empty_filters_match_everything() {
    let filters = ColumnFilters::default();
    assert_eq!(filters, ColumnFilters::default());
    assert!(sample_parts().iter().all(|p| filters.matches(p)));
}

#[test]
fn producto_filter_is_case_insensitive_substring() {
    let mut filters = ColumnFilters::default();
    filters.set(ColumnId::Producto, Some("oil")).unwrap();
    let names: Vec<String> = sample_parts()
        .into_iter()
        .filter(|p| filters.matches(p))
        .map(|p| p.producto)
        .collect();
    assert_eq!(names, vec!["Oil Filter", "Motor Oil 0W-20"]);
}

#[test]
fn numero_serie_filter_matches_substring() {
    let mut filters = ColumnFilters::default();
    filters.set(ColumnId::NumeroSerie, Some("plm")).unwrap();
    let hits = sample_parts().into_iter().filter(|p| filters.matches(p)).count();
    assert_eq!(hits, 1);
}

#[test]
fn status_filter_is_exact() {
    let mut filters = ColumnFilters::default();
    filters.set(ColumnId::Status, Some("Riesgo")).unwrap();
    assert!(filters.matches(&part(1, "Air Filter", Status::Riesgo, 90)));
    assert!(!filters.matches(&part(2, "Air Filter", Status::Revisar, 90)));
}

#[test]
fn filters_combine_with_and() {
    let parts = sample_parts();
    let mut filters = ColumnFilters::default();
    filters.set(ColumnId::Status, Some("Riesgo")).unwrap();
    filters.set(ColumnId::Producto, Some("Oil")).unwrap();

    let combined: Vec<i64> = parts.iter().filter(|p| filters.matches(p)).map(|p| p.id).collect();

    let by_status: Vec<i64> = parts.iter().filter(|p| p.status == Some(Status::Riesgo)).map(|p| p.id).collect();
    let by_name: Vec<i64> = parts
        .iter()
        .filter(|p| p.producto.to_lowercase().contains("oil"))
        .map(|p| p.id)
        .collect();
    let intersection: Vec<i64> = by_status.into_iter().filter(|id| by_name.contains(id)).collect();

    assert_eq!(combined, intersection);
    assert_eq!(combined, vec![2]);
}

#[test]
fn empty_value_clears_filter() {
    let mut filters = ColumnFilters::default();
    filters.set(ColumnId::Producto, Some("oil")).unwrap();
    filters.set(ColumnId::Producto, Some("")).unwrap();
    assert!(filters.producto.is_none());

    filters.set(ColumnId::Status, Some("Ok")).unwrap();
    filters.set(ColumnId::Status, Some(STATUS_ALL)).unwrap();
    assert!(filters.status.is_none());
}

#[test]
fn unknown_status_is_rejected() {
    let mut filters = ColumnFilters::default();
    let err = filters.set(ColumnId::Status, Some("Bad")).unwrap_err();
    assert!(matches!(err, TableError::UnknownStatus(s) if s == "Bad"));
}

#[test]
fn non_filter_columns_are_rejected() {
    let mut filters = ColumnFilters::default();
    let err = filters.set(ColumnId::Ventas1, Some("3")).unwrap_err();
    assert!(matches!(err, TableError::NotFilterable(ColumnId::Ventas1)));
}

#[test]
fn status_options_follow_fixed_priority() {
    let parts = vec![part(1, "A", Status::Revisar, 1), part(2, "B", Status::Ok, 1)];
    assert_eq!(status_options(&parts), vec![Status::Ok, Status::Revisar]);
}
