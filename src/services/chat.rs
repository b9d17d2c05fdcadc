//! Sales advisor chat: a keyword responder over a fixed advisory dataset.
//!
//! DESIGN
//! ======
//! `answer` lower-cases the question and picks the first matching rule:
//! risk, purchase orders, rotation, filter coverage, overstock, or the
//! default capability message. Replies are built from the in-memory
//! `ADVISOR_PARTS` and `KPIS`, never from the inventory table sessions.
//!
//! The "thinking" delay belongs to the HTTP handler; `answer` is pure.

use std::fmt::Write;

use serde::Serialize;

/// Row of the advisory dataset.
#[derive(Debug, Clone, Copy)]
pub struct AdvisorPart {
    pub producto: &'static str,
    pub inventario: i64,
    pub forecasting: i64,
    pub riesgo: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct Kpis {
    pub rotacion_dias: u32,
    pub fill_rate: f64,
    pub stockouts_mes: u32,
    pub tendencia_ventas_3m: &'static str,
}

pub const ADVISOR_PARTS: [AdvisorPart; 6] = [
    AdvisorPart { producto: "Oil Filter", inventario: 16, forecasting: 15, riesgo: false },
    AdvisorPart { producto: "Motor Oil 0W-20", inventario: 24, forecasting: 90, riesgo: true },
    AdvisorPart { producto: "Brake Pads Front", inventario: 42, forecasting: 144, riesgo: true },
    AdvisorPart { producto: "Coolant Type 2", inventario: 51, forecasting: 120, riesgo: true },
    AdvisorPart { producto: "Air Filter", inventario: 24, forecasting: 90, riesgo: true },
    AdvisorPart { producto: "Battery 12V", inventario: 22, forecasting: 90, riesgo: true },
];

pub const KPIS: Kpis = Kpis { rotacion_dias: 37, fill_rate: 0.92, stockouts_mes: 5, tendencia_ventas_3m: "+7.4%" };

pub const QUICK_PROMPTS: [&str; 5] = [
    "¿Qué repuestos están en riesgo este mes?",
    "Recomienda órdenes de compra para 2 semanas",
    "Top 3 productos con mayor rotación",
    "¿Tenemos stock para cubrir 3 meses en filtros?",
    "Sugerencias para reducir stock inmovilizado",
];

const GREETING: &str = "Hola 👋 Soy tu AI Sales Advisor para repuestos Honda. ¿En qué te apoyo hoy?";
const OPENING_QUESTION: &str = "Quiero ver qué está en riesgo este mes.";

/// Purchase padding over the forecast gap.
const ORDER_PADDING: f64 = 1.1;

// =============================================================================
// TRANSCRIPT
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    fn new(role: Role, content: impl Into<String>) -> Self {
        Self { role, content: content.into() }
    }
}

/// Everything the chat page shows before the first question.
#[derive(Debug, Clone, Serialize)]
pub struct ChatOverview {
    pub badges: Vec<String>,
    pub quick_prompts: Vec<&'static str>,
    pub transcript: Vec<ChatMessage>,
}

#[must_use]
pub fn overview() -> ChatOverview {
    ChatOverview {
        badges: kpi_badges(),
        quick_prompts: QUICK_PROMPTS.to_vec(),
        transcript: opening_transcript(),
    }
}

/// Greeting, a sample question, and the risk answer to it.
#[must_use]
pub fn opening_transcript() -> Vec<ChatMessage> {
    vec![
        ChatMessage::new(Role::Assistant, GREETING),
        ChatMessage::new(Role::User, OPENING_QUESTION),
        ChatMessage::new(Role::Assistant, answer("riesgo")),
    ]
}

#[must_use]
pub fn kpi_badges() -> Vec<String> {
    vec![
        format!("Rotación ~ {} días", KPIS.rotacion_dias),
        format!("Fill-rate {}%", fill_rate_percent()),
        format!("Stockouts (30d): {}", KPIS.stockouts_mes),
        format!("Tendencia 3m: {}", KPIS.tendencia_ventas_3m),
    ]
}

fn fill_rate_percent() -> String {
    format!("{:.0}", KPIS.fill_rate * 100.0)
}

// =============================================================================
// RESPONDER
// =============================================================================

/// Reply to a free-text question. First matching rule wins.
#[must_use]
pub fn answer(question: &str) -> String {
    let low = question.to_lowercase();
    let has = |needle: &str| low.contains(needle);

    if has("riesgo") {
        risk_reply()
    } else if has("órdenes") || has("ordenes") || has("compra") {
        order_reply()
    } else if has("rotación") || has("rotacion") || has("top 3") {
        rotation_reply()
    } else if has("3 meses") && (has("filtro") || has("filtros")) {
        filter_coverage_reply()
    } else if has("inmovilizado") || has("sobrestock") || has("reducir stock") {
        overstock_reply()
    } else {
        "Puedo ayudarte con: riesgo de stock, órdenes sugeridas, rotación/top, cobertura por familia y acciones \
         para inmovilizado. Pregúntame algo como: “¿Qué repuestos están en riesgo este mes?”"
            .to_string()
    }
}

fn risk_reply() -> String {
    let lines: Vec<String> = ADVISOR_PARTS
        .iter()
        .filter(|p| p.riesgo)
        .map(|p| format!("• {} — Inv {} vs Fcst {}", p.producto, p.inventario, p.forecasting))
        .collect();
    format!(
        "Repuestos en riesgo (Inventario < Forecasting):\n{}\n\nSugerencia: prioriza compra en lotes pequeños y revisa \
         lead time de proveedores.",
        lines.join("\n")
    )
}

/// Units to order: the forecast gap plus padding, rounded up.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn suggested_order(part: &AdvisorPart) -> i64 {
    let need = (part.forecasting - part.inventario).max(0);
    (need as f64 * ORDER_PADDING).ceil() as i64
}

fn order_reply() -> String {
    let plan: Vec<(&str, i64)> = ADVISOR_PARTS
        .iter()
        .map(|p| (p.producto, suggested_order(p)))
        .filter(|(_, qty)| *qty > 0)
        .collect();
    if plan.is_empty() {
        return "No se requieren órdenes: inventario suficiente para el horizonte de 3 meses.".to_string();
    }
    let mut out = String::from("Orden sugerida (horizonte 3 meses +10% colchón):");
    for (name, qty) in plan {
        let _ = write!(out, "\n• {name}: {qty} u.");
    }
    out
}

fn rotation_reply() -> String {
    let mut top: Vec<&AdvisorPart> = ADVISOR_PARTS.iter().collect();
    top.sort_by(|a, b| b.forecasting.cmp(&a.forecasting));
    let lines: Vec<String> = top
        .iter()
        .take(3)
        .enumerate()
        .map(|(i, p)| format!("{}. {} — Fcst {}, Inv {}", i + 1, p.producto, p.forecasting, p.inventario))
        .collect();
    format!(
        "Top 3 por rotación estimada:\n{}\n\nKPI: Rotación promedio ~{} días; Tendencia 3m: {}.",
        lines.join("\n"),
        KPIS.rotacion_dias,
        KPIS.tendencia_ventas_3m
    )
}

fn filter_coverage_reply() -> String {
    let mut out = String::from("Cobertura de 3 meses (familia filtros):");
    for p in ADVISOR_PARTS.iter().filter(|p| p.producto.to_lowercase().contains("filter")) {
        let mark = if p.inventario >= p.forecasting { "✅" } else { "⚠️" };
        let _ = write!(out, "\n• {}: Inv {} / Fcst {} {mark}", p.producto, p.inventario, p.forecasting);
    }
    out
}

fn overstock_reply() -> String {
    [
        "Sugerencias para reducir stock inmovilizado:".to_string(),
        "1) ABC + políticas por clase (A: reorden semanal; B: quincenal; C: mensual).".to_string(),
        "2) Lotes mínimos dinámicos en base a variabilidad y lead time.".to_string(),
        "3) Liquidar cola de C con bundles (ej. Washer + Oil Filter).".to_string(),
        "4) Alinear compras a pronóstico (Fcst) y estacionalidad.".to_string(),
        format!("5) Control de fill-rate actual: {}% (meta ≥ 95%).", fill_rate_percent()),
    ]
    .join("\n")
}

#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;
