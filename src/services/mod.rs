//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules turn backend documents into view models and own the
//! inventory table sessions, so route handlers stay focused on extracting
//! parameters and mapping errors to status codes.

pub mod chat;
pub mod dashboard;
pub mod forecast;
pub mod inventory;
pub mod models;

/// Architectures the model and forecast pages know about, in display order.
pub const MODEL_NAMES: [&str; 4] = ["MLP", "CNN1D", "LSTM", "CNN_LSTM"];

pub const DEFAULT_PRODUCT: &str = "P001";
pub const DEFAULT_MODEL: &str = "MLP";

#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error("unknown product: {0}")]
    UnknownProduct(String),
    #[error("unknown model: {0}")]
    UnknownModel(String),
    #[error("unknown range: {0}")]
    UnknownRange(String),
}
