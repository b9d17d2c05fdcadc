//! Inventory table sessions.
//!
//! DESIGN
//! ======
//! Each inventory view is a session: a `PartsTable` built from the source's
//! inventory rows and kept in `AppState::tables` under a fresh UUID until
//! deleted or evicted. Clients drive it with `TableCommand`s and get the resulting
//! `TableView` back after every command.
//!
//! A command holds the write lock only for one synchronous table operation.
//!
//! EVICTION
//! ========
//! Clients that navigate away never send `DELETE`, so every read or command
//! refreshes the session's `last_used` and a background sweeper drops
//! sessions idle for longer than the configured limit.

use std::time::Duration;

use serde::Deserialize;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{info, warn};
use uuid::Uuid;

use crate::source::SourceError;
use crate::state::{AppState, TableSession};
use crate::table::columns::ColumnId;
use crate::table::sort::SortKey;
use crate::table::{PartsTable, TableError, TableView};

#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("table session not found: {0}")]
    SessionNotFound(Uuid),
    #[error("source error: {0}")]
    Source(#[from] SourceError),
    #[error("table error: {0}")]
    Table(#[from] TableError),
}

/// One user interaction with the parts table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum TableCommand {
    /// Empty or missing `value` clears the filter; `"all"` clears the status filter.
    SetFilter {
        column: ColumnId,
        #[serde(default)]
        value: Option<String>,
    },
    ClearFilters,
    SetSorting {
        sorting: Vec<SortKey>,
    },
    ToggleSort {
        column: ColumnId,
        #[serde(default)]
        multi: bool,
    },
    SetPageSize {
        size: usize,
    },
    SetPageIndex {
        index: usize,
    },
    FirstPage,
    PreviousPage,
    NextPage,
    LastPage,
    Reorder {
        source: i64,
        target: i64,
    },
    /// Missing `value` flips the row.
    ToggleRow {
        id: i64,
        #[serde(default)]
        value: Option<bool>,
    },
    ToggleAllPageRows {
        value: bool,
    },
    SetColumnVisibility {
        column: ColumnId,
        visible: bool,
    },
}

/// Apply one command to a table.
///
/// # Errors
///
/// Propagates the table's validation errors; the table is left unchanged.
pub fn apply_command(table: &mut PartsTable, command: TableCommand) -> Result<(), TableError> {
    match command {
        TableCommand::SetFilter { column, value } => table.set_filter(column, value.as_deref())?,
        TableCommand::ClearFilters => table.clear_filters(),
        TableCommand::SetSorting { sorting } => table.set_sorting(sorting)?,
        TableCommand::ToggleSort { column, multi } => table.toggle_sort(column, multi)?,
        TableCommand::SetPageSize { size } => table.set_page_size(size)?,
        TableCommand::SetPageIndex { index } => table.set_page_index(index),
        TableCommand::FirstPage => table.first_page(),
        TableCommand::PreviousPage => table.previous_page(),
        TableCommand::NextPage => table.next_page(),
        TableCommand::LastPage => table.last_page(),
        TableCommand::Reorder { source, target } => {
            table.reorder(source, target);
        }
        TableCommand::ToggleRow { id, value } => table.toggle_row_selected(id, value)?,
        TableCommand::ToggleAllPageRows { value } => table.toggle_all_page_rows_selected(value),
        TableCommand::SetColumnVisibility { column, visible } => table.set_column_visibility(column, visible)?,
    }
    Ok(())
}

// =============================================================================
// SESSIONS
// =============================================================================

/// Load inventory, apply `commands` in order, and register the session.
///
/// # Errors
///
/// Returns `Source` if inventory cannot be fetched and `Table` if a command
/// is invalid; no session is registered in either case.
pub async fn create_session(
    state: &AppState,
    commands: Vec<TableCommand>,
) -> Result<(Uuid, TableView), InventoryError> {
    let rows = state
        .source
        .inventory()
        .await
        .inspect_err(|e| warn!(source = state.source.name(), error = %e, "inventory fetch failed"))?;

    let mut table = PartsTable::from_raw(&rows);
    for command in commands {
        apply_command(&mut table, command)?;
    }
    let view = table.view();

    let id = Uuid::new_v4();
    state.tables.write().await.insert(id, TableSession::new(table));
    info!(%id, rows = view.total_rows, "table session created");
    Ok((id, view))
}

/// # Errors
///
/// Returns `SessionNotFound` for an unknown id.
pub async fn session_view(state: &AppState, id: Uuid) -> Result<TableView, InventoryError> {
    let mut tables = state.tables.write().await;
    let session = tables.get_mut(&id).ok_or(InventoryError::SessionNotFound(id))?;
    session.touch();
    Ok(session.table.view())
}

/// Apply one command and return the resulting view.
///
/// # Errors
///
/// Returns `SessionNotFound` for an unknown id, `Table` for a rejected command.
pub async fn apply(state: &AppState, id: Uuid, command: TableCommand) -> Result<TableView, InventoryError> {
    let mut tables = state.tables.write().await;
    let session = tables.get_mut(&id).ok_or(InventoryError::SessionNotFound(id))?;
    session.touch();
    apply_command(&mut session.table, command)?;
    Ok(session.table.view())
}

/// # Errors
///
/// Returns `SessionNotFound` for an unknown id.
pub async fn delete_session(state: &AppState, id: Uuid) -> Result<(), InventoryError> {
    let removed = state.tables.write().await.remove(&id);
    if removed.is_none() {
        return Err(InventoryError::SessionNotFound(id));
    }
    info!(%id, "table session deleted");
    Ok(())
}

// =============================================================================
// EVICTION
// =============================================================================

/// Drop every session unused for longer than `idle_limit`. Returns how many
/// were removed.
pub async fn evict_idle_sessions(state: &AppState, idle_limit: Duration) -> usize {
    let now = Instant::now();
    let mut tables = state.tables.write().await;
    let before = tables.len();
    tables.retain(|id, session| {
        let keep = session.idle_for(now) <= idle_limit;
        if !keep {
            info!(%id, "table session evicted after idle limit");
        }
        keep
    });
    before - tables.len()
}

/// Spawn the idle-session sweeper. Returns a handle for shutdown.
pub fn spawn_session_sweeper(state: AppState, idle_limit: Duration, every: Duration) -> JoinHandle<()> {
    info!(idle_secs = idle_limit.as_secs(), every_secs = every.as_secs(), "table session sweeper configured");
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let evicted = evict_idle_sessions(&state, idle_limit).await;
            if evicted > 0 {
                info!(evicted, "idle table sessions swept");
            }
        }
    })
}

#[cfg(test)]
#[path = "inventory_test.rs"]
mod tests;
