use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::error::BedError;
use crate::logic::{
    display::{color_for, display_age, tile_label, EMPTY_TILE_COLOR},
    grid::{clear, flatten, reconcile, toggle},
    validation::validate_new_field,
};
use crate::models::{
    field::Field,
    flower::Flower,
    grid::DenseGrid,
    request::{CellView, CreateFieldRequest, PaletteEntry, SessionView},
};
use crate::store::CatalogStore;

/// A field opened for editing together with the flowers that can be placed.
#[derive(Debug, Clone)]
pub struct EditSession {
    pub field: Field,
    pub flowers: Vec<Flower>,
    pub grid: DenseGrid,
    pub selected_flower: Option<String>,
}

impl EditSession {
    pub fn new(field: Field, flowers: Vec<Flower>) -> Self {
        let grid = reconcile(&field);
        Self {
            field,
            flowers,
            grid,
            selected_flower: None,
        }
    }

    fn flower(&self, id: &str) -> Option<&Flower> {
        self.flowers.iter().find(|f| f.id == id)
    }

    pub fn view(&self, now: DateTime<Utc>) -> SessionView {
        let palette = self
            .flowers
            .iter()
            .map(|f| PaletteEntry {
                id: f.id.clone(),
                common_name: f.name().to_string(),
                color: color_for(f.name()).to_string(),
            })
            .collect();

        let grid = self
            .grid
            .cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| {
                        let flower = cell.flower_id().and_then(|id| self.flower(id));
                        CellView {
                            row: cell.row,
                            col: cell.col,
                            flower_id: cell.flower_id().map(str::to_string),
                            planted_at: cell
                                .planting
                                .as_ref()
                                .and_then(|p| p.planted_at)
                                .map(|t| t.timestamp_millis()),
                            label: flower.map(|f| tile_label(f.name())).unwrap_or_default(),
                            age: display_age(cell, now),
                            color: flower
                                .map(|f| color_for(f.name()).to_string())
                                .unwrap_or_else(|| EMPTY_TILE_COLOR.to_string()),
                        }
                    })
                    .collect()
            })
            .collect();

        SessionView {
            field_id: self.field.id.clone(),
            name: self.field.name.clone(),
            rows: self.grid.rows,
            cols: self.grid.cols,
            selected_flower_id: self.selected_flower.clone(),
            palette,
            grid,
            occupied: self.grid.occupied_count(),
        }
    }
}

/// Field management for the beds screen: listing, creation, two-step
/// deletion and a single modal editing session.
pub struct BedManager {
    store: Arc<dyn CatalogStore>,
    session: Option<EditSession>,
    pending_deletion: Option<String>,
}

impl BedManager {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self {
            store,
            session: None,
            pending_deletion: None,
        }
    }

    pub async fn list_fields(&self) -> Result<Vec<Field>, BedError> {
        Ok(self.store.list_fields().await?)
    }

    /// Validates the request and stores a field with an empty grid.
    pub async fn create_field(&self, request: &CreateFieldRequest) -> Result<Field, BedError> {
        let record = validate_new_field(request).map_err(|e| {
            log::warn!("rejected field '{}': {e}", request.name);
            e
        })?;
        let field = self.store.create_field(record).await.map_err(|e| {
            log::error!("error adding field: {e}");
            e
        })?;
        log::info!("created field {} '{}' ({}x{})", field.id, field.name, field.rows, field.cols);
        Ok(field)
    }

    /// First step of deletion. Selecting the already-selected field deselects it.
    pub fn select_for_deletion(&mut self, id: &str) -> Option<&str> {
        if self.pending_deletion.as_deref() == Some(id) {
            self.pending_deletion = None;
        } else {
            self.pending_deletion = Some(id.to_string());
        }
        self.pending_deletion.as_deref()
    }

    pub fn pending_deletion(&self) -> Option<&str> {
        self.pending_deletion.as_deref()
    }

    pub fn cancel_deletion(&mut self) {
        self.pending_deletion = None;
    }

    /// Second step of deletion. The selection is consumed even if the store
    /// call fails.
    pub async fn confirm_deletion(&mut self) -> Result<String, BedError> {
        let id = self.pending_deletion.take().ok_or(BedError::NoPendingDeletion)?;
        self.store.delete_field(&id).await.map_err(|e| {
            log::error!("error deleting field {id}: {e}");
            e
        })?;
        if self.session.as_ref().is_some_and(|s| s.field.id == id) {
            self.session = None;
        }
        log::info!("deleted field {id}");
        Ok(id)
    }

    /// Loads a field and the flower catalog into a new session, replacing any
    /// open one.
    pub async fn open_field(&mut self, id: &str) -> Result<&EditSession, BedError> {
        self.pending_deletion = None;
        let field = self.store.get_field(id).await?;
        let flowers = self.store.list_flowers().await?;
        let dropped = field
            .grid
            .iter()
            .filter(|c| {
                c.row < 0 || c.col < 0 || c.row as usize >= field.rows || c.col as usize >= field.cols
            })
            .count();
        if dropped > 0 {
            log::warn!("field {id}: ignoring {dropped} stored cell(s) outside {}x{}", field.rows, field.cols);
        }
        log::info!("opened field {id} with {} flower(s) in the palette", flowers.len());
        Ok(&*self.session.insert(EditSession::new(field, flowers)))
    }

    pub fn session(&self) -> Result<&EditSession, BedError> {
        self.session.as_ref().ok_or(BedError::NoSession)
    }

    fn session_mut(&mut self) -> Result<&mut EditSession, BedError> {
        self.session.as_mut().ok_or(BedError::NoSession)
    }

    /// Sets the flower that taps will place.
    pub fn select_flower(&mut self, flower_id: &str) -> Result<&EditSession, BedError> {
        let session = self.session_mut()?;
        if session.flower(flower_id).is_none() {
            return Err(BedError::UnknownFlower(flower_id.to_string()));
        }
        session.selected_flower = Some(flower_id.to_string());
        Ok(&*session)
    }

    pub fn toggle(&mut self, row: usize, col: usize, now: DateTime<Utc>) -> Result<&EditSession, BedError> {
        let session = self.session_mut()?;
        session.grid = toggle(&session.grid, row, col, session.selected_flower.as_deref(), now);
        Ok(&*session)
    }

    pub fn clear(&mut self) -> Result<&EditSession, BedError> {
        let session = self.session_mut()?;
        session.grid = clear(&session.grid);
        Ok(&*session)
    }

    /// Writes the session grid back and closes the session. On failure the
    /// session stays open.
    pub async fn save(&mut self) -> Result<Field, BedError> {
        let session = self.session()?;
        let id = session.field.id.clone();
        let cells = flatten(&session.grid);
        self.store
            .update_field_grid(&id, cells.clone())
            .await
            .map_err(|e| {
                log::error!("error saving grid of field {id}: {e}");
                e
            })?;
        let mut field = self.session.take().map(|s| s.field).ok_or(BedError::NoSession)?;
        field.grid = cells;
        log::info!("saved grid of field {id}");
        Ok(field)
    }

    /// Discards the session without saving. Returns whether one was open.
    pub fn close(&mut self) -> bool {
        self.session.take().is_some()
    }
}
