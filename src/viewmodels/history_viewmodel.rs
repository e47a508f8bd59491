// ============================================================================
// HISTORY VIEWMODEL - Historial de transacciones paginado (offset/limit)
// ============================================================================
// `offset` apunta siempre a la próxima página a pedir: solo avanza cuando una
// página llega bien, así un fallo se reintenta con el mismo offset.
// `reset()` cambia la generación: una respuesta de antes del reset se descarta.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::config::CONFIG;
use crate::models::TransactionRecord;
use crate::services::{ApiError, PpobApi};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// Se agregaron n registros
    Appended(usize),
    /// No hay más páginas; no se hizo ninguna petición
    Exhausted,
    /// Ya hay una página en vuelo; no se hizo ninguna petición
    Busy,
    /// `start` sobre un historial ya iniciado
    Skipped,
    /// La respuesta llegó después de un `reset()` y se descartó
    Discarded,
}

#[derive(Clone)]
pub struct HistoryPaginator {
    api: Rc<dyn PpobApi>,
    page_size: usize,
    records: Rc<RefCell<Vec<TransactionRecord>>>,
    offset: Rc<Cell<usize>>,
    has_more: Rc<Cell<bool>>,
    loading_page: Rc<Cell<bool>>,
    generation: Rc<Cell<u64>>,
}

impl HistoryPaginator {
    pub fn new(api: Rc<dyn PpobApi>) -> Self {
        Self::with_page_size(api, CONFIG.history_page_size)
    }

    pub fn with_page_size(api: Rc<dyn PpobApi>, page_size: usize) -> Self {
        Self {
            api,
            page_size: page_size.max(1),
            records: Rc::new(RefCell::new(Vec::new())),
            offset: Rc::new(Cell::new(0)),
            has_more: Rc::new(Cell::new(true)),
            loading_page: Rc::new(Cell::new(false)),
            generation: Rc::new(Cell::new(0)),
        }
    }

    pub fn records(&self) -> Vec<TransactionRecord> {
        self.records.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }

    pub fn has_more(&self) -> bool {
        self.has_more.get()
    }

    pub fn is_loading_page(&self) -> bool {
        self.loading_page.get()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Offset de la próxima página
    pub fn offset(&self) -> usize {
        self.offset.get()
    }

    /// Primera carga, en cuanto hay token. No hace nada si ya se cargó algo.
    pub async fn start(&self, token: Option<&str>) -> Result<PageOutcome, ApiError> {
        if self.offset.get() > 0 || !self.is_empty() || !self.has_more() {
            return Ok(PageOutcome::Skipped);
        }
        self.load_next_page(token).await
    }

    /// Pide `[offset, offset + page_size)` y lo agrega al final
    pub async fn load_next_page(&self, token: Option<&str>) -> Result<PageOutcome, ApiError> {
        let token = token.ok_or(ApiError::Unauthenticated)?;
        if !self.has_more.get() {
            return Ok(PageOutcome::Exhausted);
        }
        if self.loading_page.get() {
            log::debug!("⏳ Página del historial ya en curso, se ignora");
            return Ok(PageOutcome::Busy);
        }

        let offset = self.offset.get();
        let generation = self.generation.get();
        self.loading_page.set(true);
        let result = self
            .api
            .get_transaction_history(token, offset, self.page_size)
            .await;

        if self.generation.get() != generation {
            log::debug!("🗑️ Página del historial (offset {}) llegó tras un reset, se descarta", offset);
            return Ok(PageOutcome::Discarded);
        }
        self.loading_page.set(false);

        match result {
            Ok(page) => {
                let received = page.len();
                if received < self.page_size {
                    self.has_more.set(false);
                }
                self.records.borrow_mut().extend(page);
                self.offset.set(offset + self.page_size);
                log::info!("📜 Historial: +{} registros (offset {})", received, offset);
                Ok(PageOutcome::Appended(received))
            }
            Err(e) => {
                log::error!("❌ Error cargando historial (offset {}): {}", offset, e);
                Err(e)
            }
        }
    }

    /// Descarta lo acumulado (al salir de la pantalla)
    pub fn reset(&self) {
        self.generation.set(self.generation.get() + 1);
        self.records.borrow_mut().clear();
        self.offset.set(0);
        self.has_more.set(true);
        self.loading_page.set(false);
    }
}
