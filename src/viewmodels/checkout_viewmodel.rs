// ============================================================================
// CHECKOUT VIEWMODEL - Pago de un servicio con diálogo de confirmación
// ============================================================================
// Closed -> Confirming -> Processing -> Succeeded | Failed -> Closed
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;

use crate::models::Service;
use crate::services::{ApiError, PpobApi, SessionService};
use crate::state::AppState;
use crate::viewmodels::data_loader::refresh_balance;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum PaymentDialog {
    Closed,
    Confirming { service: Service },
    Processing { service: Service },
    Succeeded { service: Service, message: String },
    Failed { service: Service, message: String },
}

#[derive(Clone)]
pub struct CheckoutViewModel {
    state: AppState,
    api: Rc<dyn PpobApi>,
    session: SessionService,
    dialog: Rc<RefCell<PaymentDialog>>,
}

impl CheckoutViewModel {
    pub fn new(state: AppState, api: Rc<dyn PpobApi>, session: SessionService) -> Self {
        Self {
            state,
            api,
            session,
            dialog: Rc::new(RefCell::new(PaymentDialog::Closed)),
        }
    }

    pub fn dialog(&self) -> PaymentDialog {
        self.dialog.borrow().clone()
    }

    /// Abre el diálogo para un servicio del catálogo cacheado
    pub fn select(&self, service_code: &str) -> Result<(), ApiError> {
        if matches!(*self.dialog.borrow(), PaymentDialog::Processing { .. }) {
            return Err(ApiError::Rejected("Pembayaran sedang diproses".to_string()));
        }
        let service = self
            .state
            .information
            .find_service(service_code)
            .ok_or_else(|| ApiError::Rejected(format!("Servicio desconocido: {}", service_code)))?;
        log::debug!("🛒 Confirmar pago de {}", service.service_name);
        *self.dialog.borrow_mut() = PaymentDialog::Confirming { service };
        Ok(())
    }

    pub fn cancel(&self) {
        let mut dialog = self.dialog.borrow_mut();
        if matches!(*dialog, PaymentDialog::Confirming { .. }) {
            *dialog = PaymentDialog::Closed;
        }
    }

    /// Cierra el resultado (éxito o error)
    pub fn close(&self) {
        let mut dialog = self.dialog.borrow_mut();
        if !matches!(*dialog, PaymentDialog::Processing { .. }) {
            *dialog = PaymentDialog::Closed;
        }
    }

    /// `POST /transaction` para el servicio en confirmación
    pub async fn confirm(&self) -> Result<String, ApiError> {
        let service = match &*self.dialog.borrow() {
            PaymentDialog::Confirming { service } => service.clone(),
            _ => return Err(ApiError::Rejected("No hay pago pendiente de confirmar".to_string())),
        };
        let token = self.session.resolve_token().ok_or(ApiError::Unauthenticated)?;
        let epoch = self.state.session.epoch();

        *self.dialog.borrow_mut() = PaymentDialog::Processing { service: service.clone() };
        self.state.notify_subscribers();
        let result = self.api.create_transaction(&token, &service.service_code).await;

        if !self.state.session.is_current(epoch) {
            log::info!("🗑️ Resultado del pago de {} tras logout, se descarta", service.service_code);
            *self.dialog.borrow_mut() = PaymentDialog::Closed;
            self.state.notify_subscribers();
            return result.map(|ack| ack.message);
        }

        match result {
            Ok(ack) => {
                log::info!("✅ Pago {} ({})", ack.data.invoice_number, service.service_name);
                *self.dialog.borrow_mut() = PaymentDialog::Succeeded {
                    service,
                    message: ack.message.clone(),
                };
                self.state.notify_subscribers();
                if let Err(e) = refresh_balance(&self.state, self.api.as_ref(), &token).await {
                    log::error!("❌ Error refrescando saldo: {}", e);
                }
                Ok(ack.message)
            }
            Err(e) => {
                log::error!("❌ Error en pago de {}: {}", service.service_code, e);
                *self.dialog.borrow_mut() = PaymentDialog::Failed {
                    service,
                    message: e.user_message(),
                };
                self.state.notify_subscribers();
                Err(e)
            }
        }
    }
}
