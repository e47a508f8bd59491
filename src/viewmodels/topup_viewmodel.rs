// ============================================================================
// TOPUP VIEWMODEL - Recarga de saldo
// ============================================================================

use std::rc::Rc;

use crate::services::{ApiError, PpobApi, SessionService};
use crate::state::AppState;
use crate::utils::{format_rupiah, TOPUP_PRESETS};
use crate::viewmodels::data_loader::refresh_balance;

/// Botón de nominal sugerido
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct TopUpPreset {
    pub name: String,
    pub value: u64,
}

#[derive(Clone)]
pub struct TopUpViewModel {
    state: AppState,
    api: Rc<dyn PpobApi>,
    session: SessionService,
}

impl TopUpViewModel {
    pub fn new(state: AppState, api: Rc<dyn PpobApi>, session: SessionService) -> Self {
        Self { state, api, session }
    }

    pub fn presets() -> Vec<TopUpPreset> {
        TOPUP_PRESETS
            .iter()
            .map(|&value| TopUpPreset { name: format_rupiah(value), value })
            .collect()
    }

    /// `POST /topup` y luego refresca el saldo con `GET /balance`
    pub async fn submit(&self, amount: u64) -> Result<String, ApiError> {
        let token = self.session.resolve_token().ok_or(ApiError::Unauthenticated)?;
        let epoch = self.state.session.epoch();

        let ack = self.api.top_up(&token, amount).await.map_err(|e| {
            log::error!("❌ Error en top up: {}", e);
            e
        })?;
        log::info!("✅ Top up de {} aceptado", amount);

        if let Err(e) = refresh_balance(&self.state, self.api.as_ref(), &token).await {
            // El saldo devuelto por /topup sirve mientras tanto
            log::error!("❌ Error refrescando saldo: {}", e);
            if self.state.session.is_current(epoch) {
                self.state.information.set_balance(ack.data);
                self.state.notify_subscribers();
            }
        }
        Ok(ack.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::mock::MockApi;
    use crate::services::MemoryTokenStore;
    use futures::executor::block_on;

    fn topup(api: &Rc<MockApi>, store: MemoryTokenStore) -> (AppState, TopUpViewModel) {
        let state = AppState::new();
        let session = SessionService::new(state.clone(), api.clone(), Rc::new(store));
        (state.clone(), TopUpViewModel::new(state, api.clone(), session))
    }

    #[test]
    fn presets_are_labelled_in_rupiah() {
        let presets = TopUpViewModel::presets();
        assert_eq!(presets.len(), 6);
        assert_eq!(presets[0], TopUpPreset { name: "Rp10.000".into(), value: 10_000 });
        assert_eq!(presets[5].name, "Rp500.000");
    }

    #[test]
    fn successful_top_up_refreshes_balance() {
        let api = Rc::new(MockApi::new());
        let (state, vm) = topup(&api, MemoryTokenStore::with_token("jwt"));
        state.information.set_balance(100_000);

        let message = block_on(vm.submit(50_000)).unwrap();
        assert_eq!(message, "Top Up Balance berhasil");
        assert_eq!(api.calls("balance"), 1);
        assert_eq!(state.information.get_balance(), Some(150_000));
    }

    #[test]
    fn refresh_failure_falls_back_to_returned_balance() {
        let api = Rc::new(MockApi::new());
        api.fail("balance", ApiError::Network("offline".into()));
        let (state, vm) = topup(&api, MemoryTokenStore::with_token("jwt"));

        assert!(block_on(vm.submit(20_000)).is_ok());
        assert_eq!(state.information.get_balance(), Some(120_000));
    }

    #[test]
    fn rejected_top_up_leaves_balance_untouched() {
        let api = Rc::new(MockApi::new());
        api.fail("topup", ApiError::Application { status: 102, message: "Parameter amount hanya boleh angka dan tidak boleh lebih kecil dari 0".into() });
        let (state, vm) = topup(&api, MemoryTokenStore::with_token("jwt"));
        state.information.set_balance(100_000);

        let err = block_on(vm.submit(5)).unwrap_err();
        assert!(err.is_application());
        assert_eq!(api.calls("balance"), 0);
        assert_eq!(state.information.get_balance(), Some(100_000));
    }

    #[test]
    fn top_up_requires_session() {
        let api = Rc::new(MockApi::new());
        let (_, vm) = topup(&api, MemoryTokenStore::new());
        assert_eq!(block_on(vm.submit(10_000)), Err(ApiError::Unauthenticated));
        assert_eq!(api.total_calls(), 0);
    }
}
