// ============================================================================
// DATA LOADER - Perfil, saldo, servicios y banners (una sola vez por sesión)
// ============================================================================
// Cada pantalla protegida llama a `load()` al montarse. Solo se piden los
// recursos que faltan en el caché, los cuatro en paralelo; cada respuesta se
// escribe en el estado apenas llega, salvo que la sesión haya cambiado
// (logout/login) mientras estaba en vuelo.
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use futures::future::OptionFuture;
use serde::Serialize;

use crate::services::{ApiError, PpobApi, SessionService};
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoaderStatus {
    Idle,
    Loading,
    Ready,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Profile,
    Balance,
    Services,
    Banners,
}

/// Qué se pidió en una invocación y qué falló
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub requested: Vec<Resource>,
    pub failed: Vec<(Resource, ApiError)>,
}

impl LoadReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// No hay cookie de sesión: la capa de navegación debe ir a /login
    Unauthenticated,
    Loaded(LoadReport),
    /// La sesión cambió durante la carga; las respuestas se descartaron
    Superseded,
}

#[derive(Clone)]
pub struct DataLoader {
    state: AppState,
    api: Rc<dyn PpobApi>,
    session: SessionService,
    loading: Rc<Cell<bool>>,
    status: Rc<Cell<LoaderStatus>>,
}

impl DataLoader {
    pub fn new(state: AppState, api: Rc<dyn PpobApi>, session: SessionService) -> Self {
        Self {
            state,
            api,
            session,
            loading: Rc::new(Cell::new(true)),
            status: Rc::new(Cell::new(LoaderStatus::Idle)),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    pub fn status(&self) -> LoaderStatus {
        self.status.get()
    }

    pub async fn load(&self) -> LoadOutcome {
        self.loading.set(true);

        let Some(token) = self.session.resolve_token() else {
            log::warn!("🔒 Sin token de sesión, se requiere login");
            self.status.set(LoaderStatus::Idle);
            return LoadOutcome::Unauthenticated;
        };

        let epoch = self.state.session.epoch();
        let info = &self.state.information;
        let (need_profile, need_balance, need_services, need_banners) = (
            info.needs_profile(),
            info.needs_balance(),
            info.needs_services(),
            info.needs_banners(),
        );

        let mut report = LoadReport::default();
        for (needed, resource) in [
            (need_profile, Resource::Profile),
            (need_balance, Resource::Balance),
            (need_services, Resource::Services),
            (need_banners, Resource::Banners),
        ] {
            if needed {
                report.requested.push(resource);
            }
        }

        if report.requested.is_empty() {
            log::debug!("💾 Caché completo, no se piden datos");
            self.finish(LoaderStatus::Ready);
            return LoadOutcome::Loaded(report);
        }

        log::info!("📡 Cargando {:?}", report.requested);
        self.status.set(LoaderStatus::Loading);

        let (profile, balance, services, banners) = futures::join!(
            OptionFuture::from(need_profile.then(|| self.fetch_profile(&token, epoch))),
            OptionFuture::from(need_balance.then(|| self.fetch_balance(&token))),
            OptionFuture::from(need_services.then(|| self.fetch_services(&token, epoch))),
            OptionFuture::from(need_banners.then(|| self.fetch_banners(&token, epoch))),
        );

        if !self.state.session.is_current(epoch) {
            log::info!("🗑️ La sesión cambió durante la carga, se descarta");
            self.finish(LoaderStatus::Idle);
            return LoadOutcome::Superseded;
        }

        for (resource, result) in [
            (Resource::Profile, profile),
            (Resource::Balance, balance),
            (Resource::Services, services),
            (Resource::Banners, banners),
        ] {
            if let Some(Err(e)) = result {
                log::error!("❌ Error cargando {:?}: {}", resource, e);
                report.failed.push((resource, e));
            }
        }

        self.finish(if report.is_complete() {
            LoaderStatus::Ready
        } else {
            LoaderStatus::Failed
        });
        LoadOutcome::Loaded(report)
    }

    fn finish(&self, status: LoaderStatus) {
        self.status.set(status);
        self.loading.set(false);
    }

    async fn fetch_profile(&self, token: &str, epoch: u64) -> Result<(), ApiError> {
        let profile = self.api.get_profile(token).await?;
        if !self.state.session.is_current(epoch) {
            return Ok(());
        }
        self.state.information.set_profile(profile);
        self.state.notify_subscribers();
        Ok(())
    }

    async fn fetch_balance(&self, token: &str) -> Result<(), ApiError> {
        refresh_balance(&self.state, self.api.as_ref(), token).await.map(|_| ())
    }

    async fn fetch_services(&self, token: &str, epoch: u64) -> Result<(), ApiError> {
        let services = self.api.get_services(token).await?;
        if !self.state.session.is_current(epoch) {
            return Ok(());
        }
        log::info!("✅ {} servicios", services.len());
        self.state.information.set_services(services);
        self.state.notify_subscribers();
        Ok(())
    }

    async fn fetch_banners(&self, token: &str, epoch: u64) -> Result<(), ApiError> {
        let banners = self.api.get_banners(token).await?;
        if !self.state.session.is_current(epoch) {
            return Ok(());
        }
        self.state.information.set_banners(banners);
        self.state.notify_subscribers();
        Ok(())
    }
}

/// Pide `GET /balance` y lo escribe en el estado (sin mirar el caché).
/// Si la sesión cambió mientras tanto, devuelve el saldo sin escribirlo.
pub async fn refresh_balance(state: &AppState, api: &dyn PpobApi, token: &str) -> Result<u64, ApiError> {
    let epoch = state.session.epoch();
    let balance = api.get_balance(token).await?;
    if !state.session.is_current(epoch) {
        return Ok(balance);
    }
    state.information.set_balance(balance);
    state.notify_subscribers();
    Ok(balance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::mock::MockApi;
    use crate::services::{MemoryTokenStore, TokenStore};
    use futures::executor::block_on;

    fn loader(api: &Rc<MockApi>, store: MemoryTokenStore) -> (AppState, DataLoader) {
        let state = AppState::new();
        let session = SessionService::new(state.clone(), api.clone(), Rc::new(store));
        let loader = DataLoader::new(state.clone(), api.clone(), session);
        (state, loader)
    }

    #[test]
    fn without_cookie_nothing_is_fetched() {
        let api = Rc::new(MockApi::new());
        let (state, loader) = loader(&api, MemoryTokenStore::new());
        state.session.set_token(Some("stale".into()));

        assert_eq!(block_on(loader.load()), LoadOutcome::Unauthenticated);
        assert_eq!(api.total_calls(), 0);
        assert_eq!(loader.status(), LoaderStatus::Idle);
    }

    #[test]
    fn cold_cache_fetches_all_four_once() {
        let api = Rc::new(MockApi::new());
        let (state, loader) = loader(&api, MemoryTokenStore::with_token("jwt"));
        assert!(loader.is_loading());

        let LoadOutcome::Loaded(report) = block_on(loader.load()) else {
            panic!("esperaba Loaded");
        };
        assert_eq!(report.requested.len(), 4);
        assert!(report.is_complete());
        assert!(!loader.is_loading());
        assert_eq!(loader.status(), LoaderStatus::Ready);
        assert!(state.information.is_warm());
        assert_eq!(state.session.get_token().as_deref(), Some("jwt"));
        for endpoint in ["profile", "balance", "services", "banner"] {
            assert_eq!(api.calls(endpoint), 1, "{}", endpoint);
        }
    }

    #[test]
    fn warm_cache_is_idempotent() {
        let api = Rc::new(MockApi::new());
        let (state, loader) = loader(&api, MemoryTokenStore::with_token("jwt"));
        block_on(loader.load());
        let before = state.information.snapshot();
        let calls = api.total_calls();

        for _ in 0..2 {
            let LoadOutcome::Loaded(report) = block_on(loader.load()) else {
                panic!("esperaba Loaded");
            };
            assert!(report.requested.is_empty());
            assert!(!loader.is_loading());
        }
        assert_eq!(api.total_calls(), calls);
        assert_eq!(state.information.snapshot(), before);
    }

    #[test]
    fn only_missing_resources_are_requested() {
        let api = Rc::new(MockApi::new());
        let (state, loader) = loader(&api, MemoryTokenStore::with_token("jwt"));
        state.information.set_profile(MockApi::profile());
        state.information.set_balance(0);

        let LoadOutcome::Loaded(report) = block_on(loader.load()) else {
            panic!("esperaba Loaded");
        };
        assert_eq!(report.requested, vec![Resource::Services, Resource::Banners]);
        assert_eq!(api.calls("profile"), 0);
        assert_eq!(api.calls("balance"), 0);
        assert_eq!(state.information.get_balance(), Some(0));
    }

    #[test]
    fn balance_failure_does_not_block_the_others() {
        let api = Rc::new(MockApi::new());
        api.fail("balance", ApiError::Network("connection reset".into()));
        let (state, loader) = loader(&api, MemoryTokenStore::with_token("jwt"));

        let LoadOutcome::Loaded(report) = block_on(loader.load()) else {
            panic!("esperaba Loaded");
        };
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, Resource::Balance);
        assert!(!loader.is_loading());
        assert_eq!(loader.status(), LoaderStatus::Failed);
        assert!(state.information.get_profile().is_some());
        assert_eq!(state.information.get_services().len(), 2);
        assert_eq!(state.information.get_banners().len(), 2);
        assert!(state.information.needs_balance());

        // el siguiente montaje solo reintenta el saldo
        api.recover("balance");
        block_on(loader.load());
        assert_eq!(api.calls("balance"), 2);
        assert_eq!(api.calls("profile"), 1);
        assert_eq!(loader.status(), LoaderStatus::Ready);
    }

    #[test]
    fn lost_cookie_resets_status_to_idle() {
        let api = Rc::new(MockApi::new());
        let store = MemoryTokenStore::with_token("jwt");
        let (_, loader) = loader(&api, store.clone());
        block_on(loader.load());
        assert_eq!(loader.status(), LoaderStatus::Ready);

        store.clear().unwrap();
        assert_eq!(block_on(loader.load()), LoadOutcome::Unauthenticated);
        assert_eq!(loader.status(), LoaderStatus::Idle);
        assert!(loader.is_loading());
    }

    #[test]
    fn responses_after_logout_are_not_cached() {
        let api = Rc::new(MockApi::new().yielding());
        let store = MemoryTokenStore::with_token("jwt");
        let state = AppState::new();
        let session = SessionService::new(state.clone(), api.clone(), Rc::new(store.clone()));
        let loader = DataLoader::new(state.clone(), api.clone(), session.clone());

        let (outcome, ()) = block_on(async { futures::join!(loader.load(), async { session.logout() }) });
        assert_eq!(outcome, LoadOutcome::Superseded);
        assert_eq!(loader.status(), LoaderStatus::Idle);
        assert!(!loader.is_loading());
        assert!(state.information.needs_profile());
        assert!(state.information.needs_balance());
        assert!(state.information.needs_services());
        assert!(state.information.needs_banners());
    }

    #[test]
    fn subscribers_see_each_slot_as_it_lands() {
        let api = Rc::new(MockApi::new());
        let (state, loader) = loader(&api, MemoryTokenStore::with_token("jwt"));
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        state.subscribe_to_changes(move || counter.set(counter.get() + 1));

        block_on(loader.load());
        assert_eq!(hits.get(), 4);
    }
}
