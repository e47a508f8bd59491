// ============================================================================
// INFORMATION STATE - Caché de perfil, saldo, servicios y banners
// ============================================================================
// Cada recurso ocupa un slot independiente; se escriben por separado a medida
// que llegan las respuestas.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;

use crate::models::{Banner, Profile, Service};

#[derive(Clone, Default)]
pub struct InformationState {
    pub profile: Rc<RefCell<Option<Profile>>>,
    pub balance: Rc<RefCell<Option<u64>>>,
    pub services: Rc<RefCell<Vec<Service>>>,
    pub banners: Rc<RefCell<Vec<Banner>>>,
}

/// Copia serializable del caché (para la capa de vista)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InformationSnapshot {
    pub profile: Option<Profile>,
    pub balance: Option<u64>,
    pub services: Vec<Service>,
    pub banners: Vec<Banner>,
}

impl InformationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_profile(&self, profile: Profile) {
        *self.profile.borrow_mut() = Some(profile);
    }

    pub fn get_profile(&self) -> Option<Profile> {
        self.profile.borrow().clone()
    }

    /// Aplica un cambio sobre el perfil cacheado, si existe
    pub fn update_profile<F>(&self, updater: F) -> bool
    where
        F: FnOnce(&mut Profile),
    {
        match self.profile.borrow_mut().as_mut() {
            Some(profile) => {
                updater(profile);
                true
            }
            None => false,
        }
    }

    pub fn set_balance(&self, balance: u64) {
        *self.balance.borrow_mut() = Some(balance);
    }

    pub fn get_balance(&self) -> Option<u64> {
        *self.balance.borrow()
    }

    pub fn set_services(&self, services: Vec<Service>) {
        *self.services.borrow_mut() = services;
    }

    pub fn get_services(&self) -> Vec<Service> {
        self.services.borrow().clone()
    }

    pub fn find_service(&self, service_code: &str) -> Option<Service> {
        self.services
            .borrow()
            .iter()
            .find(|s| s.service_code == service_code)
            .cloned()
    }

    pub fn set_banners(&self, banners: Vec<Banner>) {
        *self.banners.borrow_mut() = banners;
    }

    pub fn get_banners(&self) -> Vec<Banner> {
        self.banners.borrow().clone()
    }

    pub fn needs_profile(&self) -> bool {
        self.profile.borrow().is_none()
    }

    pub fn needs_balance(&self) -> bool {
        self.balance.borrow().is_none()
    }

    pub fn needs_services(&self) -> bool {
        self.services.borrow().is_empty()
    }

    pub fn needs_banners(&self) -> bool {
        self.banners.borrow().is_empty()
    }

    /// true si los cuatro recursos ya están en caché
    pub fn is_warm(&self) -> bool {
        !(self.needs_profile() || self.needs_balance() || self.needs_services() || self.needs_banners())
    }

    pub fn snapshot(&self) -> InformationSnapshot {
        InformationSnapshot {
            profile: self.get_profile(),
            balance: self.get_balance(),
            services: self.get_services(),
            banners: self.get_banners(),
        }
    }

    /// Vaciar todo (logout)
    pub fn clear(&self) {
        *self.profile.borrow_mut() = None;
        *self.balance.borrow_mut() = None;
        self.services.borrow_mut().clear();
        self.banners.borrow_mut().clear();
    }
}
