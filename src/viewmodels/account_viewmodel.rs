// ============================================================================
// ACCOUNT VIEWMODEL - Edición de perfil y foto
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use crate::models::{AvatarUpload, UpdateProfileRequest};
use crate::services::{ApiError, PpobApi, SessionService};
use crate::state::AppState;
use crate::utils::{ALLOWED_AVATAR_TYPES, MAX_AVATAR_BYTES};

#[derive(Clone)]
pub struct AccountViewModel {
    state: AppState,
    api: Rc<dyn PpobApi>,
    session: SessionService,
    editing: Rc<Cell<bool>>,
}

impl AccountViewModel {
    pub fn new(state: AppState, api: Rc<dyn PpobApi>, session: SessionService) -> Self {
        Self {
            state,
            api,
            session,
            editing: Rc::new(Cell::new(false)),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing.get()
    }

    pub fn start_edit(&self) {
        self.editing.set(true);
    }

    pub fn cancel_edit(&self) {
        self.editing.set(false);
    }

    /// `PUT /profile/update`; el perfil devuelto reemplaza al cacheado
    pub async fn update_profile(&self, first_name: &str, last_name: &str) -> Result<String, ApiError> {
        let token = self.session.resolve_token().ok_or(ApiError::Unauthenticated)?;
        let epoch = self.state.session.epoch();
        let email = self
            .state
            .information
            .get_profile()
            .map(|p| p.email)
            .unwrap_or_default();
        let request = UpdateProfileRequest {
            email,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        };

        match self.api.update_profile(&token, &request).await {
            Ok(ack) if !self.state.session.is_current(epoch) => Ok(ack.message),
            Ok(ack) => {
                log::info!("✅ Perfil actualizado: {}", ack.data.full_name());
                self.state.information.set_profile(ack.data);
                self.editing.set(false);
                self.state.notify_subscribers();
                Ok(ack.message)
            }
            Err(e) => {
                log::error!("❌ Error actualizando perfil: {}", e);
                Err(e)
            }
        }
    }

    /// Chequeo local antes de subir: JPEG/PNG y como máximo 100 KB
    pub fn validate_avatar(upload: &AvatarUpload) -> Result<(), ApiError> {
        if !ALLOWED_AVATAR_TYPES.contains(&upload.content_type.as_str()) {
            return Err(ApiError::Rejected("Only JPEG or PNG images are allowed".to_string()));
        }
        if upload.bytes.len() > MAX_AVATAR_BYTES {
            return Err(ApiError::Rejected("File size exceeds 100 KB".to_string()));
        }
        Ok(())
    }

    /// `PUT /profile/image`; solo se actualiza `profile_image` del perfil cacheado
    pub async fn upload_avatar(&self, upload: &AvatarUpload) -> Result<String, ApiError> {
        Self::validate_avatar(upload)?;
        let token = self.session.resolve_token().ok_or(ApiError::Unauthenticated)?;
        let epoch = self.state.session.epoch();

        match self.api.upload_profile_image(&token, upload).await {
            Ok(ack) if !self.state.session.is_current(epoch) => Ok(ack.message),
            Ok(ack) => {
                let image = ack.data.profile_image;
                if !self
                    .state
                    .information
                    .update_profile(|profile| profile.profile_image = image.clone())
                {
                    log::warn!("⚠️ Foto subida sin perfil en caché");
                }
                self.state.notify_subscribers();
                Ok(ack.message)
            }
            Err(e) => {
                log::error!("❌ Error subiendo foto: {}", e);
                Err(e)
            }
        }
    }
}
