use serde::{Deserialize, Serialize};

use crate::utils::{DEFAULT_PROFILE_IMAGE, NULL_PROFILE_IMAGE_URL};

/// Perfil del usuario autenticado (`GET /profile`)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub profile_image: String,
}

impl Profile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }

    /// URL de la foto, o la imagen local si el backend devolvió su placeholder
    pub fn avatar_url(&self) -> &str {
        if self.profile_image.is_empty() || self.profile_image == NULL_PROFILE_IMAGE_URL {
            DEFAULT_PROFILE_IMAGE
        } else {
            &self.profile_image
        }
    }
}

/// Cuerpo de `PUT /profile/update`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// Archivo de imagen a subir con `PUT /profile/image`
#[derive(Debug, Clone, PartialEq)]
pub struct AvatarUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}
