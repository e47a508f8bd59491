use serde::{Deserialize, Serialize};

/// Cuerpo de `POST /login`
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// `data` de `POST /login`
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct LoginData {
    pub token: String,
}

/// Cuerpo de `POST /registration` (sin la confirmación de password)
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct RegistrationRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}
