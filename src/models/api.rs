use serde::{Deserialize, Serialize};

/// Envoltorio común de todas las respuestas de la API: `{ status, message, data }`
///
/// `status == 0` es éxito; cualquier otro valor es un fallo de aplicación
/// aunque la respuesta HTTP haya sido 2xx.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: i64,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        self.status == 0
    }
}

/// Cuerpo de error que la API devuelve junto a un HTTP no-2xx
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_without_data_is_accepted() {
        let response: ApiResponse<u64> =
            serde_json::from_str(r#"{"status":102,"message":"Token tidak valid","data":null}"#)
                .unwrap();
        assert!(!response.is_success());
        assert_eq!(response.data, None);
        assert_eq!(response.message, "Token tidak valid");

        let response: ApiResponse<u64> = serde_json::from_str(r#"{"status":0}"#).unwrap();
        assert!(response.is_success());
        assert_eq!(response.message, "");
    }
}
