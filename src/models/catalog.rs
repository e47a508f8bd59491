use serde::{Deserialize, Serialize};

/// Servicio PPOB pagable (`GET /services`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub service_code: String,
    pub service_name: String,
    pub service_icon: String,
    pub service_tariff: u64,
}

/// Banner promocional (`GET /banner`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Banner {
    pub banner_name: String,
    pub banner_image: String,
    #[serde(default)]
    pub description: String,
}

/// `data` de `GET /balance` y `POST /topup`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BalanceData {
    pub balance: u64,
}
