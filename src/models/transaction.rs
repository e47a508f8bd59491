use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::keyed::deserialize_keyed_seq;
use crate::utils::group_thousands;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Topup,
    Payment,
}

/// Registro del historial (`GET /transaction/history`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub invoice_number: String,
    pub transaction_type: TransactionType,
    #[serde(default)]
    pub description: String,
    pub total_amount: u64,
    pub created_on: DateTime<Utc>,
}

impl TransactionRecord {
    /// "+ Rp.10.000" para top-ups, "- Rp.10.000" para pagos
    pub fn signed_amount_label(&self) -> String {
        let sign = match self.transaction_type {
            TransactionType::Topup => '+',
            TransactionType::Payment => '-',
        };
        format!("{} Rp.{}", sign, group_thousands(self.total_amount))
    }
}

/// `data` de `GET /transaction/history`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HistoryPage {
    #[serde(default, deserialize_with = "deserialize_keyed_seq")]
    pub records: Vec<TransactionRecord>,
}

/// Cuerpo de `POST /transaction`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub service_code: String,
}

/// `data` de `POST /transaction`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionReceipt {
    pub invoice_number: String,
    pub service_code: String,
    pub service_name: String,
    pub transaction_type: TransactionType,
    pub total_amount: u64,
    pub created_on: DateTime<Utc>,
}

/// Cuerpo de `POST /topup`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TopUpRequest {
    pub top_up_amount: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    const HISTORY_JSON: &str = r#"{
        "offset": 0,
        "limit": 5,
        "records": {
            "1": {
                "invoice_number": "INV17082023-002",
                "transaction_type": "PAYMENT",
                "description": "PLN Prabayar",
                "total_amount": 10000,
                "created_on": "2023-08-17T11:10:10.000Z"
            },
            "0": {
                "invoice_number": "INV17082023-001",
                "transaction_type": "TOPUP",
                "description": "Top Up balance",
                "total_amount": 100000,
                "created_on": "2023-08-17T10:10:10.000Z"
            }
        }
    }"#;

    #[test]
    fn history_records_keep_server_order() {
        let page: HistoryPage = serde_json::from_str(HISTORY_JSON).unwrap();
        let invoices: Vec<_> = page.records.iter().map(|r| r.invoice_number.as_str()).collect();
        assert_eq!(invoices, ["INV17082023-002", "INV17082023-001"]);
        assert_eq!(page.records[1].transaction_type, TransactionType::Topup);
    }

    #[test]
    fn amount_label_carries_direction() {
        let page: HistoryPage = serde_json::from_str(HISTORY_JSON).unwrap();
        assert_eq!(page.records[0].signed_amount_label(), "- Rp.10.000");
        assert_eq!(page.records[1].signed_amount_label(), "+ Rp.100.000");
    }

    #[test]
    fn missing_records_is_an_empty_page() {
        let page: HistoryPage = serde_json::from_str(r#"{"offset":5,"limit":5}"#).unwrap();
        assert!(page.records.is_empty());
    }
}
