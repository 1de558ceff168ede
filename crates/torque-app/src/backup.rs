//! Backup export document.
//!
//! A point-in-time JSON snapshot of the business data. Sales are filtered by
//! the exporting caller's visibility before the document is assembled, so a
//! mechanic's backup contains only their own sales.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use torque_core::{AppSettings, Coupon, Sale, Service};

use crate::error::{AppError, AppResult};

/// A complete backup document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupSnapshot {
    /// When the snapshot was taken.
    pub exported_at: DateTime<Utc>,

    /// Sales visible to the exporting caller, newest first.
    pub sales: Vec<Sale>,

    /// The full service catalog.
    pub services: Vec<Service>,

    /// All coupons, active and inactive.
    pub coupons: Vec<Coupon>,

    /// The settings singleton.
    pub settings: AppSettings,
}

impl BackupSnapshot {
    /// Serialize the snapshot as pretty-printed JSON.
    pub fn to_json(&self) -> AppResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| AppError::Internal(format!("Failed to serialize backup: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backup_document_shape() {
        let snapshot = BackupSnapshot {
            exported_at: Utc::now(),
            sales: vec![],
            services: vec![Service {
                id: "svc-1".to_string(),
                name: "Oil Change".to_string(),
                price: 49.99,
            }],
            coupons: vec![],
            settings: AppSettings::default(),
        };

        let json = snapshot.to_json().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert!(parsed["exported_at"].is_string());
        assert_eq!(parsed["services"][0]["name"], "Oil Change");
        assert_eq!(parsed["settings"]["company_name"], "Benny's Motorworks");
        assert!(parsed["sales"].as_array().unwrap().is_empty());
    }
}
