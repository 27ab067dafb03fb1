//! Asset and assignment schemas.

use serde::{Deserialize, Serialize};

use super::reader::{FieldReader, Need, NumberBound, When};
use super::{ensure_not_before, Schema, ViolationKind};
use crate::status::{AssetStatus, AssignmentStatus};
use crate::types::{DbId, Timestamp};

pub const MAX_ASSET_NAME_LEN: usize = 200;
pub const MAX_ASSET_TYPE_LEN: usize = 100;
pub const MAX_IDENTIFIER_LEN: usize = 100;
pub const MAX_LOCATION_LEN: usize = 200;
pub const MAX_ASSIGNMENT_NOTES_LEN: usize = 500;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAsset {
    pub asset_name: String,
    pub asset_type: String,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub barcode: Option<String>,
    pub status: Option<AssetStatus>,
    pub location: Option<String>,
    pub purchase_price: Option<f64>,
    pub purchase_date: Option<Timestamp>,
    pub warranty_expiry: Option<Timestamp>,
    pub owner_holder_id: Option<DbId>,
    pub supplier_id: Option<DbId>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetPatch {
    pub asset_name: Option<String>,
    pub asset_type: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub barcode: Option<String>,
    pub status: Option<AssetStatus>,
    pub location: Option<String>,
    pub purchase_price: Option<f64>,
    pub purchase_date: Option<Timestamp>,
    pub warranty_expiry: Option<Timestamp>,
    pub owner_holder_id: Option<DbId>,
    pub supplier_id: Option<DbId>,
}

impl Schema for NewAsset {
    type Patch = AssetPatch;

    fn read(r: &mut FieldReader<'_>) -> AssetPatch {
        let patch = AssetPatch {
            asset_name: r.text("assetName", MAX_ASSET_NAME_LEN, Need::Required),
            asset_type: r.text("assetType", MAX_ASSET_TYPE_LEN, Need::Required),
            model: r.text("model", MAX_IDENTIFIER_LEN, Need::Optional),
            serial_number: r.text("serialNumber", MAX_IDENTIFIER_LEN, Need::Optional),
            barcode: r.text("barcode", MAX_IDENTIFIER_LEN, Need::Optional),
            status: r.choice("status", Need::Optional),
            location: r.text("location", MAX_LOCATION_LEN, Need::Optional),
            purchase_price: r.number("purchasePrice", NumberBound::Positive, Need::Optional),
            purchase_date: r.date("purchaseDate", When::Past, Need::Optional),
            warranty_expiry: r.date("warrantyExpiry", When::Any, Need::Optional),
            owner_holder_id: r.id("ownerHolderId", Need::Optional),
            supplier_id: r.id("supplierId", Need::Optional),
        };
        if let (Some(purchased), Some(expiry)) = (patch.purchase_date, patch.warranty_expiry) {
            if expiry <= purchased {
                r.reject(
                    "warrantyExpiry",
                    ViolationKind::CrossField,
                    "must be after purchaseDate",
                );
            }
        }
        patch
    }

    fn complete(p: AssetPatch) -> Option<Self> {
        Some(Self {
            asset_name: p.asset_name?,
            asset_type: p.asset_type?,
            model: p.model,
            serial_number: p.serial_number,
            barcode: p.barcode,
            status: p.status,
            location: p.location,
            purchase_price: p.purchase_price,
            purchase_date: p.purchase_date,
            warranty_expiry: p.warranty_expiry,
            owner_holder_id: p.owner_holder_id,
            supplier_id: p.supplier_id,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAssignment {
    pub asset_id: DbId,
    pub employee_id: DbId,
    pub assigned_date: Option<Timestamp>,
    pub expected_return_date: Option<Timestamp>,
    pub status: Option<AssignmentStatus>,
    pub acknowledged: Option<bool>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentPatch {
    pub asset_id: Option<DbId>,
    pub employee_id: Option<DbId>,
    pub assigned_date: Option<Timestamp>,
    pub expected_return_date: Option<Timestamp>,
    pub status: Option<AssignmentStatus>,
    pub acknowledged: Option<bool>,
    pub notes: Option<String>,
}

impl Schema for NewAssignment {
    type Patch = AssignmentPatch;

    fn read(r: &mut FieldReader<'_>) -> AssignmentPatch {
        let patch = AssignmentPatch {
            asset_id: r.id("assetId", Need::Required),
            employee_id: r.id("employeeId", Need::Required),
            assigned_date: r.date("assignedDate", When::Past, Need::Optional),
            expected_return_date: r.date("expectedReturnDate", When::Any, Need::Optional),
            status: r.choice("status", Need::Optional),
            acknowledged: r.flag("acknowledged"),
            notes: r.text("notes", MAX_ASSIGNMENT_NOTES_LEN, Need::Optional),
        };
        ensure_not_before(
            r,
            ("assignedDate", patch.assigned_date),
            ("expectedReturnDate", patch.expected_return_date),
        );
        patch
    }

    fn complete(p: AssignmentPatch) -> Option<Self> {
        Some(Self {
            asset_id: p.asset_id?,
            employee_id: p.employee_id?,
            assigned_date: p.assigned_date,
            expected_return_date: p.expected_return_date,
            status: p.status,
            acknowledged: p.acknowledged,
            notes: p.notes,
        })
    }
}

/// Body of an assignment return; the date defaults to now.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentReturn {
    pub return_date: Option<Timestamp>,
}

impl Schema for AssignmentReturn {
    type Patch = AssignmentReturn;

    fn read(r: &mut FieldReader<'_>) -> AssignmentReturn {
        AssignmentReturn {
            return_date: r.date("returnDate", When::Past, Need::Optional),
        }
    }

    fn complete(patch: AssignmentReturn) -> Option<Self> {
        Some(patch)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    use super::*;

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn warranty_after_purchase_passes() {
        let raw = json!({
            "assetName": "ThinkPad X1",
            "assetType": "Laptop",
            "purchaseDate": "2022-01-01",
            "warrantyExpiry": "2023-01-01",
        });
        let asset = NewAsset::create_at(&raw, now()).unwrap();
        assert_eq!(asset.asset_name, "ThinkPad X1");
        assert!(asset.warranty_expiry > asset.purchase_date);
    }

    #[test]
    fn warranty_before_purchase_fails_on_warranty_field() {
        let raw = json!({
            "assetName": "ThinkPad X1",
            "assetType": "Laptop",
            "purchaseDate": "2022-01-01",
            "warrantyExpiry": "2020-01-01",
        });
        let errors = NewAsset::create_at(&raw, now()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.violations()[0].field, "warrantyExpiry");
        assert_eq!(errors.violations()[0].kind, ViolationKind::CrossField);
    }

    #[test]
    fn warranty_equal_to_purchase_fails() {
        let raw = json!({
            "assetName": "Dock",
            "assetType": "Peripheral",
            "purchaseDate": "2022-01-01",
            "warrantyExpiry": "2022-01-01",
        });
        assert!(NewAsset::create_at(&raw, now()).is_err());
    }

    #[test]
    fn warranty_alone_is_not_cross_checked() {
        let raw = json!({"assetName": "Dock", "assetType": "Peripheral", "warrantyExpiry": "2001-01-01"});
        assert!(NewAsset::create_at(&raw, now()).is_ok());
    }

    #[test]
    fn future_purchase_and_bad_price_are_collected() {
        let raw = json!({
            "assetName": "",
            "assetType": "Laptop",
            "purchasePrice": -3,
            "purchaseDate": "2099-01-01",
            "status": "Broken",
        });
        let errors = NewAsset::create_at(&raw, now()).unwrap_err();
        assert_eq!(
            errors.fields(),
            vec!["assetName", "status", "purchasePrice", "purchaseDate"]
        );
    }

    #[test]
    fn legacy_status_spellings_normalize() {
        let raw = json!({"assetName": "Drill", "assetType": "Tool", "status": "UnderMaintenance"});
        let asset = NewAsset::create_at(&raw, now()).unwrap();
        assert_eq!(asset.status, Some(AssetStatus::InMaintenance));
    }

    #[test]
    fn asset_patch_cross_checks_when_both_dates_supplied() {
        let errors = NewAsset::patch_at(
            &json!({"purchaseDate": "2023-05-01", "warrantyExpiry": "2023-04-01"}),
            now(),
        )
        .unwrap_err();
        assert_eq!(errors.fields(), vec!["warrantyExpiry"]);

        let patch = NewAsset::patch_at(&json!({"warrantyExpiry": "2023-04-01"}), now()).unwrap();
        assert!(patch.asset_name.is_none());
    }

    #[test]
    fn assignment_requires_both_references() {
        let errors = NewAssignment::create_at(&json!({"assetId": 0}), now()).unwrap_err();
        assert_eq!(errors.fields(), vec!["assetId", "employeeId"]);
    }

    #[test]
    fn assignment_expected_return_must_not_precede_assignment() {
        let raw = json!({
            "assetId": 1,
            "employeeId": 2,
            "assignedDate": "2024-03-01",
            "expectedReturnDate": "2024-02-01",
        });
        let errors = NewAssignment::create_at(&raw, now()).unwrap_err();
        assert_eq!(errors.fields(), vec!["expectedReturnDate"]);
    }

    #[test]
    fn return_date_must_not_be_in_the_future() {
        assert_eq!(
            AssignmentReturn::create_at(&json!({}), now()).unwrap(),
            AssignmentReturn::default()
        );
        let errors =
            AssignmentReturn::create_at(&json!({"returnDate": "2024-07-01"}), now()).unwrap_err();
        assert_eq!(errors.violations()[0].kind, ViolationKind::NotInPast);
    }
}
