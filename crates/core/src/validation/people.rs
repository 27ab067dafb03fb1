//! Employee (holder) and customer schemas.

use serde::{Deserialize, Serialize};

use super::reader::{FieldReader, Need, When};
use super::Schema;
use crate::status::Role;
use crate::types::Timestamp;

pub const MAX_NAME_LEN: usize = 50;
pub const MAX_ORG_FIELD_LEN: usize = 100;
pub const MAX_ADDRESS_LEN: usize = 500;
pub const MAX_COMPANY_LEN: usize = 200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub department: String,
    pub position: String,
    pub role: Option<Role>,
    pub hire_date: Timestamp,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub role: Option<Role>,
    pub hire_date: Option<Timestamp>,
    pub is_active: Option<bool>,
}

impl Schema for NewEmployee {
    type Patch = EmployeePatch;

    fn read(r: &mut FieldReader<'_>) -> EmployeePatch {
        EmployeePatch {
            first_name: r.text("firstName", MAX_NAME_LEN, Need::Required),
            last_name: r.text("lastName", MAX_NAME_LEN, Need::Required),
            email: r.email("email", Need::Required),
            phone: r.phone("phone"),
            department: r.text("department", MAX_ORG_FIELD_LEN, Need::Required),
            position: r.text("position", MAX_ORG_FIELD_LEN, Need::Required),
            role: r.choice("role", Need::Optional),
            hire_date: r.date("hireDate", When::Past, Need::Required),
            is_active: r.flag("isActive"),
        }
    }

    fn complete(p: EmployeePatch) -> Option<Self> {
        Some(Self {
            first_name: p.first_name?,
            last_name: p.last_name?,
            email: p.email?,
            phone: p.phone,
            department: p.department?,
            position: p.position?,
            role: p.role,
            hire_date: p.hire_date?,
            is_active: p.is_active,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub company: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub company: Option<String>,
}

impl Schema for NewCustomer {
    type Patch = CustomerPatch;

    fn read(r: &mut FieldReader<'_>) -> CustomerPatch {
        CustomerPatch {
            first_name: r.text("firstName", MAX_NAME_LEN, Need::Required),
            last_name: r.text("lastName", MAX_NAME_LEN, Need::Required),
            email: r.email("email", Need::Required),
            phone: r.phone("phone"),
            address: r.text("address", MAX_ADDRESS_LEN, Need::Optional),
            company: r.text("company", MAX_COMPANY_LEN, Need::Optional),
        }
    }

    fn complete(p: CustomerPatch) -> Option<Self> {
        Some(Self {
            first_name: p.first_name?,
            last_name: p.last_name?,
            email: p.email?,
            phone: p.phone,
            address: p.address,
            company: p.company,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use serde_json::{json, Value};

    use super::*;
    use crate::validation::ViolationKind;

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    fn john() -> Value {
        json!({
            "firstName": "John",
            "lastName": "Doe",
            "department": "IT",
            "position": "Developer",
            "email": "john.doe@example.com",
            "hireDate": "2020-01-01",
        })
    }

    #[test]
    fn valid_employee_passes() {
        let employee = NewEmployee::create_at(&john(), now()).unwrap();
        assert_eq!(employee.first_name, "John");
        assert_eq!(employee.hire_date, Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(employee.role, None);
    }

    #[test]
    fn bad_email_is_the_only_violation() {
        let mut raw = john();
        raw["email"] = json!("not-an-email");
        let errors = NewEmployee::create_at(&raw, now()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.violations()[0].field, "email");
        assert_eq!(errors.violations()[0].kind, ViolationKind::InvalidFormat);
    }

    #[test]
    fn hire_date_in_future_is_rejected() {
        let mut raw = john();
        raw["hireDate"] = json!("2030-01-01");
        let errors = NewEmployee::create_at(&raw, now()).unwrap_err();
        assert_eq!(errors.fields(), vec!["hireDate"]);
        assert_eq!(errors.violations()[0].kind, ViolationKind::NotInPast);
    }

    #[test]
    fn all_missing_fields_are_reported_together() {
        let errors = NewEmployee::create_at(&json!({}), now()).unwrap_err();
        assert_eq!(
            errors.fields(),
            vec!["firstName", "lastName", "email", "department", "position", "hireDate"]
        );
    }

    #[test]
    fn name_length_limit() {
        let mut raw = john();
        raw["firstName"] = json!("x".repeat(51));
        raw["position"] = json!("y".repeat(100));
        let errors = NewEmployee::create_at(&raw, now()).unwrap_err();
        assert_eq!(errors.fields(), vec!["firstName"]);
    }

    #[test]
    fn validation_is_repeatable() {
        let raw = john();
        assert_eq!(
            NewEmployee::create_at(&raw, now()),
            NewEmployee::create_at(&raw, now())
        );
    }

    #[test]
    fn patch_checks_only_supplied_fields() {
        let patch = NewEmployee::patch_at(&json!({"department": "Ops"}), now()).unwrap();
        assert_eq!(patch.department.as_deref(), Some("Ops"));
        assert_eq!(patch.first_name, None);

        let errors = NewEmployee::patch_at(&json!({"phone": "abc", "role": "CEO"}), now())
            .unwrap_err();
        assert_eq!(errors.fields(), vec!["phone", "role"]);
    }

    #[test]
    fn customer_requires_contact_details() {
        let errors = NewCustomer::create_at(&json!({"firstName": "Ann"}), now()).unwrap_err();
        assert_eq!(errors.fields(), vec!["lastName", "email"]);
    }
}
