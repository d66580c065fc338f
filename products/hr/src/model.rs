use entity::employee;
use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
use serde::{Deserialize, Serialize};

/// Employee as exposed over the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i64,
    pub name: Option<String>,
    pub email: Option<String>,
    pub job_title: Option<String>,
    pub phone_number: Option<String>,
    pub image_url: Option<String>,
    pub employee_code: String,
}

impl From<employee::Model> for Employee {
    fn from(model: employee::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            job_title: model.job_title,
            phone_number: model.phone_number,
            image_url: model.image_url,
            employee_code: model.employee_code,
        }
    }
}

/// Inbound employee body for add and update. A client-sent `employeeCode`
/// is not part of this type and is dropped during deserialization.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmployeeInput {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub job_title: Option<String>,
    pub phone_number: Option<String>,
    pub image_url: Option<String>,
}

impl EmployeeInput {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Fresh row: the store picks the id, the caller supplies the code.
    pub(crate) fn into_new_model(self, employee_code: String) -> employee::ActiveModel {
        employee::ActiveModel {
            id: NotSet,
            name: Set(self.name),
            email: Set(self.email),
            job_title: Set(self.job_title),
            phone_number: Set(self.phone_number),
            image_url: Set(self.image_url),
            employee_code: Set(employee_code),
        }
    }

    /// Overwrites every mutable column of row `id`; the code column is left out.
    pub(crate) fn into_update_model(self, id: i64) -> employee::ActiveModel {
        employee::ActiveModel {
            id: Unchanged(id),
            name: Set(self.name),
            email: Set(self.email),
            job_title: Set(self.job_title),
            phone_number: Set(self.phone_number),
            image_url: Set(self.image_url),
            employee_code: NotSet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn employee_serializes_camel_case() {
        let employee = Employee {
            id: 1,
            name: Some("Ann".into()),
            email: None,
            job_title: Some("Engineer".into()),
            phone_number: None,
            image_url: None,
            employee_code: "c1".into(),
        };
        let value = serde_json::to_value(&employee).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 1,
                "name": "Ann",
                "email": null,
                "jobTitle": "Engineer",
                "phoneNumber": null,
                "imageUrl": null,
                "employeeCode": "c1"
            })
        );
    }

    #[test]
    fn input_ignores_client_code_and_fills_defaults() {
        let input: EmployeeInput = serde_json::from_value(json!({
            "name": "Ann",
            "phoneNumber": "555-0100",
            "employeeCode": "forged"
        }))
        .unwrap();
        assert_eq!(input.id, None);
        assert_eq!(input.name.as_deref(), Some("Ann"));
        assert_eq!(input.phone_number.as_deref(), Some("555-0100"));
        assert_eq!(input.email, None);
    }

    #[test]
    fn update_model_leaves_code_untouched() {
        let active = EmployeeInput::named("Ann B").into_update_model(4);
        assert!(matches!(active.id, Unchanged(4)));
        assert!(matches!(active.name, Set(Some(ref name)) if name == "Ann B"));
        assert!(matches!(active.employee_code, NotSet));
    }
}
