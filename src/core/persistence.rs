//! JSON persistence for the roster.
//!
//! A saved roster is an array of flat records. Each record carries a `className` tag next
//! to the employee's fields; on restore the tag picks a factory from [`VariantRegistry`],
//! and any field missing from the record keeps that variant's default.

use crate::core::company::Company;
use crate::domain::model::{
    Employee, EmployeeBase, Manager, Record, SalesPerson, WageEmployee, EMPLOYEE_TAG, MANAGER_TAG,
    SALES_PERSON_TAG, WAGE_EMPLOYEE_TAG,
};
use crate::domain::ports::Storage;
use crate::utils::error::{Result, RosterError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

pub const TAG_FIELD: &str = "className";

pub type Factory = fn(Record) -> Result<Employee>;

/// Maps a persisted tag to the function that rebuilds that variant.
#[derive(Debug, Clone)]
pub struct VariantRegistry {
    factories: HashMap<&'static str, Factory>,
}

impl VariantRegistry {
    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.register(EMPLOYEE_TAG, |r| {
            overlay::<EmployeeBase>(r).map(Employee::Base)
        });
        registry.register(WAGE_EMPLOYEE_TAG, |r| {
            overlay::<WageEmployee>(r).map(Employee::Wage)
        });
        registry.register(SALES_PERSON_TAG, |r| {
            overlay::<SalesPerson>(r).map(Employee::Sales)
        });
        registry.register(MANAGER_TAG, |r| overlay::<Manager>(r).map(Employee::Manager));
        registry
    }

    pub fn register(&mut self, tag: &'static str, factory: Factory) {
        self.factories.insert(tag, factory);
    }

    pub fn build(&self, value: Value) -> Result<Employee> {
        let Value::Object(record) = value else {
            return Err(RosterError::InvalidEmployeeType {
                value: value.to_string(),
            });
        };

        let tag = match record.get(TAG_FIELD) {
            Some(Value::String(tag)) => tag.clone(),
            Some(_) | None => return Err(RosterError::MissingVariantTag),
        };

        let factory = self
            .factories
            .get(tag.as_str())
            .ok_or(RosterError::UnknownVariant { tag })?;
        factory(record)
    }
}

impl Default for VariantRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

// 以預設值為底，再套上記錄中存在的欄位
fn overlay<T: DeserializeOwned + Default>(record: Record) -> Result<T> {
    Ok(serde_json::from_value(Value::Object(record))?)
}

fn tagged<T: Serialize>(tag: &str, value: &T) -> Result<Value> {
    let mut record = match serde_json::to_value(value)? {
        Value::Object(record) => record,
        other => {
            return Err(RosterError::InvalidEmployeeType {
                value: other.to_string(),
            })
        }
    };
    record.insert(TAG_FIELD.to_string(), Value::String(tag.to_string()));
    Ok(Value::Object(record))
}

/// Builds the persisted record. JSON has no inf/NaN, so non-finite fields are rejected.
pub fn to_record(employee: &Employee) -> Result<Value> {
    if let Some((field, value)) = employee
        .numeric_fields()
        .into_iter()
        .find(|(_, value)| !value.is_finite())
    {
        return Err(RosterError::NonFiniteValue {
            id: employee.id(),
            field,
            value,
        });
    }

    let tag = employee.variant_tag();
    match employee {
        Employee::Base(e) => tagged(tag, e),
        Employee::Wage(e) => tagged(tag, e),
        Employee::Sales(e) => tagged(tag, e),
        Employee::Manager(e) => tagged(tag, e),
    }
}

/// Serializes every employee, in insertion order, as a JSON array.
pub fn encode(company: &Company) -> Result<Vec<u8>> {
    let records = company
        .employees()
        .map(to_record)
        .collect::<Result<Vec<_>>>()?;
    Ok(serde_json::to_vec_pretty(&records)?)
}

pub fn decode(data: &[u8], registry: &VariantRegistry) -> Result<Vec<Employee>> {
    let values: Vec<Value> = serde_json::from_slice(data)?;
    values.into_iter().map(|v| registry.build(v)).collect()
}

impl Company {
    pub async fn save<S: Storage>(&self, storage: &S, path: &str) -> Result<()> {
        let data = encode(self)?;
        storage.write_file(path, &data).await?;
        tracing::info!("Saved {} employees to {}", self.len(), path);
        Ok(())
    }

    /// Adds every employee stored at `path`. A missing file is not an error.
    ///
    /// Records are added one at a time; the first duplicate id stops the restore and
    /// leaves the records added before it in place.
    pub async fn restore<S: Storage>(&mut self, storage: &S, path: &str) -> Result<()> {
        self.restore_with(storage, path, &VariantRegistry::standard())
            .await
    }

    pub async fn restore_with<S: Storage>(
        &mut self,
        storage: &S,
        path: &str,
        registry: &VariantRegistry,
    ) -> Result<()> {
        if !storage.exists(path).await? {
            tracing::warn!("No saved roster at {}, starting empty", path);
            return Ok(());
        }

        let data = storage.read_file(path).await?;
        let employees = decode(&data, registry)?;
        let count = employees.len();
        for employee in employees {
            self.add(employee)?;
        }

        tracing::info!("Restored {} employees from {}", count, path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_carries_tag_and_fields() {
        let record = to_record(&Manager::new(2, "Eng", 500.0, 3.0).into()).unwrap();
        assert_eq!(
            record,
            json!({
                "className": "Manager",
                "id": 2,
                "department": "Eng",
                "basicSalary": 500.0,
                "factor": 3.0
            })
        );
    }

    #[test]
    fn test_non_finite_field_is_rejected() {
        let err = to_record(&Manager::new(2, "Eng", 500.0, f64::NAN).into()).unwrap_err();
        assert!(matches!(
            err,
            RosterError::NonFiniteValue { id: 2, field: "factor", .. }
        ));
    }

    #[test]
    fn test_build_dispatches_on_tag() {
        let registry = VariantRegistry::standard();
        let employee = registry
            .build(json!({
                "className": "SalesPerson",
                "id": 3,
                "department": "Sales",
                "basicSalary": 1000,
                "wage": 20,
                "hours": 10,
                "percent": 5,
                "sales": 2000
            }))
            .unwrap();

        assert_eq!(
            employee,
            Employee::Sales(SalesPerson::new(3, "Sales", 1000.0, 20.0, 10.0, 5.0, 2000.0))
        );
    }

    #[test]
    fn test_missing_fields_keep_defaults() {
        let registry = VariantRegistry::standard();
        let employee = registry
            .build(json!({"className": "Employee", "id": 9, "department": null}))
            .unwrap();
        assert_eq!(employee, Employee::Base(EmployeeBase::new(9, "", -1.0)));

        let employee = registry
            .build(json!({"className": "SalesPerson", "id": 10}))
            .unwrap();
        let Employee::Sales(sales) = employee else {
            panic!("expected SalesPerson");
        };
        assert_eq!(sales.sales, 0.0);
        assert_eq!(sales.percent, 0.0);
    }

    #[test]
    fn test_unknown_tag_is_fatal() {
        let registry = VariantRegistry::standard();
        let err = registry
            .build(json!({"className": "Intern", "id": 1}))
            .unwrap_err();
        assert!(matches!(err, RosterError::UnknownVariant { ref tag } if tag == "Intern"));

        let err = registry.build(json!({"id": 1})).unwrap_err();
        assert!(matches!(err, RosterError::MissingVariantTag));
    }

    #[test]
    fn test_non_object_record_is_invalid_type() {
        let registry = VariantRegistry::standard();
        let err = registry.build(json!(42)).unwrap_err();
        assert!(matches!(err, RosterError::InvalidEmployeeType { ref value } if value == "42"));
        assert_eq!(err.to_string(), "42 is not Employee object");
    }

    #[test]
    fn test_custom_registry() {
        let mut registry = VariantRegistry::empty();
        registry.register("Contractor", |r| overlay::<WageEmployee>(r).map(Employee::Wage));

        let employee = registry
            .build(json!({"className": "Contractor", "id": 5, "wage": 50, "hours": 2}))
            .unwrap();
        assert_eq!(employee.variant_tag(), "WageEmployee");
        assert!(registry
            .build(json!({"className": "Manager", "id": 6}))
            .is_err());
    }

    #[test]
    fn test_encode_keeps_insertion_order() {
        let mut company = Company::new();
        company.add(EmployeeBase::new(30, "A", 1.0)).unwrap();
        company.add(EmployeeBase::new(10, "B", 1.0)).unwrap();
        company.add(EmployeeBase::new(20, "A", 1.0)).unwrap();

        let decoded = decode(&encode(&company).unwrap(), &VariantRegistry::standard()).unwrap();
        let ids: Vec<i64> = decoded.iter().map(|e| e.id()).collect();
        assert_eq!(ids, vec![30, 10, 20]);
    }
}
