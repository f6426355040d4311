//! Employee variants and the salary rule each one carries.
//!
//! Every variant embeds its parent's fields and computes its salary by asking the
//! parent first, then adding its own term.

use serde::{Deserialize, Serialize};

/// A flat key/value record, the persisted shape of one employee.
pub type Record = serde_json::Map<String, serde_json::Value>;

pub const EMPLOYEE_TAG: &str = "Employee";
pub const WAGE_EMPLOYEE_TAG: &str = "WageEmployee";
pub const SALES_PERSON_TAG: &str = "SalesPerson";
pub const MANAGER_TAG: &str = "Manager";

pub trait Salaried {
    fn compute_salary(&self) -> f64;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EmployeeBase {
    pub id: i64,
    #[serde(deserialize_with = "department_or_empty")]
    pub department: String,
    pub basic_salary: f64,
}

impl Default for EmployeeBase {
    fn default() -> Self {
        Self {
            id: -1,
            department: String::new(),
            basic_salary: -1.0,
        }
    }
}

impl EmployeeBase {
    pub fn new(id: i64, department: impl Into<String>, basic_salary: f64) -> Self {
        Self {
            id,
            department: department.into(),
            basic_salary,
        }
    }
}

impl Salaried for EmployeeBase {
    fn compute_salary(&self) -> f64 {
        self.basic_salary
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WageEmployee {
    #[serde(flatten)]
    pub base: EmployeeBase,
    pub wage: f64,
    pub hours: f64,
}

impl WageEmployee {
    pub fn new(
        id: i64,
        department: impl Into<String>,
        basic_salary: f64,
        wage: f64,
        hours: f64,
    ) -> Self {
        Self {
            base: EmployeeBase::new(id, department, basic_salary),
            wage,
            hours,
        }
    }
}

impl Salaried for WageEmployee {
    fn compute_salary(&self) -> f64 {
        self.base.compute_salary() + self.wage * self.hours
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalesPerson {
    #[serde(flatten)]
    pub wage_employee: WageEmployee,
    pub percent: f64,
    pub sales: f64,
}

impl SalesPerson {
    pub fn new(
        id: i64,
        department: impl Into<String>,
        basic_salary: f64,
        wage: f64,
        hours: f64,
        percent: f64,
        sales: f64,
    ) -> Self {
        Self {
            wage_employee: WageEmployee::new(id, department, basic_salary, wage, hours),
            percent,
            sales,
        }
    }
}

impl Salaried for SalesPerson {
    fn compute_salary(&self) -> f64 {
        self.wage_employee.compute_salary() + self.sales * self.percent / 100.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manager {
    #[serde(flatten)]
    pub base: EmployeeBase,
    pub factor: f64,
}

impl Manager {
    pub fn new(id: i64, department: impl Into<String>, basic_salary: f64, factor: f64) -> Self {
        Self {
            base: EmployeeBase::new(id, department, basic_salary),
            factor,
        }
    }
}

impl Salaried for Manager {
    fn compute_salary(&self) -> f64 {
        self.base.compute_salary() * self.factor
    }
}

/// The closed set of employee kinds known to the roster.
#[derive(Debug, Clone, PartialEq)]
pub enum Employee {
    Base(EmployeeBase),
    Wage(WageEmployee),
    Sales(SalesPerson),
    Manager(Manager),
}

impl Employee {
    fn base(&self) -> &EmployeeBase {
        match self {
            Employee::Base(e) => e,
            Employee::Wage(e) => &e.base,
            Employee::Sales(e) => &e.wage_employee.base,
            Employee::Manager(e) => &e.base,
        }
    }

    pub fn id(&self) -> i64 {
        self.base().id
    }

    pub fn department(&self) -> &str {
        &self.base().department
    }

    pub fn basic_salary(&self) -> f64 {
        self.base().basic_salary
    }

    /// Tag written next to the fields so a record can be rebuilt as the same variant.
    pub fn variant_tag(&self) -> &'static str {
        match self {
            Employee::Base(_) => EMPLOYEE_TAG,
            Employee::Wage(_) => WAGE_EMPLOYEE_TAG,
            Employee::Sales(_) => SALES_PERSON_TAG,
            Employee::Manager(_) => MANAGER_TAG,
        }
    }

    pub fn as_manager(&self) -> Option<&Manager> {
        match self {
            Employee::Manager(m) => Some(m),
            _ => None,
        }
    }

    /// Numeric fields under their persisted names.
    pub fn numeric_fields(&self) -> Vec<(&'static str, f64)> {
        let base = self.base();
        let mut fields = vec![("basicSalary", base.basic_salary)];
        match self {
            Employee::Base(_) => {}
            Employee::Wage(e) => fields.extend([("wage", e.wage), ("hours", e.hours)]),
            Employee::Sales(e) => fields.extend([
                ("wage", e.wage_employee.wage),
                ("hours", e.wage_employee.hours),
                ("percent", e.percent),
                ("sales", e.sales),
            ]),
            Employee::Manager(e) => fields.push(("factor", e.factor)),
        }
        fields
    }
}

impl Salaried for Employee {
    fn compute_salary(&self) -> f64 {
        match self {
            Employee::Base(e) => e.compute_salary(),
            Employee::Wage(e) => e.compute_salary(),
            Employee::Sales(e) => e.compute_salary(),
            Employee::Manager(e) => e.compute_salary(),
        }
    }
}

impl From<EmployeeBase> for Employee {
    fn from(value: EmployeeBase) -> Self {
        Employee::Base(value)
    }
}

impl From<WageEmployee> for Employee {
    fn from(value: WageEmployee) -> Self {
        Employee::Wage(value)
    }
}

impl From<SalesPerson> for Employee {
    fn from(value: SalesPerson) -> Self {
        Employee::Sales(value)
    }
}

impl From<Manager> for Employee {
    fn from(value: Manager) -> Self {
        Employee::Manager(value)
    }
}

// null 部門在舊資料檔中很常見，一律還原成空字串
fn department_or_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
