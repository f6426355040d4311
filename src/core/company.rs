use crate::core::traversal::{self, Predicate, Traversal};
use crate::domain::model::{Employee, Salaried};
use crate::utils::error::{Result, RosterError};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// In-memory roster of employees grouped by department.
///
/// `employees` is the authoritative set; `order` keeps insertion order for saving and
/// traversal, and `departments` indexes ids by department. A department key exists only
/// while it has at least one member.
pub struct Company {
    employees: HashMap<i64, Employee>,
    order: Vec<i64>,
    departments: BTreeMap<String, Vec<i64>>,
    predicate: Predicate,
}

impl Company {
    pub fn new() -> Self {
        Self {
            employees: HashMap::new(),
            order: Vec::new(),
            departments: BTreeMap::new(),
            predicate: traversal::always(),
        }
    }

    pub fn add(&mut self, employee: impl Into<Employee>) -> Result<()> {
        let employee = employee.into();
        let id = employee.id();
        if self.employees.contains_key(&id) {
            return Err(RosterError::DuplicateEmployee { id });
        }

        tracing::debug!(
            "Adding {} {} to department '{}'",
            employee.variant_tag(),
            id,
            employee.department()
        );

        self.departments
            .entry(employee.department().to_string())
            .or_default()
            .push(id);
        self.order.push(id);
        self.employees.insert(id, employee);
        Ok(())
    }

    pub fn get(&self, id: i64) -> Option<&Employee> {
        self.employees.get(&id)
    }

    pub fn remove(&mut self, id: i64) -> Result<Employee> {
        let employee = self
            .employees
            .remove(&id)
            .ok_or(RosterError::EmployeeNotFound { id })?;

        if let Some(index) = self.order.iter().position(|&other| other == id) {
            self.order.remove(index);
        }
        self.detach_from_department(&employee);

        tracing::debug!("Removed employee {}", id);
        Ok(employee)
    }

    // 依 id 比對，清單空了就把部門鍵刪掉
    fn detach_from_department(&mut self, employee: &Employee) {
        let department = employee.department();
        let Some(members) = self.departments.get_mut(department) else {
            return;
        };
        if let Some(index) = members.iter().position(|&id| id == employee.id()) {
            members.remove(index);
        }
        if members.is_empty() {
            self.departments.remove(department);
        }
    }

    /// Sum of salaries in `department`; zero when the department has no members.
    pub fn department_budget(&self, department: &str) -> f64 {
        self.department_members(department)
            .iter()
            .map(|e| e.compute_salary())
            .sum()
    }

    pub fn department_members(&self, department: &str) -> Vec<&Employee> {
        self.departments
            .get(department)
            .map(|ids| ids.iter().filter_map(|id| self.employees.get(id)).collect())
            .unwrap_or_default()
    }

    /// Non-empty departments, sorted ascending.
    pub fn departments(&self) -> Vec<String> {
        self.departments.keys().cloned().collect()
    }

    /// Replaces the traversal filter; `None` resets it to accept everyone.
    pub fn set_predicate(&mut self, predicate: Option<Predicate>) {
        self.predicate = predicate.unwrap_or_else(traversal::always);
    }

    /// Starts a fresh traversal filtered by the current predicate.
    pub fn iter(&self) -> Traversal<'_> {
        Traversal::new(&self.order, &self.employees, self.predicate.clone())
    }

    /// Every employee in insertion order, ignoring the traversal predicate.
    pub fn employees(&self) -> impl Iterator<Item = &Employee> + '_ {
        self.order.iter().filter_map(|id| self.employees.get(id))
    }

    /// Managers sharing the highest factor, in the order they were added.
    pub fn managers_with_top_factor(&self) -> Vec<&Employee> {
        let managers: Vec<(&Employee, f64)> = self
            .employees()
            .filter_map(|e| e.as_manager().map(|m| (e, m.factor)))
            .collect();

        let Some(max_factor) = managers
            .iter()
            .map(|&(_, factor)| factor)
            .reduce(f64::max)
        else {
            return Vec::new();
        };

        managers
            .into_iter()
            .filter(|&(_, factor)| factor == max_factor)
            .map(|(e, _)| e)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }
}

impl Default for Company {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Company {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Company")
            .field("employees", &self.order.len())
            .field("departments", &self.departments.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<'a> IntoIterator for &'a Company {
    type Item = &'a Employee;
    type IntoIter = Traversal<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
