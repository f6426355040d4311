use crate::domain::model::Employee;
use std::collections::HashMap;
use std::fmt;
use std::iter::FusedIterator;
use std::sync::Arc;

/// Filter applied per employee during traversal only.
pub type Predicate = Arc<dyn Fn(&Employee) -> bool + Send + Sync>;

pub fn always() -> Predicate {
    Arc::new(|_: &Employee| true)
}

pub fn basic_salary_above(threshold: f64) -> Predicate {
    Arc::new(move |e: &Employee| e.basic_salary() > threshold)
}

pub fn basic_salary_below(threshold: f64) -> Predicate {
    Arc::new(move |e: &Employee| e.basic_salary() < threshold)
}

pub fn in_department(department: impl Into<String>) -> Predicate {
    let department = department.into();
    Arc::new(move |e: &Employee| e.department() == department)
}

/// Matches on the persisted variant tag (`Employee`, `WageEmployee`, ...).
pub fn of_kind(tag: impl Into<String>) -> Predicate {
    let tag = tag.into();
    Arc::new(move |e: &Employee| e.variant_tag() == tag)
}

pub fn all_of(predicates: Vec<Predicate>) -> Predicate {
    Arc::new(move |e: &Employee| predicates.iter().all(|p| p(e)))
}

/// Cursor over the roster in insertion order.
///
/// Holds its own position, so any number of traversals can be active at once.
/// The cursor borrows the roster, which keeps it unchanged until the cursor is dropped.
pub struct Traversal<'a> {
    order: &'a [i64],
    employees: &'a HashMap<i64, Employee>,
    predicate: Predicate,
    position: usize,
}

impl<'a> Traversal<'a> {
    pub(crate) fn new(
        order: &'a [i64],
        employees: &'a HashMap<i64, Employee>,
        predicate: Predicate,
    ) -> Self {
        Self {
            order,
            employees,
            predicate,
            position: 0,
        }
    }
}

impl<'a> Iterator for Traversal<'a> {
    type Item = &'a Employee;

    fn next(&mut self) -> Option<Self::Item> {
        while self.position < self.order.len() {
            let id = self.order[self.position];
            self.position += 1;
            if let Some(employee) = self.employees.get(&id) {
                if (self.predicate)(employee) {
                    return Some(employee);
                }
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.order.len() - self.position))
    }
}

impl FusedIterator for Traversal<'_> {}

impl fmt::Debug for Traversal<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Traversal")
            .field("position", &self.position)
            .field("len", &self.order.len())
            .finish()
    }
}
