use company_roster::core::traversal::{basic_salary_above, basic_salary_below, Predicate};
use company_roster::{Company, Employee, Manager, SalesPerson, WageEmployee};
use std::sync::Arc;

fn company() -> (Company, Vec<Employee>) {
    let employees: Vec<Employee> = vec![
        WageEmployee::new(123, "QA", 1000.0, 100.0, 10.0).into(),
        Manager::new(124, "QA", 2000.0, 2.0).into(),
        SalesPerson::new(125, "Development", 3000.0, 100.0, 10.0, 1.0, 20.0).into(),
    ];
    let mut company = Company::new();
    for e in &employees {
        company.add(e.clone()).unwrap();
    }
    (company, employees)
}

fn run_test(company: &mut Company, predicate: Option<Predicate>, expected: &[&Employee]) {
    company.set_predicate(predicate);
    let mut actual: Vec<&Employee> = company.iter().collect();
    actual.sort_by_key(|e| e.id());
    let mut expected = expected.to_vec();
    expected.sort_by_key(|e| e.id());
    assert_eq!(actual, expected);
}

#[test]
fn test_iterating_all_objects() {
    let (mut company, e) = company();
    run_test(&mut company, None, &[&e[0], &e[1], &e[2]]);
}

#[test]
fn test_iterating_basic_salary_greater_than_1000() {
    let (mut company, e) = company();
    run_test(&mut company, Some(basic_salary_above(1000.0)), &[&e[1], &e[2]]);
}

#[test]
fn test_iterating_basic_salary_less_than_1000() {
    let (mut company, _) = company();
    run_test(&mut company, Some(basic_salary_below(1000.0)), &[]);
}

#[test]
fn test_predicate_set_before_adding() {
    let mut company = Company::new();
    company.set_predicate(Some(Arc::new(|e: &Employee| e.basic_salary() > 1000.0)));
    company.add(Manager::new(1, "Eng", 500.0, 1.0)).unwrap();
    company.add(Manager::new(2, "Eng", 1500.0, 1.0)).unwrap();

    let ids: Vec<i64> = company.iter().map(|e| e.id()).collect();
    assert_eq!(ids, vec![2]);
}

#[test]
fn test_traversal_follows_insertion_order() {
    let mut company = Company::new();
    for id in [30, 10, 20] {
        company.add(Manager::new(id, "Eng", 1.0, 1.0)).unwrap();
    }
    let ids: Vec<i64> = company.iter().map(|e| e.id()).collect();
    assert_eq!(ids, vec![30, 10, 20]);
}

#[test]
fn test_cursors_are_independent() {
    let (company, _) = company();
    let mut first = company.iter();
    let mut second = company.iter();

    assert_eq!(first.next().map(|e| e.id()), Some(123));
    assert_eq!(first.next().map(|e| e.id()), Some(124));
    assert_eq!(second.next().map(|e| e.id()), Some(123));
    assert_eq!(first.next().map(|e| e.id()), Some(125));
    assert!(first.next().is_none());
    assert_eq!(second.next().map(|e| e.id()), Some(124));
}

#[test]
fn test_traversal_is_restartable() {
    let (company, _) = company();
    let first_pass: Vec<i64> = company.iter().map(|e| e.id()).collect();
    let second_pass: Vec<i64> = (&company).into_iter().map(|e| e.id()).collect();
    assert_eq!(first_pass, second_pass);
    assert_eq!(first_pass.len(), 3);
}

#[test]
fn test_new_traversal_sees_mutations() {
    let (mut company, _) = company();
    let before = company.iter().count();

    company.remove(124).unwrap();
    company.add(Manager::new(200, "Ops", 1.0, 1.0)).unwrap();

    let ids: Vec<i64> = company.iter().map(|e| e.id()).collect();
    assert_eq!(before, 3);
    assert_eq!(ids, vec![123, 125, 200]);
}

#[test]
fn test_for_loop_over_company() {
    let (mut company, _) = company();
    company.set_predicate(Some(basic_salary_above(2500.0)));

    let mut seen = Vec::new();
    for employee in &company {
        seen.push(employee.id());
    }
    assert_eq!(seen, vec![125]);
}
