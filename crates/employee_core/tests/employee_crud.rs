use employee_core::db::open_db_in_memory;
use employee_core::db::schema::SCHEMA_VERSION;
use employee_core::{
    DbError, Employee, EmployeeRepository, NewEmployee, RepoError, SqliteEmployeeRepository,
};
use rusqlite::Connection;
use std::collections::HashSet;

fn ivan() -> NewEmployee {
    NewEmployee::new("Ivan Petrenko", "ivan@example.com", "HR")
}

fn olena() -> NewEmployee {
    NewEmployee::new("Olena Shevchenko", "olena@example.com", "IT")
}

#[test]
fn add_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    let id = repo.add(&ivan()).unwrap();

    let loaded = repo.get_by_id(id).unwrap().unwrap();
    assert_eq!(loaded.id, id);
    assert_eq!(loaded.details(), ivan());
}

#[test]
fn add_assigns_distinct_ids() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    let first = repo.add(&ivan()).unwrap();
    let second = repo.add(&ivan()).unwrap();

    assert_ne!(first, second);
}

#[test]
fn get_by_id_returns_none_for_missing_row() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    assert!(repo.get_by_id(42).unwrap().is_none());
}

#[test]
fn get_all_on_empty_table_is_empty() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    assert!(repo.get_all().unwrap().is_empty());
}

#[test]
fn get_all_returns_every_inserted_row() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    let mut ids = HashSet::new();
    for index in 0..5 {
        let employee = NewEmployee::new(
            format!("Employee {index}"),
            format!("employee{index}@example.com"),
            "Ops",
        );
        ids.insert(repo.add(&employee).unwrap());
    }

    let all = repo.get_all().unwrap();
    assert_eq!(all.len(), 5);
    let listed: HashSet<_> = all.into_iter().map(|employee| employee.id).collect();
    assert_eq!(listed, ids);
}

#[test]
fn demo_scenario_lists_and_filters_by_department() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    let ivan_id = repo.add(&ivan()).unwrap();
    let olena_id = repo.add(&olena()).unwrap();

    let names: HashSet<_> = repo
        .get_all()
        .unwrap()
        .into_iter()
        .map(|employee| employee.name)
        .collect();
    assert_eq!(
        names,
        HashSet::from(["Ivan Petrenko".to_string(), "Olena Shevchenko".to_string()])
    );

    let it = repo.find_by_department("IT").unwrap();
    assert_eq!(it, vec![olena().into_employee(olena_id)]);

    let hr = repo.find_by_department("HR").unwrap();
    assert_eq!(hr, vec![ivan().into_employee(ivan_id)]);

    assert!(repo.find_by_department("Sales").unwrap().is_empty());
}

#[test]
fn find_by_department_matches_exactly() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    repo.add(&NewEmployee::new("A", "a@example.com", "IT")).unwrap();
    repo.add(&NewEmployee::new("B", "b@example.com", "IT Support"))
        .unwrap();
    repo.add(&NewEmployee::new("C", "c@example.com", "it")).unwrap();

    let matched = repo.find_by_department("IT").unwrap();
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].name, "A");
}

#[test]
fn update_replaces_fields() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    let id = repo.add(&ivan()).unwrap();
    let changed = Employee {
        id,
        name: "Ivan Petrenko".to_string(),
        email: "ivan.petrenko@example.com".to_string(),
        department: "Finance".to_string(),
    };
    repo.update(&changed).unwrap();

    let loaded = repo.get_by_id(id).unwrap().unwrap();
    assert_eq!(loaded, changed);
    assert!(repo.find_by_department("HR").unwrap().is_empty());
}

#[test]
fn update_missing_row_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();
    let existing = repo.add(&ivan()).unwrap();

    let ghost = olena().into_employee(existing + 100);
    let err = repo.update(&ghost).unwrap_err();

    assert!(matches!(err, RepoError::NotFound(id) if id == ghost.id));
    assert_eq!(repo.get_by_id(existing).unwrap().unwrap().details(), ivan());
}

#[test]
fn delete_removes_row() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    let ivan_id = repo.add(&ivan()).unwrap();
    let olena_id = repo.add(&olena()).unwrap();
    repo.delete(ivan_id).unwrap();

    assert!(repo.get_by_id(ivan_id).unwrap().is_none());
    assert!(repo.get_by_id(olena_id).unwrap().is_some());
}

#[test]
fn delete_missing_row_returns_not_found_and_keeps_others() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    let id = repo.add(&ivan()).unwrap();
    repo.delete(id).unwrap();
    let other = repo.add(&olena()).unwrap();

    let err = repo.delete(id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(missing) if missing == id));
    assert_eq!(repo.get_all().unwrap().len(), 1);
    assert!(repo.get_by_id(other).unwrap().is_some());
}

#[test]
fn store_failures_are_surfaced_not_swallowed() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();
    repo.add(&ivan()).unwrap();

    conn.execute_batch("DROP TABLE employees;").unwrap();

    assert!(matches!(
        repo.get_all(),
        Err(RepoError::Db(DbError::Sqlite(_)))
    ));
    assert!(matches!(
        repo.find_by_department("HR"),
        Err(RepoError::Db(_))
    ));
    assert!(matches!(repo.get_by_id(1), Err(RepoError::Db(_))));
    assert!(matches!(repo.add(&olena()), Err(RepoError::Db(_))));
    assert!(matches!(repo.delete(1), Err(RepoError::Db(_))));
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteEmployeeRepository::try_new(&conn);
    match result {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, SCHEMA_VERSION),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_employees_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))
        .unwrap();

    let result = SqliteEmployeeRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("employees"))
    ));
}

#[test]
fn repository_rejects_connection_missing_required_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE employees (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))
        .unwrap();

    let result = SqliteEmployeeRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "employees",
            column: "department"
        })
    ));
}

#[test]
fn unchecked_repository_reads_columns_in_any_declaration_order() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE employees (
            department TEXT NOT NULL,
            email TEXT NOT NULL,
            name TEXT NOT NULL,
            id INTEGER PRIMARY KEY AUTOINCREMENT
        );",
    )
    .unwrap();
    let repo = SqliteEmployeeRepository::new(&conn);

    let id = repo.add(&olena()).unwrap();

    assert_eq!(repo.get_by_id(id).unwrap(), Some(olena().into_employee(id)));
}
