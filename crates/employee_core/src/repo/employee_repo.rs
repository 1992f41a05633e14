//! Employee repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Map the six employee operations onto fixed parameterized statements.
//! - Materialize `employees` rows into `Employee` values by column name.
//!
//! # Invariants
//! - Store failures are always returned to the caller, never swallowed.
//! - Single-row absence is `None` for reads and `NotFound` for writes.
//! - Statements are scoped to one call and released on every exit path.

use crate::db::schema::{current_user_version, SCHEMA_VERSION};
use crate::db::DbError;
use crate::model::employee::{Employee, EmployeeId, NewEmployee};
use log::{debug, warn};
use rusqlite::{params, Connection, Params, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const EMPLOYEES_TABLE: &str = "employees";
const REQUIRED_COLUMNS: [&str; 4] = ["id", "name", "email", "department"];

const EMPLOYEE_SELECT_SQL: &str = "SELECT
    id,
    name,
    email,
    department
FROM employees";

pub type RepoResult<T> = Result<T, RepoError>;

/// Errors from employee persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// No row carries the given ID.
    NotFound(EmployeeId),
    /// Connection schema is not at the expected bootstrap version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "employee not found: {id}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "employee repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "employee repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "employee repository requires column `{column}` in table `{table}`"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_)
            | Self::UninitializedConnection { .. }
            | Self::MissingRequiredTable(_)
            | Self::MissingRequiredColumn { .. } => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Data access contract for employee records.
pub trait EmployeeRepository {
    /// Inserts a row and returns the store-assigned ID.
    fn add(&self, employee: &NewEmployee) -> RepoResult<EmployeeId>;
    /// Loads one row by primary key; `None` when absent.
    fn get_by_id(&self, id: EmployeeId) -> RepoResult<Option<Employee>>;
    /// Loads every row in store order.
    fn get_all(&self) -> RepoResult<Vec<Employee>>;
    /// Loads rows whose department equals `department` exactly.
    fn find_by_department(&self, department: &str) -> RepoResult<Vec<Employee>>;
    /// Overwrites name/email/department of the row matching `employee.id`.
    ///
    /// Returns `NotFound` when no row was modified.
    fn update(&self, employee: &Employee) -> RepoResult<()>;
    /// Removes the row with `id`.
    ///
    /// Returns `NotFound` when no row was removed.
    fn delete(&self, id: EmployeeId) -> RepoResult<()>;
}

/// SQLite-backed employee repository over one borrowed connection.
///
/// The repository never opens or closes connections. `Connection` is not
/// `Sync`, so each concurrent caller needs its own connection and repository.
pub struct SqliteEmployeeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEmployeeRepository<'conn> {
    /// Wraps a connection whose schema the caller vouches for.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Wraps a connection after checking it carries the employee schema.
    ///
    /// # Errors
    /// - `UninitializedConnection` when `user_version` does not match.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` on schema drift.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_employee_connection_ready(conn)?;
        Ok(Self { conn })
    }

    fn query_employees<P: Params>(&self, sql: &str, params: P) -> RepoResult<Vec<Employee>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut employees = Vec::new();

        while let Some(row) = rows.next()? {
            employees.push(parse_employee_row(row)?);
        }

        Ok(employees)
    }
}

impl EmployeeRepository for SqliteEmployeeRepository<'_> {
    fn add(&self, employee: &NewEmployee) -> RepoResult<EmployeeId> {
        self.conn.execute(
            "INSERT INTO employees (name, email, department) VALUES (?1, ?2, ?3);",
            params![
                employee.name.as_str(),
                employee.email.as_str(),
                employee.department.as_str(),
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        debug!("event=employee_add module=repo status=ok id={id}");
        Ok(id)
    }

    fn get_by_id(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EMPLOYEE_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_employee_row(row)?));
        }

        Ok(None)
    }

    fn get_all(&self) -> RepoResult<Vec<Employee>> {
        self.query_employees(&format!("{EMPLOYEE_SELECT_SQL};"), [])
    }

    fn find_by_department(&self, department: &str) -> RepoResult<Vec<Employee>> {
        self.query_employees(
            &format!("{EMPLOYEE_SELECT_SQL} WHERE department = ?1;"),
            [department],
        )
    }

    fn update(&self, employee: &Employee) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE employees
             SET
                name = ?1,
                email = ?2,
                department = ?3
             WHERE id = ?4;",
            params![
                employee.name.as_str(),
                employee.email.as_str(),
                employee.department.as_str(),
                employee.id,
            ],
        )?;

        if changed == 0 {
            warn!(
                "event=employee_update module=repo status=error error_code=not_found id={}",
                employee.id
            );
            return Err(RepoError::NotFound(employee.id));
        }

        debug!(
            "event=employee_update module=repo status=ok id={}",
            employee.id
        );
        Ok(())
    }

    fn delete(&self, id: EmployeeId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM employees WHERE id = ?1;", [id])?;

        if changed == 0 {
            warn!("event=employee_delete module=repo status=error error_code=not_found id={id}");
            return Err(RepoError::NotFound(id));
        }

        debug!("event=employee_delete module=repo status=ok id={id}");
        Ok(())
    }
}

/// Reads the four employee columns by name.
///
/// A missing column surfaces as `rusqlite::Error::InvalidColumnName` instead
/// of a defaulted field.
fn parse_employee_row(row: &Row<'_>) -> RepoResult<Employee> {
    Ok(Employee {
        id: row.get("id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        department: row.get("department")?,
    })
}

fn ensure_employee_connection_ready(conn: &Connection) -> RepoResult<()> {
    let actual_version = current_user_version(conn)?;
    if actual_version != SCHEMA_VERSION {
        return Err(RepoError::UninitializedConnection {
            expected_version: SCHEMA_VERSION,
            actual_version,
        });
    }

    if !table_exists(conn, EMPLOYEES_TABLE)? {
        return Err(RepoError::MissingRequiredTable(EMPLOYEES_TABLE));
    }

    for column in REQUIRED_COLUMNS {
        if !table_has_column(conn, EMPLOYEES_TABLE, column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: EMPLOYEES_TABLE,
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get("name")?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
