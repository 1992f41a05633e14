//! Demonstration driver for `employee_core`.
//!
//! # Responsibility
//! - Open one store connection, insert two employees, print two listings.
//! - Own the connection lifetime; the repository only borrows it.
//!
//! Usage: `employee_cli [DB_PATH]` (in-memory database when omitted).

use employee_core::{
    default_log_level, init_logging, open_db, open_db_in_memory, EmployeeRepository,
    NewEmployee, SqliteEmployeeRepository,
};
use log::info;
use std::error::Error;
use std::process::ExitCode;

const LOG_DIR_NAME: &str = "employee-dao-logs";

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let log_dir = std::env::temp_dir().join(LOG_DIR_NAME);
    init_logging(default_log_level(), &log_dir.to_string_lossy())?;

    let conn = match std::env::args().nth(1) {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };

    {
        let repo = SqliteEmployeeRepository::try_new(&conn)?;

        repo.add(&NewEmployee::new("Ivan Petrenko", "ivan@example.com", "HR"))?;
        repo.add(&NewEmployee::new(
            "Olena Shevchenko",
            "olena@example.com",
            "IT",
        ))?;

        println!("All employees:");
        for employee in repo.get_all()? {
            println!("{}", employee.name);
        }

        println!("IT department:");
        for employee in repo.find_by_department("IT")? {
            println!("{}", employee.name);
        }
    }

    conn.close().map_err(|(_, err)| err)?;
    info!("event=demo_finish module=cli status=ok");
    Ok(())
}
