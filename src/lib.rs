#[cfg(feature = "cli")]
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use app::session::RosterSession;
#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use config::cli::LocalStorage;
pub use core::company::Company;
pub use domain::model::{Employee, EmployeeBase, Manager, Salaried, SalesPerson, WageEmployee};
pub use utils::error::{Result, RosterError};
