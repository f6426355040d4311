pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli_args::{BaseArgs, CliConfig, Command, Settings};

#[cfg(feature = "cli")]
mod cli_args {
    use super::toml_config::{RosterConfig, DEFAULT_DATA_FILE};
    use crate::core::traversal::{self, Predicate};
    use crate::core::ConfigProvider;
    use crate::domain::model::{Employee, EmployeeBase, Manager, SalesPerson, WageEmployee};
    use crate::utils::error::Result;
    use crate::utils::validation::{validate_path, Validate};
    use clap::{Args, Parser, Subcommand};

    #[derive(Debug, Clone, Parser)]
    #[command(name = "company-roster")]
    #[command(about = "Keep a company's employee roster and payroll figures")]
    pub struct CliConfig {
        /// Path to a TOML configuration file
        #[arg(short, long)]
        pub config: Option<String>,

        /// Directory holding the roster data file (overrides the config file)
        #[arg(long)]
        pub data_dir: Option<String>,

        /// Roster data file name (overrides the config file)
        #[arg(long)]
        pub data_file: Option<String>,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Emit logs as JSON")]
        pub json_logs: bool,

        #[command(subcommand)]
        pub command: Command,
    }

    #[derive(Debug, Clone, Args)]
    pub struct BaseArgs {
        #[arg(long, allow_negative_numbers = true)]
        pub id: i64,

        #[arg(long, default_value = "")]
        pub department: String,

        #[arg(long, allow_negative_numbers = true, value_parser = parse_finite)]
        pub basic_salary: f64,
    }

    // JSON 無法表示 inf/NaN，新增員工時就擋下
    fn parse_finite(value: &str) -> std::result::Result<f64, String> {
        let number: f64 = value
            .parse()
            .map_err(|e| format!("'{}' is not a number: {}", value, e))?;
        if number.is_finite() {
            Ok(number)
        } else {
            Err(format!("'{}' is not a finite number", value))
        }
    }

    impl BaseArgs {
        fn base(&self) -> EmployeeBase {
            EmployeeBase::new(self.id, self.department.clone(), self.basic_salary)
        }
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Command {
        /// Add an employee paid only a basic salary
        AddEmployee(BaseArgs),
        /// Add an hourly employee
        AddWage {
            #[command(flatten)]
            base: BaseArgs,
            #[arg(long, allow_negative_numbers = true, value_parser = parse_finite)]
            wage: f64,
            #[arg(long, allow_negative_numbers = true, value_parser = parse_finite)]
            hours: f64,
        },
        /// Add a sales person earning a commission on sales
        AddSales {
            #[command(flatten)]
            base: BaseArgs,
            #[arg(long, allow_negative_numbers = true, value_parser = parse_finite)]
            wage: f64,
            #[arg(long, allow_negative_numbers = true, value_parser = parse_finite)]
            hours: f64,
            #[arg(long, default_value_t = 0.0, allow_negative_numbers = true, value_parser = parse_finite)]
            percent: f64,
            #[arg(long, default_value_t = 0.0, allow_negative_numbers = true, value_parser = parse_finite)]
            sales: f64,
        },
        /// Add a manager whose salary is scaled by a factor
        AddManager {
            #[command(flatten)]
            base: BaseArgs,
            #[arg(long, allow_negative_numbers = true, value_parser = parse_finite)]
            factor: f64,
        },
        /// Show one employee
        Get {
            #[arg(allow_negative_numbers = true)]
            id: i64,
        },
        /// Remove an employee
        Remove {
            #[arg(allow_negative_numbers = true)]
            id: i64,
        },
        /// Total salary of a department
        Budget { department: String },
        /// List departments with at least one member
        Departments,
        /// Managers sharing the highest factor
        TopManagers,
        /// List employees, optionally filtered
        List {
            #[arg(long, allow_negative_numbers = true)]
            min_salary: Option<f64>,
            #[arg(long, allow_negative_numbers = true)]
            max_salary: Option<f64>,
            #[arg(long)]
            department: Option<String>,
            /// Variant tag: Employee, WageEmployee, SalesPerson or Manager
            #[arg(long)]
            kind: Option<String>,
        },
        /// Write department budgets as CSV
        Report {
            #[arg(short, long)]
            output: Option<String>,
        },
    }

    impl Command {
        /// The employee an `add-*` command describes.
        pub fn employee(&self) -> Option<Employee> {
            match self {
                Command::AddEmployee(base) => Some(base.base().into()),
                Command::AddWage { base, wage, hours } => Some(
                    WageEmployee {
                        base: base.base(),
                        wage: *wage,
                        hours: *hours,
                    }
                    .into(),
                ),
                Command::AddSales {
                    base,
                    wage,
                    hours,
                    percent,
                    sales,
                } => Some(
                    SalesPerson {
                        wage_employee: WageEmployee {
                            base: base.base(),
                            wage: *wage,
                            hours: *hours,
                        },
                        percent: *percent,
                        sales: *sales,
                    }
                    .into(),
                ),
                Command::AddManager { base, factor } => Some(
                    Manager {
                        base: base.base(),
                        factor: *factor,
                    }
                    .into(),
                ),
                _ => None,
            }
        }

        /// Traversal filter for `list`; `None` means no filter.
        pub fn predicate(&self) -> Option<Predicate> {
            let Command::List {
                min_salary,
                max_salary,
                department,
                kind,
            } = self
            else {
                return None;
            };

            let mut predicates = Vec::new();
            if let Some(min) = min_salary {
                predicates.push(traversal::basic_salary_above(*min));
            }
            if let Some(max) = max_salary {
                predicates.push(traversal::basic_salary_below(*max));
            }
            if let Some(department) = department {
                predicates.push(traversal::in_department(department.clone()));
            }
            if let Some(kind) = kind {
                predicates.push(traversal::of_kind(kind.clone()));
            }

            if predicates.is_empty() {
                None
            } else {
                Some(traversal::all_of(predicates))
            }
        }

        pub fn is_mutation(&self) -> bool {
            self.employee().is_some() || matches!(self, Command::Remove { .. })
        }
    }

    /// Effective settings after command-line flags are applied on top of the config file.
    #[derive(Debug, Clone)]
    pub struct Settings {
        pub base_path: String,
        pub data_file: String,
        pub json_logs: bool,
        pub log_level: Option<String>,
        pub report_file: Option<String>,
    }

    impl CliConfig {
        pub fn resolve(&self) -> Result<Settings> {
            let file_config = match &self.config {
                Some(path) => RosterConfig::from_file(path)?,
                None => RosterConfig::default(),
            };
            file_config.validate()?;

            Ok(Settings {
                base_path: self
                    .data_dir
                    .clone()
                    .unwrap_or_else(|| file_config.base_path().to_string()),
                data_file: self
                    .data_file
                    .clone()
                    .unwrap_or_else(|| file_config.data_file().to_string()),
                json_logs: self.json_logs || file_config.json_logs(),
                log_level: file_config.log_level().map(str::to_string),
                report_file: file_config.report_file().map(str::to_string),
            })
        }
    }

    impl Default for Settings {
        fn default() -> Self {
            Self {
                base_path: super::toml_config::DEFAULT_BASE_PATH.to_string(),
                data_file: DEFAULT_DATA_FILE.to_string(),
                json_logs: false,
                log_level: None,
                report_file: None,
            }
        }
    }

    impl ConfigProvider for Settings {
        fn base_path(&self) -> &str {
            &self.base_path
        }

        fn data_file(&self) -> &str {
            &self.data_file
        }
    }

    impl Validate for Settings {
        fn validate(&self) -> Result<()> {
            validate_path("data_dir", &self.base_path)?;
            validate_path("data_file", &self.data_file)?;
            Ok(())
        }
    }

}
