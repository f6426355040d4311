use crate::config::Command;
use crate::core::company::Company;
use crate::core::persistence::to_record;
use crate::core::{report, ConfigProvider, Salaried, Storage};
use crate::domain::model::Employee;
use crate::utils::error::{Result, RosterError};

/// One CLI invocation: restore the roster, apply a command, save it back if it changed.
pub struct RosterSession<S: Storage, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) config: C,
}

impl<S: Storage, C: ConfigProvider> RosterSession<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    pub async fn load(&self) -> Result<Company> {
        let mut company = Company::new();
        company
            .restore(&self.storage, self.config.data_file())
            .await?;
        Ok(company)
    }

    /// Runs `command` and returns the text to print.
    pub async fn run(&self, command: &Command) -> Result<String> {
        let mut company = self.load().await?;

        let output = match command {
            Command::Get { id } => match company.get(*id) {
                Some(employee) => describe(employee)?,
                None => format!("employee {} not found", id),
            },
            Command::Remove { id } => {
                let removed = company.remove(*id)?;
                format!("Removed {}", describe(&removed)?)
            }
            Command::Budget { department } => {
                report::format_amount(company.department_budget(department))
            }
            Command::Departments => company.departments().join("\n"),
            Command::TopManagers => company
                .managers_with_top_factor()
                .into_iter()
                .map(describe)
                .collect::<Result<Vec<_>>>()?
                .join("\n"),
            Command::List { .. } => {
                company.set_predicate(command.predicate());
                company
                    .iter()
                    .map(describe)
                    .collect::<Result<Vec<_>>>()?
                    .join("\n")
            }
            Command::Report { output } => {
                let csv = report::to_csv(&report::department_summaries(&company))?;
                match output {
                    Some(path) => {
                        self.storage.write_file(path, csv.as_bytes()).await?;
                        format!("Report written to {}", path)
                    }
                    None => csv,
                }
            }
            add => {
                let employee = add.employee().ok_or_else(|| RosterError::ConfigError {
                    message: format!("Unsupported command: {:?}", add),
                })?;
                let line = format!("Added {}", describe(&employee)?);
                company.add(employee)?;
                line
            }
        };

        if command.is_mutation() {
            company
                .save(&self.storage, self.config.data_file())
                .await?;
        }

        Ok(output)
    }
}

fn describe(employee: &Employee) -> Result<String> {
    let mut record = to_record(employee)?;
    if let Some(fields) = record.as_object_mut() {
        fields.insert("salary".to_string(), employee.compute_salary().into());
    }
    Ok(record.to_string())
}
