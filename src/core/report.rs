use crate::core::company::Company;
use crate::utils::error::{Result, RosterError};
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentSummary {
    pub department: String,
    pub headcount: usize,
    #[serde(serialize_with = "serialize_amount")]
    pub budget: f64,
}

/// Shared text form of a money amount: whole numbers print without a trailing `.0`.
pub fn format_amount(value: f64) -> String {
    value.to_string()
}

fn serialize_amount<S: Serializer>(
    value: &f64,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(&format_amount(*value))
}

pub fn department_summaries(company: &Company) -> Vec<DepartmentSummary> {
    company
        .departments()
        .into_iter()
        .map(|department| DepartmentSummary {
            headcount: company.department_members(&department).len(),
            budget: company.department_budget(&department),
            department,
        })
        .collect()
}

pub fn to_csv(summaries: &[DepartmentSummary]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for summary in summaries {
        writer.serialize(summary)?;
    }
    // 沒有任何部門時仍輸出表頭
    if summaries.is_empty() {
        writer.write_record(["department", "headcount", "budget"])?;
    }

    let data = writer
        .into_inner()
        .map_err(|e| RosterError::IoError(e.into_error()))?;
    String::from_utf8(data).map_err(|e| RosterError::ConfigError {
        message: format!("Report is not valid UTF-8: {}", e),
    })
}
