use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

pub type EmployeeId = i64;

/// Employee as listed by the employee directory. Read-only here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    #[serde(default)]
    pub token_number: String,
    /// Amount paid for one standard 8-hour shift.
    #[serde(default)]
    pub shift_rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_date: Option<NaiveDate>,
}

impl Employee {
    pub fn new(id: EmployeeId, name: &str, token_number: &str, shift_rate: f64) -> Self {
        Self {
            id,
            name: name.to_owned(),
            token_number: token_number.to_owned(),
            shift_rate,
            department: None,
            join_date: None,
        }
    }

    pub fn with_department(mut self, department: &str) -> Self {
        self.department = Some(department.to_owned());
        self
    }

    pub fn in_department(&self, department: &str) -> bool {
        self.department.as_deref().is_some_and(|d| d.trim().eq_ignore_ascii_case(department.trim()))
    }
}

/// Department filter applied to a roster before any aggregation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepartmentFilter(Option<String>);

impl DepartmentFilter {
    pub fn new(department: Option<&str>) -> Self {
        Self(department.map(str::trim).filter(|d| !d.is_empty() && !d.eq_ignore_ascii_case("all")).map(str::to_owned))
    }

    pub fn department(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Keeps the matching employees, ordered by token number then name.
    pub fn apply(&self, employees: Vec<Employee>) -> Vec<Employee> {
        let mut roster: Vec<Employee> = match &self.0 {
            Some(department) => employees.into_iter().filter(|e| e.in_department(department)).collect(),
            None => employees,
        };
        roster.sort_by(|a, b| a.token_number.cmp(&b.token_number).then_with(|| a.name.cmp(&b.name)));
        roster
    }

    pub fn label(&self) -> String {
        match &self.0 {
            Some(department) => department.clone(),
            None => "All departments".to_string(),
        }
    }

    /// Filename-safe form of the label.
    ///
    /// Letters and digits of any script are kept and every other run of
    /// characters becomes a single `-`. When that loses anything beyond
    /// case and single spaces, a short digest of the name is appended so two
    /// departments never share a file name.
    pub fn slug(&self) -> String {
        let Some(department) = &self.0 else {
            return "all-departments".to_string();
        };

        let key = department.trim().to_lowercase();
        let words: Vec<&str> = key.split(|c: char| !is_slug_char(c)).filter(|word| !word.is_empty()).collect();

        if words.join(" ") == key {
            return words.join("-");
        }

        let digest = hex::encode(&Sha256::digest(key.as_bytes())[..4]);
        if words.is_empty() {
            format!("department-{digest}")
        } else {
            format!("{}-{digest}", words.join("-"))
        }
    }
}

/// Letters and digits of any script, with the combining marks that
/// complete them in scripts such as Tamil.
fn is_slug_char(c: char) -> bool {
    c.is_alphanumeric() || (!c.is_ascii() && !c.is_whitespace() && !c.is_control())
}
