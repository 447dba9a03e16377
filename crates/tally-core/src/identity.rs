//! Who is asking: mapping an external user id onto the employee and admin
//! tables.

use serde::{Deserialize, Serialize};

use crate::record::{Admin, Employee};

/// The role a user id resolves to.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
  Admin,
  Employee,
  Unknown,
}

/// Resolve `user_id`. Admin membership wins over an employee row with the
/// same id. Ids are compared as exact strings; an empty id is always
/// unknown.
pub fn role_of(admins: &[Admin], employees: &[Employee], user_id: &str) -> Role {
  if user_id.is_empty() {
    Role::Unknown
  } else if admins.iter().any(|a| a.id == user_id) {
    Role::Admin
  } else if employees.iter().any(|e| e.id == user_id) {
    Role::Employee
  } else {
    Role::Unknown
  }
}

/// The display name of the first employee row with `user_id`.
pub fn employee_name<'a>(employees: &'a [Employee], user_id: &str) -> Option<&'a str> {
  if user_id.is_empty() {
    return None;
  }
  employees
    .iter()
    .find(|e| e.id == user_id)
    .and_then(|e| e.name.as_deref())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn employees() -> Vec<Employee> {
    vec![
      Employee { id: "100".into(), name: Some("Ann".into()) },
      Employee { id: "200".into(), name: None },
      Employee { id: "100".into(), name: Some("Ann Again".into()) },
      Employee { id: "7".into(), name: Some("Boss".into()) },
    ]
  }

  fn admins() -> Vec<Admin> { vec![Admin { id: "7".into() }] }

  #[test]
  fn admin_takes_precedence() {
    assert_eq!(role_of(&admins(), &employees(), "7"), Role::Admin);
  }

  #[test]
  fn employee_and_unknown() {
    assert_eq!(role_of(&admins(), &employees(), "100"), Role::Employee);
    assert_eq!(role_of(&admins(), &employees(), "200"), Role::Employee);
    assert_eq!(role_of(&admins(), &employees(), "300"), Role::Unknown);
    assert_eq!(role_of(&admins(), &employees(), " 100"), Role::Unknown);
  }

  #[test]
  fn blank_id_rows_never_match() {
    let mut employees = employees();
    employees.push(Employee { id: String::new(), name: Some("Ghost".into()) });
    assert_eq!(role_of(&admins(), &employees, ""), Role::Unknown);
    assert_eq!(employee_name(&employees, ""), None);
  }

  #[test]
  fn first_matching_row_names_the_employee() {
    assert_eq!(employee_name(&employees(), "100"), Some("Ann"));
    assert_eq!(employee_name(&employees(), "200"), None);
    assert_eq!(employee_name(&employees(), "300"), None);
  }

  #[test]
  fn role_serialises_lowercase() {
    assert_eq!(Role::Admin.to_string(), "admin");
    assert_eq!(serde_json::to_string(&Role::Unknown).unwrap(), "\"unknown\"");
  }
}
