//! Company directory commands for the CLI.
//!
//! Each command talks to the dashboard REST API and returns a result
//! with success/failure and a message to print.

use crate::directory::{ApiClient, ApiError, Company, NewCompany};

/// Result of command execution.
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub ok: bool,
    pub message: String,
}

impl CommandResult {
    fn success(message: String) -> Self {
        Self { ok: true, message }
    }

    fn failure(message: String) -> Self {
        Self { ok: false, message }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryCommand {
    Companies,
    Company { id: String },
    Cities,
    AddCompany { name: String, address: String },
}

/// Run `command` against the API at `base_url`.
pub fn run_directory_command(base_url: Option<&str>, command: &DirectoryCommand) -> CommandResult {
    let Some(base_url) = base_url.filter(|url| !url.trim().is_empty()) else {
        return CommandResult::failure(
            "No API configured. Set api.base_url or pass --api-url.".to_string(),
        );
    };
    let client = match ApiClient::new(base_url) {
        Ok(client) => client,
        Err(err) => return CommandResult::failure(err.to_string()),
    };
    match execute(&client, command) {
        Ok(message) => CommandResult::success(message),
        Err(err) => CommandResult::failure(err.to_string()),
    }
}

fn execute(client: &ApiClient, command: &DirectoryCommand) -> Result<String, ApiError> {
    match command {
        DirectoryCommand::Companies => Ok(company_table(&client.companies()?)),
        DirectoryCommand::Company { id } => Ok(company_detail(&client.company(id)?)),
        DirectoryCommand::Cities => Ok(client.cities()?.join("\n")),
        DirectoryCommand::AddCompany { name, address } => {
            let created = client.create_company(&NewCompany::new(name.as_str(), address.as_str()))?;
            Ok(format!("Created {}\n{}", created.id, company_detail(&created)))
        }
    }
}

fn company_table(companies: &[Company]) -> String {
    if companies.is_empty() {
        return "No companies.".to_string();
    }
    companies
        .iter()
        .map(|company| format!("{:<12} {:<6} {}", company.id, company.city, company.name))
        .collect::<Vec<_>>()
        .join("\n")
}

fn company_detail(company: &Company) -> String {
    serde_json::to_string_pretty(company).unwrap_or_else(|_| company.name.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn company(id: &str, name: &str, city: &str) -> Company {
        Company {
            id: id.to_string(),
            name: name.to_string(),
            address: String::new(),
            city: city.to_string(),
        }
    }

    #[test]
    fn missing_base_url_fails_without_request() {
        let result = run_directory_command(None, &DirectoryCommand::Companies);
        assert!(!result.ok);
        assert!(result.message.contains("api.base_url"));

        let result = run_directory_command(Some("  "), &DirectoryCommand::Cities);
        assert!(!result.ok);
    }

    #[test]
    fn unreachable_api_reports_failure() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);
        let result = run_directory_command(
            Some(&format!("http://{addr}")),
            &DirectoryCommand::Company {
                id: "company-1".to_string(),
            },
        );
        assert!(!result.ok);
        assert!(result.message.contains("company-1"));
    }

    #[test]
    fn table_lists_one_company_per_line() {
        let table = company_table(&[
            company("company-1", "GKL", "서울"),
            company("company-2", "부산시청", "부산"),
        ]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("company-1"));
        assert!(lines[1].ends_with("부산시청"));
        assert_eq!(company_table(&[]), "No companies.");
    }

    #[test]
    fn detail_is_pretty_json() {
        let detail = company_detail(&company("company-7", "GKL", "서울"));
        let value: serde_json::Value = serde_json::from_str(&detail).expect("json");
        assert_eq!(value["id"], "company-7");
        assert!(detail.contains('\n'));
    }
}
