//! Registration-form leads: validation and the chat message built from them.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid"));

/// A filled-in registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    /// Pricing plan the visitor clicked through from, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadField {
    Name,
    Email,
    Phone,
    Company,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Issue {
    Required,
    InvalidEmail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: LeadField,
    pub issue: Issue,
}

/// Every problem found in a lead, in form order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} invalid field(s): {}", .issues.len(), Summary(&.issues))]
pub struct InvalidLead {
    pub issues: Vec<FieldIssue>,
}

impl InvalidLead {
    pub fn issue_for(&self, field: LeadField) -> Option<Issue> {
        self.issues
            .iter()
            .find(|found| found.field == field)
            .map(|found| found.issue)
    }
}

struct Summary<'a>(&'a [FieldIssue]);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, found) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }

            write!(f, "{:?} {:?}", found.field, found.issue)?;
        }

        Ok(())
    }
}

impl Lead {
    pub fn validate(&self) -> Result<(), InvalidLead> {
        let mut issues = Vec::new();

        let required = [
            (LeadField::Name, &self.name),
            (LeadField::Email, &self.email),
            (LeadField::Phone, &self.phone),
            (LeadField::Company, &self.company),
        ];

        for (field, value) in required {
            if value.trim().is_empty() {
                issues.push(FieldIssue {
                    field,
                    issue: Issue::Required,
                });
            } else if field == LeadField::Email && !EMAIL.is_match(value) {
                issues.push(FieldIssue {
                    field,
                    issue: Issue::InvalidEmail,
                });
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(InvalidLead { issues })
        }
    }

    /// Chat message announcing this lead, in Telegram's HTML dialect.
    pub fn format_message(&self) -> String {
        let mut message = String::from("<b>New registration</b>\n");

        let mut line = |label: &str, value: &str| {
            message.push_str(&format!("<b>{label}:</b> {}\n", escape_html(value.trim())));
        };

        line("Name", &self.name);
        line("Email", &self.email);
        line("Phone", &self.phone);
        line("Company", &self.company);

        if let Some(plan) = self.plan.as_deref().filter(|plan| !plan.trim().is_empty()) {
            line("Plan", plan);
        }

        message.truncate(message.trim_end().len());
        message
    }
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());

    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }

    escaped
}
