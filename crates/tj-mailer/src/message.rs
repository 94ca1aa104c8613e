//! The outbound email contract.
//!
//! Field names are part of the wire format consumed by the email
//! provider integration and must not drift; the serde renames below
//! pin them.

use serde::{Deserialize, Serialize};

/// Email urgency. Derived from the alert's priority by the caller
/// ("alta" maps to [`AlertType::Urgent`], everything else to
/// [`AlertType::Warning`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertType {
    /// Advance notice; yellow subject line.
    Warning,
    /// Due today, overdue, or high priority; red subject line.
    Urgent,
}

/// Criterion reference embedded in the email payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionRef {
    /// Criterion id.
    pub id: String,
    /// Criterion display name.
    pub nome: String,
    /// Owning department.
    pub secretaria: String,
}

/// Recipient user reference embedded in the email payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRef {
    /// User id.
    pub id: String,
    /// User display name.
    pub name: String,
}

/// One outbound email request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailRequest {
    /// Recipient address.
    pub to: String,
    /// Subject line; see [`subject_for`].
    pub subject: String,
    /// Urgency class.
    pub alert_type: AlertType,
    /// The criterion the alert is about.
    pub criterio: CriterionRef,
    /// The recipient user.
    pub usuario: UserRef,
    /// Due date, already formatted `DD/MM/YYYY`. Absent for alerts
    /// with no deadline context.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

impl EmailRequest {
    /// Build a request with the standard subject line for `alert_type`.
    pub fn new(
        to: impl Into<String>,
        alert_type: AlertType,
        criterio: CriterionRef,
        usuario: UserRef,
        due_date: Option<String>,
    ) -> Self {
        let subject = subject_for(alert_type, &criterio.nome);
        Self {
            to: to.into(),
            subject,
            alert_type,
            criterio,
            usuario,
            due_date,
        }
    }
}

/// The standard subject line for an alert email.
pub fn subject_for(alert_type: AlertType, criterion_name: &str) -> String {
    match alert_type {
        AlertType::Urgent => format!("🔴 URGENTE: {criterion_name} - TranspJardim"),
        AlertType::Warning => format!("🟡 AVISO: {criterion_name} - TranspJardim"),
    }
}
