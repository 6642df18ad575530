//! The generic error screen reached on server faults and lost connectivity.

use reqwest::Url;
use smp_client::ErrorParams;
use smp_core::Severity;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorScreen {
    pub params: ErrorParams,
}

impl ErrorScreen {
    /// Build from the current location (path + query).
    pub fn from_location(location: &str) -> Self {
        Self {
            params: ErrorParams::from_location(location),
        }
    }

    pub fn title(&self) -> &'static str {
        match self.params.severity {
            Severity::Error => "Something went wrong",
            Severity::Warning => "Attention required",
            Severity::Info => "Information",
            Severity::Success => "Done",
        }
    }

    /// Message to show; a generic one when the query carried none.
    pub fn message(&self) -> &str {
        match self.params.message.trim() {
            "" => "An unexpected error occurred. Please try again later.",
            m => m,
        }
    }

    /// `mailto:` link with subject and body prefilled from the error.
    pub fn contact_support_link(&self, support_email: &str) -> String {
        let subject = format!("SMP error {}", self.params.code);
        let body = format!(
            "Hello,\n\nI ran into the following error:\n\n{}\n",
            self.debug_log(None)
        );

        let Ok(mut url) = Url::parse(&format!("mailto:{support_email}")) else {
            return format!("mailto:{support_email}");
        };
        url.query_pairs_mut()
            .append_pair("subject", &subject)
            .append_pair("body", &body);
        // Mail clients do not decode '+' as a space; a literal '+' is already %2B.
        url.to_string().replace('+', "%20")
    }

    /// Multi-line block for the "copy debug log" action.
    pub fn debug_log(&self, location: Option<&str>) -> String {
        let mut lines = vec![
            format!("Code: {}", self.params.code),
            format!("Severity: {}", self.params.severity),
            format!("Message: {}", self.message()),
            format!(
                "Timestamp: {}",
                self.params.timestamp.as_deref().unwrap_or("unknown")
            ),
        ];
        if let Some(location) = location {
            lines.push(format!("Location: {location}"));
        }
        lines.join("\n")
    }
}
