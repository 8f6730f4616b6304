//! Report template shown in the report panel.
//!
//! The panel shows a generated report (table, chart placeholder) together
//! with filter parameters and a user-editable template name. Saving hands a
//! snapshot of the template to a [`ReportHook`]; what happens next is up to
//! the hook.

use serde::{Deserialize, Serialize};

use crate::error::{DeskError, Result};

/// Subject of the report generated for the reporting assistant.
pub const DEFAULT_REPORT_SUBJECT: &str = "Top 10 Customers - Last 6 months";

/// Starting value of every filter parameter.
pub const DEFAULT_PARAMETER_VALUE: u32 = 10;

/// A numeric filter control (`-` / value / `+`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterParameter {
    pub label: String,
    pub value: u32,
}

impl FilterParameter {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: DEFAULT_PARAMETER_VALUE,
        }
    }
}

/// Adjustment applied to a single filter parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterAdjustment {
    Increment,
    /// Never goes below zero.
    Decrement,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTemplate {
    pub subject: String,
    /// Name typed by the user before saving; empty until set.
    pub name: String,
    pub parameters: Vec<FilterParameter>,
    /// Parameter values as of the last `apply`.
    #[serde(default)]
    pub applied: Option<Vec<u32>>,
}

impl Default for ReportTemplate {
    fn default() -> Self {
        Self {
            subject: DEFAULT_REPORT_SUBJECT.to_string(),
            name: String::new(),
            parameters: vec![
                FilterParameter::new("Parameter 1"),
                FilterParameter::new("Parameter 2"),
            ],
            applied: None,
        }
    }
}

impl ReportTemplate {
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Adjusts the parameter at `index` and returns its new value.
    ///
    /// # Errors
    ///
    /// Returns `DeskError::NotFound` for an out-of-range index.
    pub fn adjust(&mut self, index: usize, adjustment: ParameterAdjustment) -> Result<u32> {
        let parameter = self
            .parameters
            .get_mut(index)
            .ok_or_else(|| DeskError::not_found("filter parameter", index.to_string()))?;
        parameter.value = match adjustment {
            ParameterAdjustment::Increment => parameter.value.saturating_add(1),
            ParameterAdjustment::Decrement => parameter.value.saturating_sub(1),
        };
        Ok(parameter.value)
    }

    /// Puts every parameter back to its starting value.
    pub fn reset_filters(&mut self) {
        for parameter in &mut self.parameters {
            parameter.value = DEFAULT_PARAMETER_VALUE;
        }
    }

    /// Records the current parameter values as applied and returns them.
    pub fn apply_filters(&mut self) -> Vec<u32> {
        let values: Vec<u32> = self.parameters.iter().map(|p| p.value).collect();
        self.applied = Some(values.clone());
        tracing::info!(?values, "report filters applied");
        values
    }
}

/// Callback point for the report panel's terminal actions.
///
/// The session calls these with a snapshot of the template. Neither call
/// has a result contract; implementations log or persist as they see fit.
#[async_trait::async_trait]
pub trait ReportHook: Send + Sync {
    async fn on_save(&self, template: &ReportTemplate);

    async fn on_discard(&self, template: &ReportTemplate);
}

/// Hook that only logs the action.
#[derive(Debug, Default, Clone)]
pub struct LoggingReportHook;

#[async_trait::async_trait]
impl ReportHook for LoggingReportHook {
    async fn on_save(&self, template: &ReportTemplate) {
        tracing::info!(
            subject = %template.subject,
            name = %template.name,
            "report template saved"
        );
    }

    async fn on_discard(&self, template: &ReportTemplate) {
        tracing::info!(subject = %template.subject, "report template discarded");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template() {
        let template = ReportTemplate::default();
        assert_eq!(template.subject, DEFAULT_REPORT_SUBJECT);
        assert_eq!(template.parameters.len(), 2);
        assert!(template.parameters.iter().all(|p| p.value == 10));
    }

    #[test]
    fn test_decrement_floors_at_zero() {
        let mut template = ReportTemplate::default();
        for _ in 0..15 {
            template.adjust(0, ParameterAdjustment::Decrement).unwrap();
        }
        assert_eq!(template.parameters[0].value, 0);
        assert_eq!(template.adjust(0, ParameterAdjustment::Increment).unwrap(), 1);
    }

    #[test]
    fn test_adjust_out_of_range() {
        let mut template = ReportTemplate::default();
        let err = template.adjust(5, ParameterAdjustment::Increment).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_reset_and_apply() {
        let mut template = ReportTemplate::default();
        template.adjust(1, ParameterAdjustment::Increment).unwrap();
        assert_eq!(template.apply_filters(), vec![10, 11]);

        template.reset_filters();
        assert_eq!(template.parameters[1].value, 10);
        // Applied values are only updated by apply.
        assert_eq!(template.applied, Some(vec![10, 11]));
    }
}
