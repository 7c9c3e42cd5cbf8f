//! Predictive maintenance for plant machinery

use super::{group_thousands, Flow, ResultRow};
use crate::state::{format_number, FieldDef, FieldValues, Schema, DATE_FORMAT};
use chrono::NaiveDate;
use serde::Deserialize;

pub struct Maintenance;

/// Machinery registered for condition monitoring
const MACHINES: &[&str] = &["VRM-02", "Kiln-01", "Ball Mill-03", "Crusher-01", "Cooler-05"];

#[derive(Debug, Clone)]
pub struct MaintenanceInput {
    pub machine_id: String,
    pub vibration_level: f64,
    pub temperature: f64,
    pub operating_hours: f64,
    pub last_service_date: NaiveDate,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceOutput {
    pub maintenance_required: bool,
    pub predicted_failure_time: f64,
    pub recommendations: String,
}

impl Flow for Maintenance {
    type Input = MaintenanceInput;
    type Output = MaintenanceOutput;

    fn name(&self) -> &'static str {
        "maintenance"
    }

    fn title(&self) -> &'static str {
        "Predictive Maintenance"
    }

    fn blurb(&self) -> &'static str {
        "Analyze machinery data to predict failures and receive maintenance recommendations."
    }

    fn schema(&self) -> Schema {
        Schema::new([
            FieldDef::select("machine_id", "Machine ID", MACHINES).default_value("VRM-02"),
            FieldDef::number("vibration_level", "Vibration")
                .unit("mm/s")
                .required()
                .range(0.0, 50.0)
                .default_value("5.2"),
            FieldDef::number("temperature", "Temperature")
                .unit("°C")
                .required()
                .range(-20.0, 400.0)
                .default_value("85"),
            FieldDef::number("operating_hours", "Operating Hours")
                .required()
                .range(0.0, 100000.0)
                .default_value("4200"),
            FieldDef::date("last_service_date", "Last Service Date")
                .required()
                .default_value("2024-02-10"),
        ])
    }

    fn build_input(&self, values: &FieldValues) -> Self::Input {
        MaintenanceInput {
            machine_id: values.text("machine_id"),
            vibration_level: values.number("vibration_level"),
            temperature: values.number("temperature"),
            operating_hours: values.number("operating_hours"),
            last_service_date: values.date("last_service_date"),
        }
    }

    fn prompt(&self, input: &Self::Input) -> String {
        format!(
            "You are a predictive maintenance expert for heavy machinery in a cement plant.\n\n\
             Based on the following data for machine {}, predict potential failures and \
             recommend maintenance actions.\n\n\
             - Vibration Level: {} mm/s\n\
             - Temperature: {} °C\n\
             - Operating Hours: {}\n\
             - Last Service Date: {}\n\n\
             Determine if immediate maintenance is required, predict the time until a potential \
             failure in operating hours, and provide specific, actionable maintenance \
             recommendations. The primary goal is to prevent unplanned downtime.",
            input.machine_id,
            format_number(input.vibration_level),
            format_number(input.temperature),
            format_number(input.operating_hours),
            input.last_service_date.format(DATE_FORMAT),
        )
    }

    fn output_shape(&self) -> &'static str {
        r#"{"maintenanceRequired": boolean, "predictedFailureTime": number, "recommendations": string}"#
    }

    fn present(&self, output: &Self::Output) -> Vec<ResultRow> {
        vec![
            ResultRow::new(
                "Immediate Maintenance Required",
                if output.maintenance_required { "Yes" } else { "No" },
            ),
            ResultRow::new(
                "Predicted Time to Failure",
                format!("{} hours", group_thousands(output.predicted_failure_time)),
            ),
            ResultRow::new(
                "Maintenance Recommendations",
                output.recommendations.clone(),
            ),
        ]
    }
}
