//! Safety hazard identification and mitigation

use super::{Flow, ResultRow};
use crate::state::{format_number, FieldDef, FieldValues, Schema};
use serde::Deserialize;
use std::fmt;

pub struct Safety;

#[derive(Debug, Clone)]
pub struct SafetyInput {
    pub incident_reports: String,
    pub operational_context: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::Critical => "Critical",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifiedHazard {
    pub hazard: String,
    pub risk_level: RiskLevel,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyOutput {
    pub identified_hazards: Vec<IdentifiedHazard>,
    pub mitigation_strategies: String,
    pub safety_score: f64,
}

impl Flow for Safety {
    type Input = SafetyInput;
    type Output = SafetyOutput;

    fn name(&self) -> &'static str {
        "safety"
    }

    fn title(&self) -> &'static str {
        "Safety Hazard Analysis"
    }

    fn blurb(&self) -> &'static str {
        "Proactively identify potential safety risks and receive mitigation strategies to prevent accidents."
    }

    fn schema(&self) -> Schema {
        Schema::new([
            FieldDef::textarea("incident_reports", "Incident Reports & Observations")
                .required()
                .default_value(
                    "Near-miss reported in VRM section: oil spill near the gearbox. Report of excessive dust near packing plant #2. Two workers reported slipping near the clinker cooler area last week, no injuries.",
                ),
            FieldDef::textarea("operational_context", "Current Operational Context")
                .required()
                .default_value(
                    "Annual shutdown of Kiln #1 is ongoing. A new team of contract workers has been deployed for cleanup activities in the raw mill section.",
                ),
        ])
    }

    fn build_input(&self, values: &FieldValues) -> Self::Input {
        SafetyInput {
            incident_reports: values.text("incident_reports"),
            operational_context: values.text("operational_context"),
        }
    }

    fn prompt(&self, input: &Self::Input) -> String {
        format!(
            "You are a certified safety officer with expertise in heavy industrial \
             environments, specifically cement manufacturing. Your task is to proactively \
             identify potential safety hazards and recommend mitigation strategies based on \
             incident reports and operational context.\n\n\
             Analyze the following information:\n\
             - Incident Reports & Observations: {}\n\
             - Operational Context: {}\n\n\
             Based on your analysis, identify a list of specific hazards and their risk level. \
             Then, provide concrete, actionable mitigation strategies to address these risks. \
             Finally, calculate an overall safety score for the plant based on the inputs.",
            input.incident_reports, input.operational_context,
        )
    }

    fn output_shape(&self) -> &'static str {
        r#"{"identifiedHazards": [{"hazard": string, "riskLevel": "Low" | "Medium" | "High" | "Critical"}], "mitigationStrategies": string, "safetyScore": number}"#
    }

    fn present(&self, output: &Self::Output) -> Vec<ResultRow> {
        let mut rows = vec![ResultRow::new(
            "Overall Safety Score",
            format!("{}/100", format_number(output.safety_score)),
        )];
        for hazard in &output.identified_hazards {
            rows.push(ResultRow::new(
                hazard.hazard.clone(),
                hazard.risk_level.to_string(),
            ));
        }
        rows.push(ResultRow::new(
            "Mitigation Strategies",
            output.mitigation_strategies.clone(),
        ));
        rows
    }
}
