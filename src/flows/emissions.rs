//! Emissions monitoring and forecasting

use super::{Flow, ResultRow};
use crate::state::{format_number, FieldDef, FieldValues, Schema};
use serde::Deserialize;

pub struct Emissions;

#[derive(Debug, Clone)]
pub struct EmissionsInput {
    pub kiln_temperature: f64,
    pub fuel_mix: String,
    pub raw_material_composition: String,
    pub oxygen_level: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmissionsOutput {
    #[serde(rename = "predictedNOx")]
    pub predicted_nox: f64,
    #[serde(rename = "predictedSOx")]
    pub predicted_sox: f64,
    #[serde(rename = "predictedCO2")]
    pub predicted_co2: f64,
    pub recommendations: String,
}

impl Flow for Emissions {
    type Input = EmissionsInput;
    type Output = EmissionsOutput;

    fn name(&self) -> &'static str {
        "emissions"
    }

    fn title(&self) -> &'static str {
        "Emissions Monitoring & Forecasting"
    }

    fn blurb(&self) -> &'static str {
        "Analyze operational parameters to predict and control plant emissions, ensuring environmental compliance."
    }

    fn schema(&self) -> Schema {
        Schema::new([
            FieldDef::number("kiln_temperature", "Kiln Temperature")
                .unit("°C")
                .required()
                .range(1300.0, 1600.0)
                .default_value("1460"),
            FieldDef::number("oxygen_level", "Oxygen Level")
                .unit("%")
                .required()
                .range(0.0, 10.0)
                .default_value("2.3"),
            FieldDef::text("fuel_mix", "Fuel Mix")
                .required()
                .default_value("75% Indian Coal, 25% RDF"),
            FieldDef::textarea("raw_material_composition", "Raw Material Composition")
                .required()
                .default_value("High-grade limestone. LSF: 97, SM: 2.4, AM: 1.6"),
        ])
    }

    fn build_input(&self, values: &FieldValues) -> Self::Input {
        EmissionsInput {
            kiln_temperature: values.number("kiln_temperature"),
            fuel_mix: values.text("fuel_mix"),
            raw_material_composition: values.text("raw_material_composition"),
            oxygen_level: values.number("oxygen_level"),
        }
    }

    fn prompt(&self, input: &Self::Input) -> String {
        format!(
            "You are an environmental engineer specializing in cement plant emissions \
             control.\n\n\
             Based on the following real-time operational data, predict the emission levels for \
             NOx, SOx, and CO2. Also, provide actionable recommendations to reduce these \
             emissions while maintaining operational efficiency.\n\n\
             - Kiln Temperature: {} °C\n\
             - Fuel Mix: {}\n\
             - Raw Material Composition: {}\n\
             - Oxygen Level: {}%\n\n\
             Your recommendations should be practical and focus on process adjustments, such as \
             modifying the fuel mix, adjusting kiln temperature, or altering the raw material \
             feed.",
            format_number(input.kiln_temperature),
            input.fuel_mix,
            input.raw_material_composition,
            format_number(input.oxygen_level),
        )
    }

    fn output_shape(&self) -> &'static str {
        r#"{"predictedNOx": number, "predictedSOx": number, "predictedCO2": number, "recommendations": string}"#
    }

    fn present(&self, output: &Self::Output) -> Vec<ResultRow> {
        vec![
            ResultRow::new(
                "Predicted NOx",
                format!("{} mg/Nm³", format_number(output.predicted_nox)),
            ),
            ResultRow::new(
                "Predicted SOx",
                format!("{} mg/Nm³", format_number(output.predicted_sox)),
            ),
            ResultRow::new(
                "Predicted CO₂",
                format!("{} kg/t", format_number(output.predicted_co2)),
            ),
            ResultRow::new("Recommendations", output.recommendations.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_shape_into_input() {
        let flow = Emissions;
        let schema = flow.schema();
        let values = schema.validate(&schema.defaults()).unwrap();
        let input = flow.build_input(&values);
        assert_eq!(input.kiln_temperature, 1460.0);
        assert_eq!(input.oxygen_level, 2.3);
        assert_eq!(input.fuel_mix, "75% Indian Coal, 25% RDF");
    }

    #[test]
    fn test_prompt_interpolates_every_field() {
        let flow = Emissions;
        let schema = flow.schema();
        let values = schema.validate(&schema.defaults()).unwrap();
        let prompt = flow.prompt(&flow.build_input(&values));
        assert!(prompt.contains("Kiln Temperature: 1460 °C"));
        assert!(prompt.contains("Fuel Mix: 75% Indian Coal, 25% RDF"));
        assert!(prompt.contains("LSF: 97"));
        assert!(prompt.contains("Oxygen Level: 2.3%"));
    }

    #[test]
    fn test_reply_deserializes_wire_names() {
        let output: EmissionsOutput = serde_json::from_str(
            r#"{
                "predictedNOx": 545,
                "predictedSOx": 160,
                "predictedCO2": 0.82,
                "recommendations": "Trim oxygen to 2.0% and shift 5% of coal to RDF."
            }"#,
        )
        .unwrap();
        assert_eq!(output.predicted_nox, 545.0);
        assert_eq!(output.predicted_co2, 0.82);
    }

    #[test]
    fn test_result_rows_carry_units() {
        let flow = Emissions;
        let rows = flow.present(&EmissionsOutput {
            predicted_nox: 545.0,
            predicted_sox: 160.0,
            predicted_co2: 0.82,
            recommendations: "Trim oxygen.".to_string(),
        });
        assert_eq!(rows[0], ResultRow::new("Predicted NOx", "545 mg/Nm³"));
        assert_eq!(rows[2], ResultRow::new("Predicted CO₂", "0.82 kg/t"));
    }
}
