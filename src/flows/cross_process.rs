//! Cross-process plant-wide optimization

use super::{Flow, ResultRow};
use crate::state::{FieldDef, FieldValues, Schema};
use serde::Deserialize;

pub struct CrossProcess;

#[derive(Debug, Clone)]
pub struct CrossProcessInput {
    pub raw_material_data: String,
    pub clinker_data: String,
    pub utilities_data: String,
    pub optimization_goals: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossProcessOutput {
    pub insights: String,
    pub recommendations: String,
}

impl Flow for CrossProcess {
    type Input = CrossProcessInput;
    type Output = CrossProcessOutput;

    fn name(&self) -> &'static str {
        "cross_process"
    }

    fn title(&self) -> &'static str {
        "Cross-Process Optimization"
    }

    fn blurb(&self) -> &'static str {
        "Fuse siloed data streams into a unified AI layer for holistic decision-making across the plant."
    }

    fn schema(&self) -> Schema {
        Schema::new([
            FieldDef::textarea("raw_material_data", "Raw Material Data")
                .required()
                .default_value(
                    "Limestone feed rate: 250 t/h, Moisture: 5%, Fineness: 88% passing 90 micron sieve.",
                ),
            FieldDef::textarea("clinker_data", "Clinker Data")
                .required()
                .default_value("Kiln production: 210 t/h, Free lime: 1.2%, LSF: 98, C3S: 62%."),
            FieldDef::textarea("utilities_data", "Utilities Data")
                .required()
                .default_value("Total plant power draw: 25 MW, Cooler fan power: 1.5 MW."),
            FieldDef::textarea("optimization_goals", "Optimization Goals")
                .required()
                .default_value(
                    "Reduce specific energy consumption by 5%, reduce CO2 footprint by 3%, and increase usage of agricultural waste as fuel.",
                ),
        ])
    }

    fn build_input(&self, values: &FieldValues) -> Self::Input {
        CrossProcessInput {
            raw_material_data: values.text("raw_material_data"),
            clinker_data: values.text("clinker_data"),
            utilities_data: values.text("utilities_data"),
            optimization_goals: values.text("optimization_goals"),
        }
    }

    fn prompt(&self, input: &Self::Input) -> String {
        format!(
            "You are an expert in optimizing cement plant operations. You will receive data \
             from various siloed streams in the plant, including raw material feed, clinker \
             production, and plant utilities.\n\n\
             Your goal is to provide AI-driven insights and actionable recommendations for \
             holistic decision-making across the entire cement plant operation, considering the \
             specified optimization goals.\n\n\
             Raw Material Data: {}\n\
             Clinker Data: {}\n\
             Utilities Data: {}\n\
             Optimization Goals: {}\n\n\
             Based on this information, provide insights and recommendations to optimize the \
             cement plant operation.\n\
             Make sure the output is well structured, human readable and actionable.",
            input.raw_material_data,
            input.clinker_data,
            input.utilities_data,
            input.optimization_goals,
        )
    }

    fn output_shape(&self) -> &'static str {
        r#"{"insights": string, "recommendations": string}"#
    }

    fn present(&self, output: &Self::Output) -> Vec<ResultRow> {
        vec![
            ResultRow::new("AI-Driven Insights", output.insights.clone()),
            ResultRow::new("Actionable Recommendations", output.recommendations.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_shape_into_input() {
        let flow = CrossProcess;
        let schema = flow.schema();
        let values = schema.validate(&schema.defaults()).unwrap();
        let input = flow.build_input(&values);
        assert!(input.raw_material_data.contains("250 t/h"));
        assert!(input.clinker_data.contains("Free lime: 1.2%"));
    }

    #[test]
    fn test_prompt_interpolates_every_field() {
        let flow = CrossProcess;
        let prompt = flow.prompt(&CrossProcessInput {
            raw_material_data: "[rm]".to_string(),
            clinker_data: "[ck]".to_string(),
            utilities_data: "[ut]".to_string(),
            optimization_goals: "[og]".to_string(),
        });
        assert!(prompt.contains("Raw Material Data: [rm]"));
        assert!(prompt.contains("Clinker Data: [ck]"));
        assert!(prompt.contains("Utilities Data: [ut]"));
        assert!(prompt.contains("Optimization Goals: [og]"));
    }

    #[test]
    fn test_reply_deserializes_and_presents() {
        let flow = CrossProcess;
        let output: CrossProcessOutput = serde_json::from_str(
            r#"{
                "insights": "Raw mill moisture is driving kiln fuel overconsumption.",
                "recommendations": "Dry limestone stockpile before feeding and retune the cooler fans."
            }"#,
        )
        .unwrap();
        let rows = flow.present(&output);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].label, "AI-Driven Insights");
        assert_eq!(rows[1].label, "Actionable Recommendations");
    }
}
