//! Cost-optimized cement mix design

use super::{format_currency, Flow, ResultRow};
use crate::state::{format_number, FieldDef, FieldValues, Schema};
use serde::Deserialize;

const DEFAULT_MATERIALS: &str = r#"[
  {"name": "Limestone", "cost": 150, "composition": {"CaO": 52, "SiO2": 4, "Al2O3": 1.5, "Fe2O3": 0.5}},
  {"name": "Clay", "cost": 80, "composition": {"CaO": 5, "SiO2": 58, "Al2O3": 18, "Fe2O3": 8}},
  {"name": "Fly Ash (Class F)", "cost": 50, "composition": {"SiO2": 55, "Al2O3": 25, "Fe2O3": 10}},
  {"name": "Gypsum", "cost": 200, "composition": {"CaO": 32, "SO3": 46}}
]"#;

pub struct MixDesign;

#[derive(Debug, Clone)]
pub struct MixDesignInput {
    pub available_materials: String,
    pub performance_targets: String,
    pub production_constraints: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MixComponent {
    pub material: String,
    pub percentage: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MixDesignOutput {
    pub recommended_mix: Vec<MixComponent>,
    pub estimated_cost: f64,
    pub predicted_performance: String,
    pub rationale: String,
}

impl Flow for MixDesign {
    type Input = MixDesignInput;
    type Output = MixDesignOutput;

    fn name(&self) -> &'static str {
        "mix_design"
    }

    fn title(&self) -> &'static str {
        "Cement Mix Design Optimizer"
    }

    fn blurb(&self) -> &'static str {
        "Design the most cost-effective cement mix that meets performance targets based on available raw materials."
    }

    fn schema(&self) -> Schema {
        Schema::new([
            FieldDef::textarea("available_materials", "Available Raw Materials (JSON)")
                .required()
                .default_value(DEFAULT_MATERIALS),
            FieldDef::textarea("performance_targets", "Performance Targets")
                .required()
                .default_value(
                    "OPC 53 Grade. Target 28-day compressive strength > 53 MPa. Initial setting time > 30 mins, final setting time < 600 mins.",
                ),
            FieldDef::textarea("production_constraints", "Production Constraints")
                .required()
                .default_value(
                    "Maximum Fly Ash content cannot exceed 25% by mass. Grinding mill has a capacity of 250 TPH.",
                ),
        ])
    }

    fn build_input(&self, values: &FieldValues) -> Self::Input {
        MixDesignInput {
            available_materials: values.text("available_materials"),
            performance_targets: values.text("performance_targets"),
            production_constraints: values.text("production_constraints"),
        }
    }

    fn prompt(&self, input: &Self::Input) -> String {
        format!(
            "You are an expert material scientist specializing in cement chemistry and concrete \
             technology. Your task is to design the most cost-effective cement mix that meets \
             specific performance targets, given a set of available raw materials and production \
             constraints.\n\n\
             Analyze the following information:\n\
             - Available Raw Materials (JSON): {}\n\
             - Performance Targets: {}\n\
             - Production Constraints: {}\n\n\
             Based on your analysis, provide the optimal mix proportions, the estimated cost per \
             ton, a prediction of the final product's performance, and a clear rationale for \
             your recommendation.",
            input.available_materials, input.performance_targets, input.production_constraints,
        )
    }

    fn output_shape(&self) -> &'static str {
        r#"{"recommendedMix": [{"material": string, "percentage": number}], "estimatedCost": number, "predictedPerformance": string, "rationale": string}"#
    }

    fn present(&self, output: &Self::Output) -> Vec<ResultRow> {
        let mut rows: Vec<ResultRow> = output
            .recommended_mix
            .iter()
            .map(|c| ResultRow::new(c.material.clone(), format!("{}%", format_number(c.percentage))))
            .collect();
        rows.push(ResultRow::new(
            "Estimated Cost",
            format!("{}/ton", format_currency(output.estimated_cost)),
        ));
        rows.push(ResultRow::new(
            "Predicted Performance",
            output.predicted_performance.clone(),
        ));
        rows.push(ResultRow::new("Rationale", output.rationale.clone()));
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_shape_into_input() {
        let flow = MixDesign;
        let schema = flow.schema();
        let values = schema.validate(&schema.defaults()).unwrap();
        let input = flow.build_input(&values);
        assert!(input.available_materials.contains("Fly Ash (Class F)"));
        assert!(input.performance_targets.contains("OPC 53 Grade"));
    }

    #[test]
    fn test_prompt_interpolates_every_field() {
        let flow = MixDesign;
        let prompt = flow.prompt(&MixDesignInput {
            available_materials: "[m]".to_string(),
            performance_targets: "[t]".to_string(),
            production_constraints: "[c]".to_string(),
        });
        assert!(prompt.contains("Available Raw Materials (JSON): [m]"));
        assert!(prompt.contains("Performance Targets: [t]"));
        assert!(prompt.contains("Production Constraints: [c]"));
    }

    #[test]
    fn test_reply_deserializes() {
        let output: MixDesignOutput = serde_json::from_str(
            r#"{
                "recommendedMix": [
                    {"material": "Limestone", "percentage": 62},
                    {"material": "Clay", "percentage": 14},
                    {"material": "Fly Ash (Class F)", "percentage": 20},
                    {"material": "Gypsum", "percentage": 4}
                ],
                "estimatedCost": 132.5,
                "predictedPerformance": "Expected 28-day strength of 54.5 MPa.",
                "rationale": "Fly ash held at 20% to stay inside the constraint."
            }"#,
        )
        .unwrap();
        assert_eq!(output.recommended_mix.len(), 4);
        assert_eq!(output.recommended_mix[2].percentage, 20.0);
    }

    #[test]
    fn test_result_rows_list_mix_then_summary() {
        let flow = MixDesign;
        let rows = flow.present(&MixDesignOutput {
            recommended_mix: vec![
                MixComponent {
                    material: "Limestone".to_string(),
                    percentage: 62.0,
                },
                MixComponent {
                    material: "Gypsum".to_string(),
                    percentage: 4.0,
                },
            ],
            estimated_cost: 132.0,
            predicted_performance: "54 MPa".to_string(),
            rationale: "Cheapest feasible blend.".to_string(),
        });
        assert_eq!(rows[0], ResultRow::new("Limestone", "62%"));
        assert_eq!(rows[1], ResultRow::new("Gypsum", "4%"));
        assert_eq!(rows[2], ResultRow::new("Estimated Cost", "₹132/ton"));
        assert_eq!(rows.len(), 5);
    }
}
