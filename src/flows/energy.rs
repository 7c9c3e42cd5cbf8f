//! Plant utilities energy prediction and logistics optimization

use super::{group_thousands, Flow, ResultRow};
use crate::state::{FieldDef, FieldValues, Schema};
use serde::Deserialize;

pub struct Energy;

#[derive(Debug, Clone)]
pub struct EnergyInput {
    pub utility_data: String,
    pub logistics_data: String,
    pub production_schedule: String,
    pub environmental_conditions: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyOutput {
    pub predicted_consumption: f64,
    pub optimization_recommendations: String,
    pub confidence_level: f64,
}

impl Flow for Energy {
    type Input = EnergyInput;
    type Output = EnergyOutput;

    fn name(&self) -> &'static str {
        "energy"
    }

    fn title(&self) -> &'static str {
        "Plant Utilities & Material Handling"
    }

    fn blurb(&self) -> &'static str {
        "Predict and minimize energy consumption in utilities and optimize internal logistics flows."
    }

    fn schema(&self) -> Schema {
        Schema::new([
            FieldDef::textarea("utility_data", "Utility Data")
                .required()
                .default_value(
                    "Grid draw: 28 MW (peak hours). Water consumption for cooling: 140 m3/hr.",
                ),
            FieldDef::textarea("logistics_data", "Logistics Data")
                .required()
                .default_value(
                    "7 trucks on limestone route. Waiting time at crusher: 15 mins. Diesel consumption: 5 km/litre.",
                ),
            FieldDef::textarea("production_schedule", "Production Schedule")
                .required()
                .default_value(
                    "Planned shutdown for Mill-2 in 4 hours. Running at 98% capacity until then.",
                ),
            FieldDef::textarea("environmental_conditions", "Environmental Conditions")
                .required()
                .default_value("Pre-monsoon season. Ambient temp: 38°C, Humidity: 75%."),
        ])
    }

    fn build_input(&self, values: &FieldValues) -> Self::Input {
        EnergyInput {
            utility_data: values.text("utility_data"),
            logistics_data: values.text("logistics_data"),
            production_schedule: values.text("production_schedule"),
            environmental_conditions: values.text("environmental_conditions"),
        }
    }

    fn prompt(&self, input: &Self::Input) -> String {
        format!(
            "You are an expert in energy management and logistics optimization for cement \
             plants.\n\n\
             Analyze the provided data to predict energy consumption and provide actionable \
             recommendations for optimization.\n\n\
             Utility Data: {}\n\
             Logistics Data: {}\n\
             Production Schedule: {}\n\
             Environmental Conditions: {}\n\n\
             Based on this information, predict the energy consumption for the next hour and \
             provide specific recommendations to minimize energy use and optimize logistics.\n\n\
             Ensure that the optimization recommendations are practical and can be implemented \
             in a real-world cement plant setting.\n\
             Also, provide a confidence level (0-1) for your prediction and recommendations.",
            input.utility_data,
            input.logistics_data,
            input.production_schedule,
            input.environmental_conditions,
        )
    }

    fn output_shape(&self) -> &'static str {
        r#"{"predictedConsumption": number, "optimizationRecommendations": string, "confidenceLevel": number}"#
    }

    fn present(&self, output: &Self::Output) -> Vec<ResultRow> {
        vec![
            ResultRow::new(
                "Predicted Consumption",
                format!("{} kWh", group_thousands(output.predicted_consumption)),
            ),
            ResultRow::new(
                "Confidence Level",
                format!("{:.0}%", output.confidence_level * 100.0),
            ),
            ResultRow::new(
                "Optimization Recommendations",
                output.optimization_recommendations.clone(),
            ),
        ]
    }
}
