//! Raw material variability prediction and grinding adjustments

use super::{Flow, ResultRow};
use crate::state::{FieldDef, FieldValues, Schema};
use serde::Deserialize;

pub struct RawMaterials;

#[derive(Debug, Clone)]
pub struct RawMaterialsInput {
    pub sensor_data: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMaterialsOutput {
    pub variability_prediction: String,
    pub suggested_adjustments: String,
}

impl Flow for RawMaterials {
    type Input = RawMaterialsInput;
    type Output = RawMaterialsOutput;

    fn name(&self) -> &'static str {
        "raw_materials"
    }

    fn title(&self) -> &'static str {
        "Raw Material & Grinding Optimization"
    }

    fn blurb(&self) -> &'static str {
        "Ingest real-time feed data to predict variability, fine-tune grinding efficiency, and minimize energy losses."
    }

    fn schema(&self) -> Schema {
        Schema::new([FieldDef::textarea("sensor_data", "Real-time Sensor Data")
            .required()
            .default_value(
                "Limestone from Rajasthan quarry. Moisture: 8%, Particle Size: 95µm, SiO2: 12%, Mill Power: 3600kW, Throughput: 200 TPH",
            )])
    }

    fn build_input(&self, values: &FieldValues) -> Self::Input {
        RawMaterialsInput {
            sensor_data: values.text("sensor_data"),
        }
    }

    fn prompt(&self, input: &Self::Input) -> String {
        format!(
            "You are an expert in cement manufacturing processes, specializing in raw material \
             handling and grinding.\n\n\
             Based on the real-time sensor data provided, predict the variability in the raw \
             material feed and suggest adjustments for grinding efficiency to minimize energy \
             losses.\n\n\
             Sensor Data: {}\n\n\
             Consider the following factors when making your prediction and suggesting \
             adjustments:\n\
             - Moisture content\n\
             - Particle size distribution\n\
             - Chemical composition\n\
             - Grinding mill performance\n\n\
             Provide a detailed variability prediction and specific, actionable adjustments for \
             the grinding process parameters.",
            input.sensor_data,
        )
    }

    fn output_shape(&self) -> &'static str {
        r#"{"variabilityPrediction": string, "suggestedAdjustments": string}"#
    }

    fn present(&self, output: &Self::Output) -> Vec<ResultRow> {
        vec![
            ResultRow::new("Variability Prediction", output.variability_prediction.clone()),
            ResultRow::new(
                "Suggested Adjustments for Grinding",
                output.suggested_adjustments.clone(),
            ),
        ]
    }
}
