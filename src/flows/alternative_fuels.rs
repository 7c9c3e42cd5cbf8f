//! Alternative fuel mix maximization

use super::{format_currency, Flow, ResultRow};
use crate::state::{format_number, FieldDef, FieldValues, Schema};
use serde::Deserialize;

pub struct AlternativeFuels;

#[derive(Debug, Clone)]
pub struct AlternativeFuelsInput {
    pub plant_data: String,
    pub fuel_options: String,
    pub production_goals: String,
    pub environmental_regulations: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlternativeFuelsOutput {
    pub optimized_fuel_mix: String,
    pub thermal_substitution_rate: f64,
    pub predicted_emissions: String,
    pub cost_savings: f64,
    pub rationale: String,
}

impl Flow for AlternativeFuels {
    type Input = AlternativeFuelsInput;
    type Output = AlternativeFuelsOutput;

    fn name(&self) -> &'static str {
        "alternative_fuels"
    }

    fn title(&self) -> &'static str {
        "Alternative Fuel Maximization"
    }

    fn blurb(&self) -> &'static str {
        "Model fuel combinations to optimize thermal substitution rates and reduce reliance on fossil fuels."
    }

    fn schema(&self) -> Schema {
        Schema::new([
            FieldDef::textarea("plant_data", "Plant Data")
                .required()
                .default_value(
                    "Current mix: 85% Petcoke, 15% Imported Coal. TSR: 12%. Energy consumption: 3.4 GJ/ton clinker.",
                ),
            FieldDef::textarea("fuel_options", "Fuel Options")
                .required()
                .default_value(
                    "Available: Rice husk (₹2500/ton), bagasse (₹2200/ton), municipal solid waste (MSW) RDF (₹1800/ton).",
                ),
            FieldDef::textarea("production_goals", "Production Goals")
                .required()
                .default_value("Clinker output: 6000 TPD. Quality: OPC 53 Grade."),
            FieldDef::textarea("environmental_regulations", "Environmental Regulations")
                .required()
                .default_value("CPCB norms: NOx < 600 mg/Nm3, SO2 < 200 mg/Nm3."),
        ])
    }

    fn build_input(&self, values: &FieldValues) -> Self::Input {
        AlternativeFuelsInput {
            plant_data: values.text("plant_data"),
            fuel_options: values.text("fuel_options"),
            production_goals: values.text("production_goals"),
            environmental_regulations: values.text("environmental_regulations"),
        }
    }

    fn prompt(&self, input: &Self::Input) -> String {
        format!(
            "You are an expert in cement plant operations, specializing in optimizing fuel \
             mixes for cost savings and environmental sustainability.\n\n\
             Based on the following information, determine the optimal mix of alternative fuels \
             to minimize costs and emissions while meeting production goals and environmental \
             regulations.\n\n\
             Plant Data: {}\n\
             Fuel Options: {}\n\
             Production Goals: {}\n\
             Environmental Regulations: {}\n\n\
             Provide the optimized fuel mix, the expected thermal substitution rate, predicted \
             emissions levels, estimated cost savings, and a rationale for your recommendation.\n\n\
             Ensure that the optimized fuel mix adheres to all environmental regulations and \
             emissions limits.",
            input.plant_data, input.fuel_options, input.production_goals, input.environmental_regulations,
        )
    }

    fn output_shape(&self) -> &'static str {
        r#"{"optimizedFuelMix": string, "thermalSubstitutionRate": number, "predictedEmissions": string, "costSavings": number, "rationale": string}"#
    }

    fn present(&self, output: &Self::Output) -> Vec<ResultRow> {
        vec![
            ResultRow::new("Optimized Fuel Mix", output.optimized_fuel_mix.clone()),
            ResultRow::new(
                "Thermal Substitution Rate",
                format!("{}%", format_number(output.thermal_substitution_rate)),
            ),
            ResultRow::new("Cost Savings", format_currency(output.cost_savings)),
            ResultRow::new("Predicted Emissions", output.predicted_emissions.clone()),
            ResultRow::new("Rationale", output.rationale.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_shape_into_input() {
        let flow = AlternativeFuels;
        let schema = flow.schema();
        let values = schema.validate(&schema.defaults()).unwrap();
        let input = flow.build_input(&values);
        assert!(input.plant_data.contains("TSR: 12%"));
        assert!(input.fuel_options.contains("Rice husk"));
    }

    #[test]
    fn test_prompt_interpolates_every_field() {
        let flow = AlternativeFuels;
        let prompt = flow.prompt(&AlternativeFuelsInput {
            plant_data: "[p]".to_string(),
            fuel_options: "[f]".to_string(),
            production_goals: "[g]".to_string(),
            environmental_regulations: "[r]".to_string(),
        });
        assert!(prompt.contains("Plant Data: [p]"));
        assert!(prompt.contains("Fuel Options: [f]"));
        assert!(prompt.contains("Production Goals: [g]"));
        assert!(prompt.contains("Environmental Regulations: [r]"));
    }

    #[test]
    fn test_reply_deserializes_and_presents() {
        let flow = AlternativeFuels;
        let output: AlternativeFuelsOutput = serde_json::from_str(
            r#"{
                "optimizedFuelMix": "70% Petcoke, 10% Coal, 12% RDF, 8% Rice husk",
                "thermalSubstitutionRate": 20,
                "predictedEmissions": "NOx 540 mg/Nm3, SO2 180 mg/Nm3",
                "costSavings": 1250000,
                "rationale": "RDF is the cheapest thermal substitute within CPCB limits."
            }"#,
        )
        .unwrap();
        let rows = flow.present(&output);
        assert_eq!(rows[1], ResultRow::new("Thermal Substitution Rate", "20%"));
        assert_eq!(rows[2], ResultRow::new("Cost Savings", "₹1,250,000"));
        assert_eq!(rows.len(), 5);
    }
}
