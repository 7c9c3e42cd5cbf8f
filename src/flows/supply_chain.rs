//! Supply chain sourcing and distribution optimization

use super::{format_currency, Flow, ResultRow};
use crate::state::{FieldDef, FieldValues, Schema};
use serde::Deserialize;

pub struct SupplyChain;

#[derive(Debug, Clone)]
pub struct SupplyChainInput {
    pub inbound_logistics: String,
    pub outbound_logistics: String,
    pub inventory_levels: String,
    pub demand_forecast: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplyChainOutput {
    pub sourcing_recommendations: String,
    pub distribution_strategy: String,
    pub inventory_adjustments: String,
    pub estimated_cost_savings: f64,
}

impl Flow for SupplyChain {
    type Input = SupplyChainInput;
    type Output = SupplyChainOutput;

    fn name(&self) -> &'static str {
        "supply_chain"
    }

    fn title(&self) -> &'static str {
        "Supply Chain Optimization"
    }

    fn blurb(&self) -> &'static str {
        "Analyze logistics data to find the most cost-effective sourcing and distribution strategies."
    }

    fn schema(&self) -> Schema {
        Schema::new([
            FieldDef::textarea("inbound_logistics", "Inbound Logistics")
                .required()
                .default_value(
                    "Limestone from local quarry (20km, ₹150/ton freight). Coal from Indonesia (sea freight, $12/ton).",
                ),
            FieldDef::textarea("outbound_logistics", "Outbound Logistics")
                .required()
                .default_value(
                    "Primary markets: Delhi (500km, ₹1200/ton), Mumbai (1200km, ₹2200/ton). Average truck capacity: 30 tons.",
                ),
            FieldDef::textarea("inventory_levels", "Inventory Levels")
                .required()
                .default_value(
                    "Clinker: 50,000 tons. OPC Cement: 15,000 tons. PPC Cement: 25,000 tons. Coal: 30,000 tons.",
                ),
            FieldDef::textarea("demand_forecast", "Demand Forecast")
                .required()
                .default_value(
                    "Next quarter demand expected to rise by 15% in the Delhi region due to new infrastructure projects.",
                ),
        ])
    }

    fn build_input(&self, values: &FieldValues) -> Self::Input {
        SupplyChainInput {
            inbound_logistics: values.text("inbound_logistics"),
            outbound_logistics: values.text("outbound_logistics"),
            inventory_levels: values.text("inventory_levels"),
            demand_forecast: values.text("demand_forecast"),
        }
    }

    fn prompt(&self, input: &Self::Input) -> String {
        format!(
            "You are a supply chain and logistics expert specializing in the cement industry. \
             Your goal is to analyze the provided data to recommend the most cost-effective and \
             efficient strategies for raw material sourcing and finished product \
             distribution.\n\n\
             Analyze the following logistics and market data:\n\
             - Inbound Logistics: {}\n\
             - Outbound Logistics: {}\n\
             - Inventory Levels: {}\n\
             - Demand Forecast: {}\n\n\
             Based on this data, provide actionable recommendations for sourcing, distribution, \
             and inventory management. Conclude with an estimated total monthly cost saving.",
            input.inbound_logistics,
            input.outbound_logistics,
            input.inventory_levels,
            input.demand_forecast,
        )
    }

    fn output_shape(&self) -> &'static str {
        r#"{"sourcingRecommendations": string, "distributionStrategy": string, "inventoryAdjustments": string, "estimatedCostSavings": number}"#
    }

    fn present(&self, output: &Self::Output) -> Vec<ResultRow> {
        vec![
            ResultRow::new(
                "Estimated Monthly Savings",
                format_currency(output.estimated_cost_savings),
            ),
            ResultRow::new(
                "Sourcing Recommendations",
                output.sourcing_recommendations.clone(),
            ),
            ResultRow::new(
                "Distribution Strategy",
                output.distribution_strategy.clone(),
            ),
            ResultRow::new(
                "Inventory Adjustments",
                output.inventory_adjustments.clone(),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_shape_into_input() {
        let flow = SupplyChain;
        let schema = flow.schema();
        let values = schema.validate(&schema.defaults()).unwrap();
        let input = flow.build_input(&values);
        assert!(input.inbound_logistics.contains("local quarry"));
        assert!(input.inventory_levels.contains("Clinker: 50,000 tons"));
    }

    #[test]
    fn test_prompt_interpolates_every_field() {
        let flow = SupplyChain;
        let prompt = flow.prompt(&SupplyChainInput {
            inbound_logistics: "[in]".to_string(),
            outbound_logistics: "[out]".to_string(),
            inventory_levels: "[inv]".to_string(),
            demand_forecast: "[d]".to_string(),
        });
        assert!(prompt.contains("Inbound Logistics: [in]"));
        assert!(prompt.contains("Outbound Logistics: [out]"));
        assert!(prompt.contains("Inventory Levels: [inv]"));
        assert!(prompt.contains("Demand Forecast: [d]"));
    }

    #[test]
    fn test_reply_presents_savings_first() {
        let flow = SupplyChain;
        let output: SupplyChainOutput = serde_json::from_str(
            r#"{
                "sourcingRecommendations": "Shift 20% of coal volume to the domestic supplier.",
                "distributionStrategy": "Rail for Mumbai, trucks for Delhi.",
                "inventoryAdjustments": "Draw clinker stock down to 40,000 tons.",
                "estimatedCostSavings": 2400000
            }"#,
        )
        .unwrap();
        let rows = flow.present(&output);
        assert_eq!(rows[0], ResultRow::new("Estimated Monthly Savings", "₹2,400,000"));
        assert_eq!(rows.len(), 4);
    }
}
