//! Market demand forecasting and pricing recommendations

use super::{format_currency, group_thousands, Flow, ResultRow};
use crate::state::{FieldDef, FieldValues, Schema};
use serde::Deserialize;
use std::fmt;

pub struct Forecasting;

#[derive(Debug, Clone)]
pub struct ForecastingInput {
    pub historical_sales_data: String,
    pub competitor_pricing: String,
    pub economic_indicators: String,
    pub market_news: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Trend::Increasing => "Increasing",
            Trend::Decreasing => "Decreasing",
            Trend::Stable => "Stable",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionalDemand {
    pub region: String,
    pub predicted_demand: f64,
    pub trend: Trend,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingRecommendation {
    pub region: String,
    pub recommended_price: f64,
    pub strategy: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastingOutput {
    pub demand_forecast: Vec<RegionalDemand>,
    pub pricing_recommendations: Vec<PricingRecommendation>,
    pub market_opportunities: String,
}

impl Flow for Forecasting {
    type Input = ForecastingInput;
    type Output = ForecastingOutput;

    fn name(&self) -> &'static str {
        "forecasting"
    }

    fn title(&self) -> &'static str {
        "Market Demand & Pricing Forecaster"
    }

    fn blurb(&self) -> &'static str {
        "Analyze market data to forecast demand, recommend pricing, and identify new opportunities."
    }

    fn schema(&self) -> Schema {
        Schema::new([
            FieldDef::textarea("historical_sales_data", "Historical Sales Data")
                .required()
                .default_value(
                    "Last 2 years: North Region avg. 50k tons/month @ ₹4800/ton. South Region avg. 75k tons/month @ ₹5200/ton. Growth in South is 15% YoY.",
                ),
            FieldDef::textarea("competitor_pricing", "Competitor Pricing")
                .required()
                .default_value(
                    "Competitor A (North): ₹4750/ton. Competitor B (South): ₹5150/ton. New entrant C in West with aggressive pricing at ₹4600/ton.",
                ),
            FieldDef::textarea("economic_indicators", "Economic Indicators")
                .required()
                .default_value(
                    "National infrastructure budget increased by 20%. Real estate registrations up 12% in South region. Monsoon forecast is normal.",
                ),
            FieldDef::textarea("market_news", "Market News & Events")
                .required()
                .default_value(
                    "Government announced new highway project connecting North and West. Competitor A facing production issues at their primary plant.",
                ),
        ])
    }

    fn build_input(&self, values: &FieldValues) -> Self::Input {
        ForecastingInput {
            historical_sales_data: values.text("historical_sales_data"),
            competitor_pricing: values.text("competitor_pricing"),
            economic_indicators: values.text("economic_indicators"),
            market_news: values.text("market_news"),
        }
    }

    fn prompt(&self, input: &Self::Input) -> String {
        format!(
            "You are an expert market analyst specializing in the construction and commodities \
             sector, with a deep understanding of the cement industry. Your task is to forecast \
             market demand and recommend optimal pricing strategies.\n\n\
             Analyze the following data:\n\
             - Historical Sales Data: {}\n\
             - Competitor Pricing: {}\n\
             - Economic Indicators: {}\n\
             - Market News: {}\n\n\
             Based on your comprehensive analysis, provide:\n\
             1. A regional demand forecast for the next quarter.\n\
             2. Specific pricing recommendations for each key region.\n\
             3. A summary of any identified market opportunities.",
            input.historical_sales_data,
            input.competitor_pricing,
            input.economic_indicators,
            input.market_news,
        )
    }

    fn output_shape(&self) -> &'static str {
        r#"{"demandForecast": [{"region": string, "predictedDemand": number, "trend": "Increasing" | "Decreasing" | "Stable"}], "pricingRecommendations": [{"region": string, "recommendedPrice": number, "strategy": string}], "marketOpportunities": string}"#
    }

    fn present(&self, output: &Self::Output) -> Vec<ResultRow> {
        let mut rows = Vec::new();
        for demand in &output.demand_forecast {
            rows.push(ResultRow::new(
                format!("Demand: {}", demand.region),
                format!(
                    "{} tons ({})",
                    group_thousands(demand.predicted_demand),
                    demand.trend
                ),
            ));
        }
        for pricing in &output.pricing_recommendations {
            rows.push(ResultRow::new(
                format!("Price: {}", pricing.region),
                format!(
                    "{}/ton ({})",
                    format_currency(pricing.recommended_price),
                    pricing.strategy
                ),
            ));
        }
        rows.push(ResultRow::new(
            "Market Opportunities",
            output.market_opportunities.clone(),
        ));
        rows
    }
}
