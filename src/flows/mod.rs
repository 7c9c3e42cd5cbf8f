//! Optimization flows
//!
//! Each flow binds an input schema to a prompt and a typed JSON reply,
//! backing one console of the dashboard. Flows are thin and declarative;
//! dispatch, staleness filtering, and presentation state live in the
//! optimizer panel.

mod alternative_fuels;
mod clinkerization;
mod cross_process;
mod emissions;
mod energy;
mod forecasting;
mod maintenance;
mod mix_design;
mod quality;
mod raw_materials;
mod safety;
mod supply_chain;

pub use alternative_fuels::AlternativeFuels;
pub use clinkerization::Clinkerization;
pub use cross_process::CrossProcess;
pub use emissions::Emissions;
pub use energy::Energy;
pub use forecasting::Forecasting;
pub use maintenance::Maintenance;
pub use mix_design::MixDesign;
pub use quality::Quality;
pub use raw_materials::RawMaterials;
pub use safety::Safety;
pub use supply_chain::SupplyChain;

use crate::genai::{parse_reply, GenAiError, TextModel};
use crate::state::{FieldValues, Schema};
use async_trait::async_trait;
use serde::de::DeserializeOwned;

/// One label/value row of a rendered result
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub label: String,
    pub value: String,
}

impl ResultRow {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// A typed optimization flow.
///
/// Declares the input schema, shapes validated values into the input type,
/// formats the prompt, and presents the typed reply as label/value rows.
#[async_trait]
pub trait Flow: Send + Sync + 'static {
    type Input: Send + 'static;
    type Output: DeserializeOwned + Send + 'static;

    /// Stable identifier used in logs
    fn name(&self) -> &'static str;
    /// Console title
    fn title(&self) -> &'static str;
    /// One-line console description
    fn blurb(&self) -> &'static str;
    /// Input field schema with plant-realistic defaults
    fn schema(&self) -> Schema;
    /// Shape validated values into the flow input
    fn build_input(&self, values: &FieldValues) -> Self::Input;
    /// Natural-language prompt for one input
    fn prompt(&self, input: &Self::Input) -> String;
    /// Compact sketch of the JSON object the model must reply with
    fn output_shape(&self) -> &'static str;
    /// Present a reply as label/value rows
    fn present(&self, output: &Self::Output) -> Vec<ResultRow>;

    /// Run the flow once against a text model
    async fn run(&self, model: &dyn TextModel, input: Self::Input) -> Result<Self::Output, GenAiError> {
        let prompt = format!(
            "{}\n\nRespond with a single JSON object of the form:\n{}",
            self.prompt(&input),
            self.output_shape()
        );
        let reply = model.generate(&prompt).await?;
        parse_reply(&reply)
    }
}

/// Rupee amount with thousands separators, as the dashboard shows money
pub fn format_currency(amount: f64) -> String {
    format!("₹{}", group_thousands(amount))
}

/// Thousands-separated rendering of a numeric amount
pub fn group_thousands(amount: f64) -> String {
    let rounded = (amount * 100.0).round() / 100.0;
    let negative = rounded < 0.0;
    let magnitude = rounded.abs();
    let integer = magnitude.trunc() as u64;
    let fraction = magnitude.fract();

    let digits = integer.to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if fraction > 0.0 {
        let cents = format!("{fraction:.2}");
        out.push_str(cents.trim_start_matches('0'));
    }
    out
}
