//! Quality consistency assessment and corrections

use super::{Flow, ResultRow};
use crate::state::{FieldDef, FieldValues, Schema};
use serde::Deserialize;

pub struct Quality;

#[derive(Debug, Clone)]
pub struct QualityInput {
    pub input_data: String,
    pub product_specifications: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityOutput {
    pub quality_assessment: String,
    pub recommended_corrections: String,
}

impl Flow for Quality {
    type Input = QualityInput;
    type Output = QualityOutput;

    fn name(&self) -> &'static str {
        "quality"
    }

    fn title(&self) -> &'static str {
        "Quality Consistency Assurance"
    }

    fn blurb(&self) -> &'static str {
        "Use Generative AI to detect fluctuations in inputs and provide proactive quality corrections."
    }

    fn schema(&self) -> Schema {
        Schema::new([
            FieldDef::textarea("input_data", "Real-time Input Data")
                .required()
                .min_len(20)
                .default_value(
                    "Raw mill fineness: 92%, Kiln temp: 1455°C, Free lime: 1.1%, Cooler pressure: 5.2 mbar.",
                ),
            FieldDef::textarea("product_specifications", "Product Specifications")
                .required()
                .default_value(
                    "Targeting PPC grade cement. Target Blaine: 370 m2/kg, Target SO3: 2.7%, Fly Ash blend: 25%.",
                ),
        ])
    }

    fn build_input(&self, values: &FieldValues) -> Self::Input {
        QualityInput {
            input_data: values.text("input_data"),
            product_specifications: values.text("product_specifications"),
        }
    }

    fn prompt(&self, input: &Self::Input) -> String {
        format!(
            "You are an expert quality control engineer in a cement manufacturing plant.\n\n\
             You will use real-time input data from plant sensors and desired product \
             specifications to assess the current product quality and provide proactive \
             corrections to maintain consistent product quality.\n\n\
             Input Data: {}\n\
             Product Specifications: {}\n\n\
             Based on the input data and product specifications, provide an assessment of the \
             current product quality and recommend corrections to maintain consistency.",
            input.input_data, input.product_specifications,
        )
    }

    fn output_shape(&self) -> &'static str {
        r#"{"qualityAssessment": string, "recommendedCorrections": string}"#
    }

    fn present(&self, output: &Self::Output) -> Vec<ResultRow> {
        vec![
            ResultRow::new("Quality Assessment", output.quality_assessment.clone()),
            ResultRow::new(
                "Recommended Corrections",
                output.recommended_corrections.clone(),
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
        let flow = Quality;
        let schema = flow.schema();
        let values = schema.validate(&schema.defaults()).unwrap();
        let input = flow.build_input(&values);
        assert!(input.input_data.contains("Free lime: 1.1%"));
        assert!(input.product_specifications.contains("PPC grade"));
    }

    #[test]
    fn test_too_short_input_data_rejected() {
        let schema = Quality.schema();
        let mut raw = schema.defaults();
        raw.insert("input_data", "Kiln ok".to_string());
        let errors = schema.validate(&raw).unwrap_err();
        assert_eq!(
            errors.get("input_data"),
            Some("Real-time Input Data must be at least 20 characters.")
        );
    }

    #[test]
    fn test_prompt_interpolates_both_fields() {
        let flow = Quality;
        let prompt = flow.prompt(&QualityInput {
            input_data: "[i]".to_string(),
            product_specifications: "[s]".to_string(),
        });
        assert!(prompt.contains("Input Data: [i]"));
        assert!(prompt.contains("Product Specifications: [s]"));
    }

    #[test]
    fn test_reply_deserializes_and_presents() {
        let flow = Quality;
        let output: QualityOutput = serde_json::from_str(
            r#"{
                "qualityAssessment": "Blaine trending 10 m2/kg below target.",
                "recommendedCorrections": "Increase separator speed by 2%."
            }"#,
        )
        .unwrap();
        let rows = flow.present(&output);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].label, "Recommended Corrections");
    }
}
