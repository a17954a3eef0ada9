#[cfg(test)]
pub mod fixtures {
    /// Seven qualifying fact sentences plus one too short to use.
    pub const SOURCE_TEXT: &str = "Photosynthesis is the process by which green plants convert light energy into chemical energy. \
        Short one here. \
        The chlorophyll pigment absorbs mostly blue and red wavelengths of visible light. \
        During the light reactions, water molecules are split and oxygen is released as a byproduct. \
        The Calvin cycle uses carbon dioxide and stored energy to build simple sugars inside the chloroplast. \
        Stomata on the underside of leaves regulate gas exchange and water loss for the plant. \
        Jan Ingenhousz showed in 1779 that plants need sunlight to produce oxygen from their leaves. \
        Tropical rainforests account for a large share of the photosynthesis that happens on land.";

    /// Exactly two qualifying fact sentences.
    pub const TWO_FACT_TEXT: &str = "The Danube River flows through ten countries before reaching the Black Sea. \
        Vienna, Budapest and Belgrade are capital cities built along its banks over many centuries. \
        Short note.";

    /// Strict JSON with `count` questions; answers cycle A, B, C, D.
    pub fn json_questions(count: usize) -> String {
        let questions: Vec<serde_json::Value> = (1..=count)
            .map(|i| {
                serde_json::json!({
                    "question": format!("Question {}?", i),
                    "options": [
                        format!("Option {}-a", i),
                        format!("Option {}-b", i),
                        format!("Option {}-c", i),
                        format!("Option {}-d", i),
                    ],
                    "correct_answer": (["A", "B", "C", "D"][(i - 1) % 4]),
                })
            })
            .collect();
        serde_json::json!({ "questions": questions }).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::services::pipeline::synthesizer::extract_facts;

    #[test]
    fn test_fixture_fact_counts() {
        assert_eq!(extract_facts(SOURCE_TEXT).len(), 7);
        assert_eq!(extract_facts(TWO_FACT_TEXT).len(), 2);
    }

    #[test]
    fn test_fixture_json_questions_is_valid_json() {
        let value: serde_json::Value = serde_json::from_str(&json_questions(3)).unwrap();
        assert_eq!(value["questions"].as_array().unwrap().len(), 3);
        assert_eq!(value["questions"][2]["correct_answer"], "C");
    }
}
