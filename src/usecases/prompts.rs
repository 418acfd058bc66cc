//! Prompt text for the clinical assistant features.

use crate::domain::Patient;

/// Model used when the operator has not picked one.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Selectable assistant model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelOption {
    pub id: &'static str,
    pub name: &'static str,
    pub label: &'static str,
}

pub const MODELS: [ModelOption; 2] = [
    ModelOption {
        id: "gemini-2.5-flash",
        name: "Gemini 2.5 Flash",
        label: "Fast",
    },
    ModelOption {
        id: "gemini-3-pro-preview",
        name: "Gemini 3 Pro",
        label: "Smart",
    },
];

pub const GREETING: &str = "Hello, I am MedCore AI. I can assist you with symptom triage, analyzing patient notes, or finding drug interactions. How can I help you today?";

/// Canned demo prompts offered while the conversation is short.
pub const QUICK_PROMPTS: [&str; 3] = [
    "Triage: 45M, chest pain radiating to left arm, sweating.",
    "Draft discharge summary for viral pneumonia patient.",
    "Interactions between Warfarin and Aspirin?",
];

/// Prefix a free-form question with the selected patient's demographics.
pub fn with_patient_context(patient: &Patient, query: &str) -> String {
    format!(
        "Context: Patient {}, {}y, {}, Condition: {}.\n\nUser Query: {}",
        patient.full_name, patient.age, patient.gender, patient.condition, query
    )
}

pub fn triage(patient: &Patient, symptoms: &str) -> String {
    format!(
        r#"
      Act as an emergency triage nurse AI.
      Patient: {}, {} years old, {}.
      Known Condition: {}.
      Current Symptoms: "{}".

      Please provide:
      1. Triage Level (Red - Immediate / Yellow - Urgent / Green - Non-urgent)
      2. Top 3 Potential Diagnoses
      3. Recommended Next Steps for the nurse.

      Format the response clearly with bold headings.
    "#,
        patient.full_name, patient.age, patient.gender, patient.condition, symptoms
    )
}

pub fn drug_interactions(drugs: &[String]) -> String {
    format!(
        r#"
      Act as a clinical pharmacist.
      Analyze the interactions between the following drugs: {}.

      Provide a structured response with:
      1. Severity of Interaction (Major/Moderate/Minor)
      2. Mechanism of Interaction
      3. Clinical Management Recommendation
    "#,
        drugs.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::seed;

    #[test]
    fn test_patient_context_prefix() {
        let patient = &seed::patients()[0];
        let prompt = with_patient_context(patient, "Adjust meds?");
        assert_eq!(
            prompt,
            "Context: Patient Sarah Connor, 34y, Female, Condition: Hypertension.\n\nUser Query: Adjust meds?"
        );
    }

    #[test]
    fn test_triage_mentions_symptoms_and_levels() {
        let patient = &seed::patients()[1];
        let prompt = triage(patient, "dizzy, blurred vision");
        assert!(prompt.contains("Patient: John Doe, 45 years old, Male."));
        assert!(prompt.contains("Current Symptoms: \"dizzy, blurred vision\"."));
        assert!(prompt.contains("Red - Immediate"));
    }

    #[test]
    fn test_drug_prompt_lists_drugs() {
        let prompt = drug_interactions(&["Warfarin".into(), "Aspirin".into()]);
        assert!(prompt.contains("following drugs: Warfarin, Aspirin."));
    }

    #[test]
    fn test_default_model_is_first_option() {
        assert_eq!(MODELS[0].id, DEFAULT_MODEL);
    }
}
