//! Topic catalogue shown to the student.
//!
//! Topics only steer what the student is nudged to ask; they are never sent
//! to the model.

use serde::{Deserialize, Serialize};

/// A study topic with an example question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    /// General Biology.
    #[default]
    GeneralBiology,
    /// Cell Biology & Medical Lab Science.
    CellBiology,
    /// Genetics & Medical Genetics.
    Genetics,
    /// Human Anatomy & Physiology.
    AnatomyPhysiology,
    /// Microbiology & Infectious Disease.
    Microbiology,
    /// Biochemistry & Pharmacology.
    Biochemistry,
    /// Neurobiology & Neuroscience.
    Neurobiology,
    /// Immunology & Disease.
    Immunology,
    /// Biotechnology & Medical Innovation.
    Biotechnology,
    /// Clinical Applications.
    ClinicalApplications,
}

impl Topic {
    /// Every topic in display order.
    pub const ALL: [Topic; 10] = [
        Topic::GeneralBiology,
        Topic::CellBiology,
        Topic::Genetics,
        Topic::AnatomyPhysiology,
        Topic::Microbiology,
        Topic::Biochemistry,
        Topic::Neurobiology,
        Topic::Immunology,
        Topic::Biotechnology,
        Topic::ClinicalApplications,
    ];

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Topic::GeneralBiology => "General Biology",
            Topic::CellBiology => "Cell Biology & Medical Lab Science",
            Topic::Genetics => "Genetics & Medical Genetics",
            Topic::AnatomyPhysiology => "Human Anatomy & Physiology",
            Topic::Microbiology => "Microbiology & Infectious Disease",
            Topic::Biochemistry => "Biochemistry & Pharmacology",
            Topic::Neurobiology => "Neurobiology & Neuroscience",
            Topic::Immunology => "Immunology & Disease",
            Topic::Biotechnology => "Biotechnology & Medical Innovation",
            Topic::ClinicalApplications => "Clinical Applications",
        }
    }

    /// Short keyword accepted by `/topic`.
    pub fn slug(self) -> &'static str {
        match self {
            Topic::GeneralBiology => "general",
            Topic::CellBiology => "cell",
            Topic::Genetics => "genetics",
            Topic::AnatomyPhysiology => "anatomy",
            Topic::Microbiology => "micro",
            Topic::Biochemistry => "biochem",
            Topic::Neurobiology => "neuro",
            Topic::Immunology => "immuno",
            Topic::Biotechnology => "biotech",
            Topic::ClinicalApplications => "clinical",
        }
    }

    /// Question offered by `/example`.
    pub fn example_question(self) -> &'static str {
        match self {
            Topic::GeneralBiology => "How do cells protect themselves from damage, and how is this relevant in diseases like cancer?",
            Topic::CellBiology => "How do doctors use cell biology knowledge when interpreting blood tests?",
            Topic::Genetics => "How do genetic mutations lead to diseases, and how are they treated?",
            Topic::AnatomyPhysiology => "What happens in the body during a heart attack, and how do treatments work?",
            Topic::Microbiology => "How do antibiotics work, and why is antibiotic resistance a problem?",
            Topic::Biochemistry => "How do pain medications work at the molecular level?",
            Topic::Neurobiology => "What happens in the brain during a seizure, and how do medications help?",
            Topic::Immunology => "How does our immune system fight off viruses, and why do vaccines help?",
            Topic::Biotechnology => "How is CRISPR being used to treat genetic diseases?",
            Topic::ClinicalApplications => "How do doctors use laboratory tests to diagnose diseases?",
        }
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Topic {
    type Err = String;

    /// Accepts a slug, a 1-based index, or the full display name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        if let Ok(index) = needle.parse::<usize>() {
            return index
                .checked_sub(1)
                .and_then(|i| Topic::ALL.get(i).copied())
                .ok_or_else(|| format!("No topic number {}", index));
        }
        Topic::ALL
            .iter()
            .copied()
            .find(|t| t.slug() == needle || t.name().to_lowercase() == needle)
            .ok_or_else(|| format!("Unknown topic: {}", s.trim()))
    }
}
