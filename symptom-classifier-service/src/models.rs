use serde::{Deserialize, Serialize};
use std::fmt;

/// Triage bucket assigned to a symptom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "General")]
    General,
    #[serde(rename = "Emergency")]
    Emergency,
    #[serde(rename = "Mental Health")]
    MentalHealth,
}

impl Category {
    /// Map raw classifier text onto a category.
    ///
    /// Matching is a case-insensitive substring test checked in the order
    /// general, emergency, mental. The first hit wins; text matching none of
    /// them falls back to `General`.
    pub fn route(raw: &str) -> Self {
        let lowered = raw.to_lowercase();
        if lowered.contains("general") {
            Category::General
        } else if lowered.contains("emergency") {
            Category::Emergency
        } else if lowered.contains("mental") {
            Category::MentalHealth
        } else {
            Category::General
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::General => "General",
            Category::Emergency => "Emergency",
            Category::MentalHealth => "Mental Health",
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            Category::General => "Visit General Ward",
            Category::Emergency => "Emergency Room - Immediate Attention Required",
            Category::MentalHealth => "Mental Health Counseling",
        }
    }

    pub fn urgency(&self) -> Urgency {
        match self {
            Category::General => Urgency::Low,
            Category::Emergency => Urgency::Critical,
            Category::MentalHealth => Urgency::Medium,
        }
    }

    pub fn answer_for(&self, symptom: &str) -> String {
        match self {
            Category::General => format!(
                "'{}' seems general. We're directing you to the general ward for consultation with a doctor.",
                symptom
            ),
            Category::Emergency => format!(
                "'{}' indicates a medical emergency. Please seek immediate medical help!",
                symptom
            ),
            Category::MentalHealth => format!(
                "'{}' seems like a mental health issue. We recommend speaking with our counselor.",
                symptom
            ),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Urgency {
    Low,
    Medium,
    Critical,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Low => "Low",
            Urgency::Medium => "Medium",
            Urgency::Critical => "Critical",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State threaded through the triage workflow, one per request
#[derive(Debug, Clone, Default)]
pub struct TriageState {
    pub symptom: String,
    /// Trimmed model output, before routing
    pub classifier_output: Option<String>,
    pub category: Option<Category>,
    pub answer: Option<String>,
    pub recommendation: Option<String>,
    pub urgency: Option<Urgency>,
}

impl TriageState {
    pub fn new(symptom: impl Into<String>) -> Self {
        Self {
            symptom: symptom.into(),
            ..Default::default()
        }
    }

    /// Whether the workflow reached a terminal node
    pub fn is_resolved(&self) -> bool {
        self.category.is_some()
            && self.answer.is_some()
            && self.recommendation.is_some()
            && self.urgency.is_some()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClassifyRequest {
    #[serde(default)]
    pub symptom: Option<String>,
}

/// Final projection of a completed workflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub symptom: String,
    pub category: Category,
    pub answer: String,
    pub recommendation: String,
    pub urgency: Urgency,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClassificationResponse {
    #[serde(flatten)]
    pub classification: Classification,
    pub hospital: String,
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub hospital: String,
}
