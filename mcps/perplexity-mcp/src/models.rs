//! Perplexity model catalog and keyword-based model selection
//!
//! Each model carries a list of intent keywords. A query is scored against
//! every model by counting how many of its keywords occur in the lower-cased
//! query text; the best-scoring model is recommended.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A Perplexity model identifier
///
/// Variants are declared in selection priority order: when two models score
/// the same for a query, the one declared first wins.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum ModelId {
    SonarDeepResearch,
    SonarReasoningPro,
    SonarReasoning,
    #[default]
    SonarPro,
    Sonar,
}

impl ModelId {
    /// All models, in priority order
    pub const ALL: [ModelId; 5] = [
        ModelId::SonarDeepResearch,
        ModelId::SonarReasoningPro,
        ModelId::SonarReasoning,
        ModelId::SonarPro,
        ModelId::Sonar,
    ];

    /// The identifier sent to the Perplexity API
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelId::SonarDeepResearch => "sonar-deep-research",
            ModelId::SonarReasoningPro => "sonar-reasoning-pro",
            ModelId::SonarReasoning => "sonar-reasoning",
            ModelId::SonarPro => "sonar-pro",
            ModelId::Sonar => "sonar",
        }
    }

    /// Intent keywords and description for this model
    pub fn criteria(&self) -> &'static ModelCriteria {
        match self {
            ModelId::SonarDeepResearch => &DEEP_RESEARCH,
            ModelId::SonarReasoningPro => &REASONING_PRO,
            ModelId::SonarReasoning => &REASONING,
            ModelId::SonarPro => &PRO,
            ModelId::Sonar => &SONAR,
        }
    }

    pub fn description(&self) -> &'static str {
        self.criteria().description
    }

    /// Comma-separated list of every valid identifier
    pub fn valid_names() -> String {
        Self::ALL
            .iter()
            .map(ModelId::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known model identifier
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid model '{name}'. Valid models are: {valid}")]
pub struct UnknownModel {
    pub name: String,
    pub valid: String,
}

impl FromStr for ModelId {
    type Err = UnknownModel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|model| model.as_str() == s)
            .ok_or_else(|| UnknownModel {
                name: s.to_string(),
                valid: Self::valid_names(),
            })
    }
}

/// Keywords that signal intent for a model, plus a human-readable summary
#[derive(Debug)]
pub struct ModelCriteria {
    pub keywords: &'static [&'static str],
    pub description: &'static str,
}

static DEEP_RESEARCH: ModelCriteria = ModelCriteria {
    keywords: &[
        "deep research",
        "comprehensive",
        "thorough",
        "detailed analysis",
        "expert",
        "in-depth",
    ],
    description: "specialized for extensive research and expert-level analysis across domains",
};

static REASONING_PRO: ModelCriteria = ModelCriteria {
    keywords: &[
        "reasoning",
        "logic",
        "solve",
        "mathematical",
        "technical",
        "complex problem",
        "figure out",
    ],
    description: "optimized for advanced logical reasoning and complex problem-solving",
};

static REASONING: ModelCriteria = ModelCriteria {
    keywords: &["reason", "think", "analyze", "deduce", "evaluate"],
    description: "designed for reasoning tasks with balanced performance",
};

static PRO: ModelCriteria = ModelCriteria {
    keywords: &[
        "search",
        "find",
        "lookup",
        "information",
        "facts",
        "details",
        "latest",
    ],
    description: "general-purpose model with excellent search capabilities and citation density",
};

static SONAR: ModelCriteria = ModelCriteria {
    keywords: &["quick", "simple", "basic", "brief", "short"],
    description: "fast and efficient for straightforward queries",
};

/// A model recommendation for a single query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelScore {
    pub model: ModelId,
    pub score: u32,
    pub description: &'static str,
}

/// Count the keywords of `criteria` contained in an already lower-cased query
fn keyword_hits(criteria: &ModelCriteria, lowercase_query: &str) -> u32 {
    criteria
        .keywords
        .iter()
        .filter(|keyword| lowercase_query.contains(&keyword.to_lowercase()))
        .count() as u32
}

/// Recommend a model for `query`
///
/// Returns `default` with a score of 0 when no keyword of any model matches.
pub fn select_model(query: &str, default: ModelId) -> ModelScore {
    let lowercase_query = query.to_lowercase();

    let mut best: Option<(ModelId, u32)> = None;
    for model in ModelId::ALL {
        let score = keyword_hits(model.criteria(), &lowercase_query);
        // Strict comparison keeps the earlier-declared model on ties
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((model, score));
        }
    }

    match best {
        Some((model, score)) if score > 0 => ModelScore {
            model,
            score,
            description: model.description(),
        },
        _ => ModelScore {
            model: default,
            score: 0,
            description: default.description(),
        },
    }
}
