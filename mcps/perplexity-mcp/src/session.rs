//! Session state: search filters plus model selection
//!
//! One `SearchSession` exists per server instance. It decides which model a
//! search runs with and holds the filters that shape the request.

use crate::filters::FilterState;
use crate::models::{select_model, ModelId};

/// Which model is in use and whether it may change per query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSelectionState {
    current: ModelId,
    auto_selection: bool,
    default: ModelId,
}

/// The model a single search runs with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedModel {
    pub model: ModelId,
    pub description: String,
    /// True when a strong keyword match overrode a pinned model
    pub overridden: bool,
}

/// Minimum score required to override a pinned model
pub const OVERRIDE_THRESHOLD: u32 = 2;

impl ModelSelectionState {
    pub fn new(default: ModelId) -> Self {
        Self {
            current: default,
            auto_selection: true,
            default,
        }
    }

    pub fn current(&self) -> ModelId {
        self.current
    }

    pub fn default_model(&self) -> ModelId {
        self.default
    }

    pub fn auto_selection(&self) -> bool {
        self.auto_selection
    }

    /// Pin `model` and turn auto-selection off
    pub fn pin(&mut self, model: ModelId) {
        self.current = model;
        self.auto_selection = false;
    }

    /// Return to the configured default with auto-selection on
    pub fn reset(&mut self) {
        self.current = self.default;
        self.auto_selection = true;
    }

    /// Pick the model for `query`
    ///
    /// In auto mode the recommendation is adopted and becomes the current
    /// model. With a pinned model the pin holds unless the recommendation
    /// scores at least [`OVERRIDE_THRESHOLD`]; such an override applies to
    /// this call only.
    pub fn resolve(&mut self, query: &str) -> ResolvedModel {
        let selection = select_model(query, self.default);

        if self.auto_selection {
            self.current = selection.model;
            return ResolvedModel {
                model: selection.model,
                description: selection.description.to_string(),
                overridden: false,
            };
        }

        if selection.score >= OVERRIDE_THRESHOLD && selection.model != self.current {
            tracing::info!(
                pinned = %self.current,
                selected = %selection.model,
                score = selection.score,
                "Overriding pinned model due to strong intent match"
            );
            return ResolvedModel {
                model: selection.model,
                description: format!(
                    "{} (auto-selected based on query intent)",
                    selection.description
                ),
                overridden: true,
            };
        }

        ResolvedModel {
            model: self.current,
            description: self.current.description().to_string(),
            overridden: false,
        }
    }
}

/// All mutable state owned by one MCP session
#[derive(Debug, Clone)]
pub struct SearchSession {
    pub filters: FilterState,
    pub models: ModelSelectionState,
}

impl SearchSession {
    pub fn new(default_model: ModelId) -> Self {
        Self {
            filters: FilterState::new(),
            models: ModelSelectionState::new(default_model),
        }
    }

    /// Text returned by `model_info`
    ///
    /// `pinned` is true when the call set a specific model.
    pub fn model_report(&self, pinned: bool) -> String {
        let mut lines: Vec<String> = Vec::new();

        if pinned {
            lines.push(format!("Model has been set to: {}", self.models.current()));
            lines.push(
                "Auto-selection: DISABLED (will only switch if query has strong intent matching)"
                    .to_string(),
            );
            lines.push("To re-enable auto-selection, run model_info with no parameters".to_string());
        } else {
            lines.push(format!(
                "Current model: {} (reset to default)",
                self.models.current()
            ));
            lines.push(format!(
                "Default model (from configuration): {}",
                self.models.default_model()
            ));
            lines.push(
                "Auto-selection: ENABLED (model will be selected based on query keywords)"
                    .to_string(),
            );
        }
        lines.push(String::new());

        lines.push("Available models:".to_string());
        for model in ModelId::ALL {
            let criteria = model.criteria();
            lines.push(format!("- {}: {}", model, criteria.description));
            lines.push(format!("  Keywords: {}", criteria.keywords.join(", ")));
        }

        lines.push(String::new());
        lines.push("To use automatic model selection: Call this tool with no parameters".to_string());
        lines.push("To set a specific model: Use this tool with the \"model\" parameter".to_string());

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_auto_on_default() {
        let state = ModelSelectionState::new(ModelId::SonarPro);
        assert_eq!(state.current(), ModelId::SonarPro);
        assert!(state.auto_selection());
    }

    #[test]
    fn test_auto_mode_adopts_recommendation() {
        let mut state = ModelSelectionState::new(ModelId::SonarPro);

        let resolved = state.resolve("quick question");
        assert_eq!(resolved.model, ModelId::Sonar);
        assert!(!resolved.overridden);
        assert_eq!(state.current(), ModelId::Sonar);

        // Zero score falls back to the default, not the previous model
        let resolved = state.resolve("weather in paris");
        assert_eq!(resolved.model, ModelId::SonarPro);
        assert_eq!(state.current(), ModelId::SonarPro);
    }

    #[test]
    fn test_pinned_model_survives_weak_match() {
        let mut state = ModelSelectionState::new(ModelId::SonarPro);
        state.pin(ModelId::Sonar);

        let resolved = state.resolve("weather in paris");
        assert_eq!(resolved.model, ModelId::Sonar);
        assert_eq!(resolved.description, ModelId::Sonar.description());

        // A single keyword is below the override threshold
        let resolved = state.resolve("think about it");
        assert_eq!(resolved.model, ModelId::Sonar);
        assert!(!resolved.overridden);
    }

    #[test]
    fn test_strong_match_overrides_pin_for_one_call() {
        let mut state = ModelSelectionState::new(ModelId::SonarPro);
        state.pin(ModelId::Sonar);

        let resolved = state.resolve("analyze and evaluate this");
        assert_eq!(resolved.model, ModelId::SonarReasoning);
        assert!(resolved.overridden);
        assert!(resolved
            .description
            .ends_with("(auto-selected based on query intent)"));

        assert_eq!(state.current(), ModelId::Sonar);
        assert!(!state.auto_selection());

        let resolved = state.resolve("weather in paris");
        assert_eq!(resolved.model, ModelId::Sonar);
    }

    #[test]
    fn test_strong_match_for_pinned_model_is_not_an_override() {
        let mut state = ModelSelectionState::new(ModelId::SonarPro);
        state.pin(ModelId::Sonar);

        let resolved = state.resolve("quick and simple");
        assert_eq!(resolved.model, ModelId::Sonar);
        assert!(!resolved.overridden);
        assert_eq!(resolved.description, ModelId::Sonar.description());
    }

    #[test]
    fn test_reset_restores_default_and_auto() {
        let mut state = ModelSelectionState::new(ModelId::SonarReasoning);
        state.pin(ModelId::SonarDeepResearch);
        state.reset();

        assert_eq!(state.current(), ModelId::SonarReasoning);
        assert!(state.auto_selection());
    }

    #[test]
    fn test_model_report_pinned() {
        let mut session = SearchSession::new(ModelId::SonarPro);
        session.models.pin(ModelId::Sonar);

        let report = session.model_report(true);
        assert!(report.starts_with("Model has been set to: sonar\n"));
        assert!(report.contains("Auto-selection: DISABLED"));
        assert!(report.contains("- sonar-deep-research: specialized for extensive research"));
        assert!(report.contains("  Keywords: quick, simple, basic, brief, short"));
    }

    #[test]
    fn test_model_report_reset() {
        let session = SearchSession::new(ModelId::SonarReasoningPro);

        let report = session.model_report(false);
        assert!(report.starts_with("Current model: sonar-reasoning-pro (reset to default)"));
        assert!(report.contains("Default model (from configuration): sonar-reasoning-pro"));
        assert!(report.contains("Auto-selection: ENABLED"));
    }
}
