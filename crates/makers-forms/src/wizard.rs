use makers_core::models::DraftField;
use serde_json::Value as JsonValue;
use std::fmt::{Display, Formatter, Result as FmtResult};

pub const STEP_COUNT: usize = 8;

/// Wizard steps, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WizardStep {
    Information,
    Screenshots,
    Problem,
    Solution,
    TargetAudience,
    KeyFeatures,
    BusinessModel,
    Roadmap,
}

impl WizardStep {
    pub const ALL: [WizardStep; STEP_COUNT] = [
        WizardStep::Information,
        WizardStep::Screenshots,
        WizardStep::Problem,
        WizardStep::Solution,
        WizardStep::TargetAudience,
        WizardStep::KeyFeatures,
        WizardStep::BusinessModel,
        WizardStep::Roadmap,
    ];

    pub fn first() -> Self {
        WizardStep::Information
    }

    pub fn last() -> Self {
        WizardStep::Roadmap
    }

    pub fn index(&self) -> usize {
        Self::ALL
            .iter()
            .position(|step| step == self)
            .unwrap_or_default()
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The following step, saturating at the last one
    pub fn next(&self) -> Self {
        Self::from_index(self.index() + 1).unwrap_or(*self)
    }

    /// The preceding step, saturating at the first one
    pub fn previous(&self) -> Self {
        self.index()
            .checked_sub(1)
            .and_then(Self::from_index)
            .unwrap_or(*self)
    }

    pub fn is_last(&self) -> bool {
        *self == Self::last()
    }

    /// The narrative section edited on this step, if it is a narrative step
    pub fn narrative_field(&self) -> Option<DraftField> {
        match self {
            WizardStep::Information | WizardStep::Screenshots => None,
            WizardStep::Problem => Some(DraftField::Problem),
            WizardStep::Solution => Some(DraftField::Solution),
            WizardStep::TargetAudience => Some(DraftField::TargetAudience),
            WizardStep::KeyFeatures => Some(DraftField::KeyFeatures),
            WizardStep::BusinessModel => Some(DraftField::BusinessModel),
            WizardStep::Roadmap => Some(DraftField::Roadmap),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::Information => "Product information",
            WizardStep::Screenshots => "Screenshots",
            WizardStep::Problem => "The problem",
            WizardStep::Solution => "The solution",
            WizardStep::TargetAudience => "Target audience",
            WizardStep::KeyFeatures => "Key features",
            WizardStep::BusinessModel => "Business model",
            WizardStep::Roadmap => "Roadmap",
        }
    }

    /// Decode a persisted step pointer, clamping out-of-range values to the last step
    pub(crate) fn from_persisted(value: &JsonValue) -> Option<Self> {
        let index = value.as_u64()? as usize;
        Some(Self::from_index(index.min(STEP_COUNT - 1)).unwrap_or_else(Self::last))
    }
}

impl Display for WizardStep {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}/{} {}", self.index() + 1, STEP_COUNT, self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn navigation_is_bounded() {
        assert_eq!(WizardStep::first().previous(), WizardStep::Information);
        assert_eq!(WizardStep::last().next(), WizardStep::Roadmap);
        assert_eq!(WizardStep::Information.next(), WizardStep::Screenshots);
        assert_eq!(WizardStep::Screenshots.previous(), WizardStep::Information);
    }

    #[test]
    fn index_round_trips() {
        for (i, step) in WizardStep::ALL.iter().enumerate() {
            assert_eq!(step.index(), i);
            assert_eq!(WizardStep::from_index(i), Some(*step));
        }
        assert_eq!(WizardStep::from_index(STEP_COUNT), None);
    }

    #[test]
    fn every_narrative_field_has_a_step() {
        let fields: Vec<DraftField> = WizardStep::ALL
            .iter()
            .filter_map(|step| step.narrative_field())
            .collect();
        assert_eq!(fields, DraftField::NARRATIVE.to_vec());
    }

    #[test]
    fn persisted_pointer_is_clamped() {
        assert_eq!(WizardStep::from_persisted(&json!(1)), Some(WizardStep::Screenshots));
        assert_eq!(WizardStep::from_persisted(&json!(42)), Some(WizardStep::Roadmap));
        assert_eq!(WizardStep::from_persisted(&json!("two")), None);
        assert_eq!(WizardStep::from_persisted(&json!(-1)), None);
    }
}
