//! Interaction Classifier
//! Labels every call-log record with exactly one interaction category.

use crate::data::SurveyRecord;
use serde::Serialize;
use std::fmt;

/// Outcome of a call. Declaration order is the order of the summary table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum InteractionCategory {
    SurveyCompleted,
    CallConnected,
    CallNotAnswered,
}

impl InteractionCategory {
    pub const ALL: [InteractionCategory; 3] = [
        InteractionCategory::SurveyCompleted,
        InteractionCategory::CallConnected,
        InteractionCategory::CallNotAnswered,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            InteractionCategory::CallConnected => "Call connected",
            InteractionCategory::CallNotAnswered => "Call not answered",
            InteractionCategory::SurveyCompleted => "Survey completed",
        }
    }
}

impl fmt::Display for InteractionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// First match wins: a completed survey outranks the call status.
pub fn classify(record: &SurveyRecord) -> InteractionCategory {
    if record.interaction_flag {
        InteractionCategory::SurveyCompleted
    } else if record.status == "completed" {
        InteractionCategory::CallConnected
    } else {
        InteractionCategory::CallNotAnswered
    }
}
