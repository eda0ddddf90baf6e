//! Stats module - interaction classification and dashboard aggregates

mod aggregator;
mod classifier;

pub use aggregator::{
    AggregateResult, Aggregator, ApprovalDistribution, CrossTab, PartyCount, PreferenceRanking,
    RatingCount, SummaryRow, SummaryTable, APPROVAL_SCALE, CANONICAL_PARTIES, TOTAL_LABEL,
};
pub use classifier::{classify, InteractionCategory};
