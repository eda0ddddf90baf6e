//! Aggregation Engine
//! Builds every table and chart series of the dashboard from a slice of records.
//!
//! All functions are pure: the same records always produce the same result,
//! and nothing is cached between calls.

use super::classifier::{classify, InteractionCategory};
use crate::data::{DataProcessor, DateFilter, PartyQuestion, SurveyRecord};
use log::{info, warn};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Party answers known to the survey. Order breaks ties in rankings.
pub const CANONICAL_PARTIES: [&str; 9] = [
    "Morena",
    "PAN",
    "PRI",
    "PT",
    "PVEM",
    "Movimiento Ciudadano",
    "Ninguno",
    "Prefiere no decir",
    "Sin información",
];

/// Government approval scale, worst to best.
pub const APPROVAL_SCALE: [&str; 5] = ["Muy malo", "Malo", "Neutral", "Bueno", "Muy bueno"];

/// Label of the synthetic last row of the summary.
pub const TOTAL_LABEL: &str = "Total";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub label: String,
    pub count: u64,
}

/// Interaction counts followed by the synthetic total row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryTable {
    pub rows: Vec<SummaryRow>,
}

impl SummaryTable {
    /// Category rows without the total.
    pub fn categories(&self) -> &[SummaryRow] {
        &self.rows[..self.rows.len().saturating_sub(1)]
    }

    pub fn total(&self) -> u64 {
        self.rows.last().map(|r| r.count).unwrap_or(0)
    }

    pub fn count(&self, label: &str) -> Option<u64> {
        self.rows.iter().find(|r| r.label == label).map(|r| r.count)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartyCount {
    pub party: String,
    pub count: u64,
}

/// All canonical parties, most mentioned first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreferenceRanking {
    pub question: PartyQuestion,
    pub rows: Vec<PartyCount>,
}

impl PreferenceRanking {
    pub fn count(&self, party: &str) -> u64 {
        self.rows
            .iter()
            .find(|r| r.party == party)
            .map(|r| r.count)
            .unwrap_or(0)
    }
}

/// Support reason × preferred party frequency matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrossTab {
    pub question: PartyQuestion,
    pub reasons: Vec<String>,
    pub parties: Vec<String>,
    /// `counts[row][col]` pairs `reasons[row]` with `parties[col]`.
    pub counts: Vec<Vec<u64>>,
}

impl CrossTab {
    pub fn is_empty(&self) -> bool {
        self.reasons.is_empty()
    }

    pub fn count(&self, reason: &str, party: &str) -> u64 {
        let row = self.reasons.iter().position(|r| r == reason);
        let col = self.parties.iter().position(|p| p == party);
        match (row, col) {
            (Some(row), Some(col)) => self.counts[row][col],
            _ => 0,
        }
    }

    /// Restrict columns to parties with a non-zero count in `ranking`, in ranking order.
    pub fn ranked_columns(&self, ranking: &PreferenceRanking) -> CrossTab {
        let columns: Vec<(String, Option<usize>)> = ranking
            .rows
            .iter()
            .filter(|r| r.count > 0)
            .map(|r| (r.party.clone(), self.parties.iter().position(|p| *p == r.party)))
            .collect();

        let counts = self
            .counts
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|(_, idx)| idx.map(|i| row[i]).unwrap_or(0))
                    .collect()
            })
            .collect();

        CrossTab {
            question: self.question,
            reasons: self.reasons.clone(),
            parties: columns.into_iter().map(|(party, _)| party).collect(),
            counts,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatingCount {
    pub rating: String,
    pub count: u64,
}

/// Five-bucket approval histogram in scale order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApprovalDistribution {
    pub buckets: Vec<RatingCount>,
}

impl ApprovalDistribution {
    pub fn count(&self, rating: &str) -> u64 {
        self.buckets
            .iter()
            .find(|b| b.rating == rating)
            .map(|b| b.count)
            .unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.buckets.iter().map(|b| b.count).sum()
    }
}

/// Everything the dashboard shows for one selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateResult {
    pub summary: SummaryTable,
    pub preference_1: PreferenceRanking,
    pub preference_2: PreferenceRanking,
    pub cross_tab_1: CrossTab,
    pub cross_tab_2: CrossTab,
    pub approval: ApprovalDistribution,
}

/// Dashboard aggregations.
pub struct Aggregator;

impl Aggregator {
    /// Compute all outputs over `records`.
    pub fn aggregate(records: &[SurveyRecord]) -> AggregateResult {
        let valid = Self::valid_subset(records);

        let preference_1 = Self::rank_preferences(&valid, PartyQuestion::First);
        let preference_2 = Self::rank_preferences(&valid, PartyQuestion::Second);

        AggregateResult {
            summary: Self::summarize(records),
            preference_1,
            preference_2,
            cross_tab_1: Self::cross_tabulate(&valid, PartyQuestion::First),
            cross_tab_2: Self::cross_tabulate(&valid, PartyQuestion::Second),
            approval: Self::approval_distribution(&valid),
        }
    }

    /// Filter then aggregate. `None` means the selection has no records and the
    /// caller keeps whatever it displayed before.
    pub fn refresh(records: &[SurveyRecord], filter: &DateFilter) -> Option<AggregateResult> {
        let filtered = DataProcessor::filter_by_date(records, filter);
        if filtered.is_empty() {
            warn!("No records for {}; keeping previous results", filter.label());
            return None;
        }
        info!("Aggregating {} records for {}", filtered.len(), filter.label());
        Some(Self::aggregate(&filtered))
    }

    /// Count per interaction category plus a total row.
    ///
    /// Categories that never occur are left out instead of zero-filled.
    pub fn summarize(records: &[SurveyRecord]) -> SummaryTable {
        let mut groups: BTreeMap<InteractionCategory, u64> = BTreeMap::new();
        for record in records {
            *groups.entry(classify(record)).or_insert(0) += 1;
        }

        let mut rows: Vec<SummaryRow> = groups
            .into_iter()
            .map(|(category, count)| SummaryRow {
                label: category.label().to_string(),
                count,
            })
            .collect();
        let total = rows.iter().map(|r| r.count).sum();
        rows.push(SummaryRow {
            label: TOTAL_LABEL.to_string(),
            count: total,
        });

        SummaryTable { rows }
    }

    /// Records of respondents who completed the survey.
    pub fn valid_subset(records: &[SurveyRecord]) -> Vec<&SurveyRecord> {
        records.iter().filter(|r| r.interaction_flag).collect()
    }

    /// Every canonical party with its count, sorted descending.
    ///
    /// Unlike `summarize`, absent parties still get a row, so an empty subset
    /// yields nine zero rows in canonical order.
    pub fn rank_preferences(valid: &[&SurveyRecord], question: PartyQuestion) -> PreferenceRanking {
        let mut observed: HashMap<&str, u64> = HashMap::new();
        for record in valid {
            *observed.entry(question.preference(record)).or_insert(0) += 1;
        }

        let mut rows: Vec<PartyCount> = CANONICAL_PARTIES
            .iter()
            .map(|party| PartyCount {
                party: party.to_string(),
                count: observed.get(party).copied().unwrap_or(0),
            })
            .collect();
        // stable: ties keep canonical order
        rows.sort_by(|a, b| b.count.cmp(&a.count));

        PreferenceRanking { question, rows }
    }

    /// Support reason × preference counts over observed values only.
    pub fn cross_tabulate(valid: &[&SurveyRecord], question: PartyQuestion) -> CrossTab {
        let mut cells: BTreeMap<&str, BTreeMap<&str, u64>> = BTreeMap::new();
        let mut parties: BTreeSet<&str> = BTreeSet::new();

        for record in valid {
            let party = question.preference(record);
            parties.insert(party);
            *cells
                .entry(question.support_reason(record))
                .or_default()
                .entry(party)
                .or_insert(0) += 1;
        }

        let counts = cells
            .values()
            .map(|row| {
                parties
                    .iter()
                    .map(|party| row.get(party).copied().unwrap_or(0))
                    .collect()
            })
            .collect();

        CrossTab {
            question,
            reasons: cells.keys().map(|r| r.to_string()).collect(),
            parties: parties.into_iter().map(str::to_string).collect(),
            counts,
        }
    }

    /// Ratings reindexed onto the five-point scale; anything else is ignored.
    pub fn approval_distribution(valid: &[&SurveyRecord]) -> ApprovalDistribution {
        let buckets = APPROVAL_SCALE
            .iter()
            .map(|rating| RatingCount {
                rating: rating.to_string(),
                count: valid
                    .iter()
                    .filter(|r| r.approval_rating == *rating)
                    .count() as u64,
            })
            .collect();

        ApprovalDistribution { buckets }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    struct Row<'a> {
        ts: &'a str,
        flag: bool,
        status: &'a str,
        reason_1: &'a str,
        pref_1: &'a str,
        reason_2: &'a str,
        pref_2: &'a str,
        rating: &'a str,
    }

    impl Default for Row<'_> {
        fn default() -> Self {
            Row {
                ts: "2025-05-14 10:00:00",
                flag: false,
                status: "",
                reason_1: "",
                pref_1: "",
                reason_2: "",
                pref_2: "",
                rating: "",
            }
        }
    }

    impl Row<'_> {
        fn build(&self) -> SurveyRecord {
            SurveyRecord::from_raw(
                Some(self.ts),
                Some(if self.flag { "true" } else { "false" }),
                Some(self.status),
                Some(self.reason_1),
                Some(self.pref_1),
                Some(self.reason_2),
                Some(self.pref_2),
                Some(self.rating),
            )
            .unwrap()
        }
    }

    fn worked_example() -> Vec<SurveyRecord> {
        vec![
            Row {
                flag: true,
                status: "completed",
                rating: "Bueno",
                ..Default::default()
            }
            .build(),
            Row {
                status: "completed",
                rating: "Malo",
                ..Default::default()
            }
            .build(),
            Row {
                status: "no-answer",
                ..Default::default()
            }
            .build(),
        ]
    }

    fn survey(pref_1: &str, reason_1: &str, pref_2: &str, reason_2: &str) -> SurveyRecord {
        Row {
            flag: true,
            status: "completed",
            pref_1,
            reason_1,
            pref_2,
            reason_2,
            ..Default::default()
        }
        .build()
    }

    #[test]
    fn worked_example_summary_and_approval() {
        let result = Aggregator::aggregate(&worked_example());

        let pairs: Vec<(&str, u64)> = result
            .summary
            .rows
            .iter()
            .map(|r| (r.label.as_str(), r.count))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("Survey completed", 1),
                ("Call connected", 1),
                ("Call not answered", 1),
                ("Total", 3),
            ]
        );

        let buckets: Vec<u64> = result.approval.buckets.iter().map(|b| b.count).collect();
        assert_eq!(buckets, vec![0, 0, 0, 1, 0]);
        assert_eq!(result.approval.count("Malo"), 0);
    }

    #[test]
    fn summary_total_is_last_and_equals_sum() {
        let records = vec![
            Row {
                status: "completed",
                ..Default::default()
            }
            .build(),
            Row {
                status: "completed",
                ..Default::default()
            }
            .build(),
            Row {
                flag: true,
                ..Default::default()
            }
            .build(),
            Row {
                status: "busy",
                ..Default::default()
            }
            .build(),
            Row {
                flag: true,
                status: "completed",
                ..Default::default()
            }
            .build(),
        ];

        for end in 0..=records.len() {
            let summary = Aggregator::summarize(&records[..end]);
            let last = summary.rows.last().unwrap();
            assert_eq!(last.label, TOTAL_LABEL);
            assert_eq!(
                summary.total(),
                summary.categories().iter().map(|r| r.count).sum::<u64>()
            );
            assert_eq!(summary.total(), end as u64);
        }
    }

    #[test]
    fn summary_omits_absent_categories() {
        let records = vec![Row {
            status: "completed",
            ..Default::default()
        }
        .build()];
        let summary = Aggregator::summarize(&records);
        assert_eq!(summary.rows.len(), 2);
        assert_eq!(summary.count("Call connected"), Some(1));
        assert_eq!(summary.count("Survey completed"), None);

        let empty = Aggregator::summarize(&[]);
        assert_eq!(empty.rows.len(), 1);
        assert_eq!(empty.total(), 0);
    }

    #[test]
    fn ranking_on_empty_subset_is_canonical_zeros() {
        for question in [PartyQuestion::First, PartyQuestion::Second] {
            let ranking = Aggregator::rank_preferences(&[], question);
            let parties: Vec<&str> = ranking.rows.iter().map(|r| r.party.as_str()).collect();
            assert_eq!(parties, CANONICAL_PARTIES.to_vec());
            assert!(ranking.rows.iter().all(|r| r.count == 0));
        }
    }

    #[test]
    fn ranking_sorts_descending_with_stable_ties() {
        let records = vec![
            survey("PRI", "a", "PAN", "x"),
            survey("PT", "a", "PAN", "x"),
            survey("PRI", "b", "Morena", "y"),
            survey("PT", "b", "Otro", "y"),
            survey("Sin información", "c", "", "z"),
            survey("Partido inventado", "c", "", "z"),
        ];
        let valid = Aggregator::valid_subset(&records);
        let ranking = Aggregator::rank_preferences(&valid, PartyQuestion::First);

        let top: Vec<(&str, u64)> = ranking
            .rows
            .iter()
            .take(4)
            .map(|r| (r.party.as_str(), r.count))
            .collect();
        assert_eq!(
            top,
            vec![("PRI", 2), ("PT", 2), ("Sin información", 1), ("Morena", 0)]
        );
        assert_eq!(ranking.rows.len(), 9);
        assert_eq!(ranking.count("Partido inventado"), 0);

        let second = Aggregator::rank_preferences(&valid, PartyQuestion::Second);
        assert_eq!(second.rows[0].party, "PAN");
        assert_eq!(second.rows[1].party, "Morena");
    }

    #[test]
    fn preferences_only_count_valid_subset() {
        let records = vec![
            Row {
                status: "completed",
                pref_1: "PAN",
                ..Default::default()
            }
            .build(),
            survey("Morena", "a", "", ""),
        ];
        let result = Aggregator::aggregate(&records);
        assert_eq!(result.preference_1.count("PAN"), 0);
        assert_eq!(result.preference_1.count("Morena"), 1);
    }

    #[test]
    fn cross_tab_uses_observed_values() {
        let records = vec![
            survey("PAN", "Propuestas", "PRI", "Costumbre"),
            survey("PAN", "Propuestas", "PRI", "Costumbre"),
            survey("Morena", "Candidato", "PT", "Costumbre"),
            survey("Otro", "Candidato", "PT", "Propuestas"),
            Row {
                pref_1: "Ignorado",
                reason_1: "Nunca",
                ..Default::default()
            }
            .build(),
        ];
        let valid = Aggregator::valid_subset(&records);
        let tab = Aggregator::cross_tabulate(&valid, PartyQuestion::First);

        assert_eq!(tab.reasons, vec!["Candidato", "Propuestas"]);
        assert_eq!(tab.parties, vec!["Morena", "Otro", "PAN"]);
        assert_eq!(tab.counts, vec![vec![1, 1, 0], vec![0, 0, 2]]);
        assert_eq!(tab.count("Propuestas", "PAN"), 2);
        assert_eq!(tab.count("Nunca", "Ignorado"), 0);

        let observed_pairs: BTreeSet<(&str, &str)> = valid
            .iter()
            .map(|r| (r.support_reason_1.as_str(), r.preference_1.as_str()))
            .collect();
        for reason in &tab.reasons {
            assert!(observed_pairs.iter().any(|(r, _)| r == reason));
        }
        for party in &tab.parties {
            assert!(observed_pairs.iter().any(|(_, p)| p == party));
        }

        let second = Aggregator::cross_tabulate(&valid, PartyQuestion::Second);
        assert_eq!(second.count("Costumbre", "PRI"), 2);
        assert_eq!(second.count("Costumbre", "PT"), 1);
    }

    #[test]
    fn blank_answers_are_an_observed_value() {
        let records = vec![survey("", "", "", ""), survey("PAN", "Propuestas", "", "")];
        let valid = Aggregator::valid_subset(&records);

        let tab = Aggregator::cross_tabulate(&valid, PartyQuestion::First);
        assert_eq!(tab.reasons, vec!["", "Propuestas"]);
        assert_eq!(tab.parties, vec!["", "PAN"]);
        assert_eq!(tab.count("", ""), 1);

        let ranking = Aggregator::rank_preferences(&valid, PartyQuestion::First);
        assert_eq!(ranking.rows.len(), 9);
        assert_eq!(ranking.rows.iter().map(|r| r.count).sum::<u64>(), 1);
    }

    #[test]
    fn cross_tab_of_empty_subset_is_empty() {
        let tab = Aggregator::cross_tabulate(&[], PartyQuestion::Second);
        assert!(tab.is_empty());
        assert!(tab.parties.is_empty());
        assert!(tab.counts.is_empty());
    }

    #[test]
    fn ranked_columns_follow_ranking() {
        let records = vec![
            survey("PAN", "Propuestas", "", ""),
            survey("Morena", "Propuestas", "", ""),
            survey("Morena", "Candidato", "", ""),
            survey("Otro", "Candidato", "", ""),
        ];
        let valid = Aggregator::valid_subset(&records);
        let tab = Aggregator::cross_tabulate(&valid, PartyQuestion::First);
        let ranking = Aggregator::rank_preferences(&valid, PartyQuestion::First);

        let ranked = tab.ranked_columns(&ranking);
        assert_eq!(ranked.parties, vec!["Morena", "PAN"]);
        assert_eq!(ranked.reasons, tab.reasons);
        assert_eq!(ranked.count("Candidato", "Morena"), 1);
        assert_eq!(ranked.count("Propuestas", "PAN"), 1);
    }

    #[test]
    fn approval_ignores_unmapped_ratings() {
        let ratings = ["Muy malo", "Excelente", "", "bueno", "Muy bueno", "Muy bueno"];
        let records: Vec<SurveyRecord> = ratings
            .into_iter()
            .map(|rating| {
                Row {
                    flag: true,
                    rating,
                    ..Default::default()
                }
                .build()
            })
            .collect();
        let valid = Aggregator::valid_subset(&records);
        let approval = Aggregator::approval_distribution(&valid);

        assert_eq!(approval.buckets.len(), 5);
        let labels: Vec<&str> = approval.buckets.iter().map(|b| b.rating.as_str()).collect();
        assert_eq!(labels, APPROVAL_SCALE.to_vec());
        assert_eq!(approval.count("Muy malo"), 1);
        assert_eq!(approval.count("Muy bueno"), 2);
        assert_eq!(approval.count("Excelente"), 0);
        assert_eq!(approval.total(), 3);
    }

    #[test]
    fn refresh_signals_no_update_for_missing_date() {
        let records = worked_example();
        let missing = DateFilter::Day(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert!(Aggregator::refresh(&records, &missing).is_none());

        let present = DateFilter::Day(NaiveDate::from_ymd_opt(2025, 5, 14).unwrap());
        let result = Aggregator::refresh(&records, &present).unwrap();
        assert_eq!(result, Aggregator::aggregate(&records));
        assert_eq!(Aggregator::refresh(&records, &DateFilter::All), Some(result));
    }

    #[test]
    fn refresh_scopes_to_selected_date() {
        let records = vec![
            Row {
                ts: "2025-05-14 09:00:00",
                flag: true,
                pref_1: "PAN",
                ..Default::default()
            }
            .build(),
            Row {
                ts: "2025-05-15 09:00:00",
                flag: true,
                pref_1: "PRI",
                ..Default::default()
            }
            .build(),
            Row {
                ts: "2025-05-15 11:00:00",
                status: "completed",
                ..Default::default()
            }
            .build(),
        ];
        let day = DateFilter::Day(NaiveDate::from_ymd_opt(2025, 5, 15).unwrap());
        let result = Aggregator::refresh(&records, &day).unwrap();

        assert_eq!(result.summary.total(), 2);
        assert_eq!(result.preference_1.count("PAN"), 0);
        assert_eq!(result.preference_1.rows[0].party, "PRI");
    }
}
