//! Imputation of missing cumulative category sales.
//!
//! National figures for the two published years give a per-category total.
//! Whatever the states with known values do not account for is the
//! remainder. States whose trigger category is unset share that remainder in
//! proportion to their total EVs sold, except members of a regional rule, which
//! receive a fixed split of their own total instead.

use serde::Serialize;
use tracing::{debug, info, warn};

use ev_model::{
    AllocationPolicy, DataIssue, IssueKind, NationalBreakdown, PerCategory, PipelineStage,
    StateRecord, WheelerCategory,
};

/// How a state in the allocation base received its cumulative values.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AllocationSource {
    /// Fixed category ratios of the named region.
    Regional { region: String },
    /// Share of the national remainder.
    Proportional { proportion: f64 },
    /// Nothing could be allocated.
    Unallocated { reason: UnallocatedReason },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnallocatedReason {
    /// The state has no total EVs sold to scale from.
    MissingTotalEvs,
    /// No state in the allocation base has a positive total.
    ZeroAllocationBase,
}

/// Imputed values for one state of the allocation base.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Allocation {
    pub state: String,
    pub source: AllocationSource,
    pub values: PerCategory<Option<f64>>,
}

/// Figures behind an imputation run, kept for reporting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImputationSummary {
    pub national_totals: PerCategory<f64>,
    pub known_totals: PerCategory<f64>,
    /// National total minus known values. May be negative.
    pub remaining: PerCategory<f64>,
    /// Sum of total EVs sold over the allocation base.
    pub total_missing_ev: f64,
    pub allocations: Vec<Allocation>,
}

impl ImputationSummary {
    pub fn regional_count(&self) -> usize {
        self.count_matching(|source| matches!(source, AllocationSource::Regional { .. }))
    }

    pub fn proportional_count(&self) -> usize {
        self.count_matching(|source| matches!(source, AllocationSource::Proportional { .. }))
    }

    pub fn unallocated_count(&self) -> usize {
        self.count_matching(|source| matches!(source, AllocationSource::Unallocated { .. }))
    }

    fn count_matching(&self, predicate: impl Fn(&AllocationSource) -> bool) -> usize {
        self.allocations
            .iter()
            .filter(|allocation| predicate(&allocation.source))
            .count()
    }
}

#[derive(Debug, Clone)]
pub struct ImputationOutcome {
    pub records: Vec<StateRecord>,
    pub summary: ImputationSummary,
    pub issues: Vec<DataIssue>,
}

/// Fills the cumulative category sales of every record whose `trigger`
/// category is unset. Records outside that base are returned unchanged.
pub fn impute_cumulative_sales(
    records: &[StateRecord],
    national: &NationalBreakdown,
    policy: &AllocationPolicy,
    trigger: WheelerCategory,
) -> ImputationOutcome {
    let national_totals = national.totals();
    let known_totals = PerCategory::from_fn(|category| {
        records
            .iter()
            .filter_map(|record| record.cumulative(category))
            .sum::<f64>()
    });
    let remaining =
        PerCategory::from_fn(|category| national_totals.get(category) - known_totals.get(category));

    let mut issues = Vec::new();
    for (category, value) in remaining.iter() {
        if *value < 0.0 {
            warn!(
                category = %category,
                remaining = *value,
                "known values exceed national total"
            );
            issues.push(
                DataIssue::new(
                    IssueKind::NegativeRemainder,
                    PipelineStage::Impute,
                    format!(
                        "known {category} sales exceed the national total by {}",
                        -value
                    ),
                )
                .with_column(category.cumulative_label()),
            );
        }
    }

    let in_base = |record: &StateRecord| record.cumulative(trigger).is_none();
    let total_missing_ev: f64 = records
        .iter()
        .filter(|record| in_base(record))
        .filter_map(|record| record.total_evs_sold)
        .sum();

    let mut allocations = Vec::new();
    let imputed: Vec<StateRecord> = records
        .iter()
        .map(|record| {
            if !in_base(record) {
                return record.clone();
            }
            let allocation = allocate(record, policy, &remaining, total_missing_ev);
            debug!(state = %record.state, source = ?allocation.source, "allocated cumulative sales");
            let updated = record.with_cumulative(allocation.values);
            allocations.push(allocation);
            updated
        })
        .collect();

    let starved = allocations
        .iter()
        .filter(|allocation| {
            allocation.source
                == AllocationSource::Unallocated {
                    reason: UnallocatedReason::ZeroAllocationBase,
                }
        })
        .count();
    if starved > 0 {
        warn!(states = starved, "allocation base has no total EVs sold");
        issues.push(
            DataIssue::new(
                IssueKind::ZeroDenominator,
                PipelineStage::Impute,
                format!(
                    "total EVs sold across the allocation base is zero; {starved} state(s) left unimputed"
                ),
            )
            .with_column(trigger.cumulative_label())
            .with_count(starved as u64),
        );
    }

    let summary = ImputationSummary {
        national_totals,
        known_totals,
        remaining,
        total_missing_ev,
        allocations,
    };
    info!(
        base = summary.allocations.len(),
        regional = summary.regional_count(),
        proportional = summary.proportional_count(),
        unallocated = summary.unallocated_count(),
        "imputed cumulative sales"
    );
    ImputationOutcome {
        records: imputed,
        summary,
        issues,
    }
}

fn allocate(
    record: &StateRecord,
    policy: &AllocationPolicy,
    remaining: &PerCategory<f64>,
    total_missing_ev: f64,
) -> Allocation {
    let unallocated = |reason, values| Allocation {
        state: record.state.clone(),
        source: AllocationSource::Unallocated { reason },
        values,
    };

    // Without a total there is nothing to scale; every cumulative category is cleared.
    let Some(total) = record.total_evs_sold else {
        return unallocated(UnallocatedReason::MissingTotalEvs, PerCategory::default());
    };

    if let Some(rule) = policy.rule_for(&record.state) {
        return Allocation {
            state: record.state.clone(),
            source: AllocationSource::Regional {
                region: rule.name.clone(),
            },
            values: rule.ratios.map(|_, ratio| Some(ratio * total)),
        };
    }

    if total_missing_ev == 0.0 {
        return unallocated(UnallocatedReason::ZeroAllocationBase, record.cumulative_sales);
    }

    let proportion = total / total_missing_ev;
    Allocation {
        state: record.state.clone(),
        source: AllocationSource::Proportional { proportion },
        values: remaining.map(|_, remainder| Some(proportion * remainder)),
    }
}
