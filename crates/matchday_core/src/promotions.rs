//! Promotion-effect estimation with resampling-based uncertainty.

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::config::AnalysisConfig;
use crate::model::{GameRecord, NO_PROMOTION, PromotionEffect};
use crate::round::{round2, round4, round_whole};
use crate::stats::{bootstrap_diff_ci, mean, permutation_p_value};

/// Estimate attendance uplift for every promotion present in the frame.
///
/// The "without" group for a promotion is every other game, including games
/// running a different promotion: each promotion's control is the rest of
/// the season, not just unpromoted games. Labels are compared after the
/// low-attendance relabeling, so forcibly unpromoted games always land in
/// the control group.
///
/// Results are sorted descending by rounded uplift; ties keep alphabetical
/// label order (the iteration order, via stable sort).
#[must_use]
pub fn compute_promotion_effects(
    records: &[GameRecord],
    config: &AnalysisConfig,
) -> Vec<PromotionEffect> {
    let mut names: Vec<&str> = records
        .iter()
        .map(|r| r.promotion_name.as_str())
        .filter(|name| *name != NO_PROMOTION)
        .collect();
    names.sort_unstable();
    names.dedup();

    let mut effects = Vec::with_capacity(names.len());
    for name in names {
        let (with_rows, without_rows): (Vec<&GameRecord>, Vec<&GameRecord>) =
            records.iter().partition(|r| r.promotion_name == name);
        if with_rows.is_empty() || without_rows.is_empty() {
            continue;
        }

        let with_att: Vec<f64> = with_rows.iter().map(|r| r.attendance as f64).collect();
        let without_att: Vec<f64> = without_rows.iter().map(|r| r.attendance as f64).collect();

        let mean_with = mean(&with_att);
        let mean_without = mean(&without_att);
        let uplift = mean_with - mean_without;

        // Fresh generator per comparison keeps each promotion's interval
        // reproducible independently of how many labels precede it.
        let mut rng = SmallRng::seed_from_u64(config.seed);
        let (ci_low, ci_high) =
            bootstrap_diff_ci(&with_att, &without_att, config.resample_iterations, &mut rng);
        let mut rng = SmallRng::seed_from_u64(config.seed);
        let p_value =
            permutation_p_value(&with_att, &without_att, config.resample_iterations, &mut rng);

        let baseline = mean_without;
        let mean_total_rev_with = mean(
            &with_rows
                .iter()
                .map(|r| r.total_revenue)
                .collect::<Vec<_>>(),
        );
        let mean_total_rev_without = mean(
            &without_rows
                .iter()
                .map(|r| r.total_revenue)
                .collect::<Vec<_>>(),
        );
        let mean_rev_per_att_with = mean(
            &with_rows
                .iter()
                .map(|r| r.revenue_per_attendee)
                .collect::<Vec<_>>(),
        );
        let mean_rev_per_att_without = mean(
            &without_rows
                .iter()
                .map(|r| r.revenue_per_attendee)
                .collect::<Vec<_>>(),
        );
        let modeled_incremental_revenue = uplift * mean_rev_per_att_without;

        effects.push(PromotionEffect {
            promotion: name.to_string(),
            n_games_with_promo: with_rows.len(),
            mean_with_promo: round_whole(mean_with),
            mean_without_promo: round_whole(mean_without),
            uplift_attendance: round_whole(uplift),
            uplift_pct: if baseline != 0.0 {
                round2(uplift / baseline * 100.0)
            } else {
                0.0
            },
            ci80_low: round_whole(ci_low),
            ci80_high: round_whole(ci_high),
            permutation_p_value: round4(p_value),
            is_significant_at_10pct: p_value < 0.10,
            avg_total_revenue_with_promo: round_whole(mean_total_rev_with),
            avg_total_revenue_without_promo: round_whole(mean_total_rev_without),
            avg_revenue_per_attendee_with_promo: round2(mean_rev_per_att_with),
            avg_revenue_per_attendee_without_promo: round2(mean_rev_per_att_without),
            raw_avg_total_revenue_diff: round_whole(mean_total_rev_with - mean_total_rev_without),
            modeled_revenue_lift_from_uplift: round_whole(modeled_incremental_revenue),
        });
    }

    effects.sort_by(|a, b| b.uplift_attendance.cmp(&a.uplift_attendance));
    effects
}
