//! Quote calculation for a collected (tour, headcount, guide tier) answer set.
use crate::catalog::{Excursion, GuideTier};
use crate::rates::{GuideLevel, GuideRateTable};

/// Price a fully collected answer set. Pure; all inputs are validated by the
/// dialogue before this is called, so there are no error paths.
///
/// Transport cost, plus the guide's hourly rate times the tour duration,
/// marked up by the tour margin and rounded to the nearest 1000 dram.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn quote_total(tour: &Excursion, count: u32, tier: GuideTier, rates: &GuideRateTable) -> i64 {
    let mut total = tour.transport_cost;

    match tier {
        GuideTier::Guide => {
            total += rates.rate(GuideLevel::Intermediate, count) * i64::from(tour.time_hours);
        }
        GuideTier::Expert => {
            total += rates.rate(GuideLevel::Professional, count) * i64::from(tour.time_hours);
        }
        GuideTier::None => {}
    }

    if tour.tickets_included {
        // Tickets are not itemized yet; the branch stays so ticket prices
        // have a place to land when they are.
        total += 0;
    }

    round_to_thousand(total as f64 * (1.0 + tour.margin))
}

/// Round to the nearest multiple of 1000 dram, ties rounding half-up
/// (16 500 → 17 000). Non-finite input yields 0.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn round_to_thousand(value: f64) -> i64 {
    if !value.is_finite() {
        return 0;
    }
    ((value / 1000.0 + 0.5).floor() as i64) * 1000
}

/// Format a dram amount with comma thousands grouping (`109000` → `109,000`).
#[must_use]
pub fn format_dram(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}
