use super::views::RangeInsight;
use crate::evaluation::FinalResult;
use crate::rubric::{FINAL_RATING_RANGES, TOTAL_MAX_SCORE};

/// Positions the final total against the effectiveness bands.
pub fn range_insight(result: &FinalResult) -> RangeInsight {
    let total = result.total;
    let marker_position = (total / TOTAL_MAX_SCORE * 100.0).clamp(0.0, 100.0);
    let rating_label = result.rating.map(|rating| rating.label()).unwrap_or("N/A");

    // Placement follows the score bands, not the MSL-capped rating.
    let band = FINAL_RATING_RANGES
        .lookup(total)
        .and_then(|label| FINAL_RATING_RANGES.band_for(label));
    let next = band.and_then(|band| FINAL_RATING_RANGES.next_above(band.label));

    let points_above_minimum = band
        .filter(|band| band.min > 0.0)
        .map(|band| (total - band.min).round() as i64);
    let points_to_next = next.map(|next| (next.min - total).round() as i64);

    let mut sentences = Vec::with_capacity(2);
    if let (Some(band), Some(above)) = (band, points_above_minimum) {
        sentences.push(format!(
            "You are {above} points above the minimum for {} ({}).",
            band.label, band.min
        ));
    }
    if let Some(next) = next {
        let needed = points_to_next.unwrap_or_default();
        if points_above_minimum.is_some() {
            sentences.push(format!(
                "You need {needed} more points to reach {}.",
                next.label
            ));
        } else {
            sentences.push(format!(
                "You need {needed} more points to reach {} ({}).",
                next.label, next.min
            ));
        }
    }

    RangeInsight {
        total,
        marker_position,
        rating: result.rating,
        rating_label,
        points_above_minimum,
        points_to_next,
        message: sentences.join(" "),
    }
}
