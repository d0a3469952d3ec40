use thiserror::Error;

use crate::types::PredictionRequest;

/// User-facing message shown inline when cumulative sales are not monotone.
pub const SALES_ORDER_MESSAGE: &str = "⚠️ Error: deben cumplirse 4sem ≥ 8sem ≥ 12sem ≥ 16sem.";

/// Cumulative sales can only grow as the event approaches.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", SALES_ORDER_MESSAGE)]
pub struct ConstraintViolation {
    /// First broken link in the chain, e.g. "4w < 8w".
    pub broken: &'static str,
    pub nearer: u32,
    pub farther: u32,
}

/// Single rule: `sales_4w >= sales_8w >= sales_12w >= sales_16w`.
pub fn validate(req: &PredictionRequest) -> Result<(), ConstraintViolation> {
    let chain = [
        ("4w < 8w", req.sales_4w, req.sales_8w),
        ("8w < 12w", req.sales_8w, req.sales_12w),
        ("12w < 16w", req.sales_12w, req.sales_16w),
    ];
    for (broken, nearer, farther) in chain {
        if nearer < farther {
            return Err(ConstraintViolation { broken, nearer, farther });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DayOfWeek, Month};

    fn req(s4: u32, s8: u32, s12: u32, s16: u32) -> PredictionRequest {
        PredictionRequest {
            capacity: 1000,
            competitor_concerts: 0,
            own_concerts: 0,
            participatory_events: 0,
            avg_lead_days: 0,
            sales_16w: s16,
            sales_12w: s12,
            sales_8w: s8,
            sales_4w: s4,
            month: Month::ALL[0],
            concert_type: "Pop".to_string(),
            day_of_week: DayOfWeek::Monday,
            time_of_day: "19:30:00".to_string(),
        }
    }

    #[test]
    fn all_zero_passes() {
        assert!(validate(&req(0, 0, 0, 0)).is_ok());
    }

    #[test]
    fn non_increasing_chain_passes() {
        assert!(validate(&req(400, 300, 300, 10)).is_ok());
        assert!(validate(&req(5, 5, 5, 5)).is_ok());
    }

    #[test]
    fn four_week_below_eight_week_fails() {
        let err = validate(&req(50, 100, 0, 0)).unwrap_err();
        assert_eq!(err.broken, "4w < 8w");
        assert_eq!((err.nearer, err.farther), (50, 100));
        assert_eq!(err.to_string(), SALES_ORDER_MESSAGE);
    }

    #[test]
    fn every_link_is_checked() {
        assert_eq!(validate(&req(10, 10, 20, 0)).unwrap_err().broken, "8w < 12w");
        assert_eq!(validate(&req(10, 10, 10, 11)).unwrap_err().broken, "12w < 16w");
    }

    #[test]
    fn exhaustive_small_grid_matches_rule() {
        for s4 in 0..4 {
            for s8 in 0..4 {
                for s12 in 0..4 {
                    for s16 in 0..4 {
                        let ok = s4 >= s8 && s8 >= s12 && s12 >= s16;
                        assert_eq!(validate(&req(s4, s8, s12, s16)).is_ok(), ok, "{s4} {s8} {s12} {s16}");
                    }
                }
            }
        }
    }
}
