use super::types::RoleCategory;

/// Average minutes at or above which a player counts as a starter.
pub const STARTER_MINUTES: f64 = 25.0;

pub fn classify(avg_minutes: Option<f64>) -> RoleCategory {
    match avg_minutes {
        // NaN fails the comparison and lands on the bench.
        Some(minutes) if minutes >= STARTER_MINUTES => RoleCategory::Starter,
        _ => RoleCategory::Bench,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_boundary() {
        assert_eq!(classify(Some(24.9)), RoleCategory::Bench);
        assert_eq!(classify(Some(25.0)), RoleCategory::Starter);
        assert_eq!(classify(Some(38.5)), RoleCategory::Starter);
    }

    #[test]
    fn test_undefined_minutes_are_bench() {
        assert_eq!(classify(None), RoleCategory::Bench);
        assert_eq!(classify(Some(f64::NAN)), RoleCategory::Bench);
    }
}
