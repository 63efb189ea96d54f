use rand::Rng;
use serde::{Deserialize, Serialize};

/// Aggregate numbers shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub penalties: u32,
    pub bonuses: u32,
    pub undertime: u32,
}

impl DashboardSummary {
    /// Fabricate a summary with bounded random values. Used when no remote
    /// endpoint is configured or the remote is unreachable.
    pub fn placeholder() -> Self {
        let mut rng = rand::thread_rng();
        Self {
            penalties: rng.gen_range(0..10),
            bonuses: rng.gen_range(0..5),
            undertime: rng.gen_range(0..20),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_values_stay_in_bounds() {
        for _ in 0..100 {
            let summary = DashboardSummary::placeholder();
            assert!(summary.penalties < 10);
            assert!(summary.bonuses < 5);
            assert!(summary.undertime < 20);
        }
    }
}
