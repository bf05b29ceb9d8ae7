use crate::enums::Plan;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// The pricing and risk rules attached to a plan.
///
/// New accounts take their starting balance and risk parameters from here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRules {
    pub plan: Plan,
    pub account_size: Decimal,
    pub monthly_price: Decimal,
    pub profit_target: Decimal,
    pub max_drawdown: Decimal,
    pub daily_loss_limit: Decimal,
    /// Trader's share of funded-stage profits, in percent.
    pub profit_split_pct: Decimal,
}

impl Plan {
    pub fn rules(&self) -> PlanRules {
        match self {
            Plan::Standard => PlanRules {
                plan: *self,
                account_size: dec!(50000),
                monthly_price: dec!(99),
                profit_target: dec!(3000),
                max_drawdown: dec!(2000),
                daily_loss_limit: dec!(1000),
                profit_split_pct: dec!(80),
            },
            Plan::Advanced => PlanRules {
                plan: *self,
                account_size: dec!(100000),
                monthly_price: dec!(179),
                profit_target: dec!(6000),
                max_drawdown: dec!(3000),
                daily_loss_limit: dec!(2000),
                profit_split_pct: dec!(85),
            },
            Plan::Dynasty => PlanRules {
                plan: *self,
                account_size: dec!(150000),
                monthly_price: dec!(249),
                profit_target: dec!(9000),
                max_drawdown: dec!(4500),
                daily_loss_limit: dec!(3000),
                profit_split_pct: dec!(90),
            },
        }
    }
}

impl PlanRules {
    /// All plans in the order they are presented on the pricing page.
    pub fn catalog() -> Vec<PlanRules> {
        Plan::ALL.iter().map(Plan::rules).collect()
    }

    /// Profit target expressed as a percentage of the account size.
    pub fn profit_target_pct(&self) -> Decimal {
        if self.account_size.is_zero() {
            return Decimal::ZERO;
        }
        self.profit_target / self.account_size * Decimal::ONE_HUNDRED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_in_plan_order() {
        let plans: Vec<Plan> = PlanRules::catalog().iter().map(|r| r.plan).collect();
        assert_eq!(plans, Plan::ALL.to_vec());
    }

    #[test]
    fn every_plan_targets_six_percent() {
        for rules in PlanRules::catalog() {
            assert_eq!(rules.profit_target_pct(), dec!(6));
            assert!(rules.daily_loss_limit < rules.max_drawdown);
        }
    }
}
