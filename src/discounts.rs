//! Discounts
//!
//! Strategy dispatch from offer rules to a discount amount for a single line of `quantity`
//! units at `unit_price` minor units each. Every calculation is total: it never panics, never
//! goes negative and saturates at `u64::MAX`.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};

use crate::offers::rules::OfferRules;

/// Why an offer did not produce a discount for a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InapplicableReason {
    /// The line has no units.
    ZeroQuantity,

    /// The line has fewer units than the offer requires.
    BelowMinimumQuantity {
        /// Units the offer requires.
        required: u32,
    },

    /// The offer's set size is zero, so no set can be formed.
    EmptySet,
}

/// Outcome of applying an offer to a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Discount {
    /// The offer applies. `amount` may still be zero, e.g. a bundle priced above the line total.
    Applied {
        /// Discount in minor units.
        amount: u64,
    },

    /// The offer does not apply to this line.
    Inapplicable {
        /// Why not.
        reason: InapplicableReason,
    },
}

impl Discount {
    /// Return the discount in minor units; zero when the offer does not apply.
    #[must_use]
    pub const fn amount(self) -> u64 {
        match self {
            Self::Applied { amount } => amount,
            Self::Inapplicable { .. } => 0,
        }
    }

    /// Return whether the offer applied.
    #[must_use]
    pub const fn is_applicable(self) -> bool {
        matches!(self, Self::Applied { .. })
    }

    const fn inapplicable(reason: InapplicableReason) -> Self {
        Self::Inapplicable { reason }
    }
}

/// Calculate the discount `rules` yield for `quantity` units at `unit_price` each.
#[must_use]
pub fn calculate_discount(rules: &OfferRules, quantity: u32, unit_price: u64) -> Discount {
    if quantity == 0 {
        return Discount::inapplicable(InapplicableReason::ZeroQuantity);
    }

    if let Some(required) = rules.min_quantity()
        && quantity < required
    {
        return Discount::inapplicable(InapplicableReason::BelowMinimumQuantity { required });
    }

    let line_total = line_total(quantity, unit_price);

    match *rules {
        OfferRules::BuyXGetY {
            buy_quantity,
            get_quantity,
        } => buy_x_get_y(buy_quantity, get_quantity, quantity, unit_price),
        OfferRules::BundleDiscount { bundle_price, .. } => Discount::Applied {
            amount: line_total.saturating_sub(bundle_price),
        },
        OfferRules::PercentageOff {
            discount_percentage,
            ..
        } => Discount::Applied {
            amount: percent_of_minor(discount_percentage, line_total),
        },
        OfferRules::FixedAmountOff {
            discount_amount, ..
        } => Discount::Applied {
            amount: discount_amount.min(line_total),
        },
    }
}

fn buy_x_get_y(buy: u32, get: u32, quantity: u32, unit_price: u64) -> Discount {
    let set_size = u64::from(buy) + u64::from(get);

    if set_size == 0 {
        return Discount::inapplicable(InapplicableReason::EmptySet);
    }

    let sets = u64::from(quantity) / set_size;
    let free_units = u128::from(sets) * u128::from(get);

    Discount::Applied {
        amount: saturate(free_units * u128::from(unit_price)),
    }
}

fn line_total(quantity: u32, unit_price: u64) -> u64 {
    saturate(u128::from(quantity) * u128::from(unit_price))
}

/// Percentage of a minor-unit amount, rounded half away from zero and capped at the amount.
fn percent_of_minor(percent: Decimal, minor: u64) -> u64 {
    let percent = percent.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);

    Decimal::from(minor)
        .checked_mul(percent)
        .and_then(|scaled| scaled.checked_div(Decimal::ONE_HUNDRED))
        .map(|amount| amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|amount| amount.to_u64())
        .map_or(minor, |amount| amount.min(minor))
}

fn saturate(value: u128) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buy_x_get_y_rules(buy_quantity: u32, get_quantity: u32) -> OfferRules {
        OfferRules::BuyXGetY {
            buy_quantity,
            get_quantity,
        }
    }

    fn percentage(discount_percentage: Decimal) -> OfferRules {
        OfferRules::PercentageOff {
            discount_percentage,
            min_quantity: None,
        }
    }

    #[test]
    fn buy_two_get_one_counts_complete_sets() {
        let discount = calculate_discount(&buy_x_get_y_rules(2, 1), 9, 10);

        assert_eq!(discount, Discount::Applied { amount: 30 });
    }

    #[test]
    fn incomplete_sets_earn_nothing() {
        let discount = calculate_discount(&buy_x_get_y_rules(2, 1), 8, 10);

        assert_eq!(discount.amount(), 20);

        let discount = calculate_discount(&buy_x_get_y_rules(2, 1), 2, 10);

        assert_eq!(discount, Discount::Applied { amount: 0 });
    }

    #[test]
    fn empty_set_is_inapplicable() {
        let discount = calculate_discount(&buy_x_get_y_rules(0, 0), 5, 10);

        assert_eq!(
            discount,
            Discount::Inapplicable {
                reason: InapplicableReason::EmptySet
            }
        );
        assert_eq!(discount.amount(), 0);
    }

    #[test]
    fn bundle_discounts_the_excess_over_bundle_price() {
        let rules = OfferRules::BundleDiscount {
            bundle_price: 50,
            min_quantity: 3,
        };

        assert_eq!(calculate_discount(&rules, 5, 20), Discount::Applied { amount: 50 });
    }

    #[test]
    fn bundle_below_minimum_is_inapplicable() {
        let rules = OfferRules::BundleDiscount {
            bundle_price: 50,
            min_quantity: 3,
        };

        let discount = calculate_discount(&rules, 2, 20);

        assert_eq!(
            discount,
            Discount::Inapplicable {
                reason: InapplicableReason::BelowMinimumQuantity { required: 3 }
            }
        );
        assert_eq!(discount.amount(), 0);
    }

    #[test]
    fn bundle_priced_above_line_total_applies_with_zero() {
        let rules = OfferRules::BundleDiscount {
            bundle_price: 500,
            min_quantity: 3,
        };

        let discount = calculate_discount(&rules, 3, 20);

        assert!(discount.is_applicable());
        assert_eq!(discount.amount(), 0);
    }

    #[test]
    fn percentage_of_line_total() {
        assert_eq!(
            calculate_discount(&percentage(Decimal::from(20)), 3, 10),
            Discount::Applied { amount: 6 }
        );
    }

    #[test]
    fn percentage_rounds_half_away_from_zero() {
        // 12.5% of 20 is 2.5
        let rules = percentage(Decimal::new(125, 1));

        assert_eq!(calculate_discount(&rules, 1, 20).amount(), 3);

        // 12.5% of 12 is 1.5
        assert_eq!(calculate_discount(&rules, 1, 12).amount(), 2);

        // 12.5% of 10 is 1.25
        assert_eq!(calculate_discount(&rules, 1, 10).amount(), 1);
    }

    #[test]
    fn percentage_respects_optional_minimum() {
        let rules = OfferRules::PercentageOff {
            discount_percentage: Decimal::from(10),
            min_quantity: Some(4),
        };

        assert_eq!(
            calculate_discount(&rules, 3, 100),
            Discount::Inapplicable {
                reason: InapplicableReason::BelowMinimumQuantity { required: 4 }
            }
        );
        assert_eq!(calculate_discount(&rules, 4, 100).amount(), 40);
    }

    #[test]
    fn out_of_range_percentages_are_clamped() {
        assert_eq!(calculate_discount(&percentage(Decimal::from(150)), 2, 10).amount(), 20);
        assert_eq!(calculate_discount(&percentage(Decimal::NEGATIVE_ONE), 2, 10).amount(), 0);
    }

    #[test]
    fn fixed_amount_is_capped_at_line_total() {
        let rules = OfferRules::FixedAmountOff {
            discount_amount: 15,
            min_quantity: None,
        };

        assert_eq!(calculate_discount(&rules, 1, 10), Discount::Applied { amount: 10 });
        assert_eq!(calculate_discount(&rules, 2, 10), Discount::Applied { amount: 15 });
    }

    #[test]
    fn zero_quantity_is_inapplicable_for_every_type() {
        let all = [
            buy_x_get_y_rules(2, 1),
            OfferRules::BundleDiscount {
                bundle_price: 50,
                min_quantity: 1,
            },
            percentage(Decimal::from(20)),
            OfferRules::FixedAmountOff {
                discount_amount: 5,
                min_quantity: None,
            },
        ];

        for rules in &all {
            assert_eq!(
                calculate_discount(rules, 0, 10),
                Discount::Inapplicable {
                    reason: InapplicableReason::ZeroQuantity
                }
            );
        }
    }

    #[test]
    fn huge_lines_saturate_instead_of_overflowing() {
        let rules = OfferRules::FixedAmountOff {
            discount_amount: u64::MAX,
            min_quantity: None,
        };

        assert_eq!(calculate_discount(&rules, u32::MAX, u64::MAX).amount(), u64::MAX);

        assert_eq!(
            calculate_discount(&buy_x_get_y_rules(1, 1), u32::MAX, u64::MAX).amount(),
            u64::MAX
        );

        assert_eq!(
            calculate_discount(&percentage(Decimal::ONE_HUNDRED), u32::MAX, u64::MAX).amount(),
            u64::MAX
        );
    }

    #[test]
    fn calculation_is_idempotent() {
        let rules = buy_x_get_y_rules(3, 2);

        let first = calculate_discount(&rules, 17, 299);
        let second = calculate_discount(&rules, 17, 299);

        assert_eq!(first, second);
    }
}
