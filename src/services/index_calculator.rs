use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

use crate::models::index::IndexKind;
use crate::models::product::Product;

pub const TAG_INFLATION: &str = "Inflacion";
pub const TAG_DEFLATION: &str = "Deflacion";
pub const FISHER_TAG_INFLATION: &str = "Inflación";
pub const FISHER_TAG_DEFLATION: &str = "Deflación";

/// Which year's consumed quantities weight the basket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightPeriod {
    /// Laspeyres
    Base,
    /// Paasche
    Current,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BasketSums {
    pub numerator: Decimal,
    pub denominator: Decimal,
}

impl BasketSums {
    /// `numerator / denominator * 100`, or 0 when the denominator is 0.
    /// `None` when the result does not fit a `Decimal`.
    pub fn index_value(&self) -> Option<Decimal> {
        if self.denominator.is_zero() {
            return Some(Decimal::ZERO);
        }
        self.numerator
            .checked_div(self.denominator)?
            .checked_mul(Decimal::ONE_HUNDRED)
    }
}

/// Sum current-year and base-year basket costs at the chosen weights.
///
/// A product without an observation for a year contributes price 0 and
/// quantity 0 for that year. Returns `None` if a sum overflows `Decimal`.
pub fn basket_sums(
    base_year: i32,
    current_year: i32,
    products: &[Product],
    weights: WeightPeriod,
) -> Option<BasketSums> {
    let mut sums = BasketSums::default();

    for product in products {
        let base = product.observation_for(base_year);
        let current = product.observation_for(current_year);

        let base_price = base.map(|o| o.price).unwrap_or(Decimal::ZERO);
        let current_price = current.map(|o| o.price).unwrap_or(Decimal::ZERO);
        let weight = match weights {
            WeightPeriod::Base => base.map(|o| o.quantity_consumed).unwrap_or(0),
            WeightPeriod::Current => current.map(|o| o.quantity_consumed).unwrap_or(0),
        };
        let weight = Decimal::from(weight);

        sums.numerator = sums
            .numerator
            .checked_add(current_price.checked_mul(weight)?)?;
        sums.denominator = sums
            .denominator
            .checked_add(base_price.checked_mul(weight)?)?;
    }

    Some(sums)
}

/// Geometric mean of a Laspeyres and a Paasche value.
///
/// The square root is taken in `f64` and converted back to `Decimal`. The
/// result is clamped to `[min(L, P), max(L, P)]` so binary rounding noise
/// never pushes it outside its inputs; equal inputs are returned as is.
pub fn fisher(laspeyres: Decimal, paasche: Decimal) -> Decimal {
    if laspeyres == paasche {
        return laspeyres;
    }

    let low = laspeyres.min(paasche);
    let high = laspeyres.max(paasche);

    let product = laspeyres.to_f64().unwrap_or(0.0) * paasche.to_f64().unwrap_or(0.0);
    let root = Decimal::from_f64(product.sqrt()).unwrap_or_else(|| {
        tracing::warn!(
            "Fisher root is not representable ({} x {}), using lower bound",
            laspeyres,
            paasche
        );
        low
    });

    root.clamp(low, high)
}

/// Direction tag attached to a computation result. Strictly above 100 is
/// inflation; exactly 100 is tagged as deflation.
pub fn trend_tag(kind: IndexKind, value: Decimal) -> &'static str {
    let rising = value > Decimal::ONE_HUNDRED;
    match (kind, rising) {
        (IndexKind::Fisher, true) => FISHER_TAG_INFLATION,
        (IndexKind::Fisher, false) => FISHER_TAG_DEFLATION,
        (_, true) => TAG_INFLATION,
        (_, false) => TAG_DEFLATION,
    }
}

/// Values handed back to callers carry 2 decimals (midpoint to even).
pub fn round_for_display(value: Decimal) -> Decimal {
    value.round_dp(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::product::Observation;
    use rust_decimal_macros::dec;

    fn product(id: i32, observations: &[(i32, Decimal, i32)]) -> Product {
        Product {
            id,
            name: format!("product-{}", id),
            unit_of_measure: "kg".to_string(),
            category: None,
            observations: observations
                .iter()
                .enumerate()
                .map(|(i, (year, price, quantity))| Observation {
                    id: id * 100 + i as i32,
                    product_id: id,
                    year: *year,
                    price: *price,
                    quantity_consumed: *quantity,
                })
                .collect(),
        }
    }

    fn laspeyres(base_year: i32, current_year: i32, products: &[Product]) -> Decimal {
        basket_sums(base_year, current_year, products, WeightPeriod::Base)
            .and_then(|sums| sums.index_value())
            .unwrap()
    }

    fn paasche(base_year: i32, current_year: i32, products: &[Product]) -> Decimal {
        basket_sums(base_year, current_year, products, WeightPeriod::Current)
            .and_then(|sums| sums.index_value())
            .unwrap()
    }

    #[test]
    fn test_single_product_scenario() {
        let products = vec![product(1, &[(2020, dec!(10), 5), (2021, dec!(12), 6)])];

        let l = basket_sums(2020, 2021, &products, WeightPeriod::Base).unwrap();
        assert_eq!(l.numerator, dec!(60));
        assert_eq!(l.denominator, dec!(50));
        assert_eq!(l.index_value(), Some(dec!(120)));

        let p = basket_sums(2020, 2021, &products, WeightPeriod::Current).unwrap();
        assert_eq!(p.numerator, dec!(72));
        assert_eq!(p.denominator, dec!(60));
        assert_eq!(paasche(2020, 2021, &products), dec!(120));

        assert_eq!(round_for_display(fisher(dec!(120), dec!(120))), dec!(120.00));
    }

    #[test]
    fn test_unchanged_basket_is_100() {
        let products = vec![
            product(1, &[(2020, dec!(3.25), 7), (2021, dec!(3.25), 7)]),
            product(2, &[(2020, dec!(18.9), 2), (2021, dec!(18.9), 2)]),
        ];

        assert_eq!(laspeyres(2020, 2021, &products), dec!(100));
        assert_eq!(paasche(2020, 2021, &products), dec!(100));
    }

    #[test]
    fn test_weights_differ_between_formulas() {
        let products = vec![
            product(1, &[(2020, dec!(10), 10), (2021, dec!(20), 1)]),
            product(2, &[(2020, dec!(10), 1), (2021, dec!(10), 10)]),
        ];

        // (20*10 + 10*1) / (10*10 + 10*1) * 100
        let l = laspeyres(2020, 2021, &products);
        assert_eq!(round_for_display(l), dec!(190.91));

        // (20*1 + 10*10) / (10*1 + 10*10) * 100
        let p = paasche(2020, 2021, &products);
        assert_eq!(round_for_display(p), dec!(109.09));
    }

    #[test]
    fn test_zero_denominator_yields_zero() {
        // No base-year observations at all
        let products = vec![product(1, &[(2021, dec!(12), 6)])];
        assert_eq!(laspeyres(2020, 2021, &products), Decimal::ZERO);

        // Base-year prices of zero
        let products = vec![product(1, &[(2020, dec!(0), 5), (2021, dec!(12), 5)])];
        assert_eq!(laspeyres(2020, 2021, &products), Decimal::ZERO);
        assert_eq!(paasche(2020, 2021, &products), Decimal::ZERO);

        assert_eq!(laspeyres(2020, 2021, &[]), Decimal::ZERO);
    }

    #[test]
    fn test_missing_current_year_yields_zero() {
        let products = vec![
            product(1, &[(2020, dec!(10), 5)]),
            product(2, &[(2020, dec!(4), 3)]),
        ];

        // Numerator is 0 with a non-zero denominator
        assert_eq!(laspeyres(2020, 2021, &products), Decimal::ZERO);
        // Current-year quantities are 0, so the denominator is 0 too
        assert_eq!(paasche(2020, 2021, &products), Decimal::ZERO);
    }

    #[test]
    fn test_duplicate_year_uses_first_observation() {
        let products = vec![product(
            1,
            &[(2020, dec!(10), 5), (2020, dec!(50), 50), (2021, dec!(12), 6)],
        )];

        assert_eq!(laspeyres(2020, 2021, &products), dec!(120));
    }

    #[test]
    fn test_fisher_lies_between_inputs() {
        let cases = [
            (dec!(120), dec!(110)),
            (dec!(95.5), dec!(103.25)),
            (dec!(190.9091), dec!(109.0909)),
        ];

        for (l, p) in cases {
            let f = fisher(l, p);
            assert!(f >= l.min(p) && f <= l.max(p), "{} not in [{}, {}]", f, l, p);
        }
    }

    #[test]
    fn test_fisher_equal_inputs_are_returned_unchanged() {
        let third = dec!(100) / dec!(3);
        assert_eq!(fisher(third, third), third);
        assert_eq!(fisher(dec!(105.3), dec!(105.3)), dec!(105.3));
    }

    #[test]
    fn test_fisher_stays_within_inputs_with_long_decimals() {
        let l = dec!(100) / dec!(3);
        let p = l + dec!(0.0000000000000000000000001);
        let f = fisher(l, p);
        assert!(f >= l && f <= p, "{} not in [{}, {}]", f, l, p);
    }

    #[test]
    fn test_overflowing_basket_is_reported() {
        let products = vec![
            product(1, &[(2020, dec!(0.0001), 1), (2021, dec!(99999999999999.9999), 1)]),
            product(
                2,
                &[(2020, dec!(0), 2_000_000_000), (2021, dec!(99999999999999.9999), 2_000_000_000)],
            ),
        ];

        let sums = basket_sums(2020, 2021, &products, WeightPeriod::Base)
            .expect("sums fit in a Decimal");
        assert_eq!(sums.denominator, dec!(0.0001));
        assert!(sums.index_value().is_none());
    }

    #[test]
    fn test_overflowing_sum_is_reported() {
        let products = vec![
            product(1, &[(2020, Decimal::MAX, 1), (2021, Decimal::MAX, 1)]),
            product(2, &[(2020, Decimal::MAX, 1), (2021, Decimal::MAX, 1)]),
        ];

        assert!(basket_sums(2020, 2021, &products, WeightPeriod::Base).is_none());
    }

    #[test]
    fn test_trend_tags() {
        assert_eq!(trend_tag(IndexKind::Laspeyres, dec!(100.01)), "Inflacion");
        assert_eq!(trend_tag(IndexKind::Paasche, dec!(100)), "Deflacion");
        assert_eq!(trend_tag(IndexKind::Paasche, dec!(80)), "Deflacion");
        assert_eq!(trend_tag(IndexKind::Fisher, dec!(120)), "Inflación");
        assert_eq!(trend_tag(IndexKind::Fisher, dec!(100)), "Deflación");
    }

    #[test]
    fn test_round_for_display_uses_bankers_rounding() {
        assert_eq!(round_for_display(dec!(100.125)), dec!(100.12));
        assert_eq!(round_for_display(dec!(100.135)), dec!(100.14));
        assert_eq!(round_for_display(dec!(190.909090)), dec!(190.91));
    }
}
