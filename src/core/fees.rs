use super::input::{CalculationInput, InspectionType};
use super::money::Cents;
use super::rates::RateConfig;
use rust_decimal::Decimal;
use serde::Serialize;

/// Itemised on-road costs, in dollars.
///
/// `road_rego_subtotal` is the sum of every line except duty, and
/// `total_on_road` is that subtotal plus duty. Both hold exactly since all
/// figures are summed as whole cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeeBreakdown {
    pub gst: Decimal,
    pub dutiable: Decimal,
    pub duty: Decimal,
    pub licence_fee: Decimal,
    pub insurance_base: Decimal,
    pub insurance_gst: Decimal,
    pub insurance_duty: Decimal,
    pub recording_fee: Decimal,
    pub plate_fee: Decimal,
    pub inspection_fee: Decimal,
    pub road_rego_subtotal: Decimal,
    pub total_on_road: Decimal,
}

/// Calculate the on-road cost breakdown for `input` under `rates`.
///
/// Total over all inputs: negative prices and axle counts outside 1-9 are
/// computed as given.
pub fn calculate(input: &CalculationInput, rates: &RateConfig) -> FeeBreakdown {
    let price = Cents::from_dollars(input.price_ex_gst);

    let gst = if input.include_gst_in_duty {
        price.apply_rate(rates.gst_rate)
    } else {
        Cents::ZERO
    };
    let dutiable = price + gst;

    let duty_raw = dutiable.apply_rate(rates.duty_rate);
    let duty = if input.apply_duty_cap {
        duty_raw.min(Cents::from_dollars(rates.duty_cap))
    } else {
        duty_raw
    };

    let licence_fee =
        Cents::from_dollars(rates.licence_per_axle.saturating_mul(Decimal::from(input.axles)));

    let (insurance_base, insurance_gst, insurance_duty) = if input.include_insurance_lines {
        let base = Cents::from_dollars(rates.insurance_base);
        (
            base,
            base.apply_rate(rates.insurance_gst_rate),
            base.apply_rate(rates.insurance_duty_rate),
        )
    } else {
        (Cents::ZERO, Cents::ZERO, Cents::ZERO)
    };

    let (recording_fee, plate_fee) = if input.first_time_licensing {
        (
            Cents::from_dollars(rates.recording_fee),
            Cents::from_dollars(rates.plate_fee),
        )
    } else {
        (Cents::ZERO, Cents::ZERO)
    };

    let inspection_fee = match input.inspection {
        InspectionType::None => Cents::ZERO,
        InspectionType::Initial => Cents::from_dollars(rates.inspection_initial),
        InspectionType::Reinspection => Cents::from_dollars(rates.inspection_reinspection),
    };

    let road_rego_subtotal: Cents = [
        licence_fee,
        insurance_base,
        insurance_gst,
        insurance_duty,
        recording_fee,
        plate_fee,
        inspection_fee,
    ]
    .into_iter()
    .sum();
    let total_on_road = road_rego_subtotal + duty;

    log::debug!(
        "price {} gst {} dutiable {} duty {} (raw {}) rego {} total {}",
        price,
        gst,
        dutiable,
        duty,
        duty_raw,
        road_rego_subtotal,
        total_on_road
    );

    FeeBreakdown {
        gst: gst.to_dollars(),
        dutiable: dutiable.to_dollars(),
        duty: duty.to_dollars(),
        licence_fee: licence_fee.to_dollars(),
        insurance_base: insurance_base.to_dollars(),
        insurance_gst: insurance_gst.to_dollars(),
        insurance_duty: insurance_duty.to_dollars(),
        recording_fee: recording_fee.to_dollars(),
        plate_fee: plate_fee.to_dollars(),
        inspection_fee: inspection_fee.to_dollars(),
        road_rego_subtotal: road_rego_subtotal.to_dollars(),
        total_on_road: total_on_road.to_dollars(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rates::DEFAULT_RATES;
    use rust_decimal_macros::dec;

    fn calculate_default(input: &CalculationInput) -> FeeBreakdown {
        calculate(input, &DEFAULT_RATES)
    }

    fn input(price: Decimal, axles: u32) -> CalculationInput {
        CalculationInput {
            price_ex_gst: price,
            axles,
            include_gst_in_duty: true,
            apply_duty_cap: true,
            first_time_licensing: true,
            include_insurance_lines: false,
            inspection: InspectionType::None,
        }
    }

    fn with_insurance(mut input: CalculationInput) -> CalculationInput {
        input.include_insurance_lines = true;
        input
    }

    fn with_inspection(mut input: CalculationInput, inspection: InspectionType) -> CalculationInput {
        input.inspection = inspection;
        input
    }

    fn assert_totals_consistent(b: &FeeBreakdown) {
        assert_eq!(
            b.road_rego_subtotal,
            b.licence_fee
                + b.insurance_base
                + b.insurance_gst
                + b.insurance_duty
                + b.recording_fee
                + b.plate_fee
                + b.inspection_fee
        );
        assert_eq!(b.total_on_road, b.road_rego_subtotal + b.duty);
    }

    #[test]
    fn three_axle_first_time_licence() {
        let b = calculate_default(&input(dec!(75000), 3));
        assert_eq!(b.gst, dec!(7500.00));
        assert_eq!(b.dutiable, dec!(82500.00));
        assert_eq!(b.duty, dec!(2475.00));
        assert_eq!(b.licence_fee, dec!(1716.00));
        assert_eq!(b.recording_fee, dec!(10.45));
        assert_eq!(b.plate_fee, dec!(32.00));
        assert_eq!(b.road_rego_subtotal, dec!(1758.45));
        assert_eq!(b.total_on_road, dec!(4233.45));
        assert_totals_consistent(&b);
    }

    #[test]
    fn insurance_lines_add_micro_charges() {
        let b = calculate_default(&with_insurance(input(dec!(75000), 3)));
        assert_eq!(b.insurance_base, dec!(14.59));
        assert_eq!(b.insurance_gst, dec!(1.46));
        assert_eq!(b.insurance_duty, dec!(1.60));
        assert_eq!(b.total_on_road, dec!(4251.10));
        assert_totals_consistent(&b);
    }

    #[test]
    fn duty_capped_for_expensive_trailer() {
        let b = calculate_default(&input(dec!(1000000), 1));
        assert_eq!(b.duty, dec!(12000.00));
        assert_eq!(b.total_on_road, dec!(12614.45));
        assert_totals_consistent(&b);
    }

    #[test]
    fn duty_uncapped_when_cap_off() {
        let mut i = input(dec!(1000000), 1);
        i.apply_duty_cap = false;
        let b = calculate_default(&i);
        assert_eq!(b.duty, dec!(33000.00));
        assert_eq!(b.total_on_road, dec!(33614.45));
    }

    #[test]
    fn gst_excluded_from_dutiable_value() {
        let mut i = input(dec!(50000), 2);
        i.include_gst_in_duty = false;
        let b = calculate_default(&i);
        assert_eq!(b.gst, Decimal::ZERO);
        assert_eq!(b.dutiable, dec!(50000.00));
        assert_eq!(b.duty, dec!(1500.00));
        assert_eq!(b.total_on_road, dec!(2686.45));
    }

    #[test]
    fn inspection_fees() {
        let base = with_insurance(input(dec!(75000), 3));
        let initial = calculate_default(&with_inspection(base.clone(), InspectionType::Initial));
        assert_eq!(initial.inspection_fee, dec!(284.00));
        assert_eq!(initial.total_on_road, dec!(4535.10));

        let reinspection = calculate_default(&with_inspection(base, InspectionType::Reinspection));
        assert_eq!(reinspection.inspection_fee, dec!(172.00));
        assert_eq!(reinspection.total_on_road, dec!(4423.10));
    }

    #[test]
    fn zero_price_still_charges_flat_fees() {
        let i = with_inspection(with_insurance(input(dec!(0), 3)), InspectionType::Initial);
        let b = calculate_default(&i);
        assert_eq!(b.gst, Decimal::ZERO);
        assert_eq!(b.dutiable, Decimal::ZERO);
        assert_eq!(b.duty, dec!(0.00));
        assert_eq!(b.total_on_road, dec!(2060.10));
        assert_totals_consistent(&b);
    }

    #[test]
    fn duty_exactly_at_cap_equals_cap() {
        // 400000 * 1.1 * 0.03 = 13200; lower cap to meet it exactly
        let rates = RateConfig {
            duty_cap: dec!(13200),
            ..DEFAULT_RATES
        };
        let b = calculate(&input(dec!(400000), 1), &rates);
        assert_eq!(b.duty, dec!(13200.00));
    }

    #[test]
    fn renewal_drops_recording_and_plate() {
        let mut i = input(dec!(75000), 3);
        i.first_time_licensing = false;
        let b = calculate_default(&i);
        assert_eq!(b.recording_fee, Decimal::ZERO);
        assert_eq!(b.plate_fee, Decimal::ZERO);
        assert_eq!(b.total_on_road, dec!(4191.00));
    }

    #[test]
    fn no_insurance_means_zero_insurance_lines() {
        let b = calculate_default(&input(dec!(75000), 3));
        assert_eq!(b.insurance_base, Decimal::ZERO);
        assert_eq!(b.insurance_gst, Decimal::ZERO);
        assert_eq!(b.insurance_duty, Decimal::ZERO);
    }

    #[test]
    fn gst_rounds_in_cents() {
        // 12345.67 * 0.10 = 1234.567 -> 1234.57
        let b = calculate_default(&input(dec!(12345.67), 1));
        assert_eq!(b.gst, dec!(1234.57));
        assert_eq!(b.dutiable, dec!(13580.24));
        // 1358024c * 0.03 = 40740.72c -> 40741c
        assert_eq!(b.duty, dec!(407.41));
    }

    #[test]
    fn sub_cent_price_rounds_half_away_from_zero() {
        let b = calculate_default(&input(dec!(0.005), 1));
        assert_eq!(b.dutiable, dec!(0.01));
    }

    #[test]
    fn axles_not_clamped_by_calculator() {
        assert_eq!(calculate_default(&input(dec!(0), 0)).licence_fee, Decimal::ZERO);
        assert_eq!(calculate_default(&input(dec!(0), 12)).licence_fee, dec!(6864.00));
    }

    #[test]
    fn negative_price_is_consistent() {
        let b = calculate_default(&input(dec!(-1000), 2));
        assert_eq!(b.gst, dec!(-100.00));
        assert_eq!(b.dutiable, dec!(-1100.00));
        assert_eq!(b.duty, dec!(-33.00));
        assert_totals_consistent(&b);
    }

    #[test]
    fn licence_fee_rounds_fractional_rate() {
        let rates = RateConfig {
            licence_per_axle: dec!(100.005),
            ..DEFAULT_RATES
        };
        // 100.005 * 3 = 300.015 -> 300.02
        let b = calculate(&input(dec!(0), 3), &rates);
        assert_eq!(b.licence_fee, dec!(300.02));
    }

    #[test]
    fn invariants_hold_across_inputs() {
        let prices = [dec!(0), dec!(0.01), dec!(999.99), dec!(75000), dec!(363636.37), dec!(5000000)];
        let inspections = [
            InspectionType::None,
            InspectionType::Initial,
            InspectionType::Reinspection,
        ];
        for price in prices {
            for axles in 1..=9 {
                for inspection in inspections {
                    for flags in 0..16u8 {
                        let i = CalculationInput {
                            price_ex_gst: price,
                            axles,
                            include_gst_in_duty: flags & 1 != 0,
                            apply_duty_cap: flags & 2 != 0,
                            first_time_licensing: flags & 4 != 0,
                            include_insurance_lines: flags & 8 != 0,
                            inspection,
                        };
                        let b = calculate_default(&i);
                        assert_totals_consistent(&b);

                        if i.apply_duty_cap {
                            assert!(b.duty <= DEFAULT_RATES.duty_cap);
                        }
                        if !i.include_insurance_lines {
                            assert!(b.insurance_base.is_zero());
                            assert!(b.insurance_gst.is_zero());
                            assert!(b.insurance_duty.is_zero());
                        }
                        if !i.first_time_licensing {
                            assert!(b.recording_fee.is_zero());
                            assert!(b.plate_fee.is_zero());
                        }
                        match inspection {
                            InspectionType::None => assert!(b.inspection_fee.is_zero()),
                            InspectionType::Initial => {
                                assert_eq!(b.inspection_fee, DEFAULT_RATES.inspection_initial)
                            }
                            InspectionType::Reinspection => {
                                assert_eq!(b.inspection_fee, DEFAULT_RATES.inspection_reinspection)
                            }
                        }
                        for field in [
                            b.gst,
                            b.dutiable,
                            b.duty,
                            b.licence_fee,
                            b.insurance_base,
                            b.insurance_gst,
                            b.insurance_duty,
                            b.recording_fee,
                            b.plate_fee,
                            b.inspection_fee,
                            b.road_rego_subtotal,
                            b.total_on_road,
                        ] {
                            assert!(!field.is_sign_negative() || field.is_zero());
                        }
                    }
                }
            }
        }
    }
}
