use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::investments_model::{NewInvestment, PortfolioSummary};

fn entry(cash_amount: Decimal, unit_price: Decimal) -> NewInvestment {
    NewInvestment {
        account_id: "acct-1".to_string(),
        cash_amount,
        unit_price,
    }
}

#[test]
fn test_quantity_is_cash_over_price() {
    let new_investment = entry(dec!(100), dec!(10));
    assert_eq!(new_investment.quantity().unwrap(), dec!(10));

    let new_investment = entry(dec!(50), dec!(20));
    assert_eq!(new_investment.quantity().unwrap(), dec!(2.5));
}

#[test]
fn test_validate_rejects_zero_amounts() {
    assert!(entry(dec!(0), dec!(10)).validate().is_err());
    assert!(entry(dec!(100), dec!(0)).validate().is_err());
}

#[test]
fn test_validate_rejects_negative_amounts() {
    assert!(entry(dec!(-100), dec!(10)).validate().is_err());
    assert!(entry(dec!(100), dec!(-10)).validate().is_err());
}

#[test]
fn test_validate_rejects_blank_account() {
    let mut new_investment = entry(dec!(100), dec!(10));
    new_investment.account_id = " ".to_string();
    assert!(new_investment.validate().is_err());
}

#[test]
fn test_empty_summary_is_all_zeroes() {
    let summary = PortfolioSummary::empty();
    assert_eq!(summary.total_invested, Decimal::ZERO);
    assert_eq!(summary.total_quantity, Decimal::ZERO);
    assert_eq!(summary.average_unit_price, Decimal::ZERO);
}

proptest! {
    #[test]
    fn prop_positive_amounts_always_validate(
        cash in 0.01f64..1_000_000.0,
        price in 0.01f64..100_000.0,
    ) {
        let cash = Decimal::try_from(cash).unwrap();
        let price = Decimal::try_from(price).unwrap();
        let new_investment = entry(cash, price);
        prop_assert!(new_investment.validate().is_ok());
        prop_assert_eq!(new_investment.quantity().unwrap(), cash / price);
    }

    #[test]
    fn prop_non_positive_cash_is_rejected(cash in -1_000_000.0f64..=0.0) {
        let new_investment = entry(Decimal::try_from(cash).unwrap(), dec!(10));
        prop_assert!(new_investment.validate().is_err());
    }

    #[test]
    fn prop_non_positive_price_is_rejected(price in -100_000.0f64..=0.0) {
        let new_investment = entry(dec!(100), Decimal::try_from(price).unwrap());
        prop_assert!(new_investment.validate().is_err());
    }
}
