//! Rounding residue reconciliation after interest allocation.

use accrue_core::prelude::*;
use proptest::prelude::*;

fn start() -> Date {
    Date::from_ymd(2021, 1, 15).unwrap()
}

fn loan(principal: f64, instalment: f64, count: usize) -> Profile {
    let mut flows = vec![CashFlow::advance(start(), None, Some(principal)).unwrap()];
    for i in 1..=count {
        let due = start().add_months(i as i32).unwrap();
        flows.push(CashFlow::payment(due, Some(instalment), true));
    }
    Profile::new(flows, 2).unwrap()
}

/// One monthly step of a mixed profile.
#[derive(Debug, Clone, Copy)]
enum Step {
    Capitalised(f64),
    Uncapitalised(f64),
    Drawing(f64),
    FeeThenPayment(f64),
}

fn step() -> impl Strategy<Value = Step> {
    (0u8..4, 1_000u32..500_000).prop_map(|(kind, cents)| {
        let amount = f64::from(cents) / 100.0;
        match kind {
            0 => Step::Capitalised(amount),
            1 => Step::Uncapitalised(amount),
            2 => Step::Drawing(amount),
            _ => Step::FeeThenPayment(amount),
        }
    })
}

fn mixed_loan(principal: f64, steps: &[Step], last: f64) -> Profile {
    let mut flows = vec![CashFlow::advance(start(), None, Some(principal)).unwrap()];
    for (i, step) in steps.iter().enumerate() {
        let due = start().add_months(i as i32 + 1).unwrap();
        match *step {
            Step::Capitalised(amount) => flows.push(CashFlow::payment(due, Some(amount), true)),
            Step::Uncapitalised(amount) => {
                flows.push(CashFlow::payment(due, Some(amount), false));
            }
            Step::Drawing(amount) => {
                flows.push(CashFlow::advance(due, None, Some(amount)).unwrap());
            }
            Step::FeeThenPayment(amount) => {
                flows.push(CashFlow::charge(due, 25.0));
                flows.push(CashFlow::payment(due, Some(amount), true));
            }
        }
    }
    let due = start().add_months(steps.len() as i32 + 1).unwrap();
    flows.push(CashFlow::payment(due, Some(last), true));
    Profile::new(flows, 2).unwrap()
}

/// Capital left once every value and allocated interest has been applied.
fn outstanding(profile: &Profile) -> f64 {
    profile
        .cash_flows()
        .iter()
        .filter(|cf| !cf.is_charge())
        .map(|cf| cf.value() + cf.interest())
        .sum()
}

fn conventions(include_charges: bool) -> Vec<Convention> {
    let options = DayCountOptions::new(true, include_charges, false);
    vec![
        Convention::thirty_360_us(options),
        Convention::act_365(options),
        Convention::act_isda(options),
    ]
}

proptest! {
    #[test]
    fn prop_interest_reconciles_balance_to_zero(
        principal in 1_000u32..100_000,
        instalment_cents in 5_000u32..2_000_000,
        count in 2usize..36,
        rate in 0.0f64..0.35,
        convention in prop::sample::select(conventions(false)),
    ) {
        let mut profile = loan(f64::from(principal), f64::from(instalment_cents) / 100.0, count);
        profile.assign_factors(convention);
        profile.update_amort_int(rate);

        prop_assert!(outstanding(&profile).abs() < 1e-6);
    }

    #[test]
    fn prop_mixed_profiles_reconcile(
        principal in 1_000u32..100_000,
        steps in prop::collection::vec(step(), 1..24),
        last_cents in 5_000u32..2_000_000,
        rate in 0.0f64..0.35,
        include_charges in any::<bool>(),
        index in 0usize..3,
    ) {
        let last = f64::from(last_cents) / 100.0;
        let mut profile = mixed_loan(f64::from(principal), &steps, last);
        profile.assign_factors(conventions(include_charges)[index]);
        profile.update_amort_int(rate);

        prop_assert!(outstanding(&profile).abs() < 1e-6);
        let mut charges = profile.cash_flows().iter().filter(|cf| cf.is_charge());
        prop_assert!(charges.all(|cf| cf.interest() == 0.0));
    }
}

#[test]
fn residue_lands_on_last_payment() {
    let mut profile = loan(1000.0, 340.02, 3);
    profile.assign_factors(Convention::default());
    profile.update_amort_int(0.12);

    let last = profile.cash_flows().last().unwrap();
    assert_eq!(last.interest(), -3.36);
    assert!(outstanding(&profile).abs() < 1e-9);
}

#[test]
fn later_drawing_carries_interest() {
    let steps = [Step::Drawing(500.0), Step::Capitalised(600.0)];
    let mut profile = mixed_loan(1000.0, &steps, 950.0);
    profile.assign_factors(Convention::default());
    profile.update_amort_int(0.12);

    let drawing = &profile.cash_flows()[1];
    assert!(drawing.is_advance());
    assert_eq!(drawing.interest(), -10.0);
    assert!(outstanding(&profile).abs() < 1e-9);
}
