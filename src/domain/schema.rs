//! The field catalog behind the wizard.
//!
//! `FIELDS` is the canonical schema: its order is the display order within a
//! step, and the form store, the normalizer, and the review summary all walk it
//! in that order.

use serde::Serialize;

/// How a field is edited and presented.
///
/// The type is advisory only: the form store accepts any raw string and the
/// normalizer decides what to send based on the value, not the declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Number,
    Boolean,
}

/// One page of the wizard.
///
/// `Review` is the terminal step; it owns no fields and shows either the review
/// summary or the assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum WizardStep {
    BasicInfo,
    FinancialInfo,
    CreditHistory,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::BasicInfo,
        WizardStep::FinancialInfo,
        WizardStep::CreditHistory,
        WizardStep::Review,
    ];

    /// 1-based step number.
    pub fn number(self) -> u8 {
        match self {
            WizardStep::BasicInfo => 1,
            WizardStep::FinancialInfo => 2,
            WizardStep::CreditHistory => 3,
            WizardStep::Review => 4,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.number() == n)
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::BasicInfo => "Basic Info",
            WizardStep::FinancialInfo => "Financial Info",
            WizardStep::CreditHistory => "Credit History",
            WizardStep::Review => "Review & Submit",
        }
    }

    pub fn next(self) -> Self {
        match self {
            WizardStep::BasicInfo => WizardStep::FinancialInfo,
            WizardStep::FinancialInfo => WizardStep::CreditHistory,
            WizardStep::CreditHistory | WizardStep::Review => WizardStep::Review,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            WizardStep::BasicInfo | WizardStep::FinancialInfo => WizardStep::BasicInfo,
            WizardStep::CreditHistory => WizardStep::FinancialInfo,
            WizardStep::Review => WizardStep::CreditHistory,
        }
    }
}

/// Static description of a single input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    pub key: &'static str,
    pub label: &'static str,
    pub help: &'static str,
    pub value_type: ValueType,
    pub step: WizardStep,
}

const fn number(
    key: &'static str,
    label: &'static str,
    help: &'static str,
    step: WizardStep,
) -> FieldDescriptor {
    FieldDescriptor {
        key,
        label,
        help,
        value_type: ValueType::Number,
        step,
    }
}

const fn boolean(
    key: &'static str,
    label: &'static str,
    help: &'static str,
    step: WizardStep,
) -> FieldDescriptor {
    FieldDescriptor {
        key,
        label,
        help,
        value_type: ValueType::Boolean,
        step,
    }
}

pub static FIELDS: &[FieldDescriptor] = &[
    number(
        "age",
        "Age (years)",
        "Applicant age in whole years.",
        WizardStep::BasicInfo,
    ),
    number(
        "annual_income",
        "Annual Income",
        "Gross yearly income (numbers only, same currency as the model).",
        WizardStep::FinancialInfo,
    ),
    number(
        "employment_years",
        "Years in Current Job",
        "Full years employed in the current position.",
        WizardStep::FinancialInfo,
    ),
    number(
        "derogatory_marks",
        "Derogatory Marks",
        "Count of derogatory credit report items (collections, liens, etc.).",
        WizardStep::FinancialInfo,
    ),
    number(
        "inquiries_last6m",
        "Credit Checks (6 mo)",
        "Hard credit inquiries in the last 6 months.",
        WizardStep::FinancialInfo,
    ),
    number(
        "inquiries_finance_24m",
        "Finance Inquiries (24 mo)",
        "Hard inquiries for finance or loan products in the last 24 months.",
        WizardStep::FinancialInfo,
    ),
    number(
        "total_accounts",
        "Total Credit Accounts",
        "Credit accounts ever opened, open and closed.",
        WizardStep::FinancialInfo,
    ),
    number(
        "active_accounts",
        "Open Credit Accounts",
        "Currently open credit accounts (revolving + installment).",
        WizardStep::FinancialInfo,
    ),
    boolean(
        "high_credit_util_75",
        "Any Account Utilization ≥ 75%?",
        "Yes if any single revolving line uses 75% or more of its limit.",
        WizardStep::CreditHistory,
    ),
    boolean(
        "util_50_plus",
        "Overall Utilization ≥ 50%?",
        "Yes if total revolving balance / total revolving limit is at least 50%.",
        WizardStep::CreditHistory,
    ),
    number(
        "balance_high_credit_pct",
        "Balance / Credit Limit %",
        "Average balance as a percent of high credit or limits (0-100).",
        WizardStep::CreditHistory,
    ),
    number(
        "satisfied_pct",
        "% Accounts Satisfied",
        "Percent of accounts fully paid or satisfied (0-100).",
        WizardStep::CreditHistory,
    ),
    number(
        "delinquency_30_60_24m",
        "30–60 Day Lates (24 mo)",
        "30-60 day delinquencies in the last 24 months.",
        WizardStep::CreditHistory,
    ),
    number(
        "delinquency_90d_24m",
        "90+ Day Lates (24 mo)",
        "90+ day delinquencies in the last 24 months.",
        WizardStep::CreditHistory,
    ),
    number(
        "delinquencies_60d",
        "All 60+ Day Lates (lifetime)",
        "Total historical 60+ day delinquencies.",
        WizardStep::CreditHistory,
    ),
    number(
        "chargeoffs_last24m",
        "Charge-offs (24 mo)",
        "Accounts charged off in the last 24 months.",
        WizardStep::CreditHistory,
    ),
    number(
        "derog_or_bad_cnt",
        "Derog/Bad Accounts Count",
        "Accounts in derogatory or bad status (collections, charge-offs, etc.).",
        WizardStep::CreditHistory,
    ),
    number(
        "accounts_open_last24m",
        "New Accounts Opened (24 mo)",
        "New credit accounts opened in the last 24 months.",
        WizardStep::CreditHistory,
    ),
    number(
        "max_account_balance",
        "Largest Single Account Balance",
        "Highest current balance on any single account.",
        WizardStep::CreditHistory,
    ),
    number(
        "total_balance",
        "Total Current Balance",
        "Sum of balances across all open accounts.",
        WizardStep::CreditHistory,
    ),
];

/// Index of `key` in `FIELDS`.
pub fn position(key: &str) -> Option<usize> {
    FIELDS.iter().position(|f| f.key == key)
}

pub fn field(key: &str) -> Option<&'static FieldDescriptor> {
    FIELDS.iter().find(|f| f.key == key)
}

/// Fields shown on `step`, in display order.
pub fn fields_for_step(step: WizardStep) -> impl Iterator<Item = &'static FieldDescriptor> {
    FIELDS.iter().filter(move |f| f.step == step)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn keys_are_unique() {
        let keys: HashSet<&str> = FIELDS.iter().map(|f| f.key).collect();
        assert_eq!(keys.len(), FIELDS.len());
    }

    #[test]
    fn review_step_has_no_fields() {
        assert_eq!(fields_for_step(WizardStep::Review).count(), 0);
        for step in [
            WizardStep::BasicInfo,
            WizardStep::FinancialInfo,
            WizardStep::CreditHistory,
        ] {
            assert!(fields_for_step(step).count() > 0, "{step:?} should own fields");
        }
    }

    #[test]
    fn step_numbers_round_trip() {
        for step in WizardStep::ALL {
            assert_eq!(WizardStep::from_number(step.number()), Some(step));
        }
        assert_eq!(WizardStep::from_number(0), None);
        assert_eq!(WizardStep::from_number(5), None);
    }

    #[test]
    fn boolean_fields_are_the_utilization_flags() {
        let flags: Vec<&str> = FIELDS
            .iter()
            .filter(|f| f.value_type == ValueType::Boolean)
            .map(|f| f.key)
            .collect();
        assert_eq!(flags, vec!["high_credit_util_75", "util_50_plus"]);
    }
}
