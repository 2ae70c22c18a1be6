use bson::oid::ObjectId;
use fintrack_backend::model::founder_transaction::{FounderTransaction, FounderTransactionKind};
use fintrack_backend::model::transaction::{PersonalTransaction, TransactionKind};
use fintrack_backend::service::founder_service::summarize;

fn founders() -> Vec<String> {
    vec!["Utkarsh".to_string(), "Umang".to_string()]
}

fn founder_expense(amount: f64, payee: &str, date: &str) -> PersonalTransaction {
    PersonalTransaction {
        id: Some(ObjectId::new()),
        user_id: "owner".to_string(),
        kind: TransactionKind::Expense,
        amount,
        date: date.parse().unwrap(),
        category: "business".to_string(),
        details: None,
        payee: Some(payee.to_string()),
        created_at: None,
        updated_at: None,
    }
}

fn reimbursement(amount: f64, paid_by: &str, paid_to: &str) -> FounderTransaction {
    FounderTransaction {
        id: Some(ObjectId::new()),
        user_id: "owner".to_string(),
        amount,
        date: "2024-02-01".parse().unwrap(),
        kind: FounderTransactionKind::Reimbursement {
            paid_by: paid_by.to_string(),
            paid_to: paid_to.to_string(),
        },
        created_at: None,
        updated_at: None,
    }
}

fn salary(amount: f64, payee: &str) -> FounderTransaction {
    FounderTransaction {
        id: Some(ObjectId::new()),
        user_id: "owner".to_string(),
        amount,
        date: "2024-02-15".parse().unwrap(),
        kind: FounderTransactionKind::Salary {
            payee: payee.to_string(),
        },
        created_at: None,
        updated_at: None,
    }
}

#[test]
fn test_every_configured_founder_gets_a_summary() {
    let summary = summarize(&founders(), &[], &[]);
    assert_eq!(summary.len(), 2);
    assert!(summary.contains_key("Utkarsh"));
    assert!(summary.contains_key("Umang"));
    for founder_summary in summary.values() {
        assert_eq!(founder_summary.total_invested, 0.0);
        assert_eq!(founder_summary.exact_payment, 0.0);
        assert_eq!(founder_summary.net_contribution, 0.0);
    }
}

#[test]
fn test_invested_capital_sums_only_matching_payee() {
    let invested = vec![
        founder_expense(300.0, "Utkarsh", "2024-01-01"),
        founder_expense(200.0, "Utkarsh", "2024-01-05"),
        founder_expense(150.0, "Umang", "2024-01-10"),
    ];
    let summary = summarize(&founders(), &[], &invested);
    assert_eq!(summary["Utkarsh"].total_invested, 500.0);
    assert_eq!(summary["Umang"].total_invested, 150.0);
}

#[test]
fn test_reimbursement_moves_money_between_founders() {
    let txns = vec![reimbursement(100.0, "Umang", "Utkarsh")];
    let invested = vec![founder_expense(500.0, "Utkarsh", "2024-01-01")];
    let summary = summarize(&founders(), &txns, &invested);

    let utkarsh = &summary["Utkarsh"];
    assert_eq!(utkarsh.reimbursements_received, 100.0);
    assert_eq!(utkarsh.reimbursements_made, 0.0);
    // 500 invested - 100 received back
    assert_eq!(utkarsh.exact_payment, 400.0);

    let umang = &summary["Umang"];
    assert_eq!(umang.reimbursements_received, 0.0);
    assert_eq!(umang.reimbursements_made, 100.0);
    // Nothing invested, 100 paid out of pocket
    assert_eq!(umang.exact_payment, 100.0);
}

#[test]
fn test_net_contribution_salary_minus_exact_payment() {
    let txns = vec![
        reimbursement(100.0, "Umang", "Utkarsh"),
        salary(200.0, "Utkarsh"),
    ];
    let invested = vec![founder_expense(500.0, "Utkarsh", "2024-01-01")];
    let summary = summarize(&founders(), &txns, &invested);

    let utkarsh = &summary["Utkarsh"];
    assert_eq!(utkarsh.salary_taken, 200.0);
    assert_eq!(utkarsh.exact_payment, 400.0);
    // Still out of pocket by 200 after salary
    assert_eq!(utkarsh.net_contribution, -200.0);

    let umang = &summary["Umang"];
    assert_eq!(umang.salary_taken, 0.0);
    assert_eq!(umang.exact_payment, 100.0);
    assert_eq!(umang.net_contribution, -100.0);
}

#[test]
fn test_self_reimbursement_counts_both_sides() {
    let txns = vec![reimbursement(50.0, "Utkarsh", "Utkarsh")];
    let summary = summarize(&founders(), &txns, &[]);

    let utkarsh = &summary["Utkarsh"];
    assert_eq!(utkarsh.reimbursements_received, 50.0);
    assert_eq!(utkarsh.reimbursements_made, 50.0);
    // Received and made cancel out
    assert_eq!(utkarsh.exact_payment, 0.0);
}

#[test]
fn test_expenses_for_unknown_payees_are_ignored() {
    let invested = vec![
        founder_expense(500.0, "SomeVendor", "2024-01-01"),
        founder_expense(100.0, "Utkarsh", "2024-01-02"),
    ];
    let summary = summarize(&founders(), &[], &invested);
    assert_eq!(summary["Utkarsh"].total_invested, 100.0);
    assert_eq!(summary["Umang"].total_invested, 0.0);
}

#[test]
fn test_amounts_are_rounded_to_cents() {
    let invested = vec![
        founder_expense(10.111, "Utkarsh", "2024-01-01"),
        founder_expense(20.222, "Utkarsh", "2024-01-02"),
    ];
    let summary = summarize(&founders(), &[], &invested);
    assert_eq!(summary["Utkarsh"].total_invested, 30.33);
    assert_eq!(summary["Utkarsh"].exact_payment, 30.33);
    assert_eq!(summary["Utkarsh"].net_contribution, -30.33);
}
