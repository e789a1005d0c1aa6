// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use std::collections::BTreeMap;

use common::{Event, Expense};
use serde::Serialize;

/// Budget position of a single event.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSummary {
    pub event_id: String,
    pub budget: f64,
    pub spent: f64,
    pub remaining: f64,
    pub by_category: BTreeMap<String, f64>,
    pub over_budget: bool,
}

/// Sums expense amounts per category.
pub fn expenses_by_category(expenses: &[Expense]) -> BTreeMap<String, f64> {
    let mut totals = BTreeMap::new();
    for expense in expenses {
        *totals.entry(expense.category.clone()).or_insert(0.0) += expense.amount;
    }
    totals
}

pub fn total_spent(expenses: &[Expense]) -> f64 {
    expenses.iter().map(|expense| expense.amount).sum()
}

/// What is left of `budget`; negative when overspent.
pub fn remaining_budget(budget: f64, expenses: &[Expense]) -> f64 {
    budget - total_spent(expenses)
}

/// Summarizes the expenses booked against `event`. Expenses of other events
/// are ignored; an event without a budget counts as a budget of zero.
pub fn summarize(event: &Event, expenses: &[Expense]) -> BudgetSummary {
    let own: Vec<Expense> = expenses
        .iter()
        .filter(|expense| expense.event_id == event.id)
        .cloned()
        .collect();

    let budget = event.budget.unwrap_or(0.0);
    let spent = total_spent(&own);
    let remaining = budget - spent;

    BudgetSummary {
        event_id: event.id.clone(),
        budget,
        spent,
        remaining,
        by_category: expenses_by_category(&own),
        over_budget: remaining < 0.0,
    }
}
