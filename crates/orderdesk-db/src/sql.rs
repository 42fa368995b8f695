//! Translation of search predicates into SQL fragments
//!
//! Every helper appends ` AND ...` to a builder whose statement already
//! contains a `WHERE` clause, so callers start from `WHERE TRUE`.

use sqlx::{Postgres, QueryBuilder};

use orderdesk_types::{DateWindow, OrderCount, TextMatch};

/// Columns selected for every order query
pub const ORDER_COLUMNS: &str = "id, first_name, last_name, company, company_name, \
     contact_email, created_at, payment_status, quick_status, full_status, \
     total_cost_cents, user_id, company_registry_code, company_address, bill_to, \
     bill_to_address";

/// Text columns matched by a contains-search
pub const ORDER_SEARCH_COLUMNS: [&str; 5] = [
    "first_name",
    "last_name",
    "company",
    "company_name",
    "contact_email",
];

/// Escape `%`, `_` and the escape character itself for use inside a LIKE pattern
pub fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Append the text predicate
pub fn push_text_match(builder: &mut QueryBuilder<'_, Postgres>, text: &TextMatch) {
    match text {
        TextMatch::IdPrefix(prefix) => {
            builder
                .push(" AND id::text LIKE ")
                .push_bind(format!("{}%", escape_like(prefix)));
        }
        TextMatch::AnyFieldContains(needle) => {
            let pattern = format!("%{}%", escape_like(needle));
            builder.push(" AND (");
            for (i, column) in ORDER_SEARCH_COLUMNS.iter().enumerate() {
                if i > 0 {
                    builder.push(" OR ");
                }
                builder
                    .push(*column)
                    .push(" ILIKE ")
                    .push_bind(pattern.clone());
            }
            builder.push(")");
        }
    }
}

/// Append inclusive bounds on `created_at`
pub fn push_window(builder: &mut QueryBuilder<'_, Postgres>, window: &DateWindow) {
    if let Some(from) = window.from {
        builder.push(" AND created_at >= ").push_bind(from);
    }
    if let Some(to) = window.to {
        builder.push(" AND created_at <= ").push_bind(to);
    }
}

/// Append the status condition of a statistics count
pub fn push_order_count(builder: &mut QueryBuilder<'_, Postgres>, which: OrderCount) {
    builder.push(match which {
        OrderCount::Paid => " AND payment_status = 'paid'",
        OrderCount::QuickAnalysisDone => " AND quick_status = 'Done'",
        OrderCount::FullAnalysisDone => " AND full_status = 'Done'",
    });
}
