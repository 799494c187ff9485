use comfy_table::{Cell, CellAlignment, Color, Table, TableComponent};
use crate::aggregate::{self, DistrictTotal};
use crate::trip::TripRecord;

const BAR_WIDTH: i128 = 30;

fn new_table() -> Table {
    let mut table = Table::new();
    table.remove_style(TableComponent::HorizontalLines);
    table.remove_style(TableComponent::MiddleIntersections);
    table.remove_style(TableComponent::LeftBorderIntersections);
    table.remove_style(TableComponent::RightBorderIntersections);
    table
}

/// Trips in the given order, followed by the period total
pub(crate) fn trips_table(trips: &[TripRecord]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Date", "District", "Time", "Amount", "Payment"]);

    for t in trips {
        table.add_row(vec![
            Cell::new(t.date.format("%Y-%m-%d").to_string()),
            Cell::new(t.district.as_str()),
            Cell::new(t.time.as_str()),
            Cell::new(format_amount(i128::from(t.amount))).set_alignment(CellAlignment::Right),
            Cell::new(t.payment_method.as_str()),
        ]);
    }

    table.add_row(vec![
        Cell::new(format!("{} trips", trips.len())),
        Cell::new(""),
        Cell::new("Total"),
        Cell::new(format_amount(aggregate::total(trips))).set_alignment(CellAlignment::Right),
        Cell::new(""),
    ]);
    table
}

/// Horizontal bar chart of district totals, bars scaled to the largest total
pub(crate) fn district_chart(totals: &[DistrictTotal]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["District", "Amount", ""]);

    let max = totals.iter().map(|t| t.amount).max().unwrap_or(0);
    for t in totals {
        table.add_row(vec![
            Cell::new(t.district.as_str()),
            Cell::new(format_amount(t.amount)).set_alignment(CellAlignment::Right),
            Cell::new(bar(t.amount, max)).fg(Color::Cyan),
        ]);
    }
    table
}

pub(crate) fn list_table<T: ToString>(header: &str, values: &[T]) -> Table {
    let mut table = new_table();
    table.set_header(vec![header]);
    for v in values {
        table.add_row(vec![v.to_string()]);
    }
    table
}

fn bar(amount: i128, max: i128) -> String {
    if max <= 0 {
        return String::new();
    }
    // Non-zero totals always get at least one block
    let width = (amount * BAR_WIDTH / max).max(if amount > 0 { 1 } else { 0 });
    "█".repeat(width as usize)
}

/// 1234567 -> 1,234,567
pub(crate) fn format_amount(amount: i128) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if amount < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}
