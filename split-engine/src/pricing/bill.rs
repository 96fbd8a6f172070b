use super::calculator::{CourseBreakdown, course_breakdown, lines_subtotal};
use crate::catalog::MenuContext;
use crate::money::lines_total;
use crate::orders::OrderBook;
use rust_decimal::Decimal;
use serde::Serialize;
use shared::models::OrderItem;

/// Cost of everything in the shared table pool
pub fn table_total(book: &OrderBook) -> Decimal {
    lines_total(&book.table_orders)
}

/// Each diner's share of the table pool.
///
/// Split evenly across every current friend, whether or not they ordered
/// anything. Not rounded; rounding happens at display time.
pub fn table_share(book: &OrderBook, friend_count: usize) -> Decimal {
    table_total(book) / Decimal::from(friend_count.max(1))
}

/// Course breakdown for one diner's order
pub fn friend_course_breakdown(
    friend: &str,
    book: &OrderBook,
    ctx: &MenuContext<'_>,
) -> CourseBreakdown {
    course_breakdown(book.friend_lines(friend), ctx)
}

/// A diner's own total (flat or course pricing), excluding the table share
pub fn friend_subtotal(friend: &str, book: &OrderBook, ctx: &MenuContext<'_>) -> Decimal {
    lines_subtotal(book.friend_lines(friend), ctx)
}

/// A diner's total including their table share
pub fn friend_total(
    friend: &str,
    book: &OrderBook,
    friend_count: usize,
    ctx: &MenuContext<'_>,
) -> Decimal {
    friend_subtotal(friend, book, ctx) + table_share(book, friend_count)
}

/// Whole bill: exactly the sum of the individual totals
pub fn total_bill(book: &OrderBook, friends: &[String], ctx: &MenuContext<'_>) -> Decimal {
    friends
        .iter()
        .map(|f| friend_total(f, book, friends.len(), ctx))
        .sum()
}

/// One diner's line on the bill
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DinerBill {
    pub name: String,
    pub items: Vec<OrderItem>,
    /// Present on course-based restaurants
    pub course: Option<CourseBreakdown>,
    pub subtotal: Decimal,
    pub table_share: Decimal,
    pub total: Decimal,
}

/// Everything the presentation layer needs to render the calculation step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BillSummary {
    pub diners: Vec<DinerBill>,
    pub table_items: Vec<OrderItem>,
    pub table_total: Decimal,
    pub table_share: Decimal,
    pub total: Decimal,
    pub item_count: u64,
}

/// Compute the full bill for the roster
pub fn bill_summary(book: &OrderBook, friends: &[String], ctx: &MenuContext<'_>) -> BillSummary {
    let share = table_share(book, friends.len());
    let diners: Vec<DinerBill> = friends
        .iter()
        .map(|name| {
            let lines = book.friend_lines(name);
            let course = ctx.is_course_based().then(|| course_breakdown(lines, ctx));
            let subtotal = match &course {
                Some(c) => c.total,
                None => lines_total(lines),
            };
            DinerBill {
                name: name.clone(),
                items: lines.to_vec(),
                course,
                subtotal,
                table_share: share,
                total: subtotal + share,
            }
        })
        .collect();
    let total = diners.iter().map(|d| d.total).sum();

    BillSummary {
        diners,
        table_items: book.table_orders.clone(),
        table_total: table_total(book),
        table_share: share,
        total,
        item_count: book.total_items(),
    }
}
