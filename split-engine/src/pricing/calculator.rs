use crate::catalog::MenuContext;
use crate::money::{lines_total, to_decimal};
use rust_decimal::Decimal;
use serde::Serialize;
use shared::models::{Category, OrderItem, Restaurant};

/// Whether the quantity controls apply to a line.
///
/// On a course-based restaurant a course dish is fixed at one unit; only
/// course-flagged drinks stay adjustable. Otherwise drinks and "other" items
/// are adjustable.
pub fn can_adjust_quantity(
    category: Category,
    is_course_item: bool,
    restaurant: Option<&Restaurant>,
) -> bool {
    let course_based = restaurant.is_some_and(Restaurant::is_course_based);
    if course_based && is_course_item {
        return category == Category::Drink;
    }
    matches!(category, Category::Drink | Category::Other)
}

/// Course-menu price breakdown for one diner
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseBreakdown {
    /// Distinct course categories chosen (0..=3)
    pub course_count: usize,
    /// Tier price for `course_count`
    pub base_price: Decimal,
    /// Sum of the counted dishes' surcharges
    pub surcharge_total: Decimal,
    /// One counted dish per course category, in Starter/Main/Dessert order
    pub course_items: Vec<OrderItem>,
    /// Extra dishes in an already-counted category; not charged
    pub uncounted_course_items: Vec<OrderItem>,
    /// Charged at `cost * quantity`
    pub non_course_items: Vec<OrderItem>,
    pub non_course_total: Decimal,
    /// `base_price + surcharge_total + non_course_total`
    pub total: Decimal,
}

struct CourseCandidate<'a> {
    line: &'a OrderItem,
    category: Category,
    surcharge: Decimal,
}

/// Break a diner's lines down under course-tiered pricing.
///
/// Lines are classified against the menu (not their own flags). Per course
/// category one dish counts: the one with the highest surcharge, ties going
/// to the alphabetically first name, so the result does not depend on line
/// order.
pub fn course_breakdown(lines: &[OrderItem], ctx: &MenuContext<'_>) -> CourseBreakdown {
    let mut candidates = Vec::new();
    let mut non_course_items = Vec::new();

    for line in lines {
        match ctx.lookup(&line.name) {
            Some(entry) if ctx.is_course_dish(&line.name) => candidates.push(CourseCandidate {
                line,
                category: entry.category,
                surcharge: to_decimal(entry.price),
            }),
            _ => non_course_items.push(line.clone()),
        }
    }

    let mut course_items = Vec::new();
    let mut uncounted_course_items = Vec::new();
    let mut surcharge_total = Decimal::ZERO;

    for category in [Category::Starter, Category::Main, Category::Dessert] {
        let chosen = candidates
            .iter()
            .filter(|c| c.category == category)
            .max_by(|a, b| {
                a.surcharge
                    .cmp(&b.surcharge)
                    .then_with(|| b.line.name.cmp(&a.line.name))
            });
        let Some(chosen) = chosen else { continue };

        surcharge_total += chosen.surcharge;
        course_items.push(chosen.line.clone());
        uncounted_course_items.extend(
            candidates
                .iter()
                .filter(|c| c.category == category && c.line.id != chosen.line.id)
                .map(|c| c.line.clone()),
        );
    }

    let course_count = course_items.len();
    let base_price = ctx
        .restaurant
        .and_then(|r| r.course_pricing)
        .map(|p| to_decimal(p.base_price(course_count)))
        .unwrap_or(Decimal::ZERO);
    let non_course_total = lines_total(&non_course_items);

    CourseBreakdown {
        course_count,
        base_price,
        surcharge_total,
        course_items,
        uncounted_course_items,
        non_course_items,
        non_course_total,
        total: base_price + surcharge_total + non_course_total,
    }
}

/// A diner's own total, before the table share
pub fn lines_subtotal(lines: &[OrderItem], ctx: &MenuContext<'_>) -> Decimal {
    if ctx.is_course_based() {
        course_breakdown(lines, ctx).total
    } else {
        lines_total(lines)
    }
}
