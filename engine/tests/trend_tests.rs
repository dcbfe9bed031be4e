//! Consumption trend analysis tests

use chrono::{Duration, Utc};
use uuid::Uuid;

use shared::{DateRange, Movement, MovementType, Product, ReportPeriod};
use warehouse_analytics_engine::services::trends::{self, TrendDirection};

fn product(code: &str) -> Product {
    Product {
        id: Uuid::new_v4(),
        code: code.to_string(),
        name: format!("Product {}", code),
        cost_price: None,
        sale_price: None,
        stock_current: 100,
        stock_min: 10,
        stock_max: None,
        warehouse: "MAIN".to_string(),
        aisle: None,
        shelf: None,
        category: None,
        is_active: true,
        is_batch_tracked: false,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn movement(
    product_id: Uuid,
    movement_type: MovementType,
    quantity: i64,
    days_ago: i64,
) -> Movement {
    Movement {
        id: Uuid::new_v4(),
        product_id,
        batch_id: None,
        user_id: None,
        movement_type,
        quantity,
        movement_date: Utc::now() - Duration::days(days_ago),
        warehouse: "MAIN".to_string(),
        reason: None,
    }
}

fn out(product_id: Uuid, quantity: i64, days_ago: i64) -> Movement {
    movement(product_id, MovementType::Out, quantity, days_ago)
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// OUT movements bucket by calendar day with per-product breakdowns
    #[test]
    fn test_daily_bucketing() {
        let a = product("A");
        let b = product("B");
        let movements = vec![
            out(a.id, 10, 5),
            out(b.id, 30, 5),
            out(a.id, 7, 2),
        ];
        let window = DateRange::ending_at(Utc::now(), 30);

        let analysis = trends::analyze(&[a.clone(), b], &movements, &window);

        assert_eq!(analysis.daily.len(), 2);
        assert_eq!(analysis.total_consumed, 47);

        // Buckets come back in ascending date order
        let older = &analysis.daily[0];
        assert_eq!(older.total, 40);
        // Breakdown is descending by quantity
        assert_eq!(older.breakdown[0].quantity, 30);
        assert_eq!(older.breakdown[1].quantity, 10);

        let newer = &analysis.daily[1];
        assert_eq!(newer.total, 7);
        assert_eq!(newer.breakdown[0].product_id, a.id);
    }

    /// Only OUT movements count toward consumption; adjustments feed the
    /// adjustment-volume figure by magnitude
    #[test]
    fn test_movement_type_separation(){
        let a = product("A");
        let movements = vec![
            out(a.id, 20, 3),
            movement(a.id, MovementType::In, 100, 3),
            movement(a.id, MovementType::Transfer, 50, 3),
            movement(a.id, MovementType::Adjustment, -7, 3),
            movement(a.id, MovementType::Adjustment, 4, 4),
        ];
        let window = DateRange::ending_at(Utc::now(), 30);

        let analysis = trends::analyze(&[a], &movements, &window);

        assert_eq!(analysis.total_consumed, 20);
        assert_eq!(analysis.daily.len(), 1);
        assert_eq!(analysis.adjustment_volume, 11);
    }

    /// Second half more than 10% above the first is increasing
    #[test]
    fn test_direction_increasing() {
        let a = product("A");
        let movements = vec![out(a.id, 10, 20), out(a.id, 12, 5)];
        let window = DateRange::ending_at(Utc::now(), 30);

        let analysis = trends::analyze(&[a], &movements, &window);

        assert_eq!(analysis.products.len(), 1);
        let trend = &analysis.products[0];
        assert_eq!(trend.first_half, 10);
        assert_eq!(trend.second_half, 12);
        assert_eq!(trend.direction, TrendDirection::Increasing);
    }

    /// Second half more than 10% below the first is decreasing
    #[test]
    fn test_direction_decreasing() {
        let a = product("A");
        let movements = vec![out(a.id, 10, 20), out(a.id, 8, 5)];
        let window = DateRange::ending_at(Utc::now(), 30);

        let analysis = trends::analyze(&[a], &movements, &window);
        assert_eq!(analysis.products[0].direction, TrendDirection::Decreasing);
    }

    /// The 10% corridor is exact: 11 against 10 is stable, 9 against 10
    /// is stable
    #[test]
    fn test_direction_corridor_edges() {
        let window = DateRange::ending_at(Utc::now(), 30);

        let a = product("A");
        let near_increase = vec![out(a.id, 10, 20), out(a.id, 11, 5)];
        let analysis = trends::analyze(&[a], &near_increase, &window);
        assert_eq!(analysis.products[0].direction, TrendDirection::Stable);

        let b = product("B");
        let near_decrease = vec![out(b.id, 10, 20), out(b.id, 9, 5)];
        let analysis = trends::analyze(&[b], &near_decrease, &window);
        assert_eq!(analysis.products[0].direction, TrendDirection::Stable);
    }

    /// Consumption entirely in the second half of the window trends up
    #[test]
    fn test_fresh_consumption_is_increasing() {
        let a = product("A");
        let movements = vec![out(a.id, 5, 2)];
        let window = DateRange::ending_at(Utc::now(), 30);

        let analysis = trends::analyze(&[a], &movements, &window);
        let trend = &analysis.products[0];
        assert_eq!(trend.first_half, 0);
        assert_eq!(trend.second_half, 5);
        assert_eq!(trend.direction, TrendDirection::Increasing);
    }

    /// Only the top 20 consumers are retained, highest first
    #[test]
    fn test_top_products_cap() {
        let products: Vec<Product> =
            (0..25).map(|index| product(&format!("P{:02}", index))).collect();
        let movements: Vec<Movement> = products
            .iter()
            .enumerate()
            .map(|(index, p)| out(p.id, index as i64 + 1, 5))
            .collect();
        let window = DateRange::ending_at(Utc::now(), 30);

        let analysis = trends::analyze(&products, &movements, &window);

        assert_eq!(analysis.products.len(), 20);
        assert_eq!(analysis.products[0].total_consumed, 25);
        assert_eq!(analysis.products[19].total_consumed, 6);
    }

    /// Products without consumption do not appear in the trend list
    #[test]
    fn test_unconsumed_products_absent() {
        let active = product("A");
        let dormant = product("B");
        let movements = vec![out(active.id, 10, 5)];
        let window = DateRange::ending_at(Utc::now(), 30);

        let analysis = trends::analyze(&[active, dormant], &movements, &window);
        assert_eq!(analysis.products.len(), 1);
        assert_eq!(analysis.products[0].code, "A");
    }

    /// Movements outside the window are ignored entirely
    #[test]
    fn test_window_bounds() {
        let a = product("A");
        let movements = vec![out(a.id, 10, 5), out(a.id, 99, 45)];
        let window = DateRange::ending_at(Utc::now(), 30);

        let analysis = trends::analyze(&[a], &movements, &window);
        assert_eq!(analysis.total_consumed, 10);
        assert_eq!(analysis.daily.len(), 1);
    }

    /// The period entry point covers the nominal trailing window
    #[test]
    fn test_period_entry_point() {
        let a = product("A");
        let movements = vec![out(a.id, 10, 5), out(a.id, 99, 45)];

        let analysis =
            trends::analyze_period(&[a], &movements, ReportPeriod::Month, Utc::now());
        assert_eq!(analysis.total_consumed, 10);
        assert_eq!(analysis.window.days(), 30.0);
    }

    /// An empty window yields an empty, well-defined analysis
    #[test]
    fn test_empty_analysis() {
        let window = DateRange::ending_at(Utc::now(), 30);
        let analysis = trends::analyze(&[product("A")], &[], &window);

        assert!(analysis.daily.is_empty());
        assert!(analysis.products.is_empty());
        assert_eq!(analysis.total_consumed, 0);
        assert_eq!(analysis.adjustment_volume, 0);
    }
}
