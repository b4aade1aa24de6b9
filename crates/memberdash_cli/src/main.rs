//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `memberdash_core` wiring.
//! - Keep output deterministic for quick local sanity checks.

use memberdash_core::db::open_db_in_memory;
use memberdash_core::db::seed::seed_demo_data;
use memberdash_core::MemberDashboard;

const DEMO_USER_ID: i64 = 1;

fn main() {
    println!("memberdash_core version={}", memberdash_core::core_version());

    let conn = match open_db_in_memory() {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("db open failed: {err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = seed_demo_data(&conn, DEMO_USER_ID) {
        eprintln!("demo seed failed: {err}");
        std::process::exit(1);
    }

    let dashboard = match MemberDashboard::try_new(&conn, None) {
        Ok(dashboard) => dashboard,
        Err(err) => {
            eprintln!("dashboard init failed: {err}");
            std::process::exit(1);
        }
    };

    match dashboard.stats(DEMO_USER_ID) {
        Ok(stats) => println!(
            "demo user stats: activity={} unread={} orders={} total_spent={} completeness={}",
            stats.activity_count,
            stats.unread_notifications,
            stats.order_count,
            stats.total_spent,
            stats.profile_completeness
        ),
        Err(err) => {
            eprintln!("stats failed: {err}");
            std::process::exit(1);
        }
    }
}
