//! Reset the database and seed it from Attendance.csv.
//!
//! Promotion assignments, ticket tier splits, and merch quantities are
//! synthesized with a fixed seed so repeated runs produce the same data.

use std::error::Error;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rusqlite::{Connection, params};
use serde::Deserialize;

use matchday_server::db;

const RNG_SEED: u64 = 42;

const PROMOTIONS: [&str; 4] = [
    "Family Night",
    "Military Appreciation",
    "Student Discount",
    "Fan Giveaway",
];

const MERCH_ITEMS: [(&str, i64); 4] = [("Jersey", 90), ("Scarf", 25), ("Hat", 30), ("Poster", 15)];

#[derive(Debug, Deserialize)]
struct AttendanceRow {
    game_date: String,
    opponent: String,
    attendance: i64,
    competition: String,
    venue: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let db_path = std::env::var("MATCHDAY_DB").unwrap_or_else(|_| "matchday.db".to_string());
    let csv_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "Attendance.csv".to_string());

    let mut conn = Connection::open(&db_path)?;
    db::init_db(&conn)?;

    let tx = conn.transaction()?;

    // Idempotent reset so the tables exactly match the CSV rows
    tx.execute("DELETE FROM tickets", [])?;
    tx.execute("DELETE FROM merch_sales", [])?;
    tx.execute("DELETE FROM games", [])?;
    tx.execute("DELETE FROM promotions", [])?;

    let mut promo_ids = Vec::with_capacity(PROMOTIONS.len());
    for name in PROMOTIONS {
        tx.execute(
            "INSERT INTO promotions (name, description) VALUES (?1, ?2)",
            params![name, format!("{name} special event")],
        )?;
        promo_ids.push(tx.last_insert_rowid());
    }

    let mut rng = SmallRng::seed_from_u64(RNG_SEED);
    let mut reader = csv::Reader::from_path(&csv_path)?;
    let mut game_count = 0usize;

    for result in reader.deserialize() {
        let row: AttendanceRow = result?;
        let game_date: jiff::civil::Date = row.game_date.trim().parse()?;
        let promo_id = promo_ids[rng.random_range(0..promo_ids.len())];

        tx.execute(
            "INSERT INTO games (game_date, opponent, attendance, competition, venue, promotion_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                game_date.to_string(),
                row.opponent.trim(),
                row.attendance,
                row.competition.trim(),
                row.venue.trim(),
                promo_id,
            ],
        )?;
        let game_id = tx.last_insert_rowid();

        let attendance = row.attendance;
        let general = (attendance as f64 * 0.65) as i64;
        let season = (attendance as f64 * 0.20) as i64;
        let group = (attendance as f64 * 0.10) as i64;
        let vip = attendance - general - season - group;
        let tiers = [
            ("General Admission", general, 35),
            ("VIP", vip, 100),
            ("Season Ticket", season, 50),
            ("Group", group, 25),
        ];
        for (ticket_type, quantity, unit_price) in tiers {
            tx.execute(
                "INSERT INTO tickets (game_id, type, quantity, revenue) VALUES (?1, ?2, ?3, ?4)",
                params![game_id, ticket_type, quantity, quantity * unit_price],
            )?;
        }

        // Merch buyers capped at 20% of attendance per item
        let merch_cap = ((attendance as f64 * 0.20) as i64).max(0);
        for (item, unit_price) in MERCH_ITEMS {
            let quantity = rng.random_range(0..=merch_cap);
            tx.execute(
                "INSERT INTO merch_sales (game_id, item, quantity, total_revenue)
                 VALUES (?1, ?2, ?3, ?4)",
                params![game_id, item, quantity, quantity * unit_price],
            )?;
        }

        game_count += 1;
    }

    tx.commit()?;
    println!("Database reset and seeded from {csv_path}");
    println!("Games inserted: {game_count}");
    Ok(())
}
