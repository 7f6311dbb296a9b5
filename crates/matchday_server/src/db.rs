//! SQLite schema and queries.
//!
//! The frame loader produces `RawGameRow`s in (game_date, id) order; that
//! ordering is what the core's forecaster treats as the game sequence.

use jiff::civil::Date;
use rusqlite::{Connection, OptionalExtension, Transaction, params};
use serde::{Deserialize, Serialize};

use matchday_core::MixLines;
use matchday_core::mix::{MerchLine, TicketLine};
use matchday_core::model::RawGameRow;

pub fn init_db(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS promotions (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS games (
            id INTEGER PRIMARY KEY,
            game_date TEXT NOT NULL,
            opponent TEXT NOT NULL,
            attendance INTEGER NOT NULL,
            competition TEXT,
            venue TEXT,
            promotion_id INTEGER REFERENCES promotions(id)
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS tickets (
            id INTEGER PRIMARY KEY,
            game_id INTEGER NOT NULL REFERENCES games(id),
            type TEXT NOT NULL,
            quantity INTEGER NOT NULL,
            revenue INTEGER NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS merch_sales (
            id INTEGER PRIMARY KEY,
            game_id INTEGER NOT NULL REFERENCES games(id),
            item TEXT NOT NULL,
            quantity INTEGER NOT NULL,
            total_revenue INTEGER NOT NULL
        )",
        [],
    )?;

    Ok(())
}

fn parse_date(text: &str) -> rusqlite::Result<Date> {
    text.parse().map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            1,
            rusqlite::types::Type::Text,
            format!("invalid game_date: {text}").into(),
        )
    })
}

/// Joined game rows with ticket/merch aggregates, ordered by (date, id)
pub fn load_game_rows(conn: &Connection) -> rusqlite::Result<Vec<RawGameRow>> {
    let mut stmt = conn.prepare(
        "SELECT g.id, g.game_date, g.opponent, g.attendance, g.competition, g.venue,
                p.name,
                t.ticket_revenue, t.tickets_sold,
                m.merch_revenue, m.merch_units
         FROM games g
         LEFT JOIN promotions p ON p.id = g.promotion_id
         LEFT JOIN (SELECT game_id, SUM(revenue) AS ticket_revenue, SUM(quantity) AS tickets_sold
                    FROM tickets GROUP BY game_id) t ON t.game_id = g.id
         LEFT JOIN (SELECT game_id, SUM(total_revenue) AS merch_revenue, SUM(quantity) AS merch_units
                    FROM merch_sales GROUP BY game_id) m ON m.game_id = g.id
         ORDER BY g.game_date, g.id",
    )?;

    stmt.query_map([], |row| {
        let date_text: String = row.get(1)?;
        Ok(RawGameRow {
            id: row.get(0)?,
            game_date: parse_date(&date_text)?,
            opponent: row.get(2)?,
            attendance: row.get(3)?,
            competition: row.get(4)?,
            venue: row.get(5)?,
            promotion_name: row.get(6)?,
            ticket_revenue: row.get(7)?,
            tickets_sold: row.get(8)?,
            merch_revenue: row.get(9)?,
            merch_units: row.get(10)?,
        })
    })?
    .collect()
}

/// Season-total ticket and merch lines for the mix decomposition
pub fn load_mix_lines(conn: &Connection) -> rusqlite::Result<MixLines> {
    let mut stmt =
        conn.prepare("SELECT type, SUM(quantity), SUM(revenue) FROM tickets GROUP BY type")?;
    let tickets = stmt
        .query_map([], |row| {
            Ok(TicketLine {
                ticket_type: row.get(0)?,
                quantity: row.get(1)?,
                revenue: row.get(2)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let mut stmt = conn
        .prepare("SELECT item, SUM(quantity), SUM(total_revenue) FROM merch_sales GROUP BY item")?;
    let merch = stmt
        .query_map([], |row| {
            Ok(MerchLine {
                item: row.get(0)?,
                quantity: row.get(1)?,
                revenue: row.get(2)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(MixLines { tickets, merch })
}

pub fn count_games(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM games", [], |row| row.get(0))
}

#[derive(Debug, Serialize)]
pub struct AttendancePoint {
    pub id: i64,
    pub game_date: Date,
    pub opponent: String,
    pub attendance: i64,
}

/// The raw attendance series, ordered by date
pub fn attendance_series(conn: &Connection) -> rusqlite::Result<Vec<AttendancePoint>> {
    let mut stmt = conn
        .prepare("SELECT id, game_date, opponent, attendance FROM games ORDER BY game_date, id")?;
    stmt.query_map([], |row| {
        let date_text: String = row.get(1)?;
        Ok(AttendancePoint {
            id: row.get(0)?,
            game_date: parse_date(&date_text)?,
            opponent: row.get(2)?,
            attendance: row.get(3)?,
        })
    })?
    .collect()
}

#[derive(Debug, Serialize)]
pub struct PromoPerformance {
    pub promotion: String,
    pub avg_attendance: i64,
}

/// SQL-level dashboard aggregates, independent of the statistical pipeline
#[derive(Debug, Serialize)]
pub struct DashboardMetrics {
    pub average_attendance: i64,
    pub total_ticket_revenue: i64,
    pub total_merch_revenue: i64,
    pub promo_performance: Vec<PromoPerformance>,
}

pub fn dashboard_metrics(conn: &Connection) -> rusqlite::Result<DashboardMetrics> {
    let (total_attendance, game_count): (Option<i64>, i64) =
        conn.query_row("SELECT SUM(attendance), COUNT(*) FROM games", [], |row| {
            Ok((row.get(0)?, row.get(1)?))
        })?;
    let average_attendance = if game_count != 0 {
        (total_attendance.unwrap_or(0) as f64 / game_count as f64).round() as i64
    } else {
        0
    };

    let total_ticket_revenue: i64 =
        conn.query_row("SELECT COALESCE(SUM(revenue), 0) FROM tickets", [], |row| {
            row.get(0)
        })?;
    let total_merch_revenue: i64 = conn.query_row(
        "SELECT COALESCE(SUM(total_revenue), 0) FROM merch_sales",
        [],
        |row| row.get(0),
    )?;

    let mut stmt = conn.prepare(
        "SELECT p.name, AVG(g.attendance)
         FROM promotions p JOIN games g ON g.promotion_id = p.id
         GROUP BY p.name",
    )?;
    let promo_performance = stmt
        .query_map([], |row| {
            let avg: f64 = row.get(1)?;
            Ok(PromoPerformance {
                promotion: row.get(0)?,
                avg_attendance: avg as i64,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(DashboardMetrics {
        average_attendance,
        total_ticket_revenue,
        total_merch_revenue,
        promo_performance,
    })
}

#[derive(Debug, Serialize)]
pub struct TicketLineDetail {
    #[serde(rename = "type")]
    pub ticket_type: String,
    pub quantity: i64,
    pub revenue: i64,
}

#[derive(Debug, Serialize)]
pub struct MerchLineDetail {
    pub item: String,
    pub quantity: i64,
    pub total_revenue: i64,
}

#[derive(Debug, Serialize)]
pub struct GameDetail {
    pub promotion: String,
    pub tickets: Vec<TicketLineDetail>,
    pub merch: Vec<MerchLineDetail>,
}

/// Per-game ticket and merch lines; `None` when the game does not exist
pub fn game_detail(conn: &Connection, game_id: i64) -> rusqlite::Result<Option<GameDetail>> {
    let promotion: Option<Option<String>> = conn
        .query_row(
            "SELECT p.name FROM games g
             LEFT JOIN promotions p ON p.id = g.promotion_id
             WHERE g.id = ?1",
            [game_id],
            |row| row.get(0),
        )
        .optional()?;
    let Some(promotion) = promotion else {
        return Ok(None);
    };

    let mut stmt =
        conn.prepare("SELECT type, quantity, revenue FROM tickets WHERE game_id = ?1")?;
    let tickets = stmt
        .query_map([game_id], |row| {
            Ok(TicketLineDetail {
                ticket_type: row.get(0)?,
                quantity: row.get(1)?,
                revenue: row.get(2)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let mut stmt =
        conn.prepare("SELECT item, quantity, total_revenue FROM merch_sales WHERE game_id = ?1")?;
    let merch = stmt
        .query_map([game_id], |row| {
            Ok(MerchLineDetail {
                item: row.get(0)?,
                quantity: row.get(1)?,
                total_revenue: row.get(2)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(Some(GameDetail {
        promotion: promotion.unwrap_or_else(|| "None".to_string()),
        tickets,
        merch,
    }))
}

#[derive(Debug, Deserialize)]
pub struct NewTicketLine {
    #[serde(rename = "type")]
    pub ticket_type: String,
    pub quantity: i64,
    pub revenue: i64,
}

#[derive(Debug, Deserialize)]
pub struct NewMerchLine {
    pub item: String,
    pub quantity: i64,
    pub total_revenue: i64,
}

#[derive(Debug, Deserialize)]
pub struct NewGame {
    pub game_date: Date,
    pub opponent: String,
    pub attendance: i64,
    pub competition: String,
    pub venue: String,
    #[serde(default)]
    pub promotion: Option<String>,
    #[serde(default)]
    pub tickets: Vec<NewTicketLine>,
    #[serde(default)]
    pub merch: Vec<NewMerchLine>,
}

/// Insert a game with its ticket and merch lines in one transaction.
/// A named promotion is created on first use.
pub fn insert_game(conn: &mut Connection, new_game: &NewGame) -> rusqlite::Result<()> {
    let tx = conn.transaction()?;

    let promo_id = match new_game.promotion.as_deref().filter(|p| !p.trim().is_empty()) {
        Some(name) => Some(find_or_create_promotion(&tx, name)?),
        None => None,
    };

    tx.execute(
        "INSERT INTO games (game_date, opponent, attendance, competition, venue, promotion_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            new_game.game_date.to_string(),
            new_game.opponent,
            new_game.attendance,
            new_game.competition,
            new_game.venue,
            promo_id,
        ],
    )?;
    let game_id = tx.last_insert_rowid();

    for line in &new_game.tickets {
        tx.execute(
            "INSERT INTO tickets (game_id, type, quantity, revenue) VALUES (?1, ?2, ?3, ?4)",
            params![game_id, line.ticket_type, line.quantity, line.revenue],
        )?;
    }
    for line in &new_game.merch {
        tx.execute(
            "INSERT INTO merch_sales (game_id, item, quantity, total_revenue) VALUES (?1, ?2, ?3, ?4)",
            params![game_id, line.item, line.quantity, line.total_revenue],
        )?;
    }

    tx.commit()
}

fn find_or_create_promotion(tx: &Transaction, name: &str) -> rusqlite::Result<i64> {
    if let Some(id) = tx
        .query_row("SELECT id FROM promotions WHERE name = ?1", [name], |row| {
            row.get(0)
        })
        .optional()?
    {
        return Ok(id);
    }
    tx.execute(
        "INSERT INTO promotions (name, description) VALUES (?1, '')",
        [name],
    )?;
    Ok(tx.last_insert_rowid())
}
