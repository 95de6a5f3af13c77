//! Development seed data.
//!
//! Creates a crupier account, a handful of players and one demo event with
//! a few seats and scores filled in. Safe to re-run: accounts that already
//! exist are reused, and a new demo event is added each time.
//!
//! ```bash
//! POKERHALL_DATABASE_PATH=./pokerhall.db cargo run -p pokerhall-api --bin seed
//! ```
//!
//! Every seeded account uses the password `pokerhall`.

use chrono::{Duration, Utc};
use pokerhall_api::auth::hash_password;
use pokerhall_api::ApiConfig;
use pokerhall_core::{EventLayout, NewEvent, NewPlayer, NewScore, Player, Role, ScoreComponents};
use pokerhall_db::{Database, DbConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

const SEED_PASSWORD: &str = "pokerhall";

const PLAYERS: &[(&str, &str, &str, i64, f64)] = &[
    ("RSSMRA80", "Mario", "Rossi", 45, 1500.0),
    ("BNCLRA92", "Laura", "Bianchi", 33, 900.0),
    ("VRDGPP75", "Giuseppe", "Verdi", 50, 2200.0),
    ("FRRSFA88", "Sofia", "Ferrari", 37, 1200.0),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ApiConfig::load()?;
    let db = Database::new(DbConfig::new(&config.database_path)).await?;
    let password_hash = hash_password(SEED_PASSWORD)?;

    let crupier = ensure_player(
        &db,
        NewPlayer {
            name: "Carla".to_string(),
            surname: "Croupier".to_string(),
            age: 40,
            capital: 0.0,
            fiscal_code: "CRPCRL85".to_string(),
            role: Role::Crupier,
            password_hash: password_hash.clone(),
        },
    )
    .await?;

    let mut players = Vec::with_capacity(PLAYERS.len());
    for &(code, name, surname, age, capital) in PLAYERS {
        let player = ensure_player(
            &db,
            NewPlayer {
                name: name.to_string(),
                surname: surname.to_string(),
                age,
                capital,
                fiscal_code: code.to_string(),
                role: Role::Player,
                password_hash: password_hash.clone(),
            },
        )
        .await?;
        players.push(player);
    }

    let event = db
        .events()
        .create(&NewEvent {
            name: "Demo Tournament".to_string(),
            date: (Utc::now() + Duration::days(7)).date_naive(),
            layout: EventLayout::new(2, 3)?,
        })
        .await?;

    // First two players sit at table 1, the others at table 2.
    for (index, player) in players.iter().enumerate() {
        let table_number = if index < 2 { 1 } else { 2 };
        let seat_number = (index % 2) as u32 + 1;
        if let Some(seat) = event.seat_at(table_number, seat_number) {
            db.seats().assign(&seat.id, &player.id).await?;
        }
    }

    let sample_scores = [
        ScoreComponents::new(10.0, 5.0, 2.0, 1.0),
        ScoreComponents::new(-3.0, 0.0, 1.0, 0.0),
        ScoreComponents::new(7.0, 2.0, 3.0, 2.0),
    ];
    for (player, components) in players.iter().zip(sample_scores) {
        db.scores()
            .append(&NewScore {
                event_id: event.event.id.clone(),
                player_id: player.id.clone(),
                components,
                recorded_by: crupier.id.clone(),
            })
            .await?;
    }

    info!(
        event_id = %event.event.id,
        seats = event.event.layout().total_seats(),
        players = players.len(),
        "Seed complete (password for all accounts: {SEED_PASSWORD})"
    );

    db.close().await;
    Ok(())
}

async fn ensure_player(db: &Database, new_player: NewPlayer) -> Result<Player, Box<dyn std::error::Error>> {
    if let Some(existing) = db.players().find_by_fiscal_code(&new_player.fiscal_code).await? {
        info!(fiscal_code = %existing.fiscal_code, "Player already exists");
        return Ok(existing);
    }
    Ok(db.players().register(&new_player).await?)
}
