//! Database seeder for ArenaVault development and testing.
//!
//! Seeds demo players with funded wallets and a spread of tournaments
//! across team sizes and lifecycle stages.
//!
//! Usage: cargo run --bin seeder

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use arenavault_db::entities::{
    sea_orm_active_enums::{TeamSize, TournamentStatus},
    tournaments, users,
};

/// Demo player IDs (consistent for all seeds).
const DEMO_PLAYERS: [&str; 4] = [
    "00000000-0000-0000-0000-000000000001",
    "00000000-0000-0000-0000-000000000002",
    "00000000-0000-0000-0000-000000000003",
    "00000000-0000-0000-0000-000000000004",
];

/// Demo tournament IDs (consistent for all seeds).
const DEMO_TOURNAMENTS: [&str; 4] = [
    "00000000-0000-0000-0000-000000000101",
    "00000000-0000-0000-0000-000000000102",
    "00000000-0000-0000-0000-000000000103",
    "00000000-0000-0000-0000-000000000104",
];

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = arenavault_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding demo players...");
    seed_demo_players(&db).await;

    println!("Seeding tournaments...");
    seed_tournaments(&db).await;

    println!("Seeding complete!");
}

fn demo_id(raw: &str) -> Uuid {
    Uuid::parse_str(raw).unwrap()
}

/// Seeds demo players with funded wallets.
async fn seed_demo_players(db: &DatabaseConnection) {
    // (id, username, email, phone, deposit, winnings)
    let players: [(&str, &str, &str, &str, Decimal, Decimal); 4] = [
        (
            DEMO_PLAYERS[0],
            "blazekill",
            "blazekill@arenavault.dev",
            "+628111000001",
            dec!(500.00),
            dec!(0.00),
        ),
        (
            DEMO_PLAYERS[1],
            "venomqueen",
            "venomqueen@arenavault.dev",
            "+628111000002",
            dec!(250.00),
            dec!(120.00),
        ),
        (
            DEMO_PLAYERS[2],
            "ravenshot",
            "ravenshot@arenavault.dev",
            "+628111000003",
            dec!(0.00),
            dec!(1000.00),
        ),
        (
            DEMO_PLAYERS[3],
            "sparkplug",
            "sparkplug@arenavault.dev",
            "+628111000004",
            dec!(75.50),
            dec!(25.25),
        ),
    ];

    let mut inserted = 0;
    for (id, username, email, phone, deposit, winnings) in players {
        let id = demo_id(id);
        if users::Entity::find_by_id(id).one(db).await.ok().flatten().is_some() {
            println!("  Player {username} already exists, skipping...");
            continue;
        }

        let player = users::ActiveModel {
            id: Set(id),
            username: Set(username.to_string()),
            email: Set(email.to_string()),
            phone: Set(Some(phone.to_string())),
            deposit_balance: Set(deposit),
            winning_balance: Set(winnings),
            wallet_version: Set(0),
            is_active: Set(true),
            created_at: Set(Utc::now().into()),
            updated_at: Set(Utc::now().into()),
        };

        if let Err(e) = player.insert(db).await {
            eprintln!("Failed to insert player {username}: {e}");
        } else {
            inserted += 1;
        }
    }

    println!("  Inserted {inserted} demo players");
}

/// Seeds tournaments covering every team size and lifecycle stage.
async fn seed_tournaments(db: &DatabaseConnection) {
    // (id, title, fee, prize, slots, team size, status, hours from now)
    let lineup: [(
        &str,
        &str,
        Decimal,
        Decimal,
        i32,
        TeamSize,
        TournamentStatus,
        i64,
    ); 4] = [
        (
            DEMO_TOURNAMENTS[0],
            "Daily Solo Rush",
            dec!(10.00),
            dec!(500.00),
            100,
            TeamSize::Solo,
            TournamentStatus::Upcoming,
            6,
        ),
        (
            DEMO_TOURNAMENTS[1],
            "Duo Night Cup",
            dec!(25.00),
            dec!(1000.00),
            48,
            TeamSize::Duo,
            TournamentStatus::Upcoming,
            24,
        ),
        (
            DEMO_TOURNAMENTS[2],
            "Squad Clash Series",
            dec!(40.00),
            dec!(2500.00),
            48,
            TeamSize::Squad4,
            TournamentStatus::Active,
            -2,
        ),
        (
            DEMO_TOURNAMENTS[3],
            "Legends Grand Final",
            dec!(60.00),
            dec!(10000.00),
            48,
            TeamSize::Squad6,
            TournamentStatus::Completed,
            -168,
        ),
    ];

    let mut inserted = 0;
    for (id, title, entry_fee, prize_pool, max_slots, team_size, status, offset_hours) in lineup {
        let id = demo_id(id);
        if tournaments::Entity::find_by_id(id)
            .one(db)
            .await
            .ok()
            .flatten()
            .is_some()
        {
            println!("  Tournament \"{title}\" already exists, skipping...");
            continue;
        }

        let tournament = tournaments::ActiveModel {
            id: Set(id),
            title: Set(title.to_string()),
            description: Set(Some(format!("Seeded {title} for local development"))),
            entry_fee: Set(entry_fee),
            prize_pool: Set(prize_pool),
            max_slots: Set(max_slots),
            registered_players: Set(0),
            team_size: Set(team_size),
            status: Set(status),
            starts_at: Set((Utc::now() + Duration::hours(offset_hours)).into()),
            version: Set(0),
            created_at: Set(Utc::now().into()),
            updated_at: Set(Utc::now().into()),
        };

        if let Err(e) = tournament.insert(db).await {
            eprintln!("Failed to insert tournament \"{title}\": {e}");
        } else {
            inserted += 1;
        }
    }

    println!("  Inserted {inserted} tournaments");
}
