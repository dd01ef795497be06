//! Initial schema: users with two-pool wallets, tournaments, registrations,
//! and the append-only wallet transaction ledger.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ======================== PART 1: ENUM TYPES ========================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ======================== PART 2: USERS ========================
        db.execute_unprepared(USERS_SQL).await?;

        // ======================== PART 3: TOURNAMENTS ========================
        db.execute_unprepared(TOURNAMENTS_SQL).await?;

        // ======================== PART 4: REGISTRATIONS ========================
        db.execute_unprepared(REGISTRATIONS_SQL).await?;

        // ===================== PART 5: WALLET TRANSACTIONS =====================
        db.execute_unprepared(WALLET_TRANSACTIONS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

const ENUMS_SQL: &str = r"
CREATE TYPE tournament_status AS ENUM ('upcoming', 'active', 'completed');
CREATE TYPE team_size AS ENUM ('solo', 'duo', 'squad4', 'squad6');
CREATE TYPE team_selection AS ENUM ('pre_made', 'auto_match');
CREATE TYPE registration_status AS ENUM ('registered', 'cancelled', 'refunded');
CREATE TYPE transaction_kind AS ENUM ('deposit', 'winning', 'entry_fee', 'withdrawal');
CREATE TYPE transaction_reference AS ENUM ('tournament_id', 'order_id', 'withdrawal_id');
CREATE TYPE transaction_status AS ENUM ('pending', 'completed', 'failed');
";

const USERS_SQL: &str = r"
CREATE TABLE users (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    username VARCHAR(100) NOT NULL UNIQUE,
    email VARCHAR(255) NOT NULL UNIQUE,
    phone VARCHAR(20),
    deposit_balance NUMERIC(19, 2) NOT NULL DEFAULT 0,
    winning_balance NUMERIC(19, 2) NOT NULL DEFAULT 0,
    wallet_version BIGINT NOT NULL DEFAULT 0,
    is_active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_deposit_balance_non_negative CHECK (deposit_balance >= 0),
    CONSTRAINT chk_winning_balance_non_negative CHECK (winning_balance >= 0)
);
";

const TOURNAMENTS_SQL: &str = r"
CREATE TABLE tournaments (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    title VARCHAR(255) NOT NULL,
    description TEXT,
    entry_fee NUMERIC(19, 2) NOT NULL DEFAULT 0,
    prize_pool NUMERIC(19, 2) NOT NULL DEFAULT 0,
    max_slots INTEGER NOT NULL,
    registered_players INTEGER NOT NULL DEFAULT 0,
    team_size team_size NOT NULL DEFAULT 'solo',
    status tournament_status NOT NULL DEFAULT 'upcoming',
    starts_at TIMESTAMPTZ NOT NULL,
    version BIGINT NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_entry_fee_non_negative CHECK (entry_fee >= 0),
    CONSTRAINT chk_prize_pool_non_negative CHECK (prize_pool >= 0),
    CONSTRAINT chk_max_slots_positive CHECK (max_slots > 0),
    CONSTRAINT chk_occupancy_within_capacity CHECK (registered_players >= 0 AND registered_players <= max_slots)
);

CREATE INDEX idx_tournaments_status_starts_at ON tournaments (status, starts_at);
";

const REGISTRATIONS_SQL: &str = r"
CREATE TABLE registrations (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    tournament_id UUID NOT NULL REFERENCES tournaments(id) ON DELETE CASCADE,
    free_fire_id VARCHAR(20) NOT NULL,
    team_selection team_selection,
    entry_fee NUMERIC(19, 2) NOT NULL DEFAULT 0,
    slot_number INTEGER NOT NULL,
    status registration_status NOT NULL DEFAULT 'registered',
    username VARCHAR(100) NOT NULL,
    tournament_title VARCHAR(255) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_entry_fee_non_negative CHECK (entry_fee >= 0),
    CONSTRAINT chk_slot_number_positive CHECK (slot_number > 0),
    CONSTRAINT uq_registrations_user_tournament UNIQUE (user_id, tournament_id),
    CONSTRAINT uq_registrations_tournament_free_fire_id UNIQUE (tournament_id, free_fire_id)
);

CREATE INDEX idx_registrations_tournament ON registrations (tournament_id);
CREATE INDEX idx_registrations_user ON registrations (user_id);
";

const WALLET_TRANSACTIONS_SQL: &str = r"
CREATE TABLE wallet_transactions (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    kind transaction_kind NOT NULL,
    amount NUMERIC(19, 2) NOT NULL,
    description VARCHAR(255) NOT NULL,
    reference VARCHAR(255) NOT NULL,
    reference_type transaction_reference NOT NULL,
    status transaction_status NOT NULL DEFAULT 'completed',
    metadata JSONB,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT uq_wallet_transactions_reference UNIQUE (user_id, reference, reference_type)
);

CREATE INDEX idx_wallet_transactions_user_created ON wallet_transactions (user_id, created_at DESC);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS wallet_transactions CASCADE;
DROP TABLE IF EXISTS registrations CASCADE;
DROP TABLE IF EXISTS tournaments CASCADE;
DROP TABLE IF EXISTS users CASCADE;

DROP TYPE IF EXISTS transaction_status CASCADE;
DROP TYPE IF EXISTS transaction_reference CASCADE;
DROP TYPE IF EXISTS transaction_kind CASCADE;
DROP TYPE IF EXISTS registration_status CASCADE;
DROP TYPE IF EXISTS team_selection CASCADE;
DROP TYPE IF EXISTS team_size CASCADE;
DROP TYPE IF EXISTS tournament_status CASCADE;
";
