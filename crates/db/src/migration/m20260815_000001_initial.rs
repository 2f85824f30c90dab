//! Initial database migration.
//!
//! Creates the core tables, enums, and triggers for the ledger:
//! users, accounts, goals, and transactions.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(ENUMS_SQL).await?;
        db.execute_unprepared(USERS_SQL).await?;
        db.execute_unprepared(ACCOUNTS_SQL).await?;
        db.execute_unprepared(GOALS_SQL).await?;
        db.execute_unprepared(TRANSACTIONS_SQL).await?;
        db.execute_unprepared(TRIGGERS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- Account type
CREATE TYPE account_kind AS ENUM ('CURRENT', 'SAVINGS');

-- Transaction kind
CREATE TYPE transaction_kind AS ENUM ('INCOME', 'EXPENSE');

-- Recurrence interval
CREATE TYPE recurring_interval AS ENUM ('DAILY', 'WEEKLY', 'MONTHLY', 'YEARLY');
";

const USERS_SQL: &str = r"
CREATE TABLE users (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    email VARCHAR(255) UNIQUE,
    name VARCHAR(255) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_users_email ON users(email);
";

const ACCOUNTS_SQL: &str = r"
CREATE TABLE accounts (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    owner_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    name VARCHAR(255) NOT NULL,
    kind account_kind NOT NULL DEFAULT 'CURRENT',
    balance NUMERIC(18, 2) NOT NULL DEFAULT 0,
    is_default BOOLEAN NOT NULL DEFAULT false,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_accounts_owner ON accounts(owner_id);

-- At most one default account per owner
CREATE UNIQUE INDEX accounts_one_default_per_owner
    ON accounts(owner_id) WHERE is_default;
";

const GOALS_SQL: &str = r"
CREATE TABLE goals (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    owner_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    account_id UUID REFERENCES accounts(id) ON DELETE SET NULL,
    name VARCHAR(255) NOT NULL,
    target_amount NUMERIC(18, 2) NOT NULL,
    current_amount NUMERIC(18, 2) NOT NULL DEFAULT 0,
    target_date DATE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_target_amount_positive CHECK (target_amount > 0)
);

CREATE INDEX idx_goals_owner ON goals(owner_id);
CREATE INDEX idx_goals_account ON goals(account_id) WHERE account_id IS NOT NULL;
";

const TRANSACTIONS_SQL: &str = r"
CREATE TABLE transactions (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    owner_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    account_id UUID NOT NULL REFERENCES accounts(id) ON DELETE CASCADE,
    goal_id UUID REFERENCES goals(id) ON DELETE SET NULL,
    kind transaction_kind NOT NULL,
    amount NUMERIC(18, 2) NOT NULL,
    category VARCHAR(100) NOT NULL,
    description TEXT,
    date DATE NOT NULL,
    is_recurring BOOLEAN NOT NULL DEFAULT false,
    recurring_interval recurring_interval,
    next_recurring_date DATE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_amount_non_negative CHECK (amount >= 0),
    CONSTRAINT chk_recurring_interval CHECK (
        (is_recurring AND recurring_interval IS NOT NULL)
        OR (NOT is_recurring AND recurring_interval IS NULL)
    )
);

CREATE INDEX idx_transactions_owner ON transactions(owner_id);
CREATE INDEX idx_transactions_account_date ON transactions(account_id, date DESC);
CREATE INDEX idx_transactions_goal ON transactions(goal_id) WHERE goal_id IS NOT NULL;
CREATE INDEX idx_transactions_recurring ON transactions(next_recurring_date)
    WHERE is_recurring;
";

const TRIGGERS_SQL: &str = r"
-- ============================================================
-- FUNCTION: touch_updated_at
-- Keeps updated_at current on every row update
-- ============================================================
CREATE OR REPLACE FUNCTION touch_updated_at()
RETURNS TRIGGER AS $$
BEGIN
    NEW.updated_at := now();
    RETURN NEW;
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER trg_users_touch
BEFORE UPDATE ON users
FOR EACH ROW
EXECUTE FUNCTION touch_updated_at();

CREATE TRIGGER trg_accounts_touch
BEFORE UPDATE ON accounts
FOR EACH ROW
EXECUTE FUNCTION touch_updated_at();

CREATE TRIGGER trg_goals_touch
BEFORE UPDATE ON goals
FOR EACH ROW
EXECUTE FUNCTION touch_updated_at();

CREATE TRIGGER trg_transactions_touch
BEFORE UPDATE ON transactions
FOR EACH ROW
EXECUTE FUNCTION touch_updated_at();
";

const DROP_ALL_SQL: &str = r"
-- Order matters due to foreign key constraints

DROP TRIGGER IF EXISTS trg_transactions_touch ON transactions;
DROP TRIGGER IF EXISTS trg_goals_touch ON goals;
DROP TRIGGER IF EXISTS trg_accounts_touch ON accounts;
DROP TRIGGER IF EXISTS trg_users_touch ON users;
DROP FUNCTION IF EXISTS touch_updated_at();

DROP TABLE IF EXISTS transactions CASCADE;
DROP TABLE IF EXISTS goals CASCADE;
DROP TABLE IF EXISTS accounts CASCADE;
DROP TABLE IF EXISTS users CASCADE;

DROP TYPE IF EXISTS recurring_interval CASCADE;
DROP TYPE IF EXISTS transaction_kind CASCADE;
DROP TYPE IF EXISTS account_kind CASCADE;
";
