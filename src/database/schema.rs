//! Schema bootstrap executed by `Database::migrate`. Every statement is idempotent.

pub const STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id            BIGSERIAL PRIMARY KEY,
        login         TEXT NOT NULL,
        password_hash TEXT NOT NULL,
        role          TEXT NOT NULL DEFAULT 'viewer',
        created_at    TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at    TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        CONSTRAINT users_login_key UNIQUE (login)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS network_nodes (
        id          BIGSERIAL PRIMARY KEY,
        name        TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        parent_id   BIGINT REFERENCES network_nodes (id),
        created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS devices (
        id              BIGSERIAL PRIMARY KEY,
        type            TEXT NOT NULL,
        vendor          TEXT NOT NULL DEFAULT '',
        model           TEXT NOT NULL DEFAULT '',
        serial          TEXT NOT NULL,
        location        TEXT NOT NULL DEFAULT '',
        status          TEXT NOT NULL DEFAULT 'active',
        network_node_id BIGINT REFERENCES network_nodes (id),
        created_at      TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at      TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        CONSTRAINT devices_serial_key UNIQUE (serial)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS network_nodes_parent_id_idx ON network_nodes (parent_id)",
    "CREATE INDEX IF NOT EXISTS devices_network_node_id_idx ON devices (network_node_id)",
];
