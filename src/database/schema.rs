// Embedded SQL migrations, applied in order at startup. Every statement is
// guarded with IF NOT EXISTS so re-running against an existing database is a
// no-op.

pub const MIGRATIONS: &[(&str, &str)] = &[
    (
        "001_initial_schema",
        include_str!("../../migrations/001_initial_schema.sql"),
    ),
    (
        "002_account_columns",
        include_str!("../../migrations/002_account_columns.sql"),
    ),
    (
        "003_incident_archive",
        include_str!("../../migrations/003_incident_archive.sql"),
    ),
];
