//! Verify that the student accounts table carries every column the
//! application expects. Deployments that predate the guarded column
//! migrations can be missing the emergency-contact fields; this prints a
//! report and exits non-zero when anything is absent.

use clap::Parser;
use sqlx::{PgPool, Row};

#[derive(Parser)]
#[command(
    name = "schema-check",
    about = "Check the accounts_student schema against the application's expectations"
)]
struct Args {
    /// Postgres connection string; falls back to DATABASE_URL.
    #[arg(long)]
    database_url: Option<String>,
}

const REQUIRED_COLUMNS: &[(&str, &str)] = &[
    ("user_id", "primary key"),
    ("student_id", "school-issued student id"),
    ("student_user", "login name"),
    ("student_pass", "argon2 password hash"),
    ("student_email", "email address"),
    ("full_name", "full name"),
    ("student_yearlvl", "year level"),
    ("student_cnum", "contact number"),
    ("student_emergencycontact", "emergency contact information"),
    ("student_contactperson", "contact person name"),
    ("student_medinfo", "medical information"),
    ("student_address", "address"),
    ("student_profile", "profile image filename"),
    ("student_status", "active/inactive flag"),
    ("student_created_at", "creation timestamp"),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let url = args
        .database_url
        .or_else(|| std::env::var("DATABASE_URL").ok())
        .ok_or_else(|| anyhow::anyhow!("pass --database-url or set DATABASE_URL"))?;

    let pool = PgPool::connect(&url).await?;

    let rows = sqlx::query(
        "SELECT column_name FROM information_schema.columns WHERE table_name = 'accounts_student'",
    )
    .fetch_all(&pool)
    .await?;

    let existing: Vec<String> = rows
        .iter()
        .map(|row| row.get::<String, _>("column_name"))
        .collect();

    let mut missing = Vec::new();
    for (column, description) in REQUIRED_COLUMNS {
        if existing.iter().any(|c| c == column) {
            println!("ok       {}", column);
        } else {
            println!("MISSING  {} ({})", column, description);
            missing.push(*column);
        }
    }

    if missing.is_empty() {
        println!("all {} required columns present", REQUIRED_COLUMNS.len());
        Ok(())
    } else {
        println!(
            "{} column(s) missing; apply migrations/002_account_columns.sql",
            missing.len()
        );
        std::process::exit(1);
    }
}
