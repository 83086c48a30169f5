use kusuri_app::database;
use rustc_hash::FxHashSet;

pub(crate) async fn run(database_url: &str) -> Result<(), String> {
    let pool = database::connect(database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    // The ledger table only exists once the first migration has run.
    let applied: FxHashSet<i64> =
        sqlx::query_scalar::<_, i64>("SELECT version FROM _sqlx_migrations WHERE success")
            .fetch_all(&pool)
            .await
            .unwrap_or_default()
            .into_iter()
            .collect();

    for migration in database::MIGRATOR.iter() {
        let mark = if applied.contains(&migration.version) {
            "applied"
        } else {
            "pending"
        };

        println!("{:>16}  {mark:<8} {}", migration.version, migration.description);
    }

    Ok(())
}
