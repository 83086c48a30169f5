use kusuri_app::database;

pub(crate) async fn run(database_url: &str) -> Result<(), String> {
    let pool = database::connect(database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    database::migrate(&pool)
        .await
        .map_err(|error| format!("failed to apply migrations: {error}"))?;

    println!("{} migrations up to date", database::MIGRATOR.iter().count());

    Ok(())
}
