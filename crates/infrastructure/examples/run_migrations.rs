use migration::MigratorTrait;
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let postgres_url = env::var("POSTGRES_URL").expect("POSTGRES_URL must be set");

    println!("connecting to database...");
    let connection = sea_orm::Database::connect(&postgres_url).await?;

    println!("running migrations...");
    migration::Migrator::up(&connection, None).await?;

    println!("migrations applied.");

    Ok(())
}
