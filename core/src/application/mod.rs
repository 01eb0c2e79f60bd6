use tracing::info;

use crate::{
    domain::common::{WardenConfig, services::Service},
    infrastructure::{
        crypto::argon2_hasher::Argon2HasherRepository,
        db::postgres::{Postgres, PostgresConfig},
        role::repository::PostgresRoleRepository,
        user::repository::PostgresUserRepository,
    },
};

pub type WardenService =
    Service<PostgresUserRepository, PostgresRoleRepository, Argon2HasherRepository>;

pub async fn create_service(config: WardenConfig) -> Result<WardenService, anyhow::Error> {
    let postgres = Postgres::new(PostgresConfig {
        database_url: config.database.url(),
    })
    .await?;

    let service = Service::new(
        PostgresUserRepository::new(postgres.get_db()),
        PostgresRoleRepository::new(postgres.get_db()),
        Argon2HasherRepository::new(),
    );

    info!("warden service ready");

    Ok(service)
}
