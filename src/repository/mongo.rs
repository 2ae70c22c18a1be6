use bson::doc;
use mongodb::{
    options::{ClientOptions, Credential, IndexOptions},
    Client, IndexModel,
};
use tracing::info;

use crate::config::MongoConfig;
use crate::model::user::User;
use crate::repository::repository_error::RepositoryResult;

/// Persistence gateway: one client for the process lifetime, collections
/// handed out by name. Opened at startup and injected into the repositories.
pub struct MongoGateway {
    db: mongodb::Database,
}

impl MongoGateway {
    pub async fn connect(config: &MongoConfig) -> RepositoryResult<Self> {
        let mut client_options = ClientOptions::parse(&config.uri).await?;
        client_options.app_name = Some("FintrackBackend".to_string());
        client_options.max_pool_size = Some(config.pool_size);
        client_options.connect_timeout = Some(std::time::Duration::from_secs(
            config.connection_timeout_secs,
        ));
        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            client_options.credential = Some(
                Credential::builder()
                    .username(username.clone())
                    .password(password.clone())
                    .build(),
            );
        }

        let client = Client::with_options(client_options)?;
        let db = client.database(&config.database);
        info!("Connected to MongoDB database: {}", config.database);
        Ok(MongoGateway { db })
    }

    pub fn collection<T>(&self, name: &str) -> mongodb::Collection<T> {
        self.db.collection::<T>(name)
    }

    /// Create the indexes the repositories rely on. The unique email index
    /// turns the signup uniqueness check into a single atomic insert.
    pub async fn ensure_indexes(&self) -> RepositoryResult<()> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection::<User>(crate::repository::user_repo::COLLECTION)
            .create_index(email_index, None)
            .await?;
        info!("Ensured unique email index on users collection");
        Ok(())
    }
}
