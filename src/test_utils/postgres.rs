use postgresql_embedded::PostgreSQL;

/// A running embedded `PostgreSQL` instance with one freshly created database.
pub struct EmbeddedPostgres {
    pub postgresql: PostgreSQL,
    pub port: u16,
    pub database_url: String,
}

impl EmbeddedPostgres {
    /// Set up binaries, start the server, and create `db_name`.
    ///
    /// # Errors
    /// Returns an error if the embedded server cannot be set up or started, or the database
    /// cannot be created.
    pub async fn start(db_name: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let mut postgresql = PostgreSQL::default();

        // bundled binaries, so no download
        postgresql.setup().await?;
        postgresql.start().await?;
        postgresql.create_database(db_name).await?;

        let settings = postgresql.settings();
        let port = settings.port;
        let database_url = format!(
            "postgres://{}:{}@{}:{}/{db_name}",
            settings.username, settings.password, settings.host, port
        );
        tracing::info!(target: "sql_rowmap", port, "embedded PostgreSQL started");

        Ok(EmbeddedPostgres {
            postgresql,
            port,
            database_url,
        })
    }

    #[must_use]
    pub fn dsn(&self) -> &str {
        &self.database_url
    }

    /// Stop the server. A failure to stop is logged, not returned.
    pub async fn stop(self) {
        if let Err(err) = self.postgresql.stop().await {
            tracing::warn!(
                target: "sql_rowmap",
                port = self.port,
                "failed to stop embedded PostgreSQL: {err}"
            );
        }
    }
}
