use std::{env, sync::Arc};

use actix_web::HttpServer;

use common::{
    context::effectfull_context::ServiceState,
    entities::report::Report,
    repository::{mongo_repository::MongoRepository, RepositoryObject},
};
use report::create_app;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    env_logger::init();

    let mongo_uri = env::var("MONGOURI")?;
    let database = env::var("MONGO_DATABASE").unwrap_or_else(|_| "reports".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .map(|port| port.parse())
        .transpose()?
        .unwrap_or(3011);

    let report_repo = MongoRepository::<Report>::new(&mongo_uri, &database, "report")
        .await
        .map_err(|err| anyhow::anyhow!("Failed to connect to MongoDB: {}", err))?;

    let mut state = ServiceState::new("report");
    let reports: RepositoryObject<Report> = Arc::new(report_repo);
    state.insert(reports);
    let state = Arc::new(state);

    log::info!("Starting {} service on port {}", state.service_name, port);

    HttpServer::new(move || create_app(state.clone()))
        .bind(("0.0.0.0", port))?
        .run()
        .await?;

    Ok(())
}
