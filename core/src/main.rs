mod cors;

use actix_web::{
    App, HttpServer,
    web::{self},
};
use common::{env_config::Config, stripe};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // get env vars
    let config = Config::from_env();
    let config_data = config.clone();
    let origin = config.cors_allowed_origin.clone();

    // init logger
    logger::setup(config.console_logging_enabled).expect("Failed to set up logger");

    HttpServer::new(move || {
        let stripe_client = stripe::create_client(&config_data.stripe_secret_key);
        App::new()
            .app_data(web::Data::new(config_data.clone()))
            .app_data(web::Data::new(stripe_client))
            .wrap(logger::middleware())
            .wrap(cors::middleware(&origin))
            .service(web::scope("/api").service(api_checkout::mount_stripe()))
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .workers(config.num_workers)
    .run()
    .await
}
