use log::info;
use rocket::fairing::AdHoc;
use rocket::launch;
use std::env;

use hisssteria_snake::bot::Bot;
use hisssteria_snake::config::Config;
use hisssteria_snake::debug_logger::DebugLogger;
use hisssteria_snake::handler;

#[launch]
async fn rocket() -> _ {
    // Lots of web hosting services expect you to bind to the port specified by the `PORT`
    // environment variable. However, Rocket looks at the `ROCKET_PORT` environment variable.
    // If we find a value for `PORT`, we set `ROCKET_PORT` to that value.
    if let Ok(port) = env::var("PORT") {
        env::set_var("ROCKET_PORT", &port);
    }

    // We default to 'info' level logging. But if the `RUST_LOG` environment variable is set,
    // we keep that value instead.
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }

    env_logger::init();

    info!("Starting Battlesnake Server...");

    // Load configuration once at startup
    let config = Config::load_or_default();
    let debug_logger = DebugLogger::new(config.debug.enabled, &config.debug.log_file_path).await;
    let bot = Bot::with_debug_logger(config, debug_logger);

    rocket::build()
        .manage(bot)
        .attach(AdHoc::on_response("Server ID Middleware", |_, res| {
            Box::pin(async move {
                res.set_raw_header("Server", "battlesnake/github/hisssteria-snake");
            })
        }))
        .attach(AdHoc::on_liftoff("Startup Log", |rocket| {
            Box::pin(async move {
                let config = rocket.config();
                info!("Battlesnake listening on {}:{}", config.address, config.port);
            })
        }))
        .attach(AdHoc::on_shutdown("Shutdown Log", |_| {
            Box::pin(async move {
                info!("Battlesnake Server shutting down");
            })
        }))
        .mount("/", handler::routes())
}
