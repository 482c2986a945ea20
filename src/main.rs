mod catalog;
mod config;
mod handler;
mod http;
mod logger;
mod routing;
mod server;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load_from("config")?;
    logger::init(&cfg)?;

    // One thread; the accept loop serves one request at a time
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let server = server::Server::bind(&cfg)?;
    logger::log_server_start(&server.local_addr(), &cfg);

    let data_path = cfg.catalog.data_path();
    if !data_path.is_file() {
        logger::log_warning(&format!(
            "Catalog file '{}' not found; catalog routes will answer 500 until it exists",
            data_path.display()
        ));
    }

    server.run(server::shutdown_signal()).await
}
