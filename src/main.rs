use clap::Parser;
use taskdeck::cli::commands::Cli;
use taskdeck::cli::handlers;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_secs()
        .init();

    let cli = Cli::parse();

    if let Err(e) = handlers::dispatch(cli).await {
        if handlers::is_unauthorized(e.as_ref()) {
            // Rejected or missing session: forget it and send the user back to sign-in
            handlers::expire_session();
            eprintln!("error: {}", e);
            eprintln!("sign in with `td login <username>`");
        } else {
            eprintln!("error: {}", e);
        }
        std::process::exit(1);
    }
}
