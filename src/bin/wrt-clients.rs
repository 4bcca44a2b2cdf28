use std::time::Duration;

use anyhow::Context;
use dialoguer::theme::ColorfulTheme;
use structopt::StructOpt;
use wrt_clients::{display, logger, Client, RouterConfig, Style};

#[derive(Debug, StructOpt)]
#[structopt(name = "wrt-clients", about = "List the DHCP clients of a Linksys WRT router")]
struct Opt {
    /// The router's admin user [env: WRT_USERNAME] [default: ""]
    #[structopt(short, long)]
    user: Option<String>,

    /// The router's admin password [env: WRT_PASSWORD] [default: admin]
    #[structopt(short, long)]
    password: Option<String>,

    /// Prompt for the password instead
    #[structopt(long, conflicts_with = "password")]
    ask_password: bool,

    /// The router's IP address [env: WRT_HOST] [default: guessed from local interfaces]
    #[structopt(short, long, alias = "host")]
    ip: Option<String>,

    /// Don't color the output
    #[structopt(long)]
    plain: bool,

    /// How often to repeat a request after the router rejected the credentials
    #[structopt(long, default_value = "10")]
    auth_retries: u32,

    /// Give up on a single request after this many seconds
    #[structopt(long)]
    timeout_secs: Option<u64>,

    /// Verify the router's certificate, fails with the stock self-signed one
    #[structopt(long)]
    verify_certs: bool,

    /// More logging, can be repeated
    #[structopt(short, long, parse(from_occurrences))]
    verbose: u8,
}

async fn prompt_password() -> anyhow::Result<String> {
    tokio::task::spawn_blocking(|| {
        dialoguer::Password::with_theme(&ColorfulTheme::default())
            .with_prompt("Router password")
            .allow_empty_password(true)
            .report(false)
            .interact()
    })
    .await
    .context("password prompt")?
    .context("couldn't read password")
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let opt = Opt::from_args();

    logger::init(logger::level_from_verbosity(opt.verbose)).context("initialize logger")?;

    match dotenv::dotenv() {
        Ok(path) => log::debug!("loaded .env from {}", path.display()),
        Err(err) => log::debug!("couldn't load .env file: {:?}", err),
    };

    let password = if opt.ask_password {
        Some(prompt_password().await?)
    } else {
        opt.password.clone()
    };

    let config = RouterConfig::resolve(
        opt.ip.as_deref(),
        opt.user.as_deref(),
        password.as_deref(),
    )?
    .with_accept_invalid_certs(!opt.verify_certs)
    .with_auth_retries(opt.auth_retries)
    .with_timeout(opt.timeout_secs.map(Duration::from_secs));

    log::info!("querying {} for the DHCP client list", config.host());
    let client = Client::new(config)?;

    // nothing is printed unless the whole table arrived
    let leases = tokio::select! {
        leases = client.leases() => leases?,
        _ = tokio::signal::ctrl_c() => anyhow::bail!("interrupted"),
    };

    let style = if opt.plain { Style::Plain } else { Style::Colored };
    display::print(&leases, style).context("couldn't write lease table")?;

    Ok(())
}
