use anyhow::{bail, Context, Result};
use registration::core::config::Config;
use registration::core::tracing_init::init_tracing;
use registration::services::user_service::UserService;
use std::env;
use std::path::PathBuf;
use tracing::info;

const USAGE: &str = "usage: registration [config.toml] <list | init | add <username> <password> <role> | membership <username> <days> <name>>";

fn main() -> Result<()> {
    let mut args: Vec<String> = env::args().skip(1).collect();

    let explicit_path = if args.first().is_some_and(|a| a.ends_with(".toml")) {
        Some(PathBuf::from(args.remove(0)))
    } else {
        None
    };

    let (config, config_path) = Config::load(explicit_path)?;

    init_tracing(&config.logging)?;

    info!(
        config_path = %config_path.display(),
        home_folder = %config.storage.home_folder.display(),
        log_level = %config.logging.level,
        "Registration admin starting"
    );

    let mut service = UserService::open(&config.storage)
        .context("Failed to open user directory")?;

    let command: Vec<&str> = args.iter().map(String::as_str).collect();
    match command.as_slice() {
        [] | ["list"] => {
            for user in service.get_all_users() {
                println!(
                    "{}\t{}\tdays_left={}\tpending={}",
                    user.username,
                    user.role,
                    user.days_left,
                    user.memberships.join(",")
                );
            }
        }
        ["init"] => {
            service.init_database()?;
            println!("User directory initialized");
        }
        ["add", username, password, role] => {
            service.add_user(username, password, role)?;
            println!("User '{}' added", username);
        }
        ["membership", username, days, name] => {
            let days_paid = days
                .parse::<u32>()
                .context(format!("Invalid number of days: {}", days))?;
            service.update_membership(username, days_paid, name)?;
            println!("Membership '{}' updated for '{}'", name, username);
        }
        _ => bail!(USAGE),
    }

    Ok(())
}
