//! User bootstrap command handler

use crate::cli::UserCommands;
use crate::config::Config;
use crate::db::Store;

pub async fn run(config: &Config, command: UserCommands) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;

    match command {
        UserCommands::Add {
            name,
            email,
            password,
        } => {
            if !email.contains('@') {
                anyhow::bail!("Invalid email address: {email}");
            }
            if password.len() < 8 {
                anyhow::bail!("Password must be at least 8 characters");
            }

            let user = store
                .create_user(&name, &email, &password, &config.security)
                .await?;

            println!("✓ Created user {} <{}> (ID: {})", user.name, user.email, user.id);
            println!("  API key: {}", user.api_key);
        }
    }

    Ok(())
}
