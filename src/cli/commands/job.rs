//! Job administration command handlers

use crate::cli::JobCommands;
use crate::config::Config;
use crate::db::Store;
use crate::domain::JobId;

pub async fn run(config: &Config, command: JobCommands) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;

    match command {
        JobCommands::Add { title, description } => {
            if title.trim().is_empty() {
                anyhow::bail!("Job title cannot be empty");
            }
            let job = store.create_job(title.trim(), &description).await?;
            println!("✓ Posted: {} (ID: {})", job.title, job.id);
        }
        JobCommands::List => {
            let jobs = store.list_all_jobs().await?;
            if jobs.is_empty() {
                println!("No jobs posted.");
                println!();
                println!("Post one with: hireboard job add \"<title>\" \"<description>\"");
                return Ok(());
            }

            println!("Jobs ({} total)", jobs.len());
            println!("{:-<70}", "");
            for job in jobs {
                let state = if job.is_open { "open" } else { "closed" };
                println!("[{}] {} ({})", job.id, job.title, state);
                println!("  Updated: {}", job.updated_at);
            }
        }
        JobCommands::Close { id } => set_open(&store, id, false).await?,
        JobCommands::Open { id } => set_open(&store, id, true).await?,
        JobCommands::Remove { id } => {
            if store.delete_job(JobId::new(id)).await? {
                println!("✓ Removed job {id} and its applications");
            } else {
                println!("Job {id} not found.");
            }
        }
    }

    Ok(())
}

async fn set_open(store: &Store, id: i32, is_open: bool) -> anyhow::Result<()> {
    if store.set_job_open(JobId::new(id), is_open).await? {
        let state = if is_open { "open" } else { "closed" };
        println!("✓ Job {id} is now {state}");
        // The cached listing is not invalidated; readers converge within one TTL.
    } else {
        println!("Job {id} not found.");
    }
    Ok(())
}
