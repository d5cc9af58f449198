//! Northwind demo
//!
//! Talks to a live server: set `RAVEN_HOST` (and optionally `RAVEN_DATABASE`, defaults to
//! `Northwind`) before running.

// Demo-specific lint allowances
#![allow(missing_docs)]
#![allow(clippy::print_stdout)]

use std::time::Duration;

use raven::prelude::*;

const DEFAULT_DATABASE: &str = "Northwind";

/// An employee document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Employee {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub title: Option<String>,
}

#[tokio::main]
async fn main() -> raven::Result<()> {
    let settings = ConnectionSettings::from_env()?;
    let database = settings
        .database()
        .unwrap_or(DEFAULT_DATABASE)
        .to_string();

    let transport = HttpTransport::builder()
        .timeout(Duration::from_secs(10))
        .with_logging()
        .build();
    let server = RavenClient::new(transport, settings);

    server.databases().ensure_exists(&database).await?;

    println!("=== Databases ===");
    for info in server.databases().list().await? {
        println!(
            "{} ({})",
            info.name,
            info.data_directory.as_deref().unwrap_or("default location")
        );
    }

    let northwind = server.with_database(&database);
    let employees: QueryResult<Employee> = northwind
        .query()
        .collection("Employees")?
        .filter("Address.Country", "UK")
        .order_by("LastName")
        .take(10)
        .results()
        .await?;

    println!("\n=== Employees in the UK ({}) ===", employees.total_results);
    for employee in &employees.results {
        println!(
            "{} {}: {}",
            employee.first_name,
            employee.last_name,
            employee.title.as_deref().unwrap_or("-")
        );
    }

    northwind
        .attachments()
        .save(
            "demo/hello.txt",
            SaveAttachment::new(&b"hello from the demo"[..]).with_metadata("Owner", "demo"),
        )
        .await?;
    let hello = northwind.attachments().get("demo/hello.txt").await?;
    println!("\nattachment: {} bytes, metadata {:?}", hello.data.len(), hello.metadata);
    northwind.attachments().remove("demo/hello.txt").await?;

    Ok(())
}
