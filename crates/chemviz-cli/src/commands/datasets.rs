//! Dataset commands: upload, analytics, history, delete.

use anyhow::{anyhow, Result};
use chemviz_app::{averages_series, distribution_series, DashboardService};
use chemviz_core::dataset::Analytics;
use std::io::Write;
use std::path::Path;

pub async fn upload(service: &DashboardService, file: &Path) -> Result<()> {
    let filename = file
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow!("invalid file path: {}", file.display()))?
        .to_string();
    let bytes = tokio::fs::read(file).await?;

    service
        .upload
        .select_file(&filename, bytes)
        .await
        .map_err(|e| anyhow!(e.user_message()))?;
    let dataset = service
        .perform_upload()
        .await
        .map_err(|e| anyhow!("Upload failed: {}", e.user_message()))?;

    if let Some(message) = service.upload.success().await {
        println!("{message}");
    }
    println!("Dataset id: {}", dataset.id);

    // Mirror the upload flow of the UI: the new dataset becomes active and
    // its analytics are shown immediately.
    let analytics = service
        .load_analytics()
        .await
        .map_err(|e| anyhow!("Failed to load analytics: {}", e.user_message()))?;
    print_analytics(&analytics);
    Ok(())
}

pub async fn analytics(service: &DashboardService, dataset_id: &str) -> Result<()> {
    service
        .select_from_history(dataset_id)
        .await
        .map_err(|e| anyhow!(e.user_message()))?;
    let analytics = service
        .load_analytics()
        .await
        .map_err(|e| anyhow!("Failed to load analytics: {}", e.user_message()))?;
    print_analytics(&analytics);
    Ok(())
}

pub async fn history(service: &DashboardService) -> Result<()> {
    let entries = service
        .refresh_history()
        .await
        .map_err(|e| anyhow!("Failed to load history: {}", e.user_message()))?;

    if entries.is_empty() {
        println!("No datasets uploaded yet.");
        return Ok(());
    }

    println!("Last {} uploaded datasets:", entries.len());
    for entry in entries {
        println!();
        println!("  {} - {}", entry.id, entry.filename);
        println!("    Records:  {}", entry.record_count);
        println!("    Uploaded: {}", entry.upload_time);
        println!(
            "    Averages: flowrate {:.2}, pressure {:.2}, temperature {:.2}",
            entry.summary.avg_flowrate, entry.summary.avg_pressure, entry.summary.avg_temperature
        );
        let mut types: Vec<_> = entry.summary.type_distribution.iter().collect();
        types.sort_by(|a, b| a.0.cmp(b.0));
        let types: Vec<String> = types.iter().map(|(t, n)| format!("{t}: {n}")).collect();
        println!("    Types:    {}", types.join(", "));
    }
    Ok(())
}

pub async fn delete(service: &DashboardService, dataset_id: &str, yes: bool) -> Result<()> {
    let confirmed = yes || confirm(&format!("Are you sure you want to delete \"{dataset_id}\"?"))?;

    let deleted = service
        .delete_dataset(dataset_id, confirmed)
        .await
        .map_err(|e| anyhow!("Failed to delete dataset: {}", e.user_message()))?;
    if deleted {
        println!("Deleted dataset {dataset_id}");
    } else {
        println!("Aborted");
    }
    Ok(())
}

fn confirm(question: &str) -> Result<bool> {
    print!("{question} [y/N] ");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn print_analytics(analytics: &Analytics) {
    println!();
    println!("Dataset analysis: {}", analytics.metadata.filename);
    println!(
        "  {} records, uploaded {}",
        analytics.metadata.record_count, analytics.metadata.upload_time
    );
    println!();
    println!("  Total equipment: {}", analytics.summary.total_count);
    for (label, value) in averages_series(&analytics.summary) {
        println!("  Avg {label}: {value:.2}");
    }
    println!();
    println!("  Equipment type distribution:");
    for (label, count) in distribution_series(&analytics.summary) {
        println!("    {label}: {count}");
    }

    if !analytics.equipment_records.is_empty() {
        println!();
        println!(
            "  {:<20} {:<12} {:>10} {:>10} {:>12}",
            "Equipment Name", "Type", "Flowrate", "Pressure", "Temperature"
        );
        for record in &analytics.equipment_records {
            println!(
                "  {:<20} {:<12} {:>10.2} {:>10.2} {:>12.2}",
                record.equipment_name,
                record.equipment_type,
                record.flowrate,
                record.pressure,
                record.temperature
            );
        }
    }
}
