use anyhow::Result;
use zcov_ingest::ReloadReport;
use zcov_records::{dataflow_summary, group_by_line, FileRecord, HoverOutcome};

/// Print a reload summary, human-readable or as JSON on stdout.
pub fn print_report(report: &ReloadReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    let stats = &report.stats;
    println!(
        "loaded {}/{} sources in {} ms",
        stats.sources_loaded, stats.sources_found, stats.time_ms
    );
    println!(
        "files: {}  line records: {}  graphs: {}",
        stats.files, stats.line_records, stats.graphs
    );
    for error in &stats.errors {
        println!("error: {error}");
    }
    if report.cancelled {
        println!("cancelled before all sources were processed");
    }
    Ok(())
}

/// Print per-line categories, annotations, and dataflow edges for one
/// resolved file.
pub fn print_file(queried: &str, record: &FileRecord) {
    let grouped = group_by_line(&record.lines);
    println!(
        "{} ({} records on {} lines)",
        record.file,
        record.lines.len(),
        grouped.len()
    );
    if queried != record.file {
        println!("resolved from {queried}");
    }

    for (line_number, records) in &grouped {
        let first = records[0];
        let mut heading = format!("  line {line_number} [{}]", first.kind.category());
        if !first.meta.is_empty() {
            heading.push_str(&format!(" {}", first.meta));
        }
        if records.len() > 1 {
            heading.push_str(&format!(" ({} events)", records.len()));
        }
        if !first.asm.is_empty() {
            heading.push_str(&format!(" ({} asm lines)", first.asm.len()));
        }
        println!("{heading}");

        if let HoverOutcome::Found(_) = dataflow_summary(records) {
            for edge in &first.data_from {
                println!("    from {}:{}", edge.file, edge.line_number);
            }
            for edge in &first.data_to {
                println!("    to   {}:{}", edge.file, edge.line_number);
            }
        }
    }
}
