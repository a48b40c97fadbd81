//! Console summary of a pipeline run

use colored::Colorize;
use std::fmt::Write;

use crate::pipeline::{OverlapRecord, RunSummary};

fn pair_line(record: &OverlapRecord) -> String {
    format!(
        "- {} vs {}  FE overlap={}  SYN overlap={}",
        record.source_frame,
        record.target_frame,
        record.n_common_frame_elements,
        record.n_common_synset_labels
    )
}

/// Plain-text summary (no colors)
pub fn render_summary(summary: &RunSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\nSummary");
    let _ = writeln!(out, "Metaphors processed: {}", summary.metaphors_processed);
    let _ = writeln!(out, "Pairs with frames: {}", summary.pairs_with_frames);

    if !summary.overlaps.is_empty() {
        let _ = writeln!(out, "\nTop pairs by surface overlap:");
        for record in &summary.top_pairs {
            let _ = writeln!(out, "{}", pair_line(record));
        }
    }

    out
}

pub fn print_summary(summary: &RunSummary) {
    println!("\n{}", "Summary".bold());
    println!("Metaphors processed: {}", summary.metaphors_processed);
    println!("Pairs with frames: {}", summary.pairs_with_frames);

    if !summary.overlaps.is_empty() {
        println!("\n{}", "Top pairs by surface overlap:".bold());
        for record in &summary.top_pairs {
            println!("{}", pair_line(record));
        }
    }

    for path in &summary.outputs {
        println!("{} {}", "✓".green(), path.display());
    }
}
