//! AMC motion command implementations

use anyhow::Result;
use clap::Subcommand;
use console::style;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use acclaim_amc::{expected_channels, validate_motion};

use crate::utils::{add_table_row, create_table, format_range, load_motion, load_skeleton};

#[derive(Subcommand)]
pub enum AmcCommands {
    /// Display information about an AMC file
    Info {
        /// Path to the AMC file
        file: PathBuf,

        /// ASF skeleton the motion animates
        #[arg(short, long, value_name = "ASF")]
        skeleton: PathBuf,
    },
}

pub fn execute(command: AmcCommands) -> Result<()> {
    match command {
        AmcCommands::Info { file, skeleton } => execute_info(&file, &skeleton),
    }
}

fn execute_info(path: &Path, skeleton_path: &Path) -> Result<()> {
    let skeleton = load_skeleton(skeleton_path)?;
    let motion = load_motion(path, &skeleton)?;

    println!("\n{}", style("AMC File Information").bold().underlined());
    println!("File: {}", style(path.display()).cyan());
    println!("Skeleton: {}", style(skeleton_path.display()).cyan());
    println!(
        "Keywords: {}",
        if motion.keywords.is_empty() {
            "-".to_string()
        } else {
            motion.keywords.join(", ")
        }
    );
    println!("Frames: {}", style(motion.frame_count()).green());
    if let Some((first, last)) = motion.frame_range() {
        println!("Frame range: {}", style(format_range(first, last)).yellow());
    }

    // Frames each bone appears in, and the value counts seen for it
    let mut channels: BTreeMap<&str, (usize, BTreeSet<usize>)> = BTreeMap::new();
    for (_, frame) in motion.iter() {
        for (name, values) in frame.iter() {
            let (frames, widths) = channels.entry(name).or_default();
            *frames += 1;
            widths.insert(values.len());
        }
    }

    if !channels.is_empty() {
        println!("\n{}", style("Channels").bold());
        let mut table = create_table(vec!["Bone", "Frames", "Values", "Expected"]);
        for (name, (frames, widths)) in &channels {
            let expected = expected_channels(&skeleton, name);
            let widths: Vec<String> = widths.iter().map(ToString::to_string).collect();
            add_table_row(
                &mut table,
                vec![
                    (*name).to_string(),
                    frames.to_string(),
                    widths.join("/"),
                    expected.map_or_else(|| "unknown bone".to_string(), |n| n.to_string()),
                ],
            );
        }
        table.printstd();
    }

    let issues = validate_motion(&motion, &skeleton);
    if issues.is_empty() {
        println!("\n✓ Motion matches the skeleton");
    } else {
        println!("\n{}", style("Issues").bold());
        for issue in &issues {
            println!("{} {issue}", style("warning:").yellow().bold());
        }
    }

    Ok(())
}
