//! ASF skeleton command implementations

use anyhow::Result;
use clap::Subcommand;
use console::style;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use acclaim_asf::{Severity, Skeleton, validate_skeleton};

use crate::utils::{
    NodeType, TreeNode, TreeOptions, add_table_row, create_table, display_name, format_channels,
    format_vec, load_skeleton, render_tree,
};

#[derive(Subcommand)]
pub enum AsfCommands {
    /// Display information about an ASF file
    Info {
        /// Path to the ASF file
        file: PathBuf,
    },

    /// Show the bone hierarchy of an ASF file
    Tree {
        /// Path to the ASF file
        file: PathBuf,

        /// Maximum depth to display
        #[arg(long)]
        depth: Option<usize>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,

        /// Show compact metadata inline
        #[arg(long)]
        compact: bool,

        /// Hide per-bone metadata
        #[arg(long)]
        no_metadata: bool,
    },

    /// Validate an ASF file
    Validate {
        /// Path to the ASF file
        file: PathBuf,
    },
}

pub fn execute(command: AsfCommands) -> Result<()> {
    match command {
        AsfCommands::Info { file } => execute_info(&file),
        AsfCommands::Tree {
            file,
            depth,
            no_color,
            compact,
            no_metadata,
        } => execute_tree(
            &file,
            &TreeOptions {
                max_depth: depth,
                no_color,
                show_metadata: !no_metadata,
                compact,
            },
        ),
        AsfCommands::Validate { file } => execute_validate(&file),
    }
}

fn execute_info(path: &Path) -> Result<()> {
    let skeleton = load_skeleton(path)?;

    println!("\n{}", style("ASF File Information").bold().underlined());
    println!("File: {}", style(path.display()).cyan());
    println!("Name: {}", style(&skeleton.name).yellow());
    println!("Version: {}", style(&skeleton.version).yellow());
    println!("Bones: {}", style(skeleton.bone_count()).green());
    println!("Degrees of freedom: {}", style(skeleton.dof_count()).green());

    println!("\n{}", style("Root").bold());
    println!("Order: {}", format_channels(skeleton.root_order()));
    println!("Position: {}", format_vec(skeleton.root_position()));
    println!("Orientation: {}", format_vec(skeleton.root_orientation()));

    if !skeleton.units.is_empty() {
        println!("\n{}", style("Units").bold());
        let mut table = create_table(vec!["Unit", "Value"]);
        for (name, value) in &skeleton.units {
            add_table_row(&mut table, vec![name.clone(), value.clone()]);
        }
        table.printstd();
    }

    if skeleton.bone_count() > 0 {
        println!("\n{}", style("Bones").bold());
        let mut table = create_table(vec!["Id", "Name", "Length", "Direction", "Axis", "DOF"]);
        let mut bones: Vec<_> = skeleton.bones.values().collect();
        bones.sort_by_key(|bone| (bone.id, bone.name.clone()));

        for bone in bones {
            let axis = bone.axis.as_ref().map_or_else(
                || "-".to_string(),
                |axis| format!("{} {}", format_vec(axis.angles), axis.order),
            );
            add_table_row(
                &mut table,
                vec![
                    bone.id.map_or_else(|| "-".to_string(), |id| id.to_string()),
                    bone.name.clone(),
                    format!("{:.4}", bone.length),
                    format_vec(bone.direction),
                    axis,
                    format_channels(&bone.dof),
                ],
            );
        }
        table.printstd();
    }

    Ok(())
}

fn execute_tree(path: &Path, options: &TreeOptions) -> Result<()> {
    let skeleton = load_skeleton(path)?;

    let mut seen = BTreeSet::new();
    let mut root = TreeNode::new(display_name(path), NodeType::Root)
        .with_metadata("bones", &skeleton.bone_count().to_string())
        .with_metadata("dof", &skeleton.dof_count().to_string());
    for child in skeleton.root_children() {
        root = root.add_child(bone_node(&skeleton, child, &mut seen));
    }

    print!("{}", render_tree(&root, options));
    Ok(())
}

/// Build the subtree below `name`, marking repeats instead of following them
fn bone_node(skeleton: &Skeleton, name: &str, seen: &mut BTreeSet<String>) -> TreeNode {
    if !seen.insert(name.to_string()) {
        return TreeNode::new(name, NodeType::Repeated);
    }
    let Some(bone) = skeleton.bone(name) else {
        return TreeNode::new(name, NodeType::Undefined);
    };

    let mut node = TreeNode::new(name, NodeType::Bone)
        .with_metadata("length", &format!("{:.4}", bone.length))
        .with_metadata("dof", &format_channels(&bone.dof));
    for child in skeleton.children(name) {
        node = node.add_child(bone_node(skeleton, child, seen));
    }
    node
}

fn execute_validate(path: &Path) -> Result<()> {
    let skeleton = load_skeleton(path)?;
    let issues = validate_skeleton(&skeleton);

    for issue in &issues {
        match issue.severity() {
            Severity::Error => println!("{} {issue}", style("error:").red().bold()),
            Severity::Warning => println!("{} {issue}", style("warning:").yellow().bold()),
        }
    }

    let errors = issues
        .iter()
        .filter(|issue| issue.severity() == Severity::Error)
        .count();
    if errors > 0 {
        anyhow::bail!(
            "Validation failed: {} error(s), {} warning(s)",
            errors,
            issues.len() - errors
        );
    }

    println!(
        "✓ ASF file '{}' is valid ({} bones, {} warning(s))",
        style(path.display()).cyan(),
        style(skeleton.bone_count()).green(),
        issues.len()
    );
    Ok(())
}
