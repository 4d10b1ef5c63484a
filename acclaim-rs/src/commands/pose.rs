//! Pose export: world-space bone segments as JSON

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use acclaim_amc::FrameNumber;
use acclaim_fk::{DirectionCorrections, FkOptions, ForwardKinematics, Pose, static_pose};

use crate::utils::{create_spinner, format_vec, load_motion, load_skeleton};

#[derive(Args)]
pub struct PoseArgs {
    /// Path to the ASF skeleton
    pub skeleton: PathBuf,

    /// AMC motion to pose; without it the bind pose is exported
    #[arg(short, long, value_name = "AMC")]
    pub motion: Option<PathBuf>,

    /// Frame to export (defaults to the first frame)
    #[arg(short, long, requires = "motion", conflicts_with = "all")]
    pub frame: Option<FrameNumber>,

    /// Export every frame
    #[arg(long, requires = "motion")]
    pub all: bool,

    /// Fail on undefined bones, cycles and channel count mismatches
    #[arg(long)]
    pub strict: bool,

    /// Apply the root rotation channels
    #[arg(long)]
    pub root_orientation: bool,

    /// Do not negate arm and hand direction z components
    #[arg(long)]
    pub no_corrections: bool,

    /// Pretty-print the JSON
    #[arg(long)]
    pub pretty: bool,

    /// Write to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Serialize)]
struct BindPoseExport<'a> {
    skeleton: &'a str,
    bind_pose: &'a Pose,
}

#[derive(Serialize)]
struct MotionExport<'a> {
    skeleton: &'a str,
    frames: Vec<FrameExport<'a>>,
}

#[derive(Serialize)]
struct FrameExport<'a> {
    frame: FrameNumber,
    segments: &'a Pose,
}

pub fn execute(args: PoseArgs) -> Result<()> {
    let skeleton = load_skeleton(&args.skeleton)?;
    let name = skeleton.name.clone();

    let Some(motion_path) = &args.motion else {
        let pose = static_pose(&skeleton);
        log::info!("Bind pose covers {} bone(s)", pose.len());
        return write_json(
            &BindPoseExport {
                skeleton: &name,
                bind_pose: &pose,
            },
            &args,
        );
    };

    let motion = load_motion(motion_path, &skeleton)?;

    let mut options = FkOptions::new()
        .with_strict(args.strict)
        .with_root_orientation(args.root_orientation);
    if args.no_corrections {
        options = options.with_corrections(DirectionCorrections::none());
    }
    let fk = ForwardKinematics::with_options(skeleton, options)
        .context("Failed to prepare bone transforms")?;

    let poses = if args.all {
        let spinner = create_spinner(&format!("Posing {} frame(s)", motion.frame_count()));
        let poses = fk.evaluate_all(&motion);
        spinner.finish_and_clear();
        poses.context("Failed to evaluate motion")?
    } else {
        let number = match args.frame {
            Some(number) => number,
            None => motion
                .frame_range()
                .map(|(first, _)| first)
                .context("Motion has no frames")?,
        };
        let pose = fk
            .evaluate_frame(&motion, number)
            .with_context(|| format!("Failed to evaluate frame {number}"))?;
        std::iter::once((number, pose)).collect()
    };

    if let Some((min, max)) = poses.values().filter_map(Pose::bounds).reduce(|a, b| {
        (a.0.min(b.0), a.1.max(b.1))
    }) {
        log::info!("Bounds: {} to {}", format_vec(min), format_vec(max));
    }

    write_json(
        &MotionExport {
            skeleton: &name,
            frames: poses
                .iter()
                .map(|(frame, segments)| FrameExport {
                    frame: *frame,
                    segments,
                })
                .collect(),
        },
        &args,
    )
}

fn write_json<T: Serialize>(value: &T, args: &PoseArgs) -> Result<()> {
    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
            format!("Failed to create output file: {}", path.display())
        })?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    if args.pretty {
        serde_json::to_writer_pretty(&mut writer, value)
    } else {
        serde_json::to_writer(&mut writer, value)
    }
    .context("Failed to serialize pose")?;
    writeln!(writer)?;
    writer.flush()?;

    if let Some(path) = &args.output {
        println!("✓ Wrote pose to {}", style(path.display()).cyan());
    }
    Ok(())
}
