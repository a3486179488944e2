//! opencv
//! https://docs.rs/opencv/latest/opencv/all.html
//!
//! 用法: linemark <plan> <video>
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::Parser;

use linemark::annotator::FrameAnnotator;
use linemark::camera_path::CameraPath;
use linemark::config::{DebugVerbosity, ProjectionVariant, RunConfig};
use linemark::matcher::MarkMatcher;
use linemark::plan;
use linemark::projector::GroundProjector;
use linemark::save::{self, ProjectionCsv};
use linemark::video::{
    self, DisplaySinkTrait, HeadlessDisplay, HighGuiWindow, ImageCodecTrait, Imgcodecs,
    OpenCvVideo, VideoSourceTrait,
};

/// 将规划文件中的标线叠加到视频帧上
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// 规划文件，S:/E: 行
    plan: PathBuf,
    /// 视频文件
    video: PathBuf,
    /// JSON 运行配置
    #[arg(long)]
    config: Option<PathBuf>,
    /// 地面投影算法
    #[arg(long, value_enum)]
    variant: Option<ProjectionVariant>,
    /// 保存每一帧 VideoFrame{n}.png
    #[arg(long)]
    snapshot_dir: Option<PathBuf>,
    /// 导出标线点 CSV 后退出
    #[arg(long)]
    marks_csv: Option<PathBuf>,
    /// 导出第一帧的逐像素投影 CSV
    #[arg(long)]
    projection_csv: Option<PathBuf>,
    /// 不打开窗口
    #[arg(long)]
    headless: bool,
    /// -v 每行基线，-vv 每个像素
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let usage_only = matches!(
                e.kind(),
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion
            );
            let _ = e.print();
            if usage_only {
                return;
            }
            eprintln!("Wrong usage, please specify a plan and a video file!");
            std::process::exit(-1);
        }
    };

    let verbosity = DebugVerbosity::from_occurrences(cli.verbose);
    env_logger::builder()
        .filter_level(verbosity.log_level())
        .format_timestamp_nanos()
        .init();

    if let Err(e) = run(cli, verbosity) {
        log::error!("{:#}", e);
        eprintln!("{:#}", e);
        std::process::exit(-1);
    }
}

fn run(cli: Cli, verbosity: DebugVerbosity) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    if let Some(variant) = cli.variant {
        config.projector.variant = variant;
    }
    if cli.snapshot_dir.is_some() {
        config.snapshot_dir = cli.snapshot_dir.clone();
    }
    config.projector.debug = config.projector.debug.max(verbosity);
    if let Some(dir) = &config.snapshot_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("could not create {}", dir.display()))?;
    }
    log::debug!("config: {:?}", config);

    let (_, marks) = plan::load_line_marks(&cli.plan)?;
    if let Some(path) = &cli.marks_csv {
        save::write_line_marks(path, &marks)?;
        return Ok(());
    }

    let mut source = OpenCvVideo::open(&cli.video)?;
    let mut display: Box<dyn DisplaySinkTrait> = if cli.headless {
        Box::new(HeadlessDisplay)
    } else {
        Box::new(HighGuiWindow::new(&config.window_label)?)
    };
    let mut projection_csv = cli
        .projection_csv
        .as_ref()
        .map(ProjectionCsv::create)
        .transpose()?;

    let projector = GroundProjector::new(config.intrinsics, config.projector);
    let annotator = FrameAnnotator::new(&projector, MarkMatcher::new(&marks));
    let camera_path = CameraPath::new(config.camera_path, source.frame_count());
    log::info!("projection: {:?}", projector.variant());

    let mut frame_index = 0u32;
    loop {
        let Some(mut frame) = source.read_next_frame()? else {
            log::info!("All frames read or error reading a frame");
            break;
        };
        let begin = Instant::now();
        let pose = camera_path.pose_at(frame_index);
        log::debug!(
            "frame {}: camera {:.8}/{:.8}",
            frame_index,
            pose.position_latitude,
            pose.position_longitude
        );

        let (height, width) = video::frame_dimensions(&source, &frame);
        let mut csv_result: anyhow::Result<()> = Ok(());
        let annotation = annotator.annotate_with(&pose, height, width, |row, matches| {
            if csv_result.is_ok() {
                if let Some(csv) = projection_csv.as_mut() {
                    csv_result = csv.write_row(row, matches);
                }
            }
        });
        csv_result?;
        if let Some(csv) = projection_csv.take() {
            let records = csv.finish()?;
            log::info!("wrote {} projected pixels of frame {}", records, frame_index);
        }

        let painted = video::paint_matches(&mut frame, &annotation)?;
        frame_index += 1;
        log::debug!(
            "frame {}: {} rows projected, {} pixels marked, {} ms",
            frame_index,
            annotation.projected_rows,
            painted,
            begin.elapsed().as_millis()
        );

        display.show(&frame)?;
        if let Some(dir) = &config.snapshot_dir {
            store_frame(&Imgcodecs, dir, frame_index, &frame)?;
        }
        if display.wait_key(config.wait_key_ms)?.is_some() {
            log::info!("stopped at frame {}", frame_index);
            break;
        }
    }
    Ok(())
}

fn store_frame(
    codec: &impl ImageCodecTrait,
    dir: &Path,
    frame_index: u32,
    frame: &opencv::core::Mat,
) -> anyhow::Result<()> {
    let path = dir.join(format!("VideoFrame{}.png", frame_index));
    codec.write_image(&path, frame)
}
