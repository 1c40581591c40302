use std::path::PathBuf;
use std::str::FromStr;

use tracing::{info, Level};
use vision_image_properties::{
    AppError, ChannelOrder, Configuration, Frame, ImagePropertiesFactory, TaskFactory,
};

const USAGE: &str =
    "Usage: vision-image-properties <image> [--out strip.png] [--config vision.toml] [--bgr]";

struct Args {
    image: PathBuf,
    out: PathBuf,
    config: Option<PathBuf>,
    channel_order: ChannelOrder,
}

fn parse_args() -> Option<Args> {
    let mut args = std::env::args().skip(1);
    let mut image = None;
    let mut out = PathBuf::from("color_strip.png");
    let mut config = None;
    let mut channel_order = ChannelOrder::Rgb;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--out" => out = PathBuf::from(args.next()?),
            "--config" => config = Some(PathBuf::from(args.next()?)),
            "--bgr" => channel_order = ChannelOrder::Bgr,
            "--help" | "-h" => return None,
            _ if image.is_none() => image = Some(PathBuf::from(arg)),
            _ => return None,
        }
    }

    Some(Args {
        image: image?,
        out,
        config,
        channel_order,
    })
}

fn init_logging(level: &str) {
    let level = Level::from_str(level).unwrap_or(Level::INFO);
    tracing_subscriber::fmt().with_max_level(level).init();
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let Some(args) = parse_args() else {
        eprintln!("{}", USAGE);
        std::process::exit(2);
    };

    let configuration = Configuration::load(args.config.as_deref())?;
    init_logging(&configuration.log_level);

    let factory = ImagePropertiesFactory::new(configuration);
    let task = factory.create(None)?;
    info!("Created {} ({})", task.name(), factory.info().version);

    let image = image::open(&args.image)?;
    let output = task.run(Frame::new(image, args.channel_order)).await?;

    output.strip.save(&args.out)?;
    info!("Wrote color strip to {}", args.out.display());

    for (key, value) in &output.data {
        println!("{}:\n{}", key, value);
    }
    if let Some((_, object)) = &output.detection {
        println!(
            "{} ({:.2}) at x={} y={} w={} h={}",
            object.label,
            object.confidence,
            object.bbox.x,
            object.bbox.y,
            object.bbox.width,
            object.bbox.height
        );
    }
    Ok(())
}
