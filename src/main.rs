use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use datimage_rs::image_pipeline::{Colormap, ConversionConfig, DatToPngPipeline, PostRescale};
use datimage_rs::logger;

use tracing::{error, info};

const USAGE: &str = "usage: datimage_rs <input.DAT> [output.png] \
                     [--dims WxH] [--expr EXPRESSION] [--colormap NAME] [--post METHOD]";

fn parse_dims(value: &str) -> Result<(usize, usize)> {
    let (w, h) = value
        .split_once('x')
        .context("dims must look like 2448x2448")?;
    Ok((w.parse()?, h.parse()?))
}

fn main() -> Result<()> {
    logger::init();

    let mut input: Option<PathBuf> = None;
    let mut output: Option<PathBuf> = None;
    let mut expression: Option<String> = None;
    let mut colormap = "jet".to_string();
    let mut post_method = "bound_to_unitInterval".to_string();
    let mut dims = (2448, 2448);

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--expr" => expression = Some(args.next().context("--expr needs a value")?),
            "--colormap" => colormap = args.next().context("--colormap needs a value")?,
            "--post" => post_method = args.next().context("--post needs a value")?,
            "--dims" => dims = parse_dims(&args.next().context("--dims needs a value")?)?,
            _ if input.is_none() => input = Some(PathBuf::from(&arg)),
            _ if output.is_none() => output = Some(PathBuf::from(&arg)),
            other => bail!("unexpected argument '{other}'\n{USAGE}"),
        }
    }

    let Some(input) = input else {
        bail!("{USAGE}");
    };
    let output = output.unwrap_or_else(|| input.with_extension("png"));

    let config = ConversionConfig::builder().dims(dims.0, dims.1).build();
    let pipeline = DatToPngPipeline::new(config);

    info!("DAT to PNG pipeline initialized");
    info!("Frame: {}x{}", pipeline.config().width, pipeline.config().height);

    match expression {
        Some(expr) => {
            let colormap: Colormap = colormap.parse()?;
            let post_rescale = PostRescale::from_method_name(&post_method);
            info!("Rendering '{}' with {:?} colormap", expr, colormap);

            match pipeline.render_expression_file(&expr, &input, colormap, post_rescale, &output)
            {
                Ok(_) => info!("Wrote {}", output.display()),
                Err(e) => error!("Expression render failed: {}", e),
            }
        }
        None => match pipeline.convert_file(&input, &output) {
            Ok(_) => info!("Wrote {}", output.display()),
            Err(e) => error!("Conversion failed: {}", e),
        },
    }

    Ok(())
}
