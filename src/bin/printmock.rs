use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

use printmock::{
    ArtworkTransform, BlendSource, BlendSpec, BlendTier, CpuCompositor, GarmentCatalog,
    MockupAssetStore, MockupParams, PlacementPolicy, PreparedImage, describe_mockup,
    render_mockup_with_report,
};

#[derive(Parser, Debug)]
#[command(name = "printmock", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Composite artwork onto a garment photo and write a PNG.
    Compose(ComposeArgs),
    /// Print the compositing decisions for a selection as JSON.
    Inspect(InspectArgs),
    /// List catalog products and their offered options as JSON.
    Catalog(CatalogArgs),
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Garment photo to composite on (direct mode).
    #[arg(long)]
    garment: Option<PathBuf>,

    /// Garment catalog JSON (catalog mode, with --product).
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Product id inside the catalog.
    #[arg(long)]
    product: Option<String>,

    /// Variant color name.
    #[arg(long)]
    color: Option<String>,

    /// Variant size label.
    #[arg(long)]
    size: Option<String>,

    /// Artwork image (PNG, JPEG, WebP, or SVG).
    #[arg(long)]
    artwork: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Artwork scale multiplier.
    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    /// Artwork center X in canvas percent (anchored policy only).
    #[arg(long, default_value_t = 50.0)]
    x: f64,

    /// Artwork center Y in canvas percent (anchored policy only).
    #[arg(long, default_value_t = 50.0)]
    y: f64,

    /// Placement policy.
    #[arg(long, value_enum, default_value_t = PolicyChoice::AutoFit)]
    policy: PolicyChoice,

    /// Automatic blend tier source.
    #[arg(long, value_enum, default_value_t = SourceChoice::Sampled)]
    blend_source: SourceChoice,

    /// Pin the blend tier instead of classifying.
    #[arg(long, value_enum)]
    blend: Option<TierChoice>,

    /// Invert artwork colors before blending.
    #[arg(long)]
    invert: bool,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Garment photo to inspect (direct mode).
    #[arg(long)]
    garment: Option<PathBuf>,

    /// Garment catalog JSON (catalog mode, with --product).
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Product id inside the catalog.
    #[arg(long)]
    product: Option<String>,

    /// Variant color name.
    #[arg(long)]
    color: Option<String>,

    /// Variant size label.
    #[arg(long)]
    size: Option<String>,

    /// Optional artwork image; without it the report covers garment
    /// passes only.
    #[arg(long)]
    artwork: Option<PathBuf>,

    /// Artwork scale multiplier.
    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    /// Artwork center X in canvas percent (anchored policy only).
    #[arg(long, default_value_t = 50.0)]
    x: f64,

    /// Artwork center Y in canvas percent (anchored policy only).
    #[arg(long, default_value_t = 50.0)]
    y: f64,

    /// Placement policy.
    #[arg(long, value_enum, default_value_t = PolicyChoice::AutoFit)]
    policy: PolicyChoice,

    /// Automatic blend tier source.
    #[arg(long, value_enum, default_value_t = SourceChoice::Sampled)]
    blend_source: SourceChoice,

    /// Pin the blend tier instead of classifying.
    #[arg(long, value_enum)]
    blend: Option<TierChoice>,

    /// Invert artwork colors before blending.
    #[arg(long)]
    invert: bool,
}

#[derive(Parser, Debug)]
struct CatalogArgs {
    /// Garment catalog JSON.
    #[arg(long)]
    catalog: PathBuf,

    /// Show one product's options instead of the whole list.
    #[arg(long)]
    product: Option<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PolicyChoice {
    AutoFit,
    Anchored,
}

impl From<PolicyChoice> for PlacementPolicy {
    fn from(choice: PolicyChoice) -> Self {
        match choice {
            PolicyChoice::AutoFit => PlacementPolicy::AutoFit,
            PolicyChoice::Anchored => PlacementPolicy::Anchored,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SourceChoice {
    Sampled,
    ColorName,
}

impl From<SourceChoice> for BlendSource {
    fn from(choice: SourceChoice) -> Self {
        match choice {
            SourceChoice::Sampled => BlendSource::Sampled,
            SourceChoice::ColorName => BlendSource::ColorName,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TierChoice {
    Light,
    Mid,
    Dark,
}

impl From<TierChoice> for BlendTier {
    fn from(choice: TierChoice) -> Self {
        match choice {
            TierChoice::Light => BlendTier::Light,
            TierChoice::Mid => BlendTier::Mid,
            TierChoice::Dark => BlendTier::Dark,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Compose(args) => cmd_compose(args),
        Command::Inspect(args) => cmd_inspect(args),
        Command::Catalog(args) => cmd_catalog(args),
    }
}

/// Split a filesystem path into a store root and a store-relative source.
fn split_store_path(path: &Path) -> anyhow::Result<(PathBuf, String)> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("path '{}' has no usable file name", path.display()))?
        .to_string();
    let root = path.parent().unwrap_or_else(|| Path::new(".")).to_path_buf();
    Ok((root, name))
}

fn read_catalog(path: &Path) -> anyhow::Result<GarmentCatalog> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("read catalog '{}'", path.display()))?;
    Ok(GarmentCatalog::from_json_slice(&bytes)?)
}

fn prepare_at(path: &Path) -> anyhow::Result<PreparedImage> {
    let (root, name) = split_store_path(path)?;
    let mut store = MockupAssetStore::new(root);
    let id = store.prepare(&name)?;
    Ok(store.get(id)?.clone())
}

/// Resolve the garment photo plus the color name feeding the blend
/// decision, from either a direct path or a catalog selection.
fn resolve_garment(
    garment: &Option<PathBuf>,
    catalog: &Option<PathBuf>,
    product: &Option<String>,
    color: &Option<String>,
    size: &Option<String>,
) -> anyhow::Result<PreparedImage> {
    match (garment, catalog) {
        (Some(_), Some(_)) => anyhow::bail!("pass either --garment or --catalog, not both"),
        (None, None) => anyhow::bail!("pass --garment, or --catalog with --product"),
        (Some(path), None) => prepare_at(path),
        (None, Some(path)) => {
            let cat = read_catalog(path)?;
            let id = product
                .as_deref()
                .context("--product is required with --catalog")?;
            let product = cat.product(id)?;
            if let Some(c) = color
                && !product.color_options().contains(&c.as_str())
            {
                anyhow::bail!("color '{c}' is not offered by product '{id}'");
            }
            if let Some(s) = size
                && !product.size_options().contains(&s.as_str())
            {
                anyhow::bail!("size '{s}' is not offered by product '{id}'");
            }
            let source = product
                .garment_image(color.as_deref(), size.as_deref())
                .with_context(|| format!("product '{id}' has no photo for this selection"))?
                .to_string();

            let root = path.parent().unwrap_or_else(|| Path::new("."));
            let mut store = MockupAssetStore::new(root);
            let asset = store.prepare(&source)?;
            Ok(store.get(asset)?.clone())
        }
    }
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let garment = resolve_garment(
        &args.garment,
        &args.catalog,
        &args.product,
        &args.color,
        &args.size,
    )?;
    let artwork = prepare_at(&args.artwork)?;

    let params = MockupParams {
        transform: ArtworkTransform {
            scale: args.scale,
            x_percent: args.x,
            y_percent: args.y,
            invert: args.invert,
        },
        policy: args.policy.into(),
        blend: BlendSpec {
            source: args.blend_source.into(),
            manual: args.blend.map(Into::into),
        },
        color_name: args.color.clone(),
    };

    let mut backend = CpuCompositor::new();
    let (frame, report) =
        render_mockup_with_report(&mut backend, &garment, Some(&artwork), &params)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &frame.to_straight_rgba8(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({}x{}, {:?} tier via {:?})",
        args.out.display(),
        frame.width,
        frame.height,
        report.tier,
        report.tier_source
    );
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let garment = resolve_garment(
        &args.garment,
        &args.catalog,
        &args.product,
        &args.color,
        &args.size,
    )?;
    let artwork = match &args.artwork {
        Some(path) => Some(prepare_at(path)?),
        None => None,
    };

    let params = MockupParams {
        transform: ArtworkTransform {
            scale: args.scale,
            x_percent: args.x,
            y_percent: args.y,
            invert: args.invert,
        },
        policy: args.policy.into(),
        blend: BlendSpec {
            source: args.blend_source.into(),
            manual: args.blend.map(Into::into),
        },
        color_name: args.color.clone(),
    };

    let report = describe_mockup(&garment, artwork.as_ref(), &params);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn cmd_catalog(args: CatalogArgs) -> anyhow::Result<()> {
    let cat = read_catalog(&args.catalog)?;

    let listing = match &args.product {
        Some(id) => {
            let product = cat.product(id)?;
            serde_json::json!({
                "id": product.id,
                "title": product.title,
                "description": product.description,
                "image": product.image,
                "colors": product.color_options(),
                "sizes": product.size_options(),
                "variants": product.variants.len(),
            })
        }
        None => serde_json::Value::Array(
            cat.products
                .iter()
                .map(|p| {
                    serde_json::json!({
                        "id": p.id,
                        "title": p.title,
                        "colors": p.color_options(),
                        "sizes": p.size_options(),
                    })
                })
                .collect(),
        ),
    };

    println!("{}", serde_json::to_string_pretty(&listing)?);
    Ok(())
}
