use anyhow::{Context, Result};
use clap::Parser;
use pdf_stamp::{BatchOptions, PlacementSet, SignatureOptions, SignaturePosition};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "pdfstamp",
    about = "Stamp initials on each PDF page (bottom-right), with an optional signature",
    version
)]
struct Cli {
    /// Input PDF file
    input_pdf: PathBuf,

    /// Output PDF file
    output_pdf: PathBuf,

    /// Initials image, stamped on every page
    #[arg(long)]
    initials: PathBuf,

    /// Full signature image
    #[arg(long)]
    signature: Option<PathBuf>,

    /// Page for the signature (0-based, default: last page)
    #[arg(long)]
    sig_page: Option<usize>,

    /// Page for the signature (1-based); overrides --sig-page
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    onpage: Option<u32>,

    /// Signature left edge in points
    #[arg(long)]
    sig_x: Option<f32>,

    /// Signature top edge in points
    #[arg(long)]
    sig_y: Option<f32>,

    /// Signature position as XxY in points, e.g. 548x300; overrides --sig-x/--sig-y
    #[arg(long)]
    fullsig: Option<String>,

    /// Initials width in points
    #[arg(long, default_value = "72")]
    initials_width: f32,

    /// Distance of the initials from the page edges in points
    #[arg(long, default_value = "12")]
    initials_margin: f32,

    /// Signature width in points
    #[arg(long, default_value = "180")]
    signature_width: f32,

    /// Placement layout saved from the GUI, applied after the initials and signature
    #[arg(long)]
    layout: Option<PathBuf>,
}

/// Why the arguments cannot be used, with the exit code to report
#[derive(Debug, PartialEq)]
enum UsageError {
    MissingInput,
    MissingSignature,
    MissingLayout,
    InvalidFullsig,
}

impl UsageError {
    fn message(&self) -> &'static str {
        match self {
            UsageError::MissingInput => "Input PDF or initials PNG not found.",
            UsageError::MissingSignature => "Signature PNG not found.",
            UsageError::MissingLayout => "Layout file not found.",
            UsageError::InvalidFullsig => "Invalid --fullsig. Use XxY, e.g. 548x300",
        }
    }

    fn exit_code(&self) -> u8 {
        match self {
            UsageError::InvalidFullsig => 2,
            _ => 1,
        }
    }
}

impl Cli {
    /// Make sure every file the run reads exists.
    fn check_files(&self) -> Result<(), UsageError> {
        if !self.input_pdf.is_file() || !self.initials.is_file() {
            return Err(UsageError::MissingInput);
        }
        if self.signature.as_deref().is_some_and(|p| !p.is_file()) {
            return Err(UsageError::MissingSignature);
        }
        if self.layout.as_deref().is_some_and(|p| !p.is_file()) {
            return Err(UsageError::MissingLayout);
        }
        Ok(())
    }

    /// Signature corner from --fullsig, or from --sig-x and --sig-y when both are given
    fn signature_position(&self) -> Result<Option<SignaturePosition>, UsageError> {
        if let Some(fullsig) = &self.fullsig {
            return fullsig
                .parse()
                .map(Some)
                .map_err(|_| UsageError::InvalidFullsig);
        }
        Ok(match (self.sig_x, self.sig_y) {
            (Some(x), Some(y)) => Some(SignaturePosition { x, y }),
            _ => None,
        })
    }

    /// 0-based signature page; `None` means the last page
    fn signature_page(&self) -> Option<usize> {
        match self.onpage {
            Some(page) => Some(page as usize - 1),
            None => self.sig_page,
        }
    }

    fn batch_options(&self) -> Result<BatchOptions, UsageError> {
        let position = self.signature_position()?;

        let signature = self.signature.as_ref().map(|image| SignatureOptions {
            page: self.signature_page(),
            position,
            width_pt: self.signature_width,
            ..SignatureOptions::new(image)
        });

        Ok(BatchOptions {
            initials: self.initials.clone(),
            initials_width_pt: self.initials_width,
            initials_margin_pt: self.initials_margin,
            signature,
        })
    }
}

async fn run(cli: &Cli, options: &BatchOptions) -> Result<()> {
    let layout = match &cli.layout {
        Some(path) => Some(
            PlacementSet::load(path)
                .await
                .with_context(|| format!("Failed to read layout {}", path.display()))?,
        ),
        None => None,
    };

    let doc = pdf_stamp::load_pdf(&cli.input_pdf)
        .await
        .with_context(|| format!("Failed to open {}", cli.input_pdf.display()))?;
    let (doc, report) = pdf_stamp::stamp(doc, Some(options), layout.as_ref()).await?;
    pdf_stamp::save_pdf(doc, &cli.output_pdf).await?;

    for path in &report.skipped {
        eprintln!("Skipped unreadable image {}", display_name(path));
    }
    println!(
        "Stamped {} images on {} pages → {}",
        report.stamps_placed,
        report.pages_stamped,
        cli.output_pdf.display()
    );
    Ok(())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();

    let options = match cli.check_files().and_then(|_| cli.batch_options()) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{}", e.message());
            return Ok(ExitCode::from(e.exit_code()));
        }
    };

    log::debug!("Batch options: {:?}", options);
    run(&cli, &options).await?;
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["pdfstamp", "in.pdf", "out.pdf", "--initials", "ini.png"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&[]);
        let options = cli.batch_options().unwrap();
        assert_eq!(options, BatchOptions::new("ini.png"));
        assert!(cli.layout.is_none());
    }

    #[test]
    fn test_initials_required() {
        assert!(Cli::try_parse_from(["pdfstamp", "in.pdf", "out.pdf"]).is_err());
    }

    #[test]
    fn test_fullsig_overrides_coordinates() {
        let cli = parse(&[
            "--signature", "sig.png", "--sig-x", "1", "--sig-y", "2", "--fullsig", "548X300",
        ]);
        let sig = cli.batch_options().unwrap().signature.unwrap();
        assert_eq!(sig.position, Some(SignaturePosition { x: 548.0, y: 300.0 }));
    }

    #[test]
    fn test_invalid_fullsig() {
        for bad in ["548", "x300", "1x2x3", "ax3"] {
            let cli = parse(&["--signature", "sig.png", "--fullsig", bad]);
            let err = cli.batch_options().unwrap_err();
            assert_eq!(err, UsageError::InvalidFullsig);
            assert_eq!(err.exit_code(), 2);
        }
    }

    #[test]
    fn test_partial_coordinates_skip_signature() {
        let cli = parse(&["--signature", "sig.png", "--sig-x", "100"]);
        let sig = cli.batch_options().unwrap().signature.unwrap();
        assert_eq!(sig.position, None);
    }

    #[test]
    fn test_onpage_is_one_based_and_wins() {
        let cli = parse(&["--signature", "sig.png", "--sig-page", "4", "--onpage", "2"]);
        assert_eq!(cli.signature_page(), Some(1));

        let cli = parse(&["--signature", "sig.png", "--sig-page", "4"]);
        assert_eq!(cli.signature_page(), Some(4));

        let cli = parse(&["--signature", "sig.png"]);
        assert_eq!(cli.signature_page(), None);
    }

    #[test]
    fn test_onpage_zero_rejected() {
        let argv = ["pdfstamp", "in.pdf", "out.pdf", "--initials", "i.png", "--onpage", "0"];
        assert!(Cli::try_parse_from(argv).is_err());
    }

    #[test]
    fn test_sizes() {
        let cli = parse(&[
            "--initials-width", "50", "--initials-margin", "6", "--signature", "s.png",
            "--signature-width", "200",
        ]);
        let options = cli.batch_options().unwrap();
        assert_eq!(options.initials_width_pt, 50.0);
        assert_eq!(options.initials_margin_pt, 6.0);
        assert_eq!(options.signature.unwrap().width_pt, 200.0);
    }

    #[test]
    fn test_infinite_sizes_fail_validation() {
        for args in [
            ["--initials-width", "inf"],
            ["--initials-margin", "inf"],
            ["--sig-x", "inf"],
        ] {
            let mut argv = vec!["--signature", "s.png", "--sig-y", "10"];
            argv.extend_from_slice(&args);
            if args[0] != "--sig-x" {
                argv.extend_from_slice(&["--sig-x", "10"]);
            }
            let options = parse(&argv).batch_options().unwrap();
            assert!(options.validate().is_err(), "{:?} should be rejected", args);
        }
    }

    #[test]
    fn test_missing_files() {
        let cli = parse(&[]);
        assert_eq!(cli.check_files(), Err(UsageError::MissingInput));
        assert_eq!(cli.check_files().unwrap_err().exit_code(), 1);
    }
}
