//! CLI binary for resumeflow.
//!
//! A thin shim over the library crate that maps CLI flags to the intake
//! state, runs the generate-and-download flow, and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use resumeflow::{
    warm_up, ArtifactDownloader, DocumentSource, DownloadKind, Generator, HttpBackend,
    HttpFetcher, IntakeState, TailorConfig, UploadOrigin, UploadedFile, BACKEND_URL_ENV,
};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const SAMPLE_JOB_DESC: &str = r#"We are looking for a Senior Full Stack Developer to join our dynamic engineering team. The ideal candidate will have 5+ years of experience in modern web development technologies.

Key Responsibilities:
• Develop and maintain scalable web applications using React and Node.js
• Collaborate with cross-functional teams to deliver high-quality software solutions
• Write clean, maintainable, and well-documented code
• Participate in code reviews and technical discussions
• Mentor junior developers and contribute to team knowledge sharing

Required Qualifications:
• Bachelor's degree in Computer Science or related field
• 5+ years of experience with JavaScript, React, and Node.js
• Strong understanding of RESTful APIs and database design
• Experience with cloud platforms (AWS, Azure, or GCP)
• Excellent problem-solving and communication skills

Preferred Qualifications:
• Experience with TypeScript and modern JavaScript frameworks
• Knowledge of containerization technologies (Docker, Kubernetes)
• Understanding of CI/CD pipelines and DevOps practices
• Experience with microservices architecture

We offer competitive salary, comprehensive benefits, remote work flexibility, and opportunities for professional growth in a collaborative environment."#;

const AFTER_HELP: &str = r#"EXAMPLES:
  # Tailor a resume against a job posting and download both documents
  resumeflow resume.pdf --job-desc-file posting.txt --name "John Smith" \
      --email john@example.com --phone "555-123-4567"

  # Let inference fill the contact fields from the resume text
  resumeflow resume.pdf --job-desc "Senior Rust Engineer ..."

  # Only the tailored resume, into a specific directory
  resumeflow resume.pdf --job-desc-file posting.txt --download resume -o out/

  # Inspect what the extractor and inference see, no backend needed
  resumeflow resume.pdf --extract-only

  # Try the flow with a built-in sample posting
  resumeflow resume.pdf --sample-job-desc

ENVIRONMENT VARIABLES:
  RESUMEFLOW_BACKEND_URL  Base URL of the generation backend
"#;

/// Tailor a resume and cover letter to a job posting.
#[derive(Parser, Debug)]
#[command(
    name = "resumeflow",
    version,
    about = "Tailor a resume and cover letter to a job posting",
    long_about = "Extract the text layer from a resume PDF, combine it with a job description \
and contact details, send everything to the generation backend, and save the tailored \
resume and cover letter PDFs.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Path to the resume PDF.
    resume: PathBuf,

    /// Job description text.
    #[arg(long, conflicts_with_all = ["job_desc_file", "sample_job_desc"])]
    job_desc: Option<String>,

    /// Read the job description from this file.
    #[arg(long, conflicts_with = "sample_job_desc")]
    job_desc_file: Option<PathBuf>,

    /// Use a built-in sample job description.
    #[arg(long)]
    sample_job_desc: bool,

    /// Full name. Inferred from the resume text when omitted.
    #[arg(long)]
    name: Option<String>,

    /// Email address. Inferred from the resume text when omitted.
    #[arg(long)]
    email: Option<String>,

    /// Phone number. Inferred from the resume text when omitted.
    #[arg(long)]
    phone: Option<String>,

    /// Base URL of the generation backend.
    #[arg(long, env = BACKEND_URL_ENV)]
    backend_url: Option<String>,

    /// Directory the tailored documents are saved into.
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Which document(s) to download: resume, cover-letter, or both.
    #[arg(long, default_value = "both")]
    download: String,

    /// Generation request timeout in seconds.
    #[arg(long, default_value_t = 120)]
    api_timeout: u64,

    /// Print the extracted text and inferred contact fields, then exit.
    #[arg(long)]
    extract_only: bool,

    /// Skip the backend warm-up probe.
    #[arg(long)]
    no_warmup: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Config ───────────────────────────────────────────────────────────
    let mut builder = TailorConfig::builder().api_timeout_secs(cli.api_timeout);
    if let Some(ref url) = cli.backend_url {
        builder = builder.backend_base_url(url.clone());
    }
    let config = builder.build().context("Invalid configuration")?;

    // Wake a backend that idles out on free-tier hosting. Fire and forget;
    // the generation request below does not wait for it.
    if !cli.no_warmup && !cli.extract_only {
        let warmup_config = config.clone();
        tokio::spawn(async move { warm_up(&warmup_config).await });
    }

    // ── Extract ──────────────────────────────────────────────────────────
    let bytes = tokio::fs::read(&cli.resume)
        .await
        .with_context(|| format!("Failed to read {}", cli.resume.display()))?;
    let file_name = cli
        .resume
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| cli.resume.display().to_string());

    let source = DocumentSource::default();
    let document = source
        .extract(UploadedFile {
            file_name,
            media_type: "application/pdf".to_string(),
            bytes,
            origin: UploadOrigin::Picker,
        })
        .await
        .context("Text extraction failed")?;

    if !cli.quiet {
        eprintln!(
            "{} Extracted {} page(s) from {}",
            green("✔"),
            document.page_count,
            bold(&document.file_name),
        );
    }

    // ── Intake ───────────────────────────────────────────────────────────
    let mut state = IntakeState::new();
    if let Some(name) = cli.name {
        state.set_full_name(name);
    }
    if let Some(email) = cli.email {
        state.set_email(email);
    }
    if let Some(phone) = cli.phone {
        state.set_phone(phone);
    }

    let report = state.ingest_document(document.text, document.file_name);
    if !cli.quiet && !report.inferred.is_empty() {
        let fields: Vec<&str> = report.inferred.iter().map(|f| f.as_str()).collect();
        eprintln!("  {} inferred: {}", dim("•"), fields.join(", "));
    }

    if cli.extract_only {
        let resume = state
            .resume()
            .context("No resume text after extraction")?;
        println!("{}", resume.text);
        let contact = state.contact();
        eprintln!("Full name:  {}", contact.full_name);
        eprintln!("Email:      {}", contact.email);
        eprintln!("Phone:      {}", contact.phone);
        return Ok(());
    }

    let job_desc = if cli.sample_job_desc {
        SAMPLE_JOB_DESC.to_string()
    } else if let Some(text) = cli.job_desc {
        text
    } else if let Some(ref path) = cli.job_desc_file {
        tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?
    } else {
        String::new()
    };
    state.set_job_description(job_desc);

    if !cli.quiet && state.has_job_description() {
        eprintln!(
            "  {} job description: {} words",
            dim("•"),
            state.job_description_word_count(),
        );
    }

    // ── Generate ─────────────────────────────────────────────────────────
    let kind: DownloadKind = cli
        .download
        .parse()
        .context("Invalid --download value")?;

    let spinner = if cli.quiet {
        None
    } else {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_prefix("Generating");
        bar.set_message("Tailoring your documents…");
        bar.enable_steady_tick(Duration::from_millis(80));
        Some(bar)
    };

    let generator = Generator::new(HttpBackend::new(&config)?);
    let result = generator.submit(&mut state).await;
    if let Some(ref bar) = spinner {
        bar.finish_and_clear();
    }
    let documents = result.context("Generation failed")?;

    if !cli.quiet {
        eprintln!("{} Documents generated", green("✔"));
    }

    // ── Download ─────────────────────────────────────────────────────────
    let downloader = ArtifactDownloader::new(HttpFetcher::new(&config)?, &cli.out_dir);
    let saved = downloader.download(&documents, kind).await;

    if !cli.quiet {
        for path in &saved {
            eprintln!("{} Saved {}", green("✔"), bold(&path.display().to_string()));
        }
    }

    let expected = match kind {
        DownloadKind::Both => 2,
        _ => 1,
    };
    if saved.len() < expected {
        eprintln!(
            "{} {}/{} document(s) downloaded",
            red("✘"),
            saved.len(),
            expected
        );
        anyhow::bail!("Some downloads failed");
    }

    Ok(())
}
