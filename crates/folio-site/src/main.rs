//! folio - replay clicks against a fresh site session
//!
//! ```text
//! folio [--config FILE] HREF...
//! folio "/portfolio#projects" "#skills" "#/mentions-legales"
//! ```

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use folio_nav::{run_poll, CancelToken, PollOutcome};
use folio_site::{Site, SiteConfig};

/// Frame interval of the replay loop
const FRAME: Duration = Duration::from_millis(16);

const USAGE: &str = "usage: folio [--config FILE] HREF...";

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    hrefs: Vec<String>,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Option<Self>> {
        let mut parsed = Args::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => return Ok(None),
                "-c" | "--config" => {
                    let path = args.next().context("--config needs a file path")?;
                    parsed.config = Some(PathBuf::from(path));
                }
                flag if flag.starts_with("--") => bail!("unknown option {flag}\n{USAGE}"),
                href => parsed.hrefs.push(href.to_string()),
            }
        }
        Ok(Some(parsed))
    }
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Some(args) = Args::parse(std::env::args().skip(1))? else {
        println!("{USAGE}");
        return Ok(());
    };

    let config = match &args.config {
        Some(path) => SiteConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => SiteConfig::default(),
    };
    let budget = config.settle_budget();

    let mut site = Site::new(config)?;
    log::info!("Starting Folio session at {}", site.url());

    for href in &args.hrefs {
        let handled = site.click(href, Instant::now());
        if !handled.prevent_default {
            log::info!("{} is external, left to the browser", href);
            continue;
        }

        let outcome = smol::block_on(run_poll(FRAME, budget, CancelToken::never(), |_| {
            match site.advance(Instant::now()) {
                Ok(_) => site.is_idle().then_some(Ok(())),
                Err(err) => Some(Err(err)),
            }
        }));

        match outcome {
            PollOutcome::Found { value, attempts } => {
                value?;
                log::debug!("{} settled after {} frames", href, attempts);
            }
            PollOutcome::TimedOut { attempts } => {
                log::warn!("{} still busy after {} frames", href, attempts);
            }
            PollOutcome::Cancelled { .. } => {}
        }
    }

    site.teardown(Instant::now());
    println!("{} scroll_y={:.0}", site.url(), site.scroll_y());
    Ok(())
}
