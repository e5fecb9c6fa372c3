use std::io::{Read, Write};

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use crate::credentials::{derive_credentials, PasswordSeed, Slug};
use crate::generator::batch::read_rows;
use crate::generator::report::{write_report, LinkReport};
use crate::generator::{Delivery, PageDetails, PasswordSource};
use crate::links::LinkTargets;

/// Companies listed by `verify`, for comparing against the backend.
pub const VERIFY_COMPANIES: &[&str] = &[
    "IKEA AB",
    "Café Södermalm",
    "Alfa Rekrytering AB",
    "Mitt Företag",
    "Stockholms HB",
];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub created: usize,
    pub previewed: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Derives slug and password for one company and, unless dry-running, creates
/// the page.
async fn process_company(
    company: &str,
    details: PageDetails,
    expires_in_days: Option<u32>,
    passwords: &PasswordSource,
    links: &LinkTargets,
    delivery: Delivery<'_>,
) -> Result<LinkReport> {
    let slug = Slug::from_company_name(company)?;
    let password = passwords.password_for(&slug);

    match delivery {
        Delivery::DryRun => Ok(LinkReport::preview(company, &slug, password, links)),
        Delivery::Create(api) => {
            let request = details.into_request(company, password, expires_in_days);
            let page = api.create_page(&request).await?;
            info!(company, slug = %page.slug, "Page created");
            Ok(LinkReport::created(company, page, links))
        }
    }
}

/// `generate`: one company, error if anything fails.
pub async fn run_generate<W: Write>(
    out: &mut W,
    company: &str,
    details: PageDetails,
    expires_in_days: Option<u32>,
    passwords: &PasswordSource,
    links: &LinkTargets,
    delivery: Delivery<'_>,
) -> Result<LinkReport> {
    let report =
        process_company(company, details, expires_in_days, passwords, links, delivery).await?;
    write_report(out, &report)?;
    Ok(report)
}

/// `batch`: every CSV row in order. A failing row is logged and counted; the
/// rest of the file is still processed.
pub async fn run_batch<R: Read, W: Write>(
    input: R,
    out: &mut W,
    expires_in_days: Option<u32>,
    passwords: &PasswordSource,
    links: &LinkTargets,
    delivery: Delivery<'_>,
) -> Result<BatchSummary> {
    let input = read_rows(input)?;
    let mut summary = BatchSummary {
        skipped: input.skipped,
        ..Default::default()
    };

    info!(rows = input.rows.len(), skipped = input.skipped, "Processing batch");

    for row in input.rows {
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                error!(line = e.line, "{e}");
                summary.failed += 1;
                continue;
            }
        };

        let result = process_company(
            &row.company_name,
            row.details,
            expires_in_days,
            passwords,
            links,
            delivery,
        )
        .await;

        match result {
            Ok(report) => {
                write_report(out, &report)?;
                match delivery {
                    Delivery::DryRun => summary.previewed += 1,
                    Delivery::Create(_) => summary.created += 1,
                }
            }
            Err(e) => {
                error!(line = row.line, "ERROR for {}: {e:#}", row.company_name);
                summary.failed += 1;
            }
        }
    }

    if summary.failed > 0 {
        warn!(
            "Batch finished with {} failed row(s): created={} previewed={} skipped={}",
            summary.failed, summary.created, summary.previewed, summary.skipped
        );
    } else {
        info!(
            "Batch finished: created={} previewed={} skipped={}",
            summary.created, summary.previewed, summary.skipped
        );
    }

    Ok(summary)
}

/// `verify`: deterministic passwords for [`VERIFY_COMPANIES`].
pub fn run_verify<W: Write>(
    out: &mut W,
    seed: &PasswordSeed,
    links: &LinkTargets,
    fixed_password_set: bool,
) -> Result<()> {
    if fixed_password_set {
        writeln!(
            out,
            "  NOTE: PW is set; verification uses the deterministic seed instead.\n"
        )?;
    }
    writeln!(out, "\n  PASSWORD VERIFICATION")?;
    writeln!(out, "  {}", "=".repeat(55))?;
    if seed.is_insecure_test_seed() {
        writeln!(out, "  Seed: {} (insecure test seed)", seed.masked())?;
    } else {
        writeln!(out, "  Seed: {}", seed.masked())?;
    }

    for company in VERIFY_COMPANIES {
        let credentials = derive_credentials(company, seed)
            .with_context(|| format!("verification company '{company}'"))?;
        let report = LinkReport::preview(company, &credentials.slug, credentials.password, links);
        write_report(out, &report)?;
    }

    writeln!(
        out,
        "  Compare these with the backend's generatePassword output for the same seed.\n"
    )?;
    Ok(())
}
