//! Line-by-line prompt: type a company name (or a ready slug), get the links.

use std::io::Write;

use anyhow::{bail, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::credentials::{looks_like_slug, slug_to_display, CredentialError, PasswordSeed, Slug};
use crate::generator::report::{write_inline_report, LinkReport};
use crate::generator::PasswordSource;
use crate::links::LinkTargets;

/// Runs until `input` hits EOF. With `passwords == None` the seed is asked for
/// first. Returns the number of answered entries.
pub async fn run_interactive<R, W>(
    input: R,
    out: &mut W,
    passwords: Option<PasswordSource>,
    links: &LinkTargets,
) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    let passwords = match passwords {
        Some(passwords) => passwords,
        None => {
            write!(out, "  KOSTNADSFRI_PASSWORD_SEED not set.\n  Enter seed: ")?;
            out.flush()?;
            let entered = lines.next_line().await?.unwrap_or_default();
            match PasswordSeed::new(entered.trim()) {
                Ok(seed) => PasswordSource::Derived(seed),
                Err(_) => bail!("No seed provided"),
            }
        }
    };

    writeln!(out, "\n  INTERACTIVE MODE (Ctrl+C or Ctrl+D to exit)")?;
    writeln!(out, "  {}", "-".repeat(40))?;
    writeln!(out, "  {}", passwords.describe())?;
    writeln!(out, "  Type a company name or slug to get the password.\n")?;

    let mut answered = 0;
    loop {
        write!(out, "  Company name or slug: ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let entry = line.trim();
        if entry.is_empty() {
            continue;
        }

        match resolve_entry(entry) {
            Ok((display_name, slug)) => {
                let password = passwords.password_for(&slug);
                let report = LinkReport::preview(&display_name, &slug, password, links);
                write_inline_report(out, &report)?;
                answered += 1;
            }
            Err(e) => writeln!(out, "    Error: {e}\n")?,
        }
    }

    writeln!(out, "\n  Done.\n")?;
    Ok(answered)
}

/// Ready slugs are used as-is and get a display name reconstructed; anything
/// else is treated as a company name.
fn resolve_entry(entry: &str) -> Result<(String, Slug), CredentialError> {
    if looks_like_slug(entry) {
        if let Ok(slug) = Slug::parse(entry) {
            return Ok((slug_to_display(slug.as_str()), slug));
        }
    }
    Slug::from_company_name(entry).map(|slug| (entry.to_string(), slug))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links() -> LinkTargets {
        LinkTargets::new("https://sajtmaskin.test", "https://studio.test")
    }

    fn seeded() -> Option<PasswordSource> {
        Some(PasswordSource::Derived(
            PasswordSeed::new("test-seed-123").unwrap(),
        ))
    }

    #[test]
    fn test_resolve_entry() {
        let (display, slug) = resolve_entry("ikea-ab").unwrap();
        assert_eq!(display, "Ikea AB");
        assert_eq!(slug.as_str(), "ikea-ab");

        let (display, slug) = resolve_entry("Café Södermalm").unwrap();
        assert_eq!(display, "Café Södermalm");
        assert_eq!(slug.as_str(), "cafe-sodermalm");

        // Lowercase but not a valid slug: falls back to name normalisation.
        let (_, slug) = resolve_entry("café").unwrap();
        assert_eq!(slug.as_str(), "cafe");

        assert!(resolve_entry("***").is_err());
    }

    #[tokio::test]
    async fn test_names_and_slugs_until_eof() {
        let input = "IKEA AB\n\n   \nikea-ab\n???\ncafe-sodermalm\n";
        let mut out = Vec::new();

        let answered = run_interactive(input.as_bytes(), &mut out, seeded(), &links())
            .await
            .unwrap();

        assert_eq!(answered, 3);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Seed: test-see..."));
        assert!(text.contains("    Company:  IKEA AB\n"));
        assert!(text.contains("    Company:  Ikea AB\n"));
        assert_eq!(text.matches("Password: zxeDPvUb").count(), 2);
        assert!(text.contains("Password: G7R4qxSN"));
        assert!(text.contains("Error: Company name '???' does not produce a usable slug"));
        assert!(text.trim_end().ends_with("Done."));
    }

    #[tokio::test]
    async fn test_prompts_for_seed_when_missing() {
        let input = "test-seed-123\nIKEA AB\n";
        let mut out = Vec::new();

        let answered = run_interactive(input.as_bytes(), &mut out, None, &links())
            .await
            .unwrap();

        assert_eq!(answered, 1);
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("  KOSTNADSFRI_PASSWORD_SEED not set."));
        assert!(text.contains("Password: zxeDPvUb"));
    }

    #[tokio::test]
    async fn test_blank_seed_aborts() {
        let mut out = Vec::new();
        let result = run_interactive("\nIKEA AB\n".as_bytes(), &mut out, None, &links()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_fixed_password_banner() {
        let mut out = Vec::new();
        run_interactive(
            "ikea-ab\n".as_bytes(),
            &mut out,
            Some(PasswordSource::Fixed("hemligt".to_string())),
            &links(),
        )
        .await
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Fixed password: PW (env)"));
        assert!(text.contains("Password: hemligt"));
        assert!(!text.contains("Seed:"));
    }
}
