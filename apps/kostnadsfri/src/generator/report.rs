//! Stdout rendering of generated links. Logs go to stderr; only these blocks
//! go to stdout.

use std::io::{self, Write};

use crate::credentials::Slug;
use crate::links::LinkTargets;
use crate::page_api::CreatedPage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkReport {
    pub company: String,
    pub slug: String,
    pub password: String,
    pub kostnadsfri_url: String,
    pub studio_url: String,
}

impl LinkReport {
    /// Locally computed links (dry run, verify, interactive).
    pub fn preview(company: &str, slug: &Slug, password: String, links: &LinkTargets) -> Self {
        Self {
            company: company.to_string(),
            slug: slug.to_string(),
            password,
            kostnadsfri_url: links.kostnadsfri_url(slug.as_str()),
            studio_url: links.studio_url(slug.as_str()),
        }
    }

    /// Links as stored by the page API.
    pub fn created(company: &str, page: CreatedPage, links: &LinkTargets) -> Self {
        let studio_url = links.studio_url(&page.slug);
        Self {
            company: company.to_string(),
            slug: page.slug,
            password: page.password,
            kostnadsfri_url: page.url,
            studio_url,
        }
    }
}

/// Block layout used by `generate`, `batch` and `verify`.
pub fn write_report<W: Write>(out: &mut W, report: &LinkReport) -> io::Result<()> {
    writeln!(out)?;
    write_fields(out, report, "  ")?;
    writeln!(out)
}

/// Tighter layout for interactive answers.
pub fn write_inline_report<W: Write>(out: &mut W, report: &LinkReport) -> io::Result<()> {
    write_fields(out, report, "    ")?;
    writeln!(out)
}

fn write_fields<W: Write>(out: &mut W, report: &LinkReport, indent: &str) -> io::Result<()> {
    writeln!(out, "{indent}Company:  {}", report.company)?;
    writeln!(out, "{indent}Slug:     {}", report.slug)?;
    writeln!(out, "{indent}Password: {}", report.password)?;
    writeln!(out, "{indent}SajtMaskin URL: {}", report.kostnadsfri_url)?;
    writeln!(out, "{indent}Sajtstudio URL: {}", report.studio_url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links() -> LinkTargets {
        LinkTargets::new("https://sajtmaskin.test", "https://studio.test")
    }

    #[test]
    fn test_write_report_layout() {
        let slug = Slug::from_company_name("IKEA AB").unwrap();
        let report = LinkReport::preview("IKEA AB", &slug, "zxeDPvUb".to_string(), &links());

        let mut out = Vec::new();
        write_report(&mut out, &report).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\n  Company:  IKEA AB\n  Slug:     ikea-ab\n  Password: zxeDPvUb\n  \
             SajtMaskin URL: https://sajtmaskin.test/kostnadsfri/ikea-ab\n  \
             Sajtstudio URL: https://studio.test/ikea-ab\n\n"
        );
    }

    #[test]
    fn test_created_uses_api_values() {
        let page = CreatedPage {
            slug: "ikea-ab-2".to_string(),
            password: "serverpw".to_string(),
            url: "https://sajtmaskin.test/kostnadsfri/ikea-ab-2".to_string(),
        };
        let report = LinkReport::created("IKEA AB", page, &links());
        assert_eq!(report.slug, "ikea-ab-2");
        assert_eq!(report.password, "serverpw");
        assert_eq!(report.studio_url, "https://studio.test/ikea-ab-2");
    }

    #[test]
    fn test_inline_report_indent() {
        let slug = Slug::parse("ikea-ab").unwrap();
        let report = LinkReport::preview("Ikea AB", &slug, "pw".to_string(), &links());
        let mut out = Vec::new();
        write_inline_report(&mut out, &report).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("    Company:  Ikea AB\n"));
        assert!(text.ends_with("Sajtstudio URL: https://studio.test/ikea-ab\n\n"));
    }
}
