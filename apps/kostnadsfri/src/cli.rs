use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::generator::{PageDetails, PasswordArgs};

/// Generate SajtMaskin kostnadsfri pages and Sajtstudio links with
/// deterministic passwords.
#[derive(Debug, Parser)]
#[command(name = "kostnadsfri", version, about)]
pub struct Cli {
    /// Override KOSTNADSFRI_PASSWORD_SEED. Also forces derived passwords when PW is set.
    #[arg(long, global = true, value_name = "seed")]
    pub seed: Option<String>,

    /// Allow the well-known test seed when no seed is configured. Never use for real links.
    #[arg(long, global = true)]
    pub insecure_test_seed: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a link for one company.
    Generate {
        /// Company name, e.g. "IKEA AB".
        company_name: String,
        #[command(flatten)]
        details: DetailArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Generate links for every row of a CSV file
    /// (header: companyName,industry,website,contactEmail,contactName).
    Batch {
        #[arg(value_name = "csv")]
        path: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Print slug and derived password for a fixed list of test companies.
    Verify,
    /// Type company names or slugs one by one. Default when no command is given.
    Interactive {
        /// Explicit password for every entry.
        #[arg(long)]
        password: Option<String>,
    },
    /// Serve the password lookup HTTP API.
    Serve,
}

#[derive(Debug, Args)]
pub struct DetailArgs {
    /// Industry ID (cafe, restaurant, retail, tech, consulting, health, creative,
    /// education, ecommerce, realestate, other).
    #[arg(long)]
    pub industry: Option<String>,
    /// Existing website URL.
    #[arg(long)]
    pub website: Option<String>,
    /// Contact email.
    #[arg(long = "email")]
    pub contact_email: Option<String>,
    /// Contact person name.
    #[arg(long = "contact")]
    pub contact_name: Option<String>,
}

#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Explicit password (derived from the seed if omitted).
    #[arg(long)]
    pub password: Option<String>,
    /// Page expires in N days.
    #[arg(long = "expires", value_name = "days", value_parser = clap::value_parser!(u32).range(1..))]
    pub expires_in_days: Option<u32>,
    /// Preview slug and password without calling the API.
    #[arg(long)]
    pub dry_run: bool,
}

impl DetailArgs {
    pub fn into_details(self) -> PageDetails {
        PageDetails {
            industry: self.industry,
            website: self.website,
            contact_email: self.contact_email,
            contact_name: self.contact_name,
        }
    }
}

impl Cli {
    pub fn password_args(&self, explicit: Option<String>) -> PasswordArgs {
        PasswordArgs {
            explicit,
            seed: self.seed.clone(),
            insecure_test_seed: self.insecure_test_seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_generate() {
        let cli = Cli::try_parse_from([
            "kostnadsfri",
            "generate",
            "IKEA AB",
            "--industry",
            "retail",
            "--email",
            "info@ikea.se",
            "--expires",
            "14",
            "--dry-run",
            "--seed",
            "s",
        ])
        .unwrap();

        assert_eq!(cli.seed.as_deref(), Some("s"));
        match cli.command {
            Some(Command::Generate {
                company_name,
                details,
                output,
            }) => {
                assert_eq!(company_name, "IKEA AB");
                assert_eq!(details.industry.as_deref(), Some("retail"));
                assert_eq!(details.contact_email.as_deref(), Some("info@ikea.se"));
                assert_eq!(output.expires_in_days, Some(14));
                assert!(output.dry_run);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_no_command_is_allowed() {
        let cli = Cli::try_parse_from(["kostnadsfri"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_zero_expiry_rejected() {
        assert!(Cli::try_parse_from(["kostnadsfri", "generate", "X", "--expires", "0"]).is_err());
    }

    #[test]
    fn test_batch_args() {
        let cli =
            Cli::try_parse_from(["kostnadsfri", "--insecure-test-seed", "batch", "companies.csv"])
                .unwrap();
        assert!(cli.insecure_test_seed);
        assert!(matches!(
            cli.command,
            Some(Command::Batch { ref path, .. }) if path == &PathBuf::from("companies.csv")
        ));
    }

    #[test]
    fn test_clap_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
