use clap::Parser;
use std::ffi::OsString;
use std::path::Path;

#[derive(Parser, Debug)]
#[command(
    name = "render-manager",
    version,
    about = "Watches Render projects, posts their status to Telegram and redeploys the ones that are down"
)]
pub struct Cli {
    /// Configuration file name, without extension
    #[arg(long, default_value = "configuration")]
    pub config: String,
    /// Projects file; overrides `projects_path` from the configuration
    #[arg(long, env = "PROJECTS_PATH")]
    pub projects: Option<String>,
    /// Run a single check, print the report and exit
    #[arg(long)]
    pub once: bool,
}

impl Cli {
    /// Parses the process arguments after loading `.env`.
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self::parse()
    }

    /// Same as `load`, with an explicit env file and argument list.
    pub fn load_from<I, T>(env_file: &Path, args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        dotenvy::from_path(env_file).ok();
        Self::try_parse_from(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn projects_path_can_come_from_env_file() {
        let mut env_file = tempfile::NamedTempFile::new().unwrap();
        writeln!(env_file, "PROJECTS_PATH=/srv/render-manager/projects.yaml").unwrap();

        let cli = Cli::load_from(env_file.path(), ["render-manager", "--once"]).unwrap();

        assert_eq!(cli.projects.as_deref(), Some("/srv/render-manager/projects.yaml"));
        assert!(cli.once);
        assert_eq!(cli.config, "configuration");
    }
}
