use clap::Subcommand;

const ISSUES_URL: &str = "https://github.com/alessioC42/SPH-vertretungsplan/issues";
const RELEASES_URL: &str = "https://github.com/alessioC42/SPH-vertretungsplan/releases/latest";
const REPOSITORY_URL: &str = "https://github.com/alessioC42/SPH-vertretungsplan";

#[derive(Subcommand)]
pub enum OpenTarget {
    /// Report a bug or request a feature
    Issues,
    /// Latest release
    Releases,
    /// Project page
    Repository,
}

pub fn run(target: OpenTarget) -> Result<(), Box<dyn std::error::Error>> {
    let url = match target {
        OpenTarget::Issues => ISSUES_URL,
        OpenTarget::Releases => RELEASES_URL,
        OpenTarget::Repository => REPOSITORY_URL,
    };
    open::that(url)?;
    Ok(())
}
