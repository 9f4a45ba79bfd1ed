use clap::Subcommand;

use crate::common::build_app;
use vplan_core::{FilterConfig, KeyringStore};

#[derive(Subcommand)]
pub enum FilterAction {
    /// Set the plan filter; omitted fields match everything
    Set {
        /// Grade level matched as substring of the class label ("10")
        #[arg(long, default_value = "")]
        grade: String,
        /// Class letter matched as substring of the class label ("a")
        #[arg(long, default_value = "")]
        letter: String,
        /// Teacher name or short code, matched exactly
        #[arg(long, default_value = "")]
        teacher: String,
    },
    /// Show the stored filter
    Show,
    /// Remove all filtering
    Clear,
}

pub async fn run(action: FilterAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        FilterAction::Set {
            grade,
            letter,
            teacher,
        } => {
            let (app, _presenter) = build_app()?;
            let config = FilterConfig {
                grade_level: grade,
                class_letter: letter,
                teacher,
            };
            app.save_filter(&config).await;
        }
        FilterAction::Show => {
            let store = KeyringStore::new();
            let config = FilterConfig::load(&store).await;
            println!("grade:   {:?}", config.grade_level);
            println!("letter:  {:?}", config.class_letter);
            println!("teacher: {:?}", config.teacher);
        }
        FilterAction::Clear => {
            let (app, _presenter) = build_app()?;
            app.save_filter(&FilterConfig::default()).await;
            println!("Filter cleared.");
        }
    }
    Ok(())
}
