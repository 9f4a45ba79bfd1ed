use crate::common::build_app;
use vplan_core::store::{self, keys};
use vplan_core::{KeyringStore, LoginForm, DEFAULT_SERVER_URL};

pub async fn run_login(
    username: String,
    password: String,
    school: String,
    server: Option<String>,
    autologin: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let server_url = match server {
        Some(url) => url,
        None => stored_server_url()
            .await
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string()),
    };

    let (app, _presenter) = build_app()?;
    let form = LoginForm {
        server_url,
        username,
        password,
        schoolid_raw: school,
        autologin,
    };
    app.submit_login(&form).await?;
    println!("Logged in.");
    Ok(())
}

pub async fn run_status() -> Result<(), Box<dyn std::error::Error>> {
    let (app, presenter) = build_app()?;
    app.session().check_session().await;
    match presenter.last_status() {
        Some(status) => println!("{status}"),
        None => println!("unknown"),
    }
    Ok(())
}

pub async fn run_reset() -> Result<(), Box<dyn std::error::Error>> {
    let (app, _presenter) = build_app()?;
    app.reset().await?;
    println!("All stored data wiped.");
    Ok(())
}

async fn stored_server_url() -> Option<String> {
    let store = KeyringStore::new();
    store::read_nonempty(&store, keys::SERVER_URL).await
}
