use relnotes::{
    ChangelogBuilder, Config, Result, forge::github::Github, repo::LocalRepo,
};

fn initialize_logger(debug: bool) -> Result<()> {
    let filter = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("relnotes")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> color_eyre::eyre::Result<()> {
    color_eyre::install()?;

    let config = Config::from_env()?;

    initialize_logger(config.debug)?;

    let lister = Github::new(&config.api_url, config.token.as_ref())?;
    let collector = LocalRepo::open(&config.repo_path)?;

    ChangelogBuilder::new(config, Box::new(lister), Box::new(collector))
        .run()
        .await?;

    Ok(())
}
