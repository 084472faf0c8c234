use anyhow::Context;
use render_manager::cli::Cli;
use render_manager::configuration::{get_configuration, load_targets};
use render_manager::services::{Markup, ReportRenderer};
use render_manager::startup::Application;
use render_manager::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("render-manager".into(), "info".into());
    init_subscriber(subscriber);

    let cli = Cli::load();
    let settings = get_configuration(&cli.config).context("Failed to read configuration.")?;
    let projects_path = cli
        .projects
        .unwrap_or_else(|| settings.projects_path.0.clone());
    let targets = load_targets(&projects_path).context("Failed to load projects.")?;

    tracing::info!(
        projects = targets.len(),
        projects_path = %projects_path,
        interval_minutes = settings.schedule.check_interval_minutes,
        "Starting render manager"
    );

    let app = Application::build(&settings, targets)?;

    if cli.once {
        let cycle = app.run_once().await;
        let page = ReportRenderer::new(settings.schedule.page_size, Markup::Plain).render(&cycle);
        println!("{}", page.text);
        return Ok(());
    }

    app.run_until_stopped().await
}
