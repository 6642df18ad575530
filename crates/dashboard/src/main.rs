use std::sync::Arc;

use anyhow::{Context, Result};
use smp_client::{ApiError, ClientConfig, MemoryNavigator};
use smp_dashboard::{Dashboard, TableView, screens};

#[tokio::main]
async fn main() -> Result<()> {
    smp_observability::init();

    let config = ClientConfig::from_env().context("invalid SMP_* configuration")?;
    let navigator = Arc::new(MemoryNavigator::new(config.paths.login.clone()));
    let app = Dashboard::new(config, navigator.clone()).context("failed to build API client")?;

    // Optional login via environment
    match (std::env::var("SMP_USERNAME"), std::env::var("SMP_PASSWORD")) {
        (Ok(user), Ok(password)) => {
            app.auth
                .login(&user, &password)
                .await
                .context("login failed")?;
        }
        _ => tracing::info!("SMP_USERNAME/SMP_PASSWORD not set; continuing without a session"),
    }

    let (_, flash) = app.mount(&app.config.paths.dashboard).await;
    if let Some(flash) = flash {
        println!("[{}] {}", flash.severity, flash.message);
    }

    let orders = app.orders_list();
    if let Err(e) = orders.refresh().await {
        if matches!(e, ApiError::ServerFault { .. } | ApiError::Network(_)) {
            let (screen, link) = app.error_screen(&navigator.current_location());
            eprintln!("{}\n\n{}\n\nContact support: {link}", screen.title(), screen.debug_log(None));
        }
        return Err(e).context("failed to load orders");
    }

    let snap = orders.snapshot();
    let table = TableView::build(
        &snap.rows,
        &screens::order_columns(),
        Some(&snap.selection),
        Some(&snap.sort),
        snap.is_loading,
    );
    println!("{}", table.render_text());
    if let Some(pagination) = orders.pagination().view() {
        println!("\n{}", pagination.summary());
    }

    Ok(())
}
