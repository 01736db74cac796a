//! SafeVoice walkthrough
//!
//! Drives the screen models through one session: sign in, record a clip,
//! wait for the analysis, read the results, upgrade, and sign out. Timings
//! come from the file named by `SAFEVOICE_CONFIG`, if any.

use anyhow::{bail, Context, Result};
use app_core::AppConfig;
use app_ui::context::AppContext;
use app_ui::navigation::{NavigationShell, Route};
use app_ui::screens::{
    AccountScreen, AnalysisProgressScreen, HomeScreen, LoginScreen, NewAnalysisScreen,
    RecordingScreen, ResultsScreen, SubmitOutcome, SubscriptionScreen, UpgradeOutcome,
    WelcomeScreen,
};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env().context("loading configuration")?;
    let ctx = AppContext::new(config);
    let mut shell = NavigationShell::for_session(&ctx.session().snapshot());
    info!(route = %shell.current_route().to_path(), "Starting SafeVoice");

    // Auth graph
    shell.navigate(WelcomeScreen.login())?;
    let mut login = LoginScreen::new(ctx.clone());
    login.set_email("demo@safevoice.app");
    login.set_password("hunter22");
    match login.submit().await {
        SubmitOutcome::SignedIn(session) => {
            info!(tier = %session.tier, "Signed in");
        }
        other => bail!("login did not succeed: {:?}", other),
    }
    shell.sync_with_session(&ctx.session().snapshot());

    // Main graph
    let mut home = HomeScreen::new(ctx.clone());
    home.focus();
    info!(
        subtitle = %home.subtitle(),
        remaining = %home.stats().remaining_today,
        cards = home.cards().len(),
        "Home"
    );

    shell.navigate(home.new_analysis())?;
    let route = NewAnalysisScreen::new(ctx.clone())
        .record()
        .await
        .map_err(|alert| anyhow::anyhow!("{}: {}", alert.title, alert.message))?;
    shell.navigate(route)?;

    let mut recording = RecordingScreen::start(&ctx.config().recording);
    tokio::time::sleep(Duration::from_secs(3)).await;
    recording.stop();
    let route = recording
        .destination()
        .await
        .context("recording ended without a destination")?;
    info!(seconds = recording.state().elapsed_secs, "Recording finished");
    shell.replace(route.clone())?;

    let Route::AnalysisProgress { recording_uri } = route else {
        bail!("unexpected route after recording: {}", route.to_path());
    };
    let mut progress = AnalysisProgressScreen::start(recording_uri, &ctx.config().analysis);
    let route = progress
        .destination()
        .await
        .context("analysis ended without a destination")?;
    shell.replace(route.clone())?;

    let Route::Results { analysis_id } = route else {
        bail!("unexpected route after analysis: {}", route.to_path());
    };
    let mut results = ResultsScreen::new(ctx.clone(), &analysis_id);
    info!(
        safety = results.safety_label(),
        tone = %results.result().emotional_tone,
        stress = results.result().stress_score,
        "Results"
    );
    if let Some(ad) = results.ad_popup() {
        info!(title = ad.title, "Ad shown");
    }
    shell.navigate(results.upgrade())?;

    match SubscriptionScreen::new(ctx.clone()).subscribe().await {
        UpgradeOutcome::Upgraded(route) => shell.navigate(route)?,
        other => bail!("upgrade did not succeed: {:?}", other),
    }

    let account = AccountScreen::new(ctx.clone());
    info!(
        badge = %account.plan_badge(),
        today = %account.analyses_today(),
        "Account"
    );
    account.logout().await;
    shell.sync_with_session(&ctx.session().snapshot());
    info!(route = %shell.current_route().to_path(), "Signed out");

    Ok(())
}
