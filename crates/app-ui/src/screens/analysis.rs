//! The analysis flow: choose a source, record, then watch the fake analysis
//!
//! ```text
//! NewAnalysis --record--> Recording --stop/auto-stop--> AnalysisProgress --> Results
//!             --upload-----------------------------------^
//! ```
//!
//! Recording and AnalysisProgress each run one [`ScreenTimer`]. Their state
//! is published through a `watch` channel; once the timed sequence is over
//! the state carries the `destination` route, which the owner applies with
//! [`NavigationShell::replace`](crate::navigation::NavigationShell::replace).

use crate::components::{format_clock, Button, ButtonSize, ButtonVariant};
use crate::context::AppContext;
use crate::navigation::Route;
use crate::screens::Alert;
use crate::tokens::duration;
use app_core::analysis::{AnalysisStep, ANALYSIS_STEPS, LATEST_ANALYSIS_ID, MOCK_RECORDING_URI};
use app_core::config::{AnalysisConfig, RecordingConfig};
use app_state::ScreenTimer;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Notify};
use tokio::time::{interval_at, Instant, MissedTickBehavior};

// =============================================================================
// New Analysis
// =============================================================================

/// One of the two source options
#[derive(Debug, Clone, PartialEq)]
pub struct SourceOption {
    /// Icon name
    pub icon: &'static str,
    /// Card title
    pub title: &'static str,
    /// Card body
    pub description: &'static str,
    /// Action button
    pub button: Button,
}

/// Record-or-upload chooser
#[derive(Debug, Clone)]
pub struct NewAnalysisScreen {
    ctx: AppContext,
}

impl NewAnalysisScreen {
    /// Advice under the options
    pub const TIP: &'static str = "For best results, ensure your voice sample is at least 10 seconds long and recorded in a quiet environment. Audio files should be in MP3, WAV, or M4A format and no larger than 10MB.";

    /// Create the chooser
    pub fn new(ctx: AppContext) -> Self {
        Self { ctx }
    }

    /// Record and upload cards
    pub fn options(&self) -> [SourceOption; 2] {
        [
            SourceOption {
                icon: "mic",
                title: "Record Now",
                description: "Record a new voice sample directly on your device",
                button: Button::new("Record")
                    .with_size(ButtonSize::Small)
                    .with_icon("mic-outline"),
            },
            SourceOption {
                icon: "cloud-upload",
                title: "Upload File",
                description: "Upload an existing audio file from your device",
                button: Button::new("Select File")
                    .with_size(ButtonSize::Small)
                    .with_variant(ButtonVariant::Secondary)
                    .with_icon("document-outline"),
            },
        ]
    }

    async fn count_analysis(&self) -> Result<(), Alert> {
        self.ctx
            .session()
            .record_analysis()
            .await
            .map(|_| ())
            .map_err(|e| Alert::from(&e))
    }

    /// Start recording
    ///
    /// # Errors
    ///
    /// Alert when signed out or the daily allowance is used up.
    pub async fn record(&self) -> Result<Route, Alert> {
        self.count_analysis().await?;
        Ok(Route::Recording)
    }

    /// Pick a file and go straight to analysis
    ///
    /// The file picker is simulated; the fixed mock clip is always chosen.
    pub async fn upload(&self) -> Result<Route, Alert> {
        self.count_analysis().await?;
        tokio::time::sleep(Duration::from_millis(duration::UPLOAD_PICK)).await;
        Ok(Route::AnalysisProgress {
            recording_uri: MOCK_RECORDING_URI.to_string(),
        })
    }
}

// =============================================================================
// Recording
// =============================================================================

/// Published state of the recording screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingState {
    /// Microphone is live
    pub recording: bool,
    /// Whole seconds since recording started
    pub elapsed_secs: u64,
    /// Set once the screen is done
    pub destination: Option<Route>,
}

impl RecordingState {
    fn started() -> Self {
        Self {
            recording: true,
            elapsed_secs: 0,
            destination: None,
        }
    }

    /// Clock text, or the idle prompt once stopped
    pub fn clock(&self) -> String {
        if self.recording {
            format_clock(self.elapsed_secs)
        } else {
            "Ready to record".to_string()
        }
    }

    /// Hint under the record button
    pub fn hint(&self) -> &'static str {
        if self.recording {
            "Tap to stop recording"
        } else {
            "Tap to start recording"
        }
    }
}

/// Live recording with a one-second clock
///
/// Recording stops on [`RecordingScreen::stop`] or automatically. After a
/// short pause the destination becomes the analysis progress screen.
#[derive(Debug)]
pub struct RecordingScreen {
    state: watch::Receiver<RecordingState>,
    stop: Arc<Notify>,
    timer: ScreenTimer,
}

impl RecordingScreen {
    /// Start recording
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(config: &RecordingConfig) -> Self {
        let (tx, state) = watch::channel(RecordingState::started());
        let stop = Arc::new(Notify::new());
        let timer = ScreenTimer::spawn(
            "recording",
            run_recording(
                tx,
                Arc::clone(&stop),
                config.auto_stop(),
                Duration::from_millis(duration::PRESS_FEEDBACK),
                config.stop_delay(),
            ),
        );
        Self { state, stop, timer }
    }

    /// Current state
    pub fn state(&self) -> RecordingState {
        self.state.borrow().clone()
    }

    /// Receiver for re-rendering on every change
    pub fn subscribe(&self) -> watch::Receiver<RecordingState> {
        self.state.clone()
    }

    /// Stop button
    ///
    /// Recording ends after the press feedback; the clock keeps running
    /// until then.
    pub fn stop(&self) {
        self.stop.notify_one();
    }

    /// Whether the timed sequence is still running
    pub fn is_running(&self) -> bool {
        self.timer.is_active()
    }

    /// Close button; abandons the recording
    pub fn close(mut self) -> Route {
        self.timer.cancel();
        Route::NewAnalysis
    }

    /// Wait until the screen hands over to the next one
    ///
    /// Returns `None` if the timer was torn down first.
    pub async fn destination(&mut self) -> Option<Route> {
        self.state
            .wait_for(|s| s.destination.is_some())
            .await
            .ok()
            .and_then(|s| s.destination.clone())
    }
}

async fn run_recording(
    tx: watch::Sender<RecordingState>,
    stop: Arc<Notify>,
    auto_stop: Duration,
    press_feedback: Duration,
    stop_delay: Duration,
) {
    let second = Duration::from_secs(1);
    let mut clock = interval_at(Instant::now() + second, second);
    clock.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let deadline = tokio::time::sleep(auto_stop);
    tokio::pin!(deadline);
    let mut pressed = false;

    loop {
        tokio::select! {
            biased;
            _ = clock.tick() => tx.send_modify(|s| s.elapsed_secs += 1),
            _ = &mut deadline => {
                tracing::debug!(pressed, "Recording stopped");
                break;
            }
            _ = stop.notified(), if !pressed => {
                pressed = true;
                let at = deadline.deadline().min(Instant::now() + press_feedback);
                deadline.as_mut().reset(at);
            }
        }
    }

    tx.send_modify(|s| s.recording = false);
    tokio::time::sleep(stop_delay).await;
    tx.send_modify(|s| {
        s.destination = Some(Route::AnalysisProgress {
            recording_uri: MOCK_RECORDING_URI.to_string(),
        })
    });
}

// =============================================================================
// Analysis Progress
// =============================================================================

/// Published state of the analysis progress screen
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressState {
    /// Index into [`ANALYSIS_STEPS`]
    pub step: usize,
    /// Progress bar fill, 0.0 to 1.0
    pub progress: f32,
    /// All steps done
    pub complete: bool,
    /// Set once the screen is done
    pub destination: Option<Route>,
}

impl ProgressState {
    fn started() -> Self {
        Self {
            step: 0,
            progress: 0.0,
            complete: false,
            destination: None,
        }
    }

    /// Step shown in the spotlight
    pub fn current_step(&self) -> Option<&'static AnalysisStep> {
        ANALYSIS_STEPS.get(self.step)
    }

    /// e.g. "42% Complete"
    pub fn percent_label(&self) -> String {
        format!("{}% Complete", (self.progress * 100.0).round() as u32)
    }

    /// Whether a step in the checklist is done
    pub fn is_step_done(&self, index: usize) -> bool {
        self.complete || index < self.step
    }
}

/// Simulated analysis
///
/// Steps advance on a fixed interval while the progress bar fills on a
/// faster tick. After the last step the destination becomes the results of
/// the latest analysis.
#[derive(Debug)]
pub struct AnalysisProgressScreen {
    recording_uri: String,
    state: watch::Receiver<ProgressState>,
    timer: ScreenTimer,
}

impl AnalysisProgressScreen {
    /// Footer text
    pub const NOTE: &'static str =
        "Please wait while we analyze your recording. This typically takes 30-45 seconds.";

    /// Start analysing a clip
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(recording_uri: impl Into<String>, config: &AnalysisConfig) -> Self {
        let recording_uri = recording_uri.into();
        tracing::info!(uri = %recording_uri, "Analysis started");
        let (tx, state) = watch::channel(ProgressState::started());
        let timer = ScreenTimer::spawn("analysis", run_analysis(tx, config.clone()));
        Self {
            recording_uri,
            state,
            timer,
        }
    }

    /// Clip being analysed
    pub fn recording_uri(&self) -> &str {
        &self.recording_uri
    }

    /// Current state
    pub fn state(&self) -> ProgressState {
        self.state.borrow().clone()
    }

    /// Receiver for re-rendering on every change
    pub fn subscribe(&self) -> watch::Receiver<ProgressState> {
        self.state.clone()
    }

    /// Whether the timed sequence is still running
    pub fn is_running(&self) -> bool {
        self.timer.is_active()
    }

    /// Wait until the screen hands over to results
    ///
    /// Returns `None` if the timer was torn down first.
    pub async fn destination(&mut self) -> Option<Route> {
        self.state
            .wait_for(|s| s.destination.is_some())
            .await
            .ok()
            .and_then(|s| s.destination.clone())
    }
}

async fn run_analysis(tx: watch::Sender<ProgressState>, config: AnalysisConfig) {
    let start = Instant::now();
    let mut steps = interval_at(start + config.step_interval(), config.step_interval());
    let mut ticks = interval_at(start + config.progress_tick(), config.progress_tick());
    steps.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut tick_count: u32 = 0;
    let mut filling = true;

    loop {
        tokio::select! {
            biased;
            _ = steps.tick() => {
                let mut done = false;
                tx.send_modify(|s| {
                    if s.step + 1 >= ANALYSIS_STEPS.len() {
                        s.complete = true;
                        s.progress = 1.0;
                        done = true;
                    } else {
                        s.step += 1;
                    }
                });
                if done {
                    break;
                }
                tracing::debug!(step = tx.borrow().step, "Analysis step");
            }
            _ = ticks.tick(), if filling => {
                tick_count += 1;
                let progress = (tick_count as f32 * config.progress_increment).min(1.0);
                tx.send_modify(|s| s.progress = progress);
                filling = progress < 1.0;
            }
        }
    }

    tracing::info!("Analysis complete");
    tokio::time::sleep(config.results_delay()).await;
    tx.send_modify(|s| {
        s.destination = Some(Route::Results {
            analysis_id: LATEST_ANALYSIS_ID.to_string(),
        })
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use app_core::AppConfig;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[tokio::test(start_paused = true)]
    async fn test_recording_clock_ticks() {
        let screen = RecordingScreen::start(&RecordingConfig::default());
        assert_eq!(screen.state().clock(), "00:00");

        tokio::time::sleep(ms(3500)).await;
        let state = screen.state();
        assert_eq!(state.elapsed_secs, 3);
        assert_eq!(state.clock(), "00:03");
        assert_eq!(state.hint(), "Tap to stop recording");
    }

    #[tokio::test(start_paused = true)]
    async fn test_recording_auto_stops() {
        let mut screen = RecordingScreen::start(&RecordingConfig::default());
        let start = Instant::now();

        let destination = screen.destination().await;
        assert_eq!(
            destination,
            Some(Route::AnalysisProgress {
                recording_uri: MOCK_RECORDING_URI.to_string()
            })
        );
        assert!(start.elapsed() >= ms(15_500));
        let state = screen.state();
        assert!(!state.recording);
        assert_eq!(state.elapsed_secs, 15);
        assert_eq!(state.clock(), "Ready to record");
    }

    #[tokio::test(start_paused = true)]
    async fn test_recording_manual_stop() {
        let mut screen = RecordingScreen::start(&RecordingConfig::default());
        tokio::time::sleep(ms(2500)).await;
        screen.stop();
        let pressed = Instant::now();

        tokio::time::sleep(ms(100)).await;
        assert!(screen.state().recording);

        tokio::time::sleep(ms(150)).await;
        assert!(!screen.state().recording);
        assert!(screen.state().destination.is_none());

        let destination = screen.destination().await;
        assert!(matches!(destination, Some(Route::AnalysisProgress { .. })));
        assert!(pressed.elapsed() >= ms(700));
        assert_eq!(screen.state().elapsed_secs, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clock_runs_during_press_feedback() {
        let mut screen = RecordingScreen::start(&RecordingConfig::default());
        tokio::time::sleep(ms(2900)).await;
        screen.stop();

        screen.destination().await;
        assert_eq!(screen.state().elapsed_secs, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_closing_recording_cancels_timer() {
        let screen = RecordingScreen::start(&RecordingConfig::default());
        let mut rx = screen.subscribe();
        assert_eq!(screen.close(), Route::NewAnalysis);

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert!(rx.borrow_and_update().destination.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_progress_walks_steps() {
        let mut screen =
            AnalysisProgressScreen::start(MOCK_RECORDING_URI, &AnalysisConfig::default());
        assert_eq!(screen.state().current_step().unwrap().label, "Transcribing audio...");

        tokio::time::sleep(ms(3050)).await;
        let state = screen.state();
        assert_eq!(state.step, 1);
        assert!(state.is_step_done(0));
        assert!((state.progress - 0.3).abs() < 0.011);

        tokio::time::sleep(ms(9000)).await;
        assert_eq!(
            screen.state().current_step().unwrap().label,
            "Processing complete!"
        );
        assert!(!screen.state().complete);

        tokio::time::sleep(ms(3000)).await;
        let state = screen.state();
        assert!(state.complete);
        assert_eq!(state.progress, 1.0);
        assert_eq!(state.percent_label(), "100% Complete");
        assert!(state.destination.is_none());

        let destination = screen.destination().await;
        assert_eq!(
            destination,
            Some(Route::Results {
                analysis_id: "123".to_string()
            })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_progress_total_duration() {
        let mut screen =
            AnalysisProgressScreen::start(MOCK_RECORDING_URI, &AnalysisConfig::default());
        let start = Instant::now();
        screen.destination().await;
        assert!(start.elapsed() >= ms(16_000));

        tokio::time::sleep(ms(10)).await;
        assert!(!screen.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_progress_with_zero_intervals() {
        let config = AnalysisConfig {
            step_interval_ms: 0,
            progress_tick_ms: 0,
            ..AnalysisConfig::default()
        };
        let mut screen = AnalysisProgressScreen::start(MOCK_RECORDING_URI, &config);

        let destination = screen.destination().await;
        assert_eq!(
            destination,
            Some(Route::Results {
                analysis_id: LATEST_ANALYSIS_ID.to_string()
            })
        );
        assert!(screen.state().complete);
    }

    #[tokio::test(start_paused = true)]
    async fn test_progress_bar_clamps() {
        let config = AnalysisConfig {
            progress_increment: 0.3,
            ..AnalysisConfig::default()
        };
        let screen = AnalysisProgressScreen::start(MOCK_RECORDING_URI, &config);
        tokio::time::sleep(ms(550)).await;
        assert_eq!(screen.state().progress, 1.0);
        assert_eq!(screen.state().step, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_progress_cancels() {
        let screen = AnalysisProgressScreen::start(MOCK_RECORDING_URI, &AnalysisConfig::default());
        let mut rx = screen.subscribe();
        drop(screen);

        tokio::time::sleep(Duration::from_secs(30)).await;
        let state = rx.borrow_and_update();
        assert!(!state.complete);
        assert!(state.destination.is_none());
    }

    #[tokio::test]
    async fn test_record_counts_against_allowance() {
        let ctx = AppContext::new(AppConfig::default());
        ctx.session().login("a@b.com", "abc123").await.unwrap();
        let screen = NewAnalysisScreen::new(ctx.clone());

        assert_eq!(screen.record().await, Ok(Route::Recording));
        let alert = screen.record().await.unwrap_err();
        assert_eq!(alert.title, "Daily Limit Reached");
        assert_eq!(ctx.session().snapshot().usage.total_analyses, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_upload_goes_to_progress() {
        let ctx = AppContext::new(AppConfig::default());
        ctx.session().login("a@b.com", "abc123").await.unwrap();
        ctx.session().upgrade().await.unwrap();
        let screen = NewAnalysisScreen::new(ctx);

        let start = Instant::now();
        let route = screen.upload().await.unwrap();
        assert!(start.elapsed() >= ms(500));
        assert_eq!(
            route,
            Route::AnalysisProgress {
                recording_uri: "file:///mock/path/recording.m4a".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_signed_out_cannot_start() {
        let screen = NewAnalysisScreen::new(AppContext::new(AppConfig::default()));
        assert_eq!(screen.record().await.unwrap_err().title, "Not Signed In");
    }
}
