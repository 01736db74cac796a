//! Navigation shell for SafeVoice
//!
//! The app has two screen graphs. Signed-out users see the auth graph
//! (welcome, login, signup). Signed-in users see the main graph: two tabs,
//! Home and Account, each with its own stack, plus the analysis flow pushed
//! on top of whichever tab is active.
//!
//! The graph is chosen from the session alone. Screens never navigate
//! across graphs; after a login or logout the owner calls
//! [`NavigationShell::sync_with_session`] and the shell swaps graphs.

use app_state::Session;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Errors
// =============================================================================

/// Navigation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// Route belongs to the graph that is not mounted
    #[error("Route {route} is not reachable from the {graph} graph")]
    WrongGraph {
        /// Requested route title
        route: &'static str,
        /// Mounted graph
        graph: Graph,
    },
}

/// Result type for navigation operations
pub type Result<T> = std::result::Result<T, NavigationError>;

// =============================================================================
// Route Definitions
// =============================================================================

/// All screens in the application
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "route", content = "params")]
pub enum Route {
    // Auth graph
    /// Landing screen with sign-in choices
    Welcome,
    /// Email/password login
    Login,
    /// Account creation
    Signup,

    // Main graph
    /// Dashboard tab
    Home,
    /// Account tab
    Account,
    /// Record or upload chooser
    NewAnalysis,
    /// Live recording with clock
    Recording,
    /// Simulated analysis steps
    AnalysisProgress {
        /// Clip being analysed
        recording_uri: String,
    },
    /// Analysis results
    Results {
        /// Result to show
        analysis_id: String,
    },
    /// Plan comparison and upgrade
    Subscription,
}

/// Which screen graph a route lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Graph {
    /// Signed-out screens
    Auth,
    /// Signed-in screens
    Main,
}

impl std::fmt::Display for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Graph::Auth => write!(f, "auth"),
            Graph::Main => write!(f, "main"),
        }
    }
}

impl Graph {
    /// Root route of the graph
    pub fn root_route(&self) -> Route {
        match self {
            Graph::Auth => Route::Welcome,
            Graph::Main => Route::Home,
        }
    }
}

impl Route {
    /// Get the URL path for this route
    pub fn to_path(&self) -> String {
        match self {
            Route::Welcome => "/welcome".to_string(),
            Route::Login => "/login".to_string(),
            Route::Signup => "/signup".to_string(),
            Route::Home => "/".to_string(),
            Route::Account => "/account".to_string(),
            Route::NewAnalysis => "/analysis/new".to_string(),
            Route::Recording => "/analysis/record".to_string(),
            Route::AnalysisProgress { recording_uri } => {
                format!("/analysis/progress?uri={}", urlencoding::encode(recording_uri))
            }
            Route::Results { analysis_id } => {
                format!("/analysis/{}", urlencoding::encode(analysis_id))
            }
            Route::Subscription => "/subscription".to_string(),
        }
    }

    /// Parse a path produced by [`Route::to_path`]
    pub fn from_path(path: &str) -> Option<Route> {
        let (pathname, query) = match path.split_once('?') {
            Some((p, q)) => (p, Some(q)),
            None => (path, None),
        };
        let segments: Vec<&str> = pathname.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Some(Route::Home),
            ["welcome"] => Some(Route::Welcome),
            ["login"] => Some(Route::Login),
            ["signup"] => Some(Route::Signup),
            ["account"] => Some(Route::Account),
            ["subscription"] => Some(Route::Subscription),
            ["analysis", "new"] => Some(Route::NewAnalysis),
            ["analysis", "record"] => Some(Route::Recording),
            ["analysis", "progress"] => {
                let uri = query?
                    .split('&')
                    .filter_map(|pair| pair.split_once('='))
                    .find(|(key, _)| *key == "uri")
                    .map(|(_, value)| value)?;
                Some(Route::AnalysisProgress {
                    recording_uri: urlencoding::decode(uri).ok()?.into_owned(),
                })
            }
            ["analysis", id] => Some(Route::Results {
                analysis_id: urlencoding::decode(id).ok()?.into_owned(),
            }),
            _ => None,
        }
    }

    /// Graph this route belongs to
    pub fn graph(&self) -> Graph {
        match self {
            Route::Welcome | Route::Login | Route::Signup => Graph::Auth,
            _ => Graph::Main,
        }
    }

    /// Check if this route requires authentication
    pub fn requires_auth(&self) -> bool {
        self.graph() == Graph::Main
    }

    /// Tab whose root this route is, if any
    pub fn tab(&self) -> Option<NavigationTab> {
        match self {
            Route::Home => Some(NavigationTab::Home),
            Route::Account => Some(NavigationTab::Account),
            _ => None,
        }
    }

    /// Get the screen title
    pub fn title(&self) -> &'static str {
        match self {
            Route::Welcome => "Welcome",
            Route::Login => "Login",
            Route::Signup => "Sign Up",
            Route::Home => "Home",
            Route::Account => "Account",
            Route::NewAnalysis => "New Analysis",
            Route::Recording => "Recording",
            Route::AnalysisProgress { .. } => "Analyzing",
            Route::Results { .. } => "Analysis Results",
            Route::Subscription => "Subscription",
        }
    }
}

// =============================================================================
// Navigation Tabs
// =============================================================================

/// Main graph tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NavigationTab {
    /// Dashboard
    #[default]
    Home,
    /// Profile and settings
    Account,
}

impl NavigationTab {
    /// Get the root route for this tab
    pub fn root_route(&self) -> Route {
        match self {
            NavigationTab::Home => Route::Home,
            NavigationTab::Account => Route::Account,
        }
    }

    /// Get icon name for this tab
    pub fn icon(&self) -> &'static str {
        match self {
            NavigationTab::Home => "home",
            NavigationTab::Account => "person",
        }
    }

    /// Get label for this tab
    pub fn label(&self) -> &'static str {
        match self {
            NavigationTab::Home => "Home",
            NavigationTab::Account => "Account",
        }
    }
}

// =============================================================================
// Navigation Stack
// =============================================================================

/// A navigation stack entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackEntry {
    /// The route
    pub route: Route,
    /// Unique key for this entry
    pub key: String,
}

impl StackEntry {
    /// Create a new stack entry
    pub fn new(route: Route) -> Self {
        Self {
            route,
            key: uuid::Uuid::new_v4().to_string(),
        }
    }
}

/// Stack of screens with a fixed root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationStack {
    root: StackEntry,
    above: Vec<StackEntry>,
}

impl NavigationStack {
    /// Create a new navigation stack with a root route
    pub fn new(root: Route) -> Self {
        Self {
            root: StackEntry::new(root),
            above: Vec::new(),
        }
    }

    /// Push a route onto the stack
    pub fn push(&mut self, route: Route) {
        self.above.push(StackEntry::new(route));
    }

    /// Pop the top route (returns true if popped, false if at root)
    pub fn pop(&mut self) -> bool {
        self.above.pop().is_some()
    }

    /// Pop to root
    pub fn pop_to_root(&mut self) {
        self.above.clear();
    }

    /// Replace the top route; the root is never replaced
    pub fn replace(&mut self, route: Route) {
        match self.above.last_mut() {
            Some(last) => *last = StackEntry::new(route),
            None => self.push(route),
        }
    }

    /// Get the current (top) route
    pub fn current(&self) -> &Route {
        &self.current_entry().route
    }

    /// Get the current stack entry
    pub fn current_entry(&self) -> &StackEntry {
        self.above.last().unwrap_or(&self.root)
    }

    /// Check if we can go back
    pub fn can_go_back(&self) -> bool {
        !self.above.is_empty()
    }

    /// Get stack depth
    pub fn depth(&self) -> usize {
        self.above.len() + 1
    }

    /// Routes from bottom to top
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        std::iter::once(&self.root.route).chain(self.above.iter().map(|e| &e.route))
    }
}

// =============================================================================
// Navigation Shell
// =============================================================================

/// Top-level navigator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationShell {
    graph: Graph,
    auth_stack: NavigationStack,
    active_tab: NavigationTab,
    home_stack: NavigationStack,
    account_stack: NavigationStack,
}

impl Default for NavigationShell {
    fn default() -> Self {
        Self::new(Graph::Auth)
    }
}

impl NavigationShell {
    /// Create a shell showing the given graph at its root
    pub fn new(graph: Graph) -> Self {
        Self {
            graph,
            auth_stack: NavigationStack::new(Route::Welcome),
            active_tab: NavigationTab::Home,
            home_stack: NavigationStack::new(Route::Home),
            account_stack: NavigationStack::new(Route::Account),
        }
    }

    /// Create a shell for the given session
    pub fn for_session(session: &Session) -> Self {
        Self::new(Self::graph_for(session))
    }

    fn graph_for(session: &Session) -> Graph {
        if session.is_authenticated() {
            Graph::Main
        } else {
            Graph::Auth
        }
    }

    /// Mount the graph matching the session
    ///
    /// Swapping graphs resets every stack. Returns whether the graph changed.
    pub fn sync_with_session(&mut self, session: &Session) -> bool {
        let graph = Self::graph_for(session);
        if graph == self.graph {
            return false;
        }
        tracing::debug!(from = %self.graph, to = %graph, "Switching screen graph");
        *self = Self::new(graph);
        true
    }

    /// Mounted graph
    pub fn graph(&self) -> Graph {
        self.graph
    }

    /// Active tab of the main graph
    pub fn active_tab(&self) -> NavigationTab {
        self.active_tab
    }

    /// Stack currently shown
    pub fn current_stack(&self) -> &NavigationStack {
        match (self.graph, self.active_tab) {
            (Graph::Auth, _) => &self.auth_stack,
            (Graph::Main, NavigationTab::Home) => &self.home_stack,
            (Graph::Main, NavigationTab::Account) => &self.account_stack,
        }
    }

    fn current_stack_mut(&mut self) -> &mut NavigationStack {
        match (self.graph, self.active_tab) {
            (Graph::Auth, _) => &mut self.auth_stack,
            (Graph::Main, NavigationTab::Home) => &mut self.home_stack,
            (Graph::Main, NavigationTab::Account) => &mut self.account_stack,
        }
    }

    /// Route currently shown
    pub fn current_route(&self) -> &Route {
        self.current_stack().current()
    }

    fn check_graph(&self, route: &Route) -> Result<()> {
        if route.graph() != self.graph {
            tracing::warn!(route = route.title(), graph = %self.graph, "Navigation rejected");
            return Err(NavigationError::WrongGraph {
                route: route.title(),
                graph: self.graph,
            });
        }
        Ok(())
    }

    /// Navigate to a route
    ///
    /// Tab roots switch tabs and return that tab to its root. The graph
    /// root returns the auth stack to its root. Anything else is pushed.
    pub fn navigate(&mut self, route: Route) -> Result<()> {
        self.check_graph(&route)?;
        tracing::debug!(route = route.title(), "Navigate");

        if let Some(tab) = route.tab() {
            self.switch_tab(tab)?;
            self.current_stack_mut().pop_to_root();
        } else if route == self.graph.root_route() {
            self.current_stack_mut().pop_to_root();
        } else {
            self.current_stack_mut().push(route);
        }
        Ok(())
    }

    /// Replace the current screen, keeping the stack depth
    pub fn replace(&mut self, route: Route) -> Result<()> {
        self.check_graph(&route)?;
        if route.tab().is_some() {
            return self.navigate(route);
        }
        tracing::debug!(route = route.title(), "Replace");
        self.current_stack_mut().replace(route);
        Ok(())
    }

    /// Go back (returns false at a root)
    pub fn go_back(&mut self) -> bool {
        self.current_stack_mut().pop()
    }

    /// Check if we can go back
    pub fn can_go_back(&self) -> bool {
        self.current_stack().can_go_back()
    }

    /// Switch to a tab of the main graph
    pub fn switch_tab(&mut self, tab: NavigationTab) -> Result<()> {
        self.check_graph(&tab.root_route())?;
        self.active_tab = tab;
        Ok(())
    }
}
