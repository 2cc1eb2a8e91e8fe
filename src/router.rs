//! Workflow router
//!
//! A static table of four steps. Every step past upload has an entry guard
//! that checks the identifiers it depends on and redirects to an earlier step
//! when one is missing.
//!
//! | idx | step   | path                                                            |
//! |-----|--------|-----------------------------------------------------------------|
//! | 0   | upload | `/`                                                             |
//! | 1   | parse  | `/documents/:documentId/parse`                                  |
//! | 2   | review | `/documents/:documentId/parse/:parseId/review`                  |
//! | 3   | report | `/documents/:documentId/parse/:parseId/review/:reviewId/report` |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::escape::{decode_segment, encode_segment};
use crate::storage::KeyValueStore;
use crate::store::WorkflowStore;

/// Suffix appended to every page title
pub const APP_TITLE: &str = "Document Review System";

/// A workflow step
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    /// Upload a document
    Upload,
    /// Parse it into a requirement tree
    Parse,
    /// Validate the requirement tree
    Review,
    /// Export the review report
    Report,
}

impl Step {
    /// All steps in workflow order
    pub const ALL: [Self; 4] = [Self::Upload, Self::Parse, Self::Review, Self::Report];

    /// Position in the workflow, starting at 0
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Upload => 0,
            Self::Parse => 1,
            Self::Review => 2,
            Self::Report => 3,
        }
    }

    /// Step at `index`, if any
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Route name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Upload => "upload",
            Self::Parse => "parse",
            Self::Review => "review",
            Self::Report => "report",
        }
    }

    /// Human title shown for the step
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Upload => "Document Upload",
            Self::Parse => "Requirement Analysis",
            Self::Review => "Requirement Review",
            Self::Report => "Report Export",
        }
    }

    /// Identifiers that must be present before the step can be entered
    #[must_use]
    pub const fn requirements(self) -> &'static [Requirement] {
        match self {
            Self::Upload => &[],
            Self::Parse => &[Requirement::Document],
            Self::Review => &[Requirement::Document, Requirement::Parse],
            Self::Report => &[Requirement::Document, Requirement::Parse, Requirement::Review],
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Step {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "upload" | "0" => Ok(Self::Upload),
            "parse" | "1" => Ok(Self::Parse),
            "review" | "validate" | "2" => Ok(Self::Review),
            "report" | "export" | "3" => Ok(Self::Report),
            _ => Err(format!("Unknown step: {s}. Use upload, parse, review or report")),
        }
    }
}

/// An identifier a guard can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Requirement {
    /// `documentId`
    Document,
    /// `parseId`
    Parse,
    /// `reviewId`
    Review,
}

impl Requirement {
    /// Parameter name as it appears in paths and storage
    #[must_use]
    pub const fn param(self) -> &'static str {
        match self {
            Self::Document => "documentId",
            Self::Parse => "parseId",
            Self::Review => "reviewId",
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.param())
    }
}

/// Where guards read identifiers from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuardMode {
    /// Identifiers come from the persisted store
    #[default]
    Store,
    /// Identifiers come from the route's own path parameters
    Params,
}

impl FromStr for GuardMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "store" => Ok(Self::Store),
            "params" | "param" => Ok(Self::Params),
            _ => Err(format!("Unknown guard mode: {s}. Use 'store' or 'params'")),
        }
    }
}

/// Identifiers carried by a route
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RouteParams {
    /// `:documentId`
    #[serde(rename = "documentId", skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    /// `:parseId`
    #[serde(rename = "parseId", skip_serializing_if = "Option::is_none")]
    pub parse_id: Option<String>,
    /// `:reviewId`
    #[serde(rename = "reviewId", skip_serializing_if = "Option::is_none")]
    pub review_id: Option<String>,
}

impl RouteParams {
    /// Snapshot the identifiers held by `store`
    #[must_use]
    pub fn from_store<S: KeyValueStore>(store: &WorkflowStore<S>) -> Self {
        Self {
            document_id: store.document_id().map(String::from),
            parse_id: store.parse_id().map(String::from),
            review_id: store.review_id().map(String::from),
        }
    }

    /// Value for a requirement, treating empty strings as absent
    #[must_use]
    pub fn get(&self, requirement: Requirement) -> Option<&str> {
        let value = match requirement {
            Requirement::Document => self.document_id.as_deref(),
            Requirement::Parse => self.parse_id.as_deref(),
            Requirement::Review => self.review_id.as_deref(),
        };
        value.filter(|v| !v.is_empty())
    }

    /// First requirement of `step` that is not satisfied
    #[must_use]
    pub fn first_missing(&self, step: Step) -> Option<Requirement> {
        step.requirements().iter().copied().find(|r| self.get(*r).is_none())
    }

    /// Furthest step whose requirements are all met
    #[must_use]
    pub fn furthest_step(&self) -> Step {
        Step::ALL
            .iter()
            .rev()
            .copied()
            .find(|s| self.first_missing(*s).is_none())
            .unwrap_or(Step::Upload)
    }

    /// Keep only the identifiers `step` uses
    #[must_use]
    pub fn scoped_to(&self, step: Step) -> Self {
        let keep = |r: Requirement| {
            if step.requirements().contains(&r) {
                self.get(r).map(String::from)
            } else {
                None
            }
        };
        Self {
            document_id: keep(Requirement::Document),
            parse_id: keep(Requirement::Parse),
            review_id: keep(Requirement::Review),
        }
    }
}

/// A step plus the identifiers it was reached with
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    /// Target step
    pub step: Step,
    /// Path parameters
    pub params: RouteParams,
}

impl Route {
    /// A route to `step` carrying the relevant subset of `params`
    #[must_use]
    pub fn new(step: Step, params: &RouteParams) -> Self {
        Self {
            step,
            params: params.scoped_to(step),
        }
    }

    /// Match a concrete path against the route table.
    ///
    /// Query strings and trailing slashes are ignored. Returns `None` for
    /// paths that match no step.
    #[must_use]
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        let (step, params) = match segments.as_slice() {
            [] => (Step::Upload, RouteParams::default()),
            ["documents", doc, "parse"] => (
                Step::Parse,
                RouteParams {
                    document_id: Some(decode_segment(doc)),
                    ..RouteParams::default()
                },
            ),
            ["documents", doc, "parse", parse, "review"] => (
                Step::Review,
                RouteParams {
                    document_id: Some(decode_segment(doc)),
                    parse_id: Some(decode_segment(parse)),
                    review_id: None,
                },
            ),
            ["documents", doc, "parse", parse, "review", review, "report"] => (
                Step::Report,
                RouteParams {
                    document_id: Some(decode_segment(doc)),
                    parse_id: Some(decode_segment(parse)),
                    review_id: Some(decode_segment(review)),
                },
            ),
            _ => return None,
        };
        Some(Self { step, params })
    }

    /// Render the concrete path, or `None` while a parameter is missing.
    ///
    /// Ids are escaped per segment, so [`Route::parse`] reads the same
    /// route back.
    #[must_use]
    pub fn to_path(&self) -> Option<String> {
        let segment = |r: Requirement| self.params.get(r).map(encode_segment);
        let path = match self.step {
            Step::Upload => "/".to_string(),
            Step::Parse => format!("/documents/{}/parse", segment(Requirement::Document)?),
            Step::Review => format!(
                "/documents/{}/parse/{}/review",
                segment(Requirement::Document)?,
                segment(Requirement::Parse)?
            ),
            Step::Report => format!(
                "/documents/{}/parse/{}/review/{}/report",
                segment(Requirement::Document)?,
                segment(Requirement::Parse)?,
                segment(Requirement::Review)?
            ),
        };
        Some(path)
    }

    /// Page title for this route
    #[must_use]
    pub fn title(&self) -> String {
        page_title(Some(self.step))
    }
}

/// Outcome of a navigation attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// The guard let the navigation through
    Allowed(Route),
    /// The guard sent the user somewhere earlier
    Redirected {
        /// Step originally requested
        from: Step,
        /// Route actually entered
        to: Route,
        /// Identifier that was missing
        missing: Requirement,
    },
}

impl Navigation {
    /// The route that ends up being displayed
    #[must_use]
    pub const fn route(&self) -> &Route {
        match self {
            Self::Allowed(route) | Self::Redirected { to: route, .. } => route,
        }
    }

    /// Whether the guard changed the destination
    #[must_use]
    pub const fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirected { .. })
    }
}

/// Title for a step, or the bare application title
#[must_use]
pub fn page_title(step: Option<Step>) -> String {
    step.map_or_else(|| APP_TITLE.to_string(), |s| format!("{} - {APP_TITLE}", s.title()))
}

/// Applies step guards
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Router {
    guard: GuardMode,
    dev_mode: bool,
}

impl Router {
    /// Create a router; `dev_mode` disables every guard
    #[must_use]
    pub const fn new(guard: GuardMode, dev_mode: bool) -> Self {
        Self { guard, dev_mode }
    }

    /// Guard mode in effect
    #[must_use]
    pub const fn guard(&self) -> GuardMode {
        self.guard
    }

    /// Whether guards are disabled
    #[must_use]
    pub const fn dev_mode(&self) -> bool {
        self.dev_mode
    }

    /// Decide where a navigation to `target` lands.
    ///
    /// In [`GuardMode::Store`] the identifiers come from `stored`, and a
    /// missing one sends the user to the furthest earlier step that is
    /// reachable. In [`GuardMode::Params`] the identifiers come from
    /// `target.params`, and anything missing sends the user back to upload.
    #[must_use]
    pub fn resolve(&self, target: &Route, stored: &RouteParams) -> Navigation {
        if self.dev_mode {
            return Navigation::Allowed(target.clone());
        }

        match self.guard {
            GuardMode::Store => match stored.first_missing(target.step) {
                None => Navigation::Allowed(Route::new(target.step, stored)),
                Some(missing) => {
                    let fallback = Step::ALL[..target.step.index()]
                        .iter()
                        .rev()
                        .copied()
                        .find(|s| stored.first_missing(*s).is_none())
                        .unwrap_or(Step::Upload);
                    Navigation::Redirected {
                        from: target.step,
                        to: Route::new(fallback, stored),
                        missing,
                    }
                },
            },
            GuardMode::Params => match target.params.first_missing(target.step) {
                None => Navigation::Allowed(target.clone()),
                Some(missing) => Navigation::Redirected {
                    from: target.step,
                    to: Route::new(Step::Upload, &RouteParams::default()),
                    missing,
                },
            },
        }
    }

    /// Navigate to `step` using the identifiers held by `store`.
    ///
    /// The landing step is recorded as the store's current step.
    pub fn navigate<S: KeyValueStore>(
        &self,
        step: Step,
        store: &mut WorkflowStore<S>,
    ) -> Navigation {
        let stored = RouteParams::from_store(store);
        let target = Route::new(step, &stored);
        self.finish(&target, &stored, store)
    }

    /// Navigate to an explicit route, e.g. one parsed from a path.
    ///
    /// The landing step is recorded as the store's current step.
    pub fn navigate_route<S: KeyValueStore>(
        &self,
        target: &Route,
        store: &mut WorkflowStore<S>,
    ) -> Navigation {
        let stored = RouteParams::from_store(store);
        self.finish(target, &stored, store)
    }

    fn finish<S: KeyValueStore>(
        &self,
        target: &Route,
        stored: &RouteParams,
        store: &mut WorkflowStore<S>,
    ) -> Navigation {
        let navigation = self.resolve(target, stored);
        let landed = navigation.route();
        log::debug!("navigated to {} ({})", landed.step, landed.title());
        if let Navigation::Redirected { from, missing, .. } = &navigation {
            log::info!("{from} needs {missing}; redirected to {}", landed.step);
        }
        store.set_current_step(landed.step.index());
        navigation
    }
}
