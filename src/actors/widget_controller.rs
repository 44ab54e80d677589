use crate::debounce::Debouncer;
use crate::dom::{Document, NodeId, PageHandles};
use crate::error::Result;
use crate::github::{hits_or_empty, SearchBackend};
use crate::models::{RepositoryHit, SearchQuery, WidgetSnapshot};
use crate::render::{self, CANDIDATE_CLASS, OWNER_KEY, REMOVE_CONTROL_CLASS, STARS_KEY};
use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort, SpawnErr};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Quiet period after the last keystroke before a search goes out
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Owns the page and reacts to its events, one at a time
pub struct WidgetController;

/// Messages the controller can handle
#[derive(Debug)]
pub enum WidgetMessage {
    /// The search input now holds this value
    Input(String),
    /// Click somewhere inside the candidate container
    CandidateClick(NodeId),
    /// Click somewhere inside the saved container
    SavedClick(NodeId),
    /// The debounce delay for this query elapsed
    RunSearch { generation: u64, query: SearchQuery },
    /// A search task finished
    SearchCompleted {
        request: u64,
        query: SearchQuery,
        outcome: Result<Vec<RepositoryHit>>,
    },
    /// Current view of the page
    Snapshot(RpcReplyPort<WidgetSnapshot>),
    /// Counters since mount
    GetStats(RpcReplyPort<WidgetStats>),
    /// The page is going away
    Teardown,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WidgetStats {
    pub searches_issued: u64,
    pub searches_failed: u64,
    pub stale_discarded: u64,
    pub saved_total: u64,
}

/// Arguments for mounting the controller on a page
pub struct WidgetArgs {
    pub document: Document,
    pub handles: PageHandles,
    pub backend: Arc<dyn SearchBackend>,
    pub debounce: Duration,
    /// Receives a snapshot whenever the candidate or saved list changes
    pub repaint: Option<mpsc::UnboundedSender<WidgetSnapshot>>,
}

impl WidgetArgs {
    /// Fresh search page wired to `backend`
    pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
        let (document, handles) = Document::with_search_page();
        Self {
            document,
            handles,
            backend,
            debounce: DEFAULT_DEBOUNCE,
            repaint: None,
        }
    }

    pub fn debounce(mut self, delay: Duration) -> Self {
        self.debounce = delay;
        self
    }

    pub fn repaint(mut self, tx: mpsc::UnboundedSender<WidgetSnapshot>) -> Self {
        self.repaint = Some(tx);
        self
    }
}

pub struct WidgetState {
    document: Document,
    handles: PageHandles,
    backend: Arc<dyn SearchBackend>,
    debouncer: Debouncer,
    /// Bumped on clear and save; a debounced run from an older generation is dropped
    generation: u64,
    /// Tag of the only search whose completion may still render
    latest_request: u64,
    repaint: Option<mpsc::UnboundedSender<WidgetSnapshot>>,
    stats: WidgetStats,
}

impl WidgetState {
    /// Makes any in-flight search stale and drops a pending debounced run
    fn invalidate_searches(&mut self) {
        self.debouncer.cancel_pending();
        self.generation += 1;
        self.latest_request += 1;
    }

    fn notify_repaint(&mut self) {
        if let Some(tx) = &self.repaint {
            let snapshot = render::snapshot(&self.document, &self.handles);
            if tx.send(snapshot).is_err() {
                debug!("Repaint listener dropped");
                self.repaint = None;
            }
        }
    }

    fn on_input(&mut self, myself: &ActorRef<WidgetMessage>, value: String) {
        let query = SearchQuery::from_input(&value);
        self.document.set_value(self.handles.input, value);

        if query.is_empty() {
            self.invalidate_searches();
            render::clear_candidates(&mut self.document, self.handles.candidates);
            self.notify_repaint();
            return;
        }

        let me = myself.clone();
        let generation = self.generation;
        self.debouncer.schedule(async move {
            if let Err(e) = me.send_message(WidgetMessage::RunSearch { generation, query }) {
                warn!("Failed to deliver debounced search: {}", e);
            }
        });
    }

    fn on_run_search(
        &mut self,
        myself: &ActorRef<WidgetMessage>,
        generation: u64,
        query: SearchQuery,
    ) {
        // Fired before a clear or save but delivered after it
        if generation != self.generation {
            self.stats.stale_discarded += 1;
            debug!(query = %query, generation, "Dropping debounced search from before a reset");
            return;
        }

        self.latest_request += 1;
        self.stats.searches_issued += 1;
        let request = self.latest_request;
        debug!(query = %query, request, "Issuing search");

        let backend = Arc::clone(&self.backend);
        let me = myself.clone();
        tokio::spawn(async move {
            let outcome = backend.search(query.as_str()).await;
            if let Err(e) = me.send_message(WidgetMessage::SearchCompleted {
                request,
                query,
                outcome,
            }) {
                debug!(request, "Controller gone before search completed: {}", e);
            }
        });
    }

    fn on_search_completed(
        &mut self,
        request: u64,
        query: SearchQuery,
        outcome: Result<Vec<RepositoryHit>>,
    ) {
        if request != self.latest_request {
            self.stats.stale_discarded += 1;
            debug!(
                query = %query,
                request,
                latest = self.latest_request,
                "Discarding stale search result"
            );
            return;
        }

        if outcome.is_err() {
            self.stats.searches_failed += 1;
        }
        let hits = hits_or_empty(query.as_str(), outcome);
        render::render_candidates(&mut self.document, self.handles.candidates, &hits);
        debug!(query = %query, request, rendered = hits.len(), "Candidates repainted");
        self.notify_repaint();
    }

    fn on_candidate_click(&mut self, target: NodeId) {
        let doc = &self.document;
        if !doc.is_inclusive_descendant(target, self.handles.candidates) {
            return;
        }
        let Some(candidate) = doc.closest(target, CANDIDATE_CLASS) else {
            return;
        };

        let name = doc.text_content(candidate);
        let owner = doc.data(candidate, OWNER_KEY).unwrap_or_default().to_string();
        let stars = doc.data(candidate, STARS_KEY).unwrap_or_default().to_string();

        render::render_saved_card(&mut self.document, self.handles.saved, &name, &owner, &stars);
        self.stats.saved_total += 1;
        info!(name = %name, owner = %owner, "Saved repository");

        self.document.set_value(self.handles.input, "");
        self.invalidate_searches();
        render::clear_candidates(&mut self.document, self.handles.candidates);
        self.notify_repaint();
    }

    fn on_saved_click(&mut self, target: NodeId) {
        let doc = &self.document;
        if !doc.is_inclusive_descendant(target, self.handles.saved)
            || !doc.has_class(target, REMOVE_CONTROL_CLASS)
        {
            return;
        }
        let Some(card) = doc.parent(target) else {
            return;
        };
        if card == self.handles.saved {
            return;
        }

        self.document.remove(card);
        debug!(card = %card, "Removed saved card");
        self.notify_repaint();
    }
}

impl WidgetController {
    /// Attaches a controller to the page described by `args`.
    ///
    /// The handle resolves once the controller has stopped and `post_stop` has run.
    pub async fn mount(
        args: WidgetArgs,
    ) -> std::result::Result<(ActorRef<WidgetMessage>, JoinHandle<()>), SpawnErr> {
        Actor::spawn(None, WidgetController, args).await
    }
}

#[ractor::async_trait]
impl Actor for WidgetController {
    type Msg = WidgetMessage;
    type State = WidgetState;
    type Arguments = WidgetArgs;

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        args: Self::Arguments,
    ) -> std::result::Result<Self::State, ActorProcessingErr> {
        info!(debounce_ms = args.debounce.as_millis() as u64, "Mounting search widget");

        Ok(WidgetState {
            document: args.document,
            handles: args.handles,
            backend: args.backend,
            debouncer: Debouncer::new(args.debounce),
            generation: 0,
            latest_request: 0,
            repaint: args.repaint,
            stats: WidgetStats::default(),
        })
    }

    async fn handle(
        &self,
        myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> std::result::Result<(), ActorProcessingErr> {
        match message {
            WidgetMessage::Input(value) => state.on_input(&myself, value),
            WidgetMessage::CandidateClick(target) => state.on_candidate_click(target),
            WidgetMessage::SavedClick(target) => state.on_saved_click(target),
            WidgetMessage::RunSearch { generation, query } => {
                state.on_run_search(&myself, generation, query)
            }
            WidgetMessage::SearchCompleted {
                request,
                query,
                outcome,
            } => state.on_search_completed(request, query, outcome),
            WidgetMessage::Snapshot(reply) => {
                if !reply.is_closed() {
                    let _ = reply.send(render::snapshot(&state.document, &state.handles));
                }
            }
            WidgetMessage::GetStats(reply) => {
                if !reply.is_closed() {
                    let _ = reply.send(state.stats.clone());
                }
            }
            WidgetMessage::Teardown => {
                info!("Tearing down search widget");
                state.invalidate_searches();
                myself.stop(Some("Teardown requested".to_string()));
            }
        }

        Ok(())
    }

    async fn post_stop(
        &self,
        _myself: ActorRef<Self::Msg>,
        state: &mut Self::State,
    ) -> std::result::Result<(), ActorProcessingErr> {
        info!(
            searches_issued = state.stats.searches_issued,
            saved_total = state.stats.saved_total,
            "Search widget stopped"
        );
        Ok(())
    }
}
