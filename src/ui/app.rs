use aws_config::SdkConfig;
use ratatui::widgets::ListState;
use tracing::debug;

use crate::aws::{RegionContext, Request};
use crate::regions::{self, RegionInfo};
use crate::types::{LogLine, LogsOutcome};
use crate::ui::events::AppEvent;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mode {
    Normal,
    RegionPicker,
    Help,
}

/// Which of the two selection panes receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Focus {
    Clusters,
    Services,
}

/// The cascading selection state machine: region -> cluster -> service ->
/// log view.
///
/// Selecting at any level discards everything below it. Each level keeps a
/// sequence number that is bumped when a load is issued; a completion event
/// whose sequence no longer matches belongs to a superseded selection and is
/// dropped, so a slow response can never clobber a newer selection.
pub struct App {
    shared_config: SdkConfig,
    pub ctx: RegionContext,

    pub clusters: Vec<String>,
    pub cluster_state: ListState,
    pub selected_cluster: Option<String>,
    pub clusters_loading: bool,

    pub services: Vec<String>,
    pub service_state: ListState,
    pub selected_service: Option<String>,
    pub services_loading: bool,

    pub log_lines: Vec<LogLine>,
    pub log_scroll: usize,
    pub logs_loading: bool,
    pub show_timestamps: bool,

    // One-line message surfaced in the status bar (listing/redeploy errors,
    // redeploy acks). Log-pipeline outcomes render in the log view instead.
    pub status: Option<String>,

    pub focus: Focus,
    pub mode: Mode,
    pub region_state: ListState,
    pub should_quit: bool,

    cluster_seq: u64,
    service_seq: u64,
    log_seq: u64,
}

impl App {
    pub fn new(shared_config: SdkConfig, region: &'static RegionInfo) -> Self {
        let ctx = RegionContext::bind(&shared_config, region);
        Self {
            shared_config,
            ctx,
            clusters: Vec::new(),
            cluster_state: ListState::default(),
            selected_cluster: None,
            clusters_loading: false,
            services: Vec::new(),
            service_state: ListState::default(),
            selected_service: None,
            services_loading: false,
            log_lines: Vec::new(),
            log_scroll: 0,
            logs_loading: false,
            show_timestamps: false,
            status: None,
            focus: Focus::Clusters,
            mode: Mode::Normal,
            region_state: ListState::default(),
            should_quit: false,
            cluster_seq: 0,
            service_seq: 0,
            log_seq: 0,
        }
    }

    /// Issue a cluster listing for the currently bound region.
    pub fn reload_clusters(&mut self) -> Request {
        self.cluster_seq += 1;
        self.clusters_loading = true;
        Request::LoadClusters {
            seq: self.cluster_seq,
            ctx: self.ctx.clone(),
        }
    }

    /// Rebind both clients to the region at `index` in the catalog and
    /// reload the cluster list. Everything scoped below the region is
    /// dropped immediately; responses still in flight for the previous
    /// region are rejected later by sequence number.
    pub fn switch_region(&mut self, index: usize) -> Option<Request> {
        let region = regions::AWS_REGIONS.get(index)?;
        self.ctx = RegionContext::bind(&self.shared_config, region);
        self.clusters.clear();
        self.cluster_state.select(None);
        self.selected_cluster = None;
        self.clear_services();
        self.clear_logs();
        self.focus = Focus::Clusters;
        self.status = None;
        Some(self.reload_clusters())
    }

    /// Commit the cluster at `index` and load its services. Out-of-range
    /// indexes (input racing a reload) are ignored.
    pub fn select_cluster(&mut self, index: usize) -> Option<Request> {
        let cluster = self.clusters.get(index)?.clone();
        self.cluster_state.select(Some(index));
        self.selected_cluster = Some(cluster.clone());
        self.clear_services();
        self.clear_logs();
        self.service_seq += 1;
        self.services_loading = true;
        Some(Request::LoadServices {
            seq: self.service_seq,
            ctx: self.ctx.clone(),
            cluster,
        })
    }

    /// Commit the service at `index` and kick off the log pipeline.
    pub fn select_service(&mut self, index: usize) -> Option<Request> {
        let cluster = self.selected_cluster.clone()?;
        let service = self.services.get(index)?.clone();
        self.service_state.select(Some(index));
        self.selected_service = Some(service.clone());
        self.clear_logs();
        self.log_seq += 1;
        self.logs_loading = true;
        Some(Request::LoadLogs {
            seq: self.log_seq,
            ctx: self.ctx.clone(),
            cluster,
            service,
        })
    }

    /// Force a new deployment of the current selection. Without a full
    /// cluster+service selection there is nothing to redeploy and no request
    /// is issued.
    pub fn redeploy_selected(&mut self) -> Option<Request> {
        let cluster = self.selected_cluster.clone()?;
        let service = self.selected_service.clone()?;
        self.status = Some(format!("redeploying {service}..."));
        Some(Request::Redeploy {
            ctx: self.ctx.clone(),
            cluster,
            service,
        })
    }

    /// Fold a completed background request into the selection state.
    pub fn apply(&mut self, event: AppEvent) {
        match event {
            AppEvent::Key(_) => {}
            AppEvent::ClustersLoaded { seq, result } => {
                if seq != self.cluster_seq {
                    debug!("dropping stale cluster list (seq {seq}, current {})", self.cluster_seq);
                    return;
                }
                self.clusters_loading = false;
                match result {
                    Ok(clusters) => {
                        self.cluster_state
                            .select(if clusters.is_empty() { None } else { Some(0) });
                        self.clusters = clusters;
                    }
                    Err(e) => {
                        self.clusters.clear();
                        self.cluster_state.select(None);
                        self.status = Some(format!("failed to list clusters: {e}"));
                    }
                }
            }
            AppEvent::ServicesLoaded { seq, result } => {
                if seq != self.service_seq {
                    debug!("dropping stale service list (seq {seq}, current {})", self.service_seq);
                    return;
                }
                self.services_loading = false;
                match result {
                    Ok(services) => {
                        self.service_state
                            .select(if services.is_empty() { None } else { Some(0) });
                        self.services = services;
                        self.focus = Focus::Services;
                    }
                    Err(e) => {
                        self.services.clear();
                        self.service_state.select(None);
                        self.status = Some(format!("failed to list services: {e}"));
                    }
                }
            }
            AppEvent::LogsLoaded { seq, outcome } => {
                if seq != self.log_seq {
                    debug!("dropping stale log batch (seq {seq}, current {})", self.log_seq);
                    return;
                }
                self.logs_loading = false;
                match outcome {
                    LogsOutcome::Lines(lines) => {
                        self.log_lines = lines;
                        self.log_scroll = 0;
                    }
                    LogsOutcome::NoLogGroup => {
                        self.set_log_notice("Could not find log group for this service.");
                    }
                    LogsOutcome::NoStreams => {
                        self.set_log_notice("No log streams found for this service.");
                    }
                    LogsOutcome::Failed(e) => {
                        self.set_log_notice(&format!("Error fetching logs: {e}"));
                    }
                }
            }
            AppEvent::RedeployDone { service, result } => match result {
                Ok(()) => self.status = Some(format!("forced new deployment of {service}")),
                Err(e) => self.status = Some(format!("redeploy of {service} failed: {e}")),
            },
        }
    }

    fn clear_services(&mut self) {
        self.services.clear();
        self.service_state.select(None);
        self.selected_service = None;
        self.services_loading = false;
    }

    fn clear_logs(&mut self) {
        self.log_lines.clear();
        self.log_scroll = 0;
        self.logs_loading = false;
    }

    fn set_log_notice(&mut self, message: &str) {
        self.log_lines = vec![LogLine {
            timestamp: None,
            message: message.to_string(),
        }];
        self.log_scroll = 0;
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Clusters => Focus::Services,
            Focus::Services => Focus::Clusters,
        };
    }

    pub fn move_up(&mut self) {
        match self.focus {
            Focus::Clusters => list_previous(&mut self.cluster_state, self.clusters.len()),
            Focus::Services => list_previous(&mut self.service_state, self.services.len()),
        }
    }

    pub fn move_down(&mut self) {
        match self.focus {
            Focus::Clusters => list_next(&mut self.cluster_state, self.clusters.len()),
            Focus::Services => list_next(&mut self.service_state, self.services.len()),
        }
    }

    /// Enter on the focused pane commits the highlighted entry.
    pub fn activate_highlighted(&mut self) -> Option<Request> {
        match self.focus {
            Focus::Clusters => {
                let index = self.cluster_state.selected()?;
                self.select_cluster(index)
            }
            Focus::Services => {
                let index = self.service_state.selected()?;
                self.select_service(index)
            }
        }
    }

    pub fn open_region_picker(&mut self) {
        let current = regions::region_index(self.ctx.region().code).unwrap_or(0);
        self.region_state.select(Some(current));
        self.mode = Mode::RegionPicker;
    }

    pub fn region_picker_previous(&mut self) {
        list_previous(&mut self.region_state, regions::AWS_REGIONS.len());
    }

    pub fn region_picker_next(&mut self) {
        list_next(&mut self.region_state, regions::AWS_REGIONS.len());
    }

    /// Confirm the highlighted region. Re-picking the active region rebinds
    /// and reloads, which doubles as a manual refresh.
    pub fn confirm_region_pick(&mut self) -> Option<Request> {
        self.mode = Mode::Normal;
        let index = self.region_state.selected()?;
        self.switch_region(index)
    }

    pub fn logs_page_up(&mut self, page_size: usize) {
        self.log_scroll = self.log_scroll.saturating_sub(page_size);
    }

    pub fn logs_page_down(&mut self, page_size: usize) {
        let max_offset = self.log_lines.len().saturating_sub(1);
        self.log_scroll = (self.log_scroll + page_size).min(max_offset);
    }
}

fn list_next(state: &mut ListState, len: usize) {
    if len == 0 {
        return;
    }
    let i = match state.selected() {
        Some(i) if i + 1 >= len => 0,
        Some(i) => i + 1,
        None => 0,
    };
    state.select(Some(i));
}

fn list_previous(state: &mut ListState, len: usize) {
    if len == 0 {
        return;
    }
    let i = match state.selected() {
        Some(0) | None => len - 1,
        Some(i) => i - 1,
    };
    state.select(Some(i));
}
